// crates/we_interp/src/temporal.rs

//! 时间插值器
//!
//! 在两个带时间戳的值之间线性插值：
//!
//! ```text
//! α = (t - t0) / (t1 - t0),   v = (1 - α)·v0 + α·v1
//! ```
//!
//! 采用 `(1-α)·v0 + α·v1` 而非 `v0 + α·(v1-v0)`，保证 α=0 与 α=1 时
//! 逐位返回端点值。
//!
//! # 示例
//!
//! ```
//! use we_interp::TemporalInterpolator;
//!
//! let interp = TemporalInterpolator::new(0.0, 1.0);
//! let v = interp.interpolate(0.5, 10.0, 20.0);
//! assert!((v - 15.0).abs() < 1e-10);
//! ```

/// 两帧之间的线性插值器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalInterpolator {
    t0: f64,
    t1: f64,
}

impl TemporalInterpolator {
    /// 以前后两帧时刻创建
    pub fn new(t0: f64, t1: f64) -> Self {
        Self { t0, t1 }
    }

    /// 前一时刻
    pub fn start(&self) -> f64 {
        self.t0
    }

    /// 后一时刻
    pub fn end(&self) -> f64 {
        self.t1
    }

    /// t 在 [t0, t1] 中的相对位置，截断到 [0, 1]
    #[inline]
    pub fn fraction(&self, t: f64) -> f64 {
        let dt = self.t1 - self.t0;
        if dt.abs() < 1e-14 {
            return 0.0;
        }
        ((t - self.t0) / dt).clamp(0.0, 1.0)
    }

    /// 标量插值
    #[inline]
    pub fn interpolate(&self, t: f64, v0: f64, v1: f64) -> f64 {
        if t <= self.t0 {
            return v0;
        }
        if t >= self.t1 {
            return v1;
        }
        let alpha = self.fraction(t);
        (1.0 - alpha) * v0 + alpha * v1
    }
}
