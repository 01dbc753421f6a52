// crates/we_foundation/src/metrics.rs

//! 运行统计计数
//!
//! 调度线程写、查询线程读的无锁统计量：已发布帧数、淘汰帧数、超时步数等。

use std::sync::atomic::{AtomicU64, Ordering};

/// 原子计数器
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    /// 创建零值计数器
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// 加一，返回加之前的值
    #[inline]
    pub fn inc(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }

    /// 增加指定值
    #[inline]
    pub fn add(&self, n: u64) {
        if n > 0 {
            self.0.fetch_add(n, Ordering::Relaxed);
        }
    }

    /// 当前值
    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// 原子最大值记录（f64 按位存储，仅适用于非负值）
#[derive(Debug, Default)]
pub struct MaxGauge(AtomicU64);

impl MaxGauge {
    /// 创建零值记录
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// 记录一个观测值，保留最大者
    pub fn observe(&self, value: f64) {
        if value.is_nan() || value < 0.0 {
            return;
        }
        // 非负 f64 的位模式与数值同序
        self.0.fetch_max(value.to_bits(), Ordering::Relaxed);
    }

    /// 当前最大值
    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }
}
