// crates/we_physics/src/waves/spectrum.rs

//! 波浪频谱
//!
//! 一维频谱密度 S(f) [m²/Hz] 与方向分布 D(θ)。
//!
//! # Pierson-Moskowitz（双参数 Bretschneider 形式）
//!
//! ```text
//! S(f) = 5/16 · Hs² · fp⁴ · f⁻⁵ · exp(-5/4 · (fp/f)⁴)
//! ```
//!
//! 其零阶矩为 Hs²/16。
//!
//! # JONSWAP
//!
//! ```text
//! S_J(f) = (1 - 0.287 ln γ) · S_PM(f) · γ^r
//! r = exp(-(f - fp)² / (2 σ² fp²)),  σ = 0.07 (f ≤ fp), 0.09 (f > fp)
//! ```
//!
//! 归一化系数 `1 - 0.287 ln γ` 使零阶矩近似保持 Hs²/16。

use std::f64::consts::PI;
use we_config::{SpectrumModel, SpectrumSpec};
use we_foundation::{WeError, WeResult};

/// 频谱密度
pub trait SpectralDensity: Send + Sync {
    /// 频率 f [Hz] 处的谱密度 [m²/Hz]
    fn density(&self, f: f64) -> f64;

    /// 谱峰频率 [Hz]
    fn peak_frequency(&self) -> f64;

    /// 模型名称
    fn name(&self) -> &'static str;
}

/// Pierson-Moskowitz 谱
#[derive(Debug, Clone, Copy)]
pub struct PiersonMoskowitz {
    hs: f64,
    fp: f64,
}

impl PiersonMoskowitz {
    /// 由有效波高与谱峰周期创建
    pub fn new(hs: f64, tp: f64) -> Self {
        Self { hs, fp: 1.0 / tp }
    }
}

impl SpectralDensity for PiersonMoskowitz {
    fn density(&self, f: f64) -> f64 {
        if f <= 0.0 {
            return 0.0;
        }
        let ratio4 = (self.fp / f).powi(4);
        5.0 / 16.0 * self.hs * self.hs * self.fp.powi(4) * f.powi(-5) * (-1.25 * ratio4).exp()
    }

    fn peak_frequency(&self) -> f64 {
        self.fp
    }

    fn name(&self) -> &'static str {
        "PM"
    }
}

/// JONSWAP 谱
#[derive(Debug, Clone, Copy)]
pub struct Jonswap {
    base: PiersonMoskowitz,
    gamma: f64,
    normalization: f64,
}

impl Jonswap {
    /// 由有效波高、谱峰周期与峰值增强因子创建
    pub fn new(hs: f64, tp: f64, gamma: f64) -> Self {
        Self {
            base: PiersonMoskowitz::new(hs, tp),
            gamma,
            normalization: 1.0 - 0.287 * gamma.ln(),
        }
    }

    /// 峰值增强因子
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl SpectralDensity for Jonswap {
    fn density(&self, f: f64) -> f64 {
        if f <= 0.0 {
            return 0.0;
        }
        let fp = self.base.fp;
        let sigma = if f <= fp { 0.07 } else { 0.09 };
        let r = (-(f - fp).powi(2) / (2.0 * sigma * sigma * fp * fp)).exp();
        self.normalization * self.base.density(f) * self.gamma.powf(r)
    }

    fn peak_frequency(&self) -> f64 {
        self.base.fp
    }

    fn name(&self) -> &'static str {
        "JONSWAP"
    }
}

/// 按请求选择频谱模型
pub fn spectrum_for(spec: &SpectrumSpec) -> WeResult<Box<dyn SpectralDensity>> {
    spec.validate()?;
    match &spec.model {
        SpectrumModel::PiersonMoskowitz => Ok(Box::new(PiersonMoskowitz::new(spec.hs, spec.tp))),
        SpectrumModel::Jonswap => Ok(Box::new(Jonswap::new(spec.hs, spec.tp, spec.gamma))),
        SpectrumModel::Unrecognized(name) => {
            Err(WeError::invalid_spectrum(format!("未知的波浪谱模型: {name}")))
        }
    }
}

// ============================================================================
// 方向分布
// ============================================================================

/// 余弦平方方向分布
///
/// 在 `main ± spread/2` 内 `D(θ) ∝ cos²(π(θ - main)/spread)`，
/// 离散后归一化使 `Σ D·Δθ = 1`。扩展角为 0 时退化为单一方向。
#[derive(Debug, Clone, Copy)]
pub struct DirectionalSpreading {
    main_deg: f64,
    spread_deg: f64,
}

impl DirectionalSpreading {
    /// 创建方向分布
    pub fn new(main_deg: f64, spread_deg: f64) -> Self {
        Self {
            main_deg,
            spread_deg,
        }
    }

    /// 离散为 `(方向 [度], 权重 D·Δθ)`，权重之和为 1
    pub fn bins(&self, n: usize) -> Vec<(f64, f64)> {
        if self.spread_deg <= 0.0 || n <= 1 {
            return vec![(normalize_deg(self.main_deg), 1.0)];
        }

        let width = self.spread_deg / n as f64;
        let raw: Vec<(f64, f64)> = (0..n)
            .map(|j| {
                let offset = -0.5 * self.spread_deg + (j as f64 + 0.5) * width;
                let weight = (PI * offset / self.spread_deg).cos().powi(2);
                (normalize_deg(self.main_deg + offset), weight)
            })
            .collect();

        let total: f64 = raw.iter().map(|(_, w)| w).sum();
        raw.into_iter().map(|(dir, w)| (dir, w / total)).collect()
    }
}

/// 角度归一化到 [0, 360)
#[inline]
fn normalize_deg(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 梯形积分零阶矩
    fn m0(s: &dyn SpectralDensity) -> f64 {
        let n = 20000;
        let (f0, f1) = (0.01, 3.0);
        let df = (f1 - f0) / n as f64;
        (0..n)
            .map(|i| {
                let f = f0 + (i as f64 + 0.5) * df;
                s.density(f) * df
            })
            .sum()
    }

    #[test]
    fn test_pm_zeroth_moment() {
        let pm = PiersonMoskowitz::new(2.0, 8.0);
        let hs = 4.0 * m0(&pm).sqrt();
        assert!((hs - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_pm_peak_location() {
        let pm = PiersonMoskowitz::new(2.0, 8.0);
        let fp = pm.peak_frequency();
        assert!((fp - 0.125).abs() < 1e-12);
        assert!(pm.density(fp) > pm.density(0.9 * fp));
        assert!(pm.density(fp) > pm.density(1.1 * fp));
        assert_eq!(pm.density(0.0), 0.0);
    }

    #[test]
    fn test_jonswap_enhanced_peak() {
        let pm = PiersonMoskowitz::new(2.0, 8.0);
        let js = Jonswap::new(2.0, 8.0, 3.3);
        let fp = 0.125;
        assert!(js.density(fp) > 2.0 * pm.density(fp));
        let hs = 4.0 * m0(&js).sqrt();
        assert!((hs - 2.0).abs() < 0.1);
    }

    #[test]
    fn test_jonswap_gamma_one_is_pm() {
        let pm = PiersonMoskowitz::new(1.5, 6.0);
        let js = Jonswap::new(1.5, 6.0, 1.0);
        for &f in &[0.1, 0.2, 0.4] {
            assert!((pm.density(f) - js.density(f)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_spectrum_for_selects_model() {
        let pm = spectrum_for(&SpectrumSpec::pierson_moskowitz(2.0, 8.0)).unwrap();
        assert_eq!(pm.name(), "PM");
        let js = spectrum_for(&SpectrumSpec::jonswap(2.0, 8.0, 3.3)).unwrap();
        assert_eq!(js.name(), "JONSWAP");
        assert!(spectrum_for(&SpectrumSpec::pierson_moskowitz(-1.0, 8.0)).is_err());
    }

    #[test]
    fn test_spreading_weights_sum_to_one() {
        let bins = DirectionalSpreading::new(270.0, 30.0).bins(16);
        assert_eq!(bins.len(), 16);
        let total: f64 = bins.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-12);
        // 中间方向权重最大
        assert!(bins[7].1 > bins[0].1);
        assert!(bins.iter().all(|(d, _)| (255.0..=285.0).contains(d)));
    }

    #[test]
    fn test_zero_spread_single_direction() {
        let bins = DirectionalSpreading::new(-90.0, 0.0).bins(16);
        assert_eq!(bins.len(), 1);
        assert!((bins[0].0 - 270.0).abs() < 1e-12);
        assert_eq!(bins[0].1, 1.0);
    }

    #[test]
    fn test_spreading_wraps_north() {
        let bins = DirectionalSpreading::new(0.0, 40.0).bins(4);
        assert!(bins.iter().all(|(d, _)| *d < 20.0 || *d > 340.0));
    }
}
