// crates/we_physics/src/waves/realization.rs

//! 波浪实现
//!
//! 把频谱 S(f) 与方向分布 D(θ) 离散成有限个线性波分量：
//!
//! ```text
//! aᵢⱼ = sqrt(2 · S(fᵢ) · Δf · D(θⱼ)·Δθ)
//! kᵢ  由 ωᵢ² = g·k·tanh(k·h) 求得，h 取区域代表水深
//! φᵢⱼ ~ U[0, 2π)，由任务种子确定
//! ```
//!
//! 同一种子与参数总是得到逐位相同的分量集合。

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use we_config::{SpectrumBinConfig, SpectrumSpec, WindSpec};
use we_foundation::{ensure, WeError, WeResult};

use super::dispersion::wavenumber;
use super::spectrum::{spectrum_for, DirectionalSpreading};

/// 单个波浪分量
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveComponent {
    /// 频率 [Hz]
    pub frequency: f64,
    /// 传播方向 [度]，罗盘方位
    pub direction_deg: f64,
    /// 振幅 [m]
    pub amplitude: f64,
    /// 初相位 [rad]
    pub phase: f64,
    /// 波数 [rad/m]
    pub wavenumber: f64,
}

impl WaveComponent {
    /// 角频率 ω = 2πf [rad/s]
    #[inline]
    pub fn omega(&self) -> f64 {
        2.0 * PI * self.frequency
    }

    /// 波数向量 (kx, ky)，x 指东、y 指北
    #[inline]
    pub fn wave_vector(&self) -> DVec2 {
        let rad = self.direction_deg.to_radians();
        DVec2::new(self.wavenumber * rad.sin(), self.wavenumber * rad.cos())
    }
}

/// 波浪实现（创建后不可变）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Realization {
    components: Vec<WaveComponent>,
    /// 预计算的波数向量，与 components 一一对应
    wave_vectors: Vec<DVec2>,
    /// 预计算的角频率
    omegas: Vec<f64>,
    model: String,
    hs: f64,
    tp: f64,
    main_direction_deg: f64,
    depth: f64,
    seed: u64,
}

impl Realization {
    /// 由分量集合直接构造
    pub fn from_components(components: Vec<WaveComponent>, depth: f64, seed: u64) -> Self {
        let wave_vectors = components.iter().map(WaveComponent::wave_vector).collect();
        let omegas = components.iter().map(WaveComponent::omega).collect();
        Self {
            components,
            wave_vectors,
            omegas,
            model: "custom".into(),
            hs: 0.0,
            tp: 0.0,
            main_direction_deg: 0.0,
            depth,
            seed,
        }
    }

    /// 全部分量
    pub fn components(&self) -> &[WaveComponent] {
        &self.components
    }

    /// 分量数
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// 是否没有分量
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// 波数向量
    pub(crate) fn wave_vectors(&self) -> &[DVec2] {
        &self.wave_vectors
    }

    /// 角频率
    pub(crate) fn omegas(&self) -> &[f64] {
        &self.omegas
    }

    /// 计算水深 [m]
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// 随机种子
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 主浪向 [度]
    pub fn main_direction_deg(&self) -> f64 {
        self.main_direction_deg
    }

    /// 统计量
    pub fn stats(&self) -> RealizationStats {
        let energy: f64 = self
            .components
            .iter()
            .map(|c| 0.5 * c.amplitude * c.amplitude)
            .sum();
        let peak = self
            .components
            .iter()
            .max_by(|a, b| a.amplitude.total_cmp(&b.amplitude));
        RealizationStats {
            model: self.model.clone(),
            component_count: self.components.len(),
            target_hs: self.hs,
            implied_hs: 4.0 * energy.sqrt(),
            target_tp: self.tp,
            peak_frequency: peak.map_or(0.0, |c| c.frequency),
            max_amplitude: peak.map_or(0.0, |c| c.amplitude),
            main_direction_deg: self.main_direction_deg,
            depth: self.depth,
        }
    }
}

/// 波浪实现统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealizationStats {
    /// 频谱模型
    pub model: String,
    /// 分量数
    pub component_count: usize,
    /// 请求的有效波高 [m]
    pub target_hs: f64,
    /// 离散谱对应的有效波高 4·sqrt(Σa²/2) [m]
    pub implied_hs: f64,
    /// 请求的谱峰周期 [s]
    pub target_tp: f64,
    /// 振幅最大分量的频率 [Hz]
    pub peak_frequency: f64,
    /// 最大振幅 [m]
    pub max_amplitude: f64,
    /// 主浪向 [度]
    pub main_direction_deg: f64,
    /// 计算水深 [m]
    pub depth: f64,
}

/// 频谱离散器
#[derive(Debug, Clone, Default)]
pub struct SpectralRealizer {
    bins: SpectrumBinConfig,
}

impl SpectralRealizer {
    /// 使用给定离散配置
    pub fn new(bins: SpectrumBinConfig) -> Self {
        Self { bins }
    }

    /// 生成波浪实现
    ///
    /// # 参数
    /// - `wind`: 风场，主浪向缺省时使用风向
    /// - `spectrum`: 波浪谱参数
    /// - `depth`: 代表水深 [m]
    /// - `seed`: 相位随机种子
    pub fn realize(
        &self,
        wind: &WindSpec,
        spectrum: &SpectrumSpec,
        depth: f64,
        seed: u64,
    ) -> WeResult<Realization> {
        wind.validate()?;
        let density = spectrum_for(spectrum)?;
        ensure!(
            depth.is_finite() && depth >= 0.0,
            WeError::invalid_input(format!("水深({depth}) 必须为非负有限值"))
        );
        ensure!(
            self.bins.frequency_bins > 0 && self.bins.direction_bins > 0,
            WeError::config("频率与方向分箱数必须为正")
        );

        let fp = density.peak_frequency();
        let f_min = self.bins.min_freq_ratio * fp;
        let f_max = self.bins.max_freq_ratio * fp;
        let df = (f_max - f_min) / self.bins.frequency_bins as f64;

        let main_direction = spectrum.resolved_direction(wind);
        let directions = DirectionalSpreading::new(main_direction, spectrum.directional_spread_deg)
            .bins(self.bins.direction_bins);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut components = Vec::with_capacity(self.bins.frequency_bins * directions.len());

        for i in 0..self.bins.frequency_bins {
            let f = f_min + (i as f64 + 0.5) * df;
            let s = density.density(f);
            let k = wavenumber(2.0 * PI * f, depth);

            for &(direction_deg, weight) in &directions {
                // 每个分箱都消耗一次随机数，相位与振幅阈值无关
                let phase = rng.random::<f64>() * TAU;
                let amplitude = (2.0 * s * df * weight).sqrt();
                if amplitude < self.bins.min_amplitude || !amplitude.is_finite() {
                    continue;
                }
                components.push(WaveComponent {
                    frequency: f,
                    direction_deg,
                    amplitude,
                    phase,
                    wavenumber: k,
                });
            }
        }

        ensure!(
            !components.is_empty(),
            WeError::invalid_spectrum("离散后没有振幅高于阈值的波浪分量")
        );

        tracing::debug!(
            "波浪实现: 模型={}, 分量={}, fp={:.4} Hz, 主浪向={:.1}°, 水深={:.2} m",
            density.name(),
            components.len(),
            fp,
            main_direction,
            depth
        );

        let mut realization = Realization::from_components(components, depth, seed);
        realization.model = density.name().to_string();
        realization.hs = spectrum.hs;
        realization.tp = spectrum.tp;
        realization.main_direction_deg = main_direction;
        Ok(realization)
    }
}
