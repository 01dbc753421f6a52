// crates/we_config/src/engine_config.rs

//! 引擎调优配置
//!
//! 与单次请求无关、在引擎级别生效的参数：频谱离散分辨率、调度节拍策略
//! 与场计算并行阈值。全部字段都有默认值，配置文件只需写出要覆盖的项。

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 引擎配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 频谱离散
    #[serde(default)]
    pub spectrum: SpectrumBinConfig,

    /// 调度
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// 场计算
    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

/// 频谱离散配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumBinConfig {
    /// 频率分箱数
    #[serde(default = "default_frequency_bins")]
    pub frequency_bins: usize,

    /// 方向分箱数
    #[serde(default = "default_direction_bins")]
    pub direction_bins: usize,

    /// 频率下限与谱峰频率之比
    #[serde(default = "default_min_freq_ratio")]
    pub min_freq_ratio: f64,

    /// 频率上限与谱峰频率之比
    #[serde(default = "default_max_freq_ratio")]
    pub max_freq_ratio: f64,

    /// 振幅下限 [m]，低于此值的分量被丢弃
    #[serde(default = "default_min_amplitude")]
    pub min_amplitude: f64,
}

fn default_frequency_bins() -> usize { 50 }
fn default_direction_bins() -> usize { 16 }
fn default_min_freq_ratio() -> f64 { 0.5 }
fn default_max_freq_ratio() -> f64 { 4.0 }
fn default_min_amplitude() -> f64 { 1e-6 }

impl Default for SpectrumBinConfig {
    fn default() -> Self {
        Self {
            frequency_bins: default_frequency_bins(),
            direction_bins: default_direction_bins(),
            min_freq_ratio: default_min_freq_ratio(),
            max_freq_ratio: default_max_freq_ratio(),
            min_amplitude: default_min_amplitude(),
        }
    }
}

/// 调度配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// 计算落后于墙钟时允许连续补发的步数（0 表示不补发，直接以当前时刻重新计节拍）
    #[serde(default)]
    pub max_catch_up_steps: u32,

    /// 删除任务时等待工作线程退出的上限 [ms]
    #[serde(default = "default_join_timeout_ms")]
    pub join_timeout_ms: u64,
}

fn default_join_timeout_ms() -> u64 { 5000 }

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_catch_up_steps: 0,
            join_timeout_ms: default_join_timeout_ms(),
        }
    }
}

/// 场计算配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// 网格点数达到此值时启用并行计算
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    /// 随机相位种子的附加盐值
    #[serde(default)]
    pub seed_salt: u64,
}

fn default_parallel_threshold() -> usize { 2000 }

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: default_parallel_threshold(),
            seed_salt: 0,
        }
    }
}

impl EngineConfig {
    /// 从 JSON 文件加载
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 保存为 JSON 文件
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.spectrum;
        if s.frequency_bins == 0 {
            return Err(ConfigError::invalid("spectrum.frequency_bins", s.frequency_bins, "必须为正"));
        }
        if s.direction_bins == 0 {
            return Err(ConfigError::invalid("spectrum.direction_bins", s.direction_bins, "必须为正"));
        }
        if !s.min_freq_ratio.is_finite() || s.min_freq_ratio <= 0.0 {
            return Err(ConfigError::invalid("spectrum.min_freq_ratio", s.min_freq_ratio, "必须为正"));
        }
        if !s.max_freq_ratio.is_finite() || s.max_freq_ratio <= s.min_freq_ratio {
            return Err(ConfigError::invalid(
                "spectrum.max_freq_ratio",
                s.max_freq_ratio,
                "必须大于 min_freq_ratio",
            ));
        }
        if s.min_amplitude.is_nan() || s.min_amplitude < 0.0 {
            return Err(ConfigError::invalid("spectrum.min_amplitude", s.min_amplitude, "不能为负"));
        }
        if self.evaluation.parallel_threshold == 0 {
            return Err(ConfigError::invalid(
                "evaluation.parallel_threshold",
                self.evaluation.parallel_threshold,
                "必须为正",
            ));
        }
        Ok(())
    }
}
