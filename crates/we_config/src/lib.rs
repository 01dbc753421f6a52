// crates/we_config/src/lib.rs

//! WaveEnv Config Layer
//!
//! 配置层，定义模拟请求的全部输入结构及其校验规则，以及引擎调优参数。
//!
//! # 模块概览
//!
//! - [`request`]: 区域、风场、波浪谱、离散、时间参数与完整请求
//! - [`engine_config`]: 频谱离散、调度与场计算的调优参数
//! - [`error`]: 配置文件错误类型
//!
//! # 层级架构
//!
//! ```text
//! we_cli       ─> SimulationRequest, EngineConfig
//! we_workflow  ─> 校验请求并启动任务
//! we_physics   ─> 读取请求参数构造网格与波浪实现
//! we_config    ─> (本层)
//! we_geo / we_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine_config;
pub mod error;
pub mod request;

// 重导出核心类型
pub use engine_config::{EngineConfig, EvaluationConfig, SchedulerConfig, SpectrumBinConfig};
pub use error::ConfigError;
pub use request::{
    Discretization, Region, Retention, SimulationRequest, SpectrumModel, SpectrumSpec,
    TimeSpec, TotalDuration, WindSpec,
};
