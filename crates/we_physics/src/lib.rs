// crates/we_physics/src/lib.rs

//! WaveEnv 物理计算层
//!
//! 从请求参数到波面高度场的全部确定性计算：
//!
//! - [`grid`]: 由区域与离散参数生成受点数上限约束的规则网格
//! - [`wind`]: 均匀定常风场
//! - [`waves`]: PM/JONSWAP 频谱、色散关系与随机相位的波浪实现
//! - [`field`]: 线性叠加的波面场计算
//!
//! 网格与波浪实现创建后不可变，可以在线程间无锁共享；
//! 场计算是 `(实现, 网格, t)` 的纯函数。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod field;
pub mod grid;
pub mod waves;
pub mod wind;

/// 重力加速度 [m/s²]
pub const G: f64 = 9.81;

// 重导出核心类型
pub use field::FieldEvaluator;
pub use grid::{Grid, GridBuilder};
pub use waves::{Realization, RealizationStats, SpectralRealizer, WaveComponent};
pub use wind::WindField;
