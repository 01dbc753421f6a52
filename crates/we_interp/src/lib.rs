// crates/we_interp/src/lib.rs

//! 插值模块
//!
//! - [`spatial`]: 规则网格上的双线性插值，边界处取边/角点值
//! - [`temporal`]: 两帧之间的线性时间插值
//!
//! 两者在节点处都精确返回节点值：落在格点上的空间查询返回该格点的存储值，
//! 落在帧时刻上的时间查询返回该帧的值。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod spatial;
pub mod temporal;

// 重导出核心类型
pub use spatial::{AxisStencil, LatticeInterpolator};
pub use temporal::TemporalInterpolator;
