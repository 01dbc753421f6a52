// crates/we_foundation/src/lib.rs

//! WaveEnv Foundation Layer
//!
//! 基础层，为波浪模拟引擎的其余 crate 提供公共抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 `WeError` 与 `ensure!` 宏
//! - [`float`]: 有限值检查与数值常量
//! - [`metrics`]: 原子计数器
//!
//! # 示例
//!
//! ```
//! use we_foundation::error::{WeError, WeResult};
//! use we_foundation::ensure;
//!
//! fn positive(x: f64) -> WeResult<f64> {
//!     ensure!(x > 0.0, WeError::invalid_input("x 必须为正"));
//!     Ok(x)
//! }
//!
//! assert!(positive(1.0).is_ok());
//! assert!(positive(-1.0).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod float;
pub mod metrics;

// 重导出常用类型
pub use error::{WeError, WeResult};
pub use float::{all_finite, NonFiniteError};
pub use metrics::{Counter, MaxGauge};
