// crates/we_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `WeError` 枚举和 `WeResult` 类型别名。模型层（网格、波浪谱、场计算）
//! 的失败都归入本类型，任务层再将其映射为面向调用方的引擎错误。
//!
//! # 示例
//!
//! ```
//! use we_foundation::error::{WeError, WeResult};
//!
//! fn build() -> WeResult<()> {
//!     Err(WeError::invalid_region("lon_min 必须小于 lon_max"))
//! }
//! assert!(build().is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type WeResult<T> = Result<T, WeError>;

/// WaveEnv 错误类型
#[derive(Error, Debug)]
pub enum WeError {
    // ========================================================================
    // 模型输入错误
    // ========================================================================
    /// 区域无效
    #[error("区域无效: {message}")]
    InvalidRegion {
        /// 说明无效原因
        message: String,
    },

    /// 离散参数无效
    #[error("离散参数无效: {message}")]
    InvalidDiscretization {
        /// 说明无效原因
        message: String,
    },

    /// 波浪谱参数无效
    #[error("波浪谱参数无效: {message}")]
    InvalidSpectrumParams {
        /// 说明无效原因
        message: String,
    },

    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数据超出范围
    #[error("数据超出范围: {field}={value}, 期望范围=[{min}, {max}]")]
    OutOfRange {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    // ========================================================================
    // 运行时错误
    // ========================================================================
    /// 数值异常（NaN/Inf）
    #[error("数值异常: {message}")]
    NumericalFault {
        /// 异常描述
        message: String,
    },

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl WeError {
    /// 区域无效
    pub fn invalid_region(message: impl Into<String>) -> Self {
        Self::InvalidRegion {
            message: message.into(),
        }
    }

    /// 离散参数无效
    pub fn invalid_discretization(message: impl Into<String>) -> Self {
        Self::InvalidDiscretization {
            message: message.into(),
        }
    }

    /// 波浪谱参数无效
    pub fn invalid_spectrum(message: impl Into<String>) -> Self {
        Self::InvalidSpectrumParams {
            message: message.into(),
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 数据超出范围
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 数值异常
    pub fn numerical_fault(message: impl Into<String>) -> Self {
        Self::NumericalFault {
            message: message.into(),
        }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 是否为创建期输入错误（区域、离散、波浪谱）
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRegion { .. }
                | Self::InvalidDiscretization { .. }
                | Self::InvalidSpectrumParams { .. }
        )
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl WeError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &'static str, expected: usize, actual: usize) -> WeResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }

    /// 检查值是否在闭区间内
    #[inline]
    pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> WeResult<()> {
        if !(min..=max).contains(&value) {
            Err(Self::out_of_range(field, value, min, max))
        } else {
            Ok(())
        }
    }
}

// ========================================================================
// 宏
// ========================================================================

/// 条件不满足时提前返回错误
///
/// ```
/// use we_foundation::{ensure, WeError, WeResult};
///
/// fn check(n: usize) -> WeResult<()> {
///     ensure!(n > 0, WeError::invalid_input("n 必须大于 0"));
///     Ok(())
/// }
/// assert!(check(0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

// ========================================================================
// 测试
// ========================================================================
