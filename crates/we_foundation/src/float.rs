// crates/we_foundation/src/float.rs

//! 有限值检查与数值常量
//!
//! 场计算的每一帧在发布前都要求全部有限，这里提供统一的检查入口。

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// 数值常量
// ============================================================================

/// 时间比较容差 [s]
pub const TIME_EPSILON: f64 = 1e-9;

// ============================================================================
// 非有限值错误
// ============================================================================

/// 非有限值错误
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NonFiniteError {
    /// 非法的浮点值（NaN 或 Inf）
    pub value: f64,
    /// 出现位置（数组下标）
    pub index: usize,
}

impl fmt::Display for NonFiniteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_nan() {
            write!(f, "下标 {} 处的值为 NaN", self.index)
        } else {
            write!(f, "下标 {} 处的值为无穷大: {}", self.index, self.value)
        }
    }
}

impl std::error::Error for NonFiniteError {}

/// 检查切片中所有值是否有限，返回第一个非有限值
pub fn all_finite(values: &[f64]) -> Result<(), NonFiniteError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(NonFiniteError {
            value: values[index],
            index,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_finite_reports_first_index() {
        let values = [0.0, 1.0, f64::NAN, f64::INFINITY];
        let err = all_finite(&values).unwrap_err();
        assert_eq!(err.index, 2);
        assert!(err.to_string().contains("NaN"));
        assert!(all_finite(&[0.0, -3.5]).is_ok());
    }
}
