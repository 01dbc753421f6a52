// crates/we_physics/src/waves/dispersion.rs

//! 线性色散关系
//!
//! ```text
//! ω² = g·k·tanh(k·h)
//! ```
//!
//! 以 Eckart 近似为初值做 Newton-Raphson 迭代。

use crate::G;

/// 最小水深 [m]，防止 tanh(kh) 退化
const MIN_DEPTH: f64 = 0.01;

/// Newton 迭代上限
const MAX_ITERATIONS: usize = 20;

/// 求解波数 k [rad/m]
///
/// # 参数
/// - `omega`: 角频率 [rad/s]
/// - `depth`: 水深 [m]
pub fn wavenumber(omega: f64, depth: f64) -> f64 {
    if omega <= 0.0 {
        return 0.0;
    }
    let h = depth.max(MIN_DEPTH);
    let omega2 = omega * omega;

    // Eckart 近似
    let k_deep = omega2 / G;
    let mut k = k_deep / (k_deep * h).tanh().sqrt();

    for _ in 0..MAX_ITERATIONS {
        let tanh_kh = (k * h).tanh();
        let f = omega2 - G * k * tanh_kh;
        let df = -G * (tanh_kh + k * h * (1.0 - tanh_kh * tanh_kh));

        let dk = -f / df;
        k += dk;

        if dk.abs() < 1e-12 * k {
            break;
        }
    }

    k
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn residual(omega: f64, k: f64, h: f64) -> f64 {
        omega * omega - G * k * (k * h).tanh()
    }

    #[test]
    fn test_deep_water_limit() {
        let omega = 2.0 * PI / 5.0;
        let k = wavenumber(omega, 1000.0);
        assert!((k - omega * omega / G).abs() / k < 1e-10);
    }

    #[test]
    fn test_finite_depth_residual() {
        for &(period, depth) in &[(8.0, 15.0), (12.0, 5.0), (2.0, 15.0), (20.0, 0.5)] {
            let omega = 2.0 * PI / period;
            let k = wavenumber(omega, depth);
            assert!(residual(omega, k, depth).abs() < 1e-10, "T={period}, h={depth}");
        }
    }

    #[test]
    fn test_shallow_water_longer_than_deep() {
        let omega = 2.0 * PI / 8.0;
        let k_shallow = wavenumber(omega, 15.0);
        let k_deep = omega * omega / G;
        // 浅水中波长变短，波数变大
        assert!(k_shallow > k_deep);
    }

    #[test]
    fn test_zero_frequency() {
        assert_eq!(wavenumber(0.0, 10.0), 0.0);
    }
}
