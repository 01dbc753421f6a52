// crates/we_physics/src/field.rs

//! 波面场计算
//!
//! 线性叠加：
//!
//! ```text
//! η(x, y, t) = Σ aᵢ · cos(kxᵢ·x + kyᵢ·y − ωᵢ·t + φᵢ)
//! ```
//!
//! (x, y) 为格点在局部平面坐标系中的位置。每个格点内按分量顺序累加，
//! 串行与并行路径的结果逐位一致。

use glam::DVec2;
use rayon::prelude::*;
use we_foundation::{all_finite, ensure, WeError, WeResult};

use crate::grid::Grid;
use crate::waves::Realization;

/// 默认并行阈值（格点数）
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2000;

/// 波面场计算器
#[derive(Debug, Clone, Copy)]
pub struct FieldEvaluator {
    parallel_threshold: usize,
}

impl Default for FieldEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_PARALLEL_THRESHOLD)
    }
}

impl FieldEvaluator {
    /// 创建计算器，格点数不少于 `parallel_threshold` 时使用 rayon 并行
    pub fn new(parallel_threshold: usize) -> Self {
        Self {
            parallel_threshold: parallel_threshold.max(1),
        }
    }

    /// 计算 t 时刻全部格点的波面高度，顺序与网格一致
    pub fn evaluate(&self, realization: &Realization, grid: &Grid, t: f64) -> WeResult<Vec<f64>> {
        let mut values = vec![0.0; grid.len()];
        self.evaluate_into(realization, grid, t, &mut values)?;
        Ok(values)
    }

    /// 计算结果写入给定缓冲区
    pub fn evaluate_into(
        &self,
        realization: &Realization,
        grid: &Grid,
        t: f64,
        out: &mut [f64],
    ) -> WeResult<()> {
        ensure!(
            t.is_finite() && t >= 0.0,
            WeError::invalid_input(format!("计算时刻({t}) 必须为非负有限值"))
        );
        WeError::check_size("field values", grid.len(), out.len())?;

        let local = grid.local_points();
        if grid.len() >= self.parallel_threshold {
            out.par_iter_mut()
                .zip(local.par_iter())
                .for_each(|(v, &p)| *v = surface_elevation(realization, p, t));
        } else {
            for (v, &p) in out.iter_mut().zip(local) {
                *v = surface_elevation(realization, p, t);
            }
        }

        all_finite(out).map_err(|e| {
            WeError::numerical_fault(format!("t={t:.3} s 时波面高度非有限: {e}"))
        })
    }
}

/// 单点波面高度
///
/// `position` 为局部平面坐标 [m]。
#[inline]
pub fn surface_elevation(realization: &Realization, position: DVec2, t: f64) -> f64 {
    let mut eta = 0.0;
    for ((c, k), &omega) in realization
        .components()
        .iter()
        .zip(realization.wave_vectors())
        .zip(realization.omegas())
    {
        eta += c.amplitude * (k.dot(position) - omega * t + c.phase).cos();
    }
    eta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridBuilder;
    use crate::waves::{SpectralRealizer, WaveComponent};
    use std::f64::consts::PI;
    use we_config::{Discretization, Region, SpectrumSpec, WindSpec};

    fn grid(max_points: usize) -> Grid {
        let region = Region::new(120.0, 30.0, 10.0, 120.5, 30.5, 20.0);
        GridBuilder::new(&region, &Discretization::new(0.01, 0.01, max_points))
            .build()
            .unwrap()
    }

    fn realization() -> Realization {
        SpectralRealizer::default()
            .realize(
                &WindSpec::new(10.0, 270.0),
                &SpectrumSpec::pierson_moskowitz(2.0, 8.0),
                15.0,
                11,
            )
            .unwrap()
    }

    #[test]
    fn test_deterministic() {
        let g = grid(400);
        let r = realization();
        let eval = FieldEvaluator::default();
        let a = eval.evaluate(&r, &g, 3.4).unwrap();
        let b = eval.evaluate(&r, &g, 3.4).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let g = grid(3000);
        let r = realization();
        let serial = FieldEvaluator::new(usize::MAX).evaluate(&r, &g, 1.2).unwrap();
        let parallel = FieldEvaluator::new(1).evaluate(&r, &g, 1.2).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_single_component_cosine() {
        let g = grid(100);
        let component = WaveComponent {
            frequency: 0.1,
            direction_deg: 90.0,
            amplitude: 1.5,
            phase: 0.3,
            wavenumber: 0.02,
        };
        let r = Realization::from_components(vec![component], 15.0, 0);
        let t = 2.5;
        let values = FieldEvaluator::default().evaluate(&r, &g, t).unwrap();
        for (v, p) in values.iter().zip(g.local_points()) {
            // 向东传播，只与 x 有关
            let expected = 1.5 * (0.02 * p.x - 2.0 * PI * 0.1 * t + 0.3).cos();
            assert!((v - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_time_evolves_field() {
        let g = grid(100);
        let r = realization();
        let eval = FieldEvaluator::default();
        let a = eval.evaluate(&r, &g, 0.0).unwrap();
        let b = eval.evaluate(&r, &g, 0.2).unwrap();
        assert_ne!(a, b);
        assert!(a.iter().all(|v| v.abs() < 10.0));
    }

    #[test]
    fn test_rejects_invalid_time() {
        let g = grid(100);
        let r = realization();
        let eval = FieldEvaluator::default();
        assert!(eval.evaluate(&r, &g, -1.0).is_err());
        assert!(eval.evaluate(&r, &g, f64::NAN).is_err());
    }

    #[test]
    fn test_non_finite_is_numerical_fault() {
        let g = grid(100);
        let component = WaveComponent {
            frequency: 0.1,
            direction_deg: 0.0,
            amplitude: f64::INFINITY,
            phase: 0.0,
            wavenumber: 0.01,
        };
        let r = Realization::from_components(vec![component], 15.0, 0);
        let err = FieldEvaluator::default().evaluate(&r, &g, 0.0).unwrap_err();
        assert!(matches!(err, WeError::NumericalFault { .. }));
    }

    #[test]
    fn test_buffer_size_checked() {
        let g = grid(100);
        let r = realization();
        let mut out = vec![0.0; g.len() + 1];
        assert!(FieldEvaluator::default()
            .evaluate_into(&r, &g, 0.0, &mut out)
            .is_err());
    }
}
