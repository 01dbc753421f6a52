// crates/we_interp/src/spatial.rs

//! 规则网格双线性插值
//!
//! 网格由递增的列坐标 `xs` 与行坐标 `ys` 描述，数据行优先存储
//! （下标 `row * xs.len() + col`）。
//!
//! ```text
//! v = (1-fx)(1-fy)·v00 + fx(1-fy)·v10 + (1-fx)fy·v01 + fx·fy·v11
//! ```
//!
//! 查询点落在首列之前或末列之后（行同理）时取边界值；单行或单列网格
//! 退化为一维线性插值，单点网格直接返回该点的值。
//!
//! # 示例
//!
//! ```
//! use we_interp::LatticeInterpolator;
//!
//! let xs = [0.0, 1.0];
//! let ys = [0.0, 1.0];
//! let values = [0.0, 1.0, 2.0, 3.0];
//! let interp = LatticeInterpolator::new(&xs, &ys).unwrap();
//! let v = interp.interpolate(&values, 0.5, 0.5).unwrap();
//! assert!((v - 1.5).abs() < 1e-12);
//! ```

use we_foundation::{ensure, WeError, WeResult};

/// 单轴插值模板
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStencil {
    /// 下侧节点
    pub lower: usize,
    /// 上侧节点（边界处与 lower 相同）
    pub upper: usize,
    /// 上侧节点权重，位于 [0, 1)
    pub fraction: f64,
}

impl AxisStencil {
    /// 在递增坐标序列上定位
    pub fn locate(coords: &[f64], x: f64) -> Self {
        let n = coords.len();
        if n <= 1 || x <= coords[0] {
            return Self::node(0);
        }
        if x >= coords[n - 1] {
            return Self::node(n - 1);
        }
        // coords[lower] <= x < coords[lower + 1]
        let lower = coords.partition_point(|&c| c <= x) - 1;
        let upper = lower + 1;
        let fraction = (x - coords[lower]) / (coords[upper] - coords[lower]);
        Self {
            lower,
            upper,
            fraction,
        }
    }

    /// 恰好落在节点上
    #[inline]
    fn node(index: usize) -> Self {
        Self {
            lower: index,
            upper: index,
            fraction: 0.0,
        }
    }
}

/// 规则网格插值器
#[derive(Debug, Clone, Copy)]
pub struct LatticeInterpolator<'a> {
    xs: &'a [f64],
    ys: &'a [f64],
}

impl<'a> LatticeInterpolator<'a> {
    /// 创建插值器，要求坐标非空且严格递增
    pub fn new(xs: &'a [f64], ys: &'a [f64]) -> WeResult<Self> {
        ensure!(
            !xs.is_empty() && !ys.is_empty(),
            WeError::invalid_input("插值网格不能为空")
        );
        ensure!(
            is_strictly_increasing(xs) && is_strictly_increasing(ys),
            WeError::invalid_input("插值网格坐标必须严格递增")
        );
        Ok(Self { xs, ys })
    }

    /// 节点总数
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len() * self.ys.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 计算 (x, y) 处的两个轴模板
    #[inline]
    pub fn stencil(&self, x: f64, y: f64) -> (AxisStencil, AxisStencil) {
        (AxisStencil::locate(self.xs, x), AxisStencil::locate(self.ys, y))
    }

    /// 在 (x, y) 处插值
    pub fn interpolate(&self, values: &[f64], x: f64, y: f64) -> WeResult<f64> {
        WeError::check_size("lattice values", self.len(), values.len())?;
        ensure!(
            x.is_finite() && y.is_finite(),
            WeError::invalid_input("插值坐标必须为有限值")
        );

        let (sx, sy) = self.stencil(x, y);
        let cols = self.xs.len();
        let at = |row: usize, col: usize| values[row * cols + col];

        let v00 = at(sy.lower, sx.lower);
        let (fx, fy) = (sx.fraction, sy.fraction);
        if fx == 0.0 && fy == 0.0 {
            return Ok(v00);
        }

        let v10 = at(sy.lower, sx.upper);
        let v01 = at(sy.upper, sx.lower);
        let v11 = at(sy.upper, sx.upper);

        Ok((1.0 - fx) * (1.0 - fy) * v00
            + fx * (1.0 - fy) * v10
            + (1.0 - fx) * fy * v01
            + fx * fy * v11)
    }
}

fn is_strictly_increasing(coords: &[f64]) -> bool {
    coords.iter().all(|c| c.is_finite()) && coords.windows(2).all(|w| w[0] < w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lattice() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let xs = vec![0.0, 1.0, 2.0];
        let ys = vec![10.0, 20.0];
        // v = x + y
        let values = ys
            .iter()
            .flat_map(|&y| xs.iter().map(move |&x| x + y))
            .collect();
        (xs, ys, values)
    }

    #[test]
    fn test_exact_at_nodes() {
        let xs = vec![120.0, 120.01, 120.02, 120.03];
        let ys = vec![30.0, 30.01, 30.02];
        let values: Vec<f64> = (0..12).map(|i| (i as f64 * 0.7).sin() * 1.3).collect();
        let interp = LatticeInterpolator::new(&xs, &ys).unwrap();
        for (row, &y) in ys.iter().enumerate() {
            for (col, &x) in xs.iter().enumerate() {
                let v = interp.interpolate(&values, x, y).unwrap();
                assert_eq!(v, values[row * xs.len() + col]);
            }
        }
    }

    #[test]
    fn test_linear_field_reproduced() {
        let (xs, ys, values) = lattice();
        let interp = LatticeInterpolator::new(&xs, &ys).unwrap();
        let v = interp.interpolate(&values, 1.25, 17.5).unwrap();
        assert!((v - 18.75).abs() < 1e-12);
    }

    #[test]
    fn test_clamped_outside() {
        let (xs, ys, values) = lattice();
        let interp = LatticeInterpolator::new(&xs, &ys).unwrap();
        // 超出末列取边界值
        let v = interp.interpolate(&values, 5.0, 10.0).unwrap();
        assert!((v - 12.0).abs() < 1e-12);
        let v = interp.interpolate(&values, -1.0, 25.0).unwrap();
        assert!((v - 20.0).abs() < 1e-12);
        let v = interp.interpolate(&values, 0.5, 99.0).unwrap();
        assert!((v - 20.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_row_and_point() {
        let xs = vec![0.0, 2.0];
        let ys = vec![5.0];
        let interp = LatticeInterpolator::new(&xs, &ys).unwrap();
        let v = interp.interpolate(&[1.0, 3.0], 0.5, 7.0).unwrap();
        assert!((v - 1.5).abs() < 1e-12);

        let single = [4.2];
        let interp = LatticeInterpolator::new(&single[..1], &single[..1]).unwrap();
        assert_eq!(interp.interpolate(&[-0.8], 100.0, -3.0).unwrap(), -0.8);
    }

    #[test]
    fn test_stencil_locate() {
        let coords = [0.0, 0.5, 1.0];
        let s = AxisStencil::locate(&coords, 0.75);
        assert_eq!((s.lower, s.upper), (1, 2));
        assert!((s.fraction - 0.5).abs() < 1e-12);

        let s = AxisStencil::locate(&coords, 0.5);
        assert_eq!(s.lower, 1);
        assert_eq!(s.fraction, 0.0);

        let s = AxisStencil::locate(&coords, 1.0);
        assert_eq!((s.lower, s.upper), (2, 2));
    }

    #[test]
    fn test_invalid_input() {
        assert!(LatticeInterpolator::new(&[], &[1.0]).is_err());
        assert!(LatticeInterpolator::new(&[1.0, 1.0], &[1.0]).is_err());

        let (xs, ys, values) = lattice();
        let interp = LatticeInterpolator::new(&xs, &ys).unwrap();
        assert!(interp.interpolate(&values[..3], 0.0, 10.0).is_err());
        assert!(interp.interpolate(&values, f64::NAN, 10.0).is_err());
    }
}
