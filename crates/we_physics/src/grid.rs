// crates/we_physics/src/grid.rs

//! 网格生成
//!
//! 由区域和离散参数生成规则经纬度网格。网格按行存储（外层纬度、内层经度），
//! 下标 `row * cols + col`。
//!
//! # 点数上限
//!
//! 朴素点数 `ceil(Δlon/dx) · ceil(Δlat/dy)` 超过 `max_points` 时，
//! `dx`、`dy` 同乘 `sqrt(naive / max_points)`，保持间距比例不变。
//! 格点包含起点与（整除时的）终点，实际点数可能略多于朴素估计，
//! 此时继续按同一方式放大间距直到满足上限。

use glam::DVec2;
use serde::{Deserialize, Serialize};
use we_config::{Discretization, Region};
use we_foundation::{WeError, WeResult};
use we_geo::{GeoBounds, LocalProjection, Point2D};

/// 格点计数容差，避免 0.5/0.01 这类整除被浮点误差少算一格
const AXIS_EPSILON: f64 = 1e-9;

/// 间距放大的最大轮数
const MAX_TIGHTEN_ROUNDS: usize = 64;

/// 规则经纬度网格（创建后不可变）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    /// 区域边界
    bounds: GeoBounds,
    /// 实际经向间距 [度]
    dx: f64,
    /// 实际纬向间距 [度]
    dy: f64,
    /// 列坐标（经度，递增）
    lons: Vec<f64>,
    /// 行坐标（纬度，递增）
    lats: Vec<f64>,
    /// 格点经纬度，行优先
    points: Vec<Point2D>,
    /// 格点局部平面坐标 [m]
    local: Vec<DVec2>,
    /// 代表水深 [m]
    depth: f64,
}

impl Grid {
    /// 格点数
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 是否为空（合法网格至少有一个点）
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 行数（纬向）
    #[inline]
    pub fn rows(&self) -> usize {
        self.lats.len()
    }

    /// 列数（经向）
    #[inline]
    pub fn cols(&self) -> usize {
        self.lons.len()
    }

    /// 实际间距 (dx, dy) [度]
    pub fn spacing(&self) -> (f64, f64) {
        (self.dx, self.dy)
    }

    /// 列坐标
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// 行坐标
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// 格点经纬度
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// 格点局部平面坐标
    pub fn local_points(&self) -> &[DVec2] {
        &self.local
    }

    /// 区域边界
    pub fn bounds(&self) -> &GeoBounds {
        &self.bounds
    }

    /// 代表水深 [m]
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// (行, 列) 对应的线性下标
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.lons.len() + col
    }
}

/// 网格生成器
#[derive(Debug, Clone, Copy)]
pub struct GridBuilder<'a> {
    region: &'a Region,
    discretization: &'a Discretization,
}

impl<'a> GridBuilder<'a> {
    /// 创建生成器
    pub fn new(region: &'a Region, discretization: &'a Discretization) -> Self {
        Self {
            region,
            discretization,
        }
    }

    /// 生成网格
    pub fn build(&self) -> WeResult<Grid> {
        self.region.validate()?;
        self.discretization.validate()?;

        let bounds = self.region.bounds()?;
        let (dx, dy) = self.resolve_spacing(&bounds)?;

        let lons = axis(bounds.lon_min, bounds.lon_max, dx);
        let lats = axis(bounds.lat_min, bounds.lat_max, dy);
        let projection = LocalProjection::centered_on(&bounds);

        let mut points = Vec::with_capacity(lons.len() * lats.len());
        let mut local = Vec::with_capacity(lons.len() * lats.len());
        for &lat in &lats {
            for &lon in &lons {
                points.push(Point2D::new(lon, lat));
                local.push(projection.forward(lon, lat).into());
            }
        }

        tracing::debug!(
            "网格生成: {}x{} = {} 点 (dx={:.6}, dy={:.6})",
            lons.len(),
            lats.len(),
            points.len(),
            dx,
            dy
        );

        Ok(Grid {
            bounds,
            dx,
            dy,
            lons,
            lats,
            points,
            local,
            depth: self.region.representative_depth(),
        })
    }

    /// 确定满足点数上限的实际间距
    fn resolve_spacing(&self, bounds: &GeoBounds) -> WeResult<(f64, f64)> {
        let Discretization { dx, dy, max_points } = *self.discretization;
        let limit = max_points as f64;
        let (mut dx, mut dy) = (dx, dy);

        let naive = (bounds.lon_span() / dx).ceil() * (bounds.lat_span() / dy).ceil();
        if naive > limit {
            let scale = (naive / limit).sqrt();
            dx *= scale;
            dy *= scale;
        }

        for _ in 0..MAX_TIGHTEN_ROUNDS {
            let count = axis_len(bounds.lon_span(), dx) as f64 * axis_len(bounds.lat_span(), dy) as f64;
            if count <= limit {
                return Ok((dx, dy));
            }
            let scale = (count / limit).sqrt();
            dx *= scale;
            dy *= scale;
        }

        Err(WeError::invalid_discretization(format!(
            "无法在 max_points={max_points} 内生成网格"
        )))
    }
}

/// 单轴格点数
#[inline]
fn axis_len(span: f64, step: f64) -> usize {
    (span / step + AXIS_EPSILON).floor() as usize + 1
}

/// 从 min 起按 step 均匀取点，不超过 max
fn axis(min: f64, max: f64, step: f64) -> Vec<f64> {
    (0..axis_len(max - min, step))
        .map(|i| (min + i as f64 * step).min(max))
        .collect()
}
