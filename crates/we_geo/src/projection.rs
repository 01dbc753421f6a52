// crates/we_geo/src/projection.rs

//! 局部平面投影
//!
//! 以区域中心为原点的等距圆柱近似：
//!
//! ```text
//! x = Δλ · R · cos(φ₀)    (东向, 米)
//! y = Δφ · R              (北向, 米)
//! ```
//!
//! 只适用于几十公里量级的小区域，不做大地线修正。

use crate::bounds::GeoBounds;
use crate::geometry::Point2D;
use serde::{Deserialize, Serialize};

/// 地球平均半径 [m]
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// 局部平面投影
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalProjection {
    /// 原点经度 [度]
    origin_lon: f64,
    /// 原点纬度 [度]
    origin_lat: f64,
    /// 每度经度对应的米数
    m_per_deg_lon: f64,
    /// 每度纬度对应的米数
    m_per_deg_lat: f64,
}

impl LocalProjection {
    /// 以给定经纬度为原点
    pub fn new(origin_lon: f64, origin_lat: f64) -> Self {
        let m_per_deg_lat = EARTH_RADIUS.to_radians();
        Self {
            origin_lon,
            origin_lat,
            m_per_deg_lon: m_per_deg_lat * origin_lat.to_radians().cos(),
            m_per_deg_lat,
        }
    }

    /// 以边界框中心为原点
    pub fn centered_on(bounds: &GeoBounds) -> Self {
        let c = bounds.center();
        Self::new(c.x, c.y)
    }

    /// 经纬度 -> 局部平面坐标 [m]
    #[inline]
    pub fn forward(&self, lon: f64, lat: f64) -> Point2D {
        Point2D::new(
            (lon - self.origin_lon) * self.m_per_deg_lon,
            (lat - self.origin_lat) * self.m_per_deg_lat,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_zero() {
        let proj = LocalProjection::new(120.25, 30.25);
        let p = proj.forward(120.25, 30.25);
        assert!(p.x.abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
    }

    #[test]
    fn test_one_degree_latitude() {
        let proj = LocalProjection::new(0.0, 0.0);
        let p = proj.forward(0.0, 1.0);
        // 2πR/360 ≈ 111194.9 m
        assert!((p.y - 111_194.93).abs() < 0.1);
    }

    #[test]
    fn test_longitude_shrinks_with_latitude() {
        let equator = LocalProjection::new(0.0, 0.0).forward(1.0, 0.0);
        let sixty = LocalProjection::new(0.0, 60.0).forward(1.0, 60.0);
        assert!((sixty.x / equator.x - 0.5).abs() < 1e-12);
    }
}
