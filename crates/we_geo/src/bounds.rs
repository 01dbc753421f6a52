// crates/we_geo/src/bounds.rs

//! 经纬度边界框

use crate::geometry::Point2D;
use serde::{Deserialize, Serialize};
use we_foundation::{ensure, WeError, WeResult};

/// 经纬度边界框（闭区间）
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// 最小经度 [度]
    pub lon_min: f64,
    /// 最小纬度 [度]
    pub lat_min: f64,
    /// 最大经度 [度]
    pub lon_max: f64,
    /// 最大纬度 [度]
    pub lat_max: f64,
}

impl GeoBounds {
    /// 创建边界框，要求每个轴 min < max 且均为有限值
    pub fn new(lon_min: f64, lat_min: f64, lon_max: f64, lat_max: f64) -> WeResult<Self> {
        ensure!(
            lon_min.is_finite() && lat_min.is_finite() && lon_max.is_finite() && lat_max.is_finite(),
            WeError::invalid_region("经纬度必须为有限值")
        );
        ensure!(
            lon_min < lon_max,
            WeError::invalid_region(format!("lon_min({lon_min}) 必须小于 lon_max({lon_max})"))
        );
        ensure!(
            lat_min < lat_max,
            WeError::invalid_region(format!("lat_min({lat_min}) 必须小于 lat_max({lat_max})"))
        );
        WeError::check_range("lat_min", lat_min, -90.0, 90.0)
            .and_then(|_| WeError::check_range("lat_max", lat_max, -90.0, 90.0))
            .map_err(|e| WeError::invalid_region(e.to_string()))?;
        Ok(Self {
            lon_min,
            lat_min,
            lon_max,
            lat_max,
        })
    }

    /// 经度跨度 [度]
    #[inline]
    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// 纬度跨度 [度]
    #[inline]
    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// 中心点
    pub fn center(&self) -> Point2D {
        Point2D::new(
            0.5 * (self.lon_min + self.lon_max),
            0.5 * (self.lat_min + self.lat_max),
        )
    }

    /// 点是否在边界框内（含边界）
    #[inline]
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.lon_min && lon <= self.lon_max && lat >= self.lat_min && lat <= self.lat_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bounds() {
        assert!(GeoBounds::new(120.5, 30.0, 120.0, 30.5).is_err());
        assert!(GeoBounds::new(120.0, 30.0, 120.0, 30.5).is_err());
        assert!(GeoBounds::new(120.0, 30.5, 120.5, 30.0).is_err());
        assert!(GeoBounds::new(120.0, 30.0, f64::NAN, 30.5).is_err());
        assert!(GeoBounds::new(0.0, 80.0, 1.0, 95.0).is_err());
    }

    #[test]
    fn test_contains_inclusive() {
        let b = GeoBounds::new(120.0, 30.0, 120.5, 30.5).unwrap();
        assert!(b.contains(120.0, 30.0));
        assert!(b.contains(120.5, 30.5));
        assert!(b.contains(120.25, 30.1));
        assert!(!b.contains(119.0, 30.2));
        assert!(!b.contains(120.5, 35.2));
    }

    #[test]
    fn test_center_and_span() {
        let b = GeoBounds::new(120.0, 30.0, 120.5, 31.0).unwrap();
        assert_eq!(b.center(), Point2D::new(120.25, 30.5));
        assert!((b.lon_span() - 0.5).abs() < 1e-12);
        assert!((b.lat_span() - 1.0).abs() < 1e-12);
    }
}
