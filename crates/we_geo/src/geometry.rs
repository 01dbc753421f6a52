// crates/we_geo/src/geometry.rs

//! 几何类型定义
//!
//! `Point2D` 同时用于经纬度（x=经度, y=纬度，单位度）和局部平面坐标（单位米），
//! 语义由所在上下文决定。

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D点
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X坐标（经度或东向距离）
    pub x: f64,
    /// Y坐标（纬度或北向距离）
    pub y: f64,
}

impl Point2D {
    /// 创建点
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<DVec2> for Point2D {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point2D> for DVec2 {
    fn from(p: Point2D) -> Self {
        DVec2::new(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvec2_conversion() {
        let p = Point2D::new(1.5, -2.0);
        let v: DVec2 = p.into();
        assert_eq!(Point2D::from(v), p);
    }
}
