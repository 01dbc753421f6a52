// crates/we_physics/src/wind.rs

//! 均匀定常风场
//!
//! 风向取罗盘方位（0=北，90=东），表示风吹向的方向，与波浪传播方向一致。
//! 参考高度不是 10 m 时按 1/7 幂律换算到 10 m 高度风速。

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use we_config::WindSpec;

use crate::G;

/// 标准参考高度 [m]
pub const STANDARD_HEIGHT: f64 = 10.0;

/// 风廓线幂律指数
const POWER_LAW_EXPONENT: f64 = 1.0 / 7.0;

/// 均匀风场
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindField {
    /// 10 m 高度风速 [m/s]
    speed_10m: f64,
    /// 风向 [度]
    direction_deg: f64,
    /// 风速分量 (u=东向, v=北向) [m/s]
    velocity: DVec2,
}

impl WindField {
    /// 由风场参数创建，必要时换算到 10 m 高度
    pub fn from_spec(spec: &WindSpec) -> Self {
        let speed_10m = to_standard_height(spec.wind_speed, spec.reference_height_m);
        Self::new(speed_10m, spec.wind_direction_deg)
    }

    /// 由 10 m 风速与风向创建
    pub fn new(speed_10m: f64, direction_deg: f64) -> Self {
        let rad = direction_deg.to_radians();
        Self {
            speed_10m,
            direction_deg,
            velocity: DVec2::new(speed_10m * rad.sin(), speed_10m * rad.cos()),
        }
    }

    /// 10 m 高度风速 [m/s]
    pub fn speed(&self) -> f64 {
        self.speed_10m
    }

    /// 风向 [度]
    pub fn direction_deg(&self) -> f64 {
        self.direction_deg
    }

    /// 风速分量 (u, v) [m/s]
    pub fn components(&self) -> (f64, f64) {
        (self.velocity.x, self.velocity.y)
    }

    /// 充分成长海况 (Hs [m], Tp [s])
    ///
    /// Pierson-Moskowitz 经验关系，使用 19.5 m 高度风速：
    /// `Hs = 0.21 U²/g`，`ωp = 0.877 g/U`。风速为零时返回 `None`。
    pub fn fully_developed_sea(&self) -> Option<(f64, f64)> {
        if self.speed_10m <= 0.0 {
            return None;
        }
        let u195 = to_height(self.speed_10m, STANDARD_HEIGHT, 19.5);
        let hs = 0.21 * u195 * u195 / G;
        let omega_p = 0.877 * G / u195;
        Some((hs, 2.0 * PI / omega_p))
    }
}

/// 幂律换算到 10 m 高度
#[inline]
fn to_standard_height(speed: f64, height: f64) -> f64 {
    to_height(speed, height, STANDARD_HEIGHT)
}

#[inline]
fn to_height(speed: f64, from: f64, to: f64) -> f64 {
    if (from - to).abs() < 1e-12 {
        speed
    } else {
        speed * (to / from).powf(POWER_LAW_EXPONENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        let east = WindField::new(10.0, 90.0);
        let (u, v) = east.components();
        assert!((u - 10.0).abs() < 1e-10);
        assert!(v.abs() < 1e-10);

        let west = WindField::new(10.0, 270.0);
        assert!((west.components().0 + 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_reference_height_adjustment() {
        let same = WindField::from_spec(&WindSpec::new(8.0, 0.0));
        assert!((same.speed() - 8.0).abs() < 1e-12);

        let mut spec = WindSpec::new(8.0, 0.0);
        spec.reference_height_m = 40.0;
        let lowered = WindField::from_spec(&spec);
        assert!(lowered.speed() < 8.0);
        assert!((lowered.speed() - 8.0 * 0.25_f64.powf(1.0 / 7.0)).abs() < 1e-12);
    }

    #[test]
    fn test_fully_developed_sea() {
        assert!(WindField::new(0.0, 0.0).fully_developed_sea().is_none());

        let (hs, tp) = WindField::new(10.0, 270.0).fully_developed_sea().unwrap();
        // 10 m/s 风速下充分成长海况约 Hs≈2.6 m, Tp≈8.0 s
        assert!(hs > 2.3 && hs < 2.9);
        assert!(tp > 7.0 && tp < 8.5);
    }
}
