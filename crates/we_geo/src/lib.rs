// crates/we_geo/src/lib.rs

//! WaveEnv 地理坐标模块
//!
//! 提供经纬度点、区域边界框以及以区域中心为原点的局部平面投影。
//!
//! # 模块
//!
//! - `geometry`: 几何类型 (`Point2D`)
//! - `bounds`: 经纬度边界框 (`GeoBounds`)
//! - `projection`: 局部等距圆柱投影 (`LocalProjection`)
//!
//! # 示例
//!
//! ```
//! use we_geo::prelude::*;
//!
//! let bounds = GeoBounds::new(120.0, 30.0, 120.5, 30.5).unwrap();
//! let proj = LocalProjection::centered_on(&bounds);
//! let p = proj.forward(120.25, 30.25);
//! assert!(p.x.abs() < 1e-9 && p.y.abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bounds;
pub mod geometry;
pub mod projection;

/// 预导入模块
pub mod prelude {
    pub use crate::bounds::GeoBounds;
    pub use crate::geometry::Point2D;
    pub use crate::projection::{LocalProjection, EARTH_RADIUS};
}

// 重导出常用类型
pub use bounds::GeoBounds;
pub use geometry::Point2D;
pub use projection::{LocalProjection, EARTH_RADIUS};
