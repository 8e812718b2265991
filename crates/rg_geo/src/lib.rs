// crates/rg_geo/src/lib.rs
//! RadialGeo 大地测量模块
//!
//! 提供椭球体参数、经纬度点、测地线正解（目标点）与经度约定处理。
//!
//! # 模块
//!
//! - `ellipsoid`: 椭球体定义 (WGS84, GRS80, 正球体)
//! - `geometry`: 经纬度点与距离/方位角
//! - `geodesic`: 测地线正解（Vincenty / 大圆）与地球模型
//! - `longitude`: 经度约定检测与归一化
//!
//! # 示例
//!
//! ```
//! use rg_geo::prelude::*;
//!
//! let center = GeoPoint::new(45.0, -120.0);
//! let dest = EarthModel::WGS84.destination(center, 50.0, 90.0).unwrap();
//! let back = center.vincenty_distance(&dest, &Ellipsoid::WGS84).unwrap();
//! assert!((back - 50_000.0).abs() < 1e-3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod ellipsoid;
pub mod error;
pub mod geodesic;
pub mod geometry;
pub mod longitude;

/// 预导入模块
pub mod prelude {
    pub use crate::ellipsoid::Ellipsoid;
    pub use crate::error::{GeoError, GeoResult};
    pub use crate::geodesic::EarthModel;
    pub use crate::geometry::GeoPoint;
    pub use crate::longitude::LonConvention;
}

// 重导出常用类型
pub use ellipsoid::{Ellipsoid, EARTH_MEAN_RADIUS};
pub use error::{GeoError, GeoResult};
pub use geodesic::{destination_spherical, destination_vincenty, EarthModel};
pub use geometry::GeoPoint;
pub use longitude::LonConvention;
