// crates/rg_radial/src/lib.rs

//! RadialGeo 径向采样核心
//!
//! 在圆心周围按 (半径, 方位角) 极坐标格架采样规则经纬度网格。
//!
//! # 模块
//!
//! - `geometry`: 半径 / 方位角序列与采样顺序
//! - `sampler`: 测地线目标点 + 多线性插值
//! - `samples`: 采样位置与结果数组
//! - `features`: 圆心值、圆盘均值 / 极差、方向差等统计特征
//! - `scaling`: 最小-最大归一化
//! - `regrid`: 极坐标样本到方形笛卡尔网格
//! - `batch`: 多圆心批量采样（`parallel` 特性下并行）
//!
//! # 示例
//!
//! ```
//! use rg_radial::prelude::*;
//! use rg_grid::SourceGrid;
//! use rg_geo::GeoPoint;
//!
//! let source = SourceGrid::from_fn(
//!     vec![-125.0, -115.0],
//!     vec![40.0, 50.0],
//!     1,
//!     |_, _, _| 7.0,
//! ).unwrap();
//!
//! let grid = GeometrySpec::new(0.0, 500.0, 500.0, 180.0).build().unwrap();
//! let samples = RadialSampler::default()
//!     .sample(&source, GeoPoint::new(45.0, -120.0), &grid)
//!     .unwrap();
//!
//! assert_eq!(samples.n_samples(), 6);
//! assert!(samples.values().iter().all(|v| (v - 7.0).abs() < 1e-12));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod features;
pub mod geometry;
pub mod regrid;
pub mod sampler;
pub mod samples;
pub mod scaling;

/// 预导入模块
pub mod prelude {
    pub use crate::batch::sample_many;
    pub use crate::features::{FeatureSet, NanPolicy, RadialFeatures};
    pub use crate::geometry::{GeometrySpec, RadialGrid};
    pub use crate::sampler::RadialSampler;
    pub use crate::samples::{InterpolatedSamples, SampleLocations};
}

// 重导出常用类型
pub use batch::{sample_many, sample_many_located, sample_many_sequential, LocatedSamples};
pub use features::{DirectionalSpec, FeatureSet, NamedFeature, NanPolicy, RadialFeatures};
pub use geometry::{build_geometry, GeometrySpec, RadialGrid};
pub use regrid::CartesianRegridder;
pub use sampler::{radial_interp, RadialSampler};
pub use samples::{InterpolatedSamples, SampleLocations};
pub use scaling::{min_max_scale, MinMaxScaler};
