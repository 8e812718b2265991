// crates/rg_grid/src/lib.rs

//! 规则经纬度网格
//!
//! 提供源网格数据的存储与多线性插值。网格由调用方加载并持有，
//! 本模块不做任何文件读写。
//!
//! # 模块
//!
//! - `axis`: 严格单调坐标轴与区间定位
//! - `grid`: 二维 / 三维（带时间维）源网格
//! - `interpolation`: 多线性插值

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod axis;
pub mod grid;
pub mod interpolation;

// 重导出常用类型
pub use axis::{AxisPosition, GridAxis};
pub use grid::SourceGrid;
pub use interpolation::{interpolate_point, MultilinearInterpolator};
