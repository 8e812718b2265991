// crates/rg_grid/src/interpolation/mod.rs

//! 插值模块
//!
//! - [`multilinear`]: 规则经纬度网格上的多线性插值，域外为 NaN

pub mod multilinear;

pub use multilinear::{interpolate_point, MultilinearInterpolator};
