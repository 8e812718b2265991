// crates/rg_config/src/lib.rs

//! RadialGeo Config Layer
//!
//! 配置层，提供 JSON 格式的径向采样配置及其校验。
//!
//! # 模块概览
//!
//! - [`sampling_config`]: SamplingConfig 采样配置
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! rg_cli     ─> uses SamplingConfig
//! rg_config  ─> SamplingConfig (本层)
//! rg_radial  ─> GeometrySpec, RadialSampler, FeatureSet
//! rg_geo / rg_grid / rg_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod sampling_config;

// 重导出核心类型
pub use error::ConfigError;
pub use sampling_config::{EarthModelConfig, LonConventionConfig, SamplingConfig};
