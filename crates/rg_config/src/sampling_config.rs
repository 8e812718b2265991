// crates/rg_config/src/sampling_config.rs

//! SamplingConfig - 径向采样配置
//!
//! 描述一次批量径向采样所需的全部参数：几何、地球模型、经度约定、
//! NaN 处理、圆心列表以及可选的特征集合与笛卡尔重采样尺寸。
//! 除 `geometry` 外所有字段都有默认值。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use rg_geo::{EarthModel, Ellipsoid, GeoPoint, LonConvention, EARTH_MEAN_RADIUS};
use rg_radial::{FeatureSet, GeometrySpec, NanPolicy, RadialGrid, RadialSampler};

/// 径向采样配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// 径向几何
    pub geometry: GeometrySpec,

    /// 地球模型
    #[serde(default)]
    pub earth_model: EarthModelConfig,

    /// 经度约定
    #[serde(default)]
    pub lon_convention: LonConventionConfig,

    /// 特征聚合的 NaN 处理
    #[serde(default)]
    pub nan_policy: NanPolicy,

    /// 圆心列表
    #[serde(default)]
    pub centers: Vec<GeoPoint>,

    /// 特征集合，缺省时按每个环生成圆盘特征
    #[serde(default)]
    pub features: Option<FeatureSet>,

    /// 笛卡尔重采样边长（节点数）
    #[serde(default)]
    pub regrid_size: Option<usize>,
}

/// 地球模型配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EarthModelConfig {
    /// 椭球体：按名称或 (a, f) 指定
    Ellipsoid {
        /// 预定义名称（wgs84 / grs80）
        #[serde(default = "default_ellipsoid_name")]
        name: String,
        /// 自定义长半轴 (m)，需与 `f` 同时给出
        #[serde(default, skip_serializing_if = "Option::is_none")]
        a: Option<f64>,
        /// 自定义扁率
        #[serde(default, skip_serializing_if = "Option::is_none")]
        f: Option<f64>,
    },
    /// 正球体
    Sphere {
        /// 半径 (m)
        #[serde(default = "default_sphere_radius")]
        radius_m: f64,
    },
}

fn default_ellipsoid_name() -> String {
    "wgs84".to_string()
}
fn default_sphere_radius() -> f64 {
    EARTH_MEAN_RADIUS
}

impl Default for EarthModelConfig {
    fn default() -> Self {
        Self::Ellipsoid {
            name: default_ellipsoid_name(),
            a: None,
            f: None,
        }
    }
}

impl EarthModelConfig {
    /// 解析为地球模型
    pub fn resolve(&self) -> Result<EarthModel, ConfigError> {
        let model = match self {
            Self::Ellipsoid { a: Some(a), f: Some(f), .. } => EarthModel::Ellipsoid(Ellipsoid::new(*a, *f)),
            Self::Ellipsoid { a: Some(_), f: None, .. } => {
                return Err(ConfigError::Missing("earth_model.f".to_string()))
            }
            Self::Ellipsoid { a: None, f: Some(_), .. } => {
                return Err(ConfigError::Missing("earth_model.a".to_string()))
            }
            Self::Ellipsoid { name, .. } => EarthModel::Ellipsoid(
                Ellipsoid::from_name(name)
                    .ok_or_else(|| ConfigError::invalid("earth_model.name", name, "未知椭球体"))?,
            ),
            Self::Sphere { radius_m } => EarthModel::Sphere { radius_m: *radius_m },
        };
        model
            .validate()
            .map_err(|e| ConfigError::invalid("earth_model", model.name(), e.to_string()))?;
        Ok(model)
    }
}

/// 经度约定配置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LonConventionConfig {
    /// 按源网格推断
    #[default]
    #[serde(rename = "auto")]
    Auto,
    /// [-180, 180)
    #[serde(rename = "signed_180")]
    Signed180,
    /// [0, 360)
    #[serde(rename = "positive_360")]
    Positive360,
}

impl LonConventionConfig {
    /// 固定约定；`Auto` 返回 `None`
    pub fn resolve(self) -> Option<LonConvention> {
        match self {
            Self::Auto => None,
            Self::Signed180 => Some(LonConvention::Signed180),
            Self::Positive360 => Some(LonConvention::Positive360),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            geometry: GeometrySpec::new(50.0, 50.0, 500.0, 10.0),
            earth_model: EarthModelConfig::default(),
            lon_convention: LonConventionConfig::default(),
            nan_policy: NanPolicy::default(),
            centers: Vec::new(),
            features: None,
            regrid_size: None,
        }
    }
}

impl SamplingConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// 从 JSON 字符串解析并校验
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: SamplingConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = self.build_grid()?;
        self.earth_model.resolve()?;

        for (i, c) in self.centers.iter().enumerate() {
            if !c.lat.is_finite() || !(-90.0..=90.0).contains(&c.lat) {
                return Err(ConfigError::invalid(
                    format!("centers[{i}].lat"),
                    c.lat,
                    "纬度必须在 [-90, 90] 内",
                ));
            }
            if !c.lon.is_finite() {
                return Err(ConfigError::invalid(format!("centers[{i}].lon"), c.lon, "经度必须为有限数"));
            }
        }

        if let Some(size) = self.regrid_size {
            if size < 2 {
                return Err(ConfigError::invalid("regrid_size", size, "边长至少为 2"));
            }
            if grid.outer_radius() <= 0.0 {
                return Err(ConfigError::invalid(
                    "regrid_size",
                    size,
                    "最外环半径为 0 时无法重采样",
                ));
            }
        }

        if let Some(features) = &self.features {
            validate_features(features, &grid)?;
        }

        Ok(())
    }

    /// 构建径向几何
    pub fn build_grid(&self) -> Result<RadialGrid, ConfigError> {
        self.geometry
            .build()
            .map_err(|e| ConfigError::from_core("geometry", e))
    }

    /// 按配置创建采样器
    pub fn sampler(&self) -> Result<RadialSampler, ConfigError> {
        let sampler = RadialSampler::new(self.earth_model.resolve()?);
        Ok(match self.lon_convention.resolve() {
            Some(convention) => sampler.with_lon_convention(convention),
            None => sampler,
        })
    }

    /// 生效的特征集合
    pub fn feature_set(&self, grid: &RadialGrid) -> FeatureSet {
        self.features
            .clone()
            .unwrap_or_else(|| FeatureSet::standard(grid))
    }

    /// 圆心列表，为空时报缺失
    pub fn require_centers(&self) -> Result<&[GeoPoint], ConfigError> {
        if self.centers.is_empty() {
            return Err(ConfigError::Missing("centers".to_string()));
        }
        Ok(&self.centers)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }
}

fn validate_features(features: &FeatureSet, grid: &RadialGrid) -> Result<(), ConfigError> {
    for (i, &r) in features.disc_radii_km.iter().enumerate() {
        if !r.is_finite() || r < 0.0 {
            return Err(ConfigError::invalid(format!("features.disc_radii_km[{i}]"), r, "半径必须为非负有限数"));
        }
    }
    for (i, &r) in features.ring_radii_km.iter().enumerate() {
        if grid.ring_index_of(r).is_none() {
            return Err(ConfigError::invalid(format!("features.ring_radii_km[{i}]"), r, "几何中没有该环"));
        }
    }
    for (i, d) in features.directional.iter().enumerate() {
        if grid.ring_index_of(d.radius_km).is_none() {
            return Err(ConfigError::invalid(
                format!("features.directional[{i}].radius_km"),
                d.radius_km,
                "几何中没有该环",
            ));
        }
        for bearing in [d.bearing_a, d.bearing_b] {
            if grid.azimuth_index_of(bearing).is_none() {
                return Err(ConfigError::invalid(
                    format!("features.directional[{i}]"),
                    bearing,
                    "几何中没有该方位角",
                ));
            }
        }
    }
    Ok(())
}
