// crates/rg_radial/src/sampler.rs

//! 径向采样器
//!
//! 把圆心周围每个 (半径, 方位角) 换算为经纬度目标点，再在源网格上做
//! 多线性插值。流程：
//!
//! 1. 校验圆心与几何
//! 2. 按源网格约定归一化圆心经度
//! 3. 环优先、方位角次之逐点求目标点（首环半径大于 0 时前置圆心）
//! 4. 一次性对全部时间片插值，域外点为 NaN
//!
//! 单次调用同步、无共享状态，多圆心并行见 [`crate::batch`]。

use crate::geometry::RadialGrid;
use crate::samples::{InterpolatedSamples, SampleLocations};
use rg_foundation::error::{RgError, RgResult};
use rg_geo::{EarthModel, GeoError, GeoPoint, LonConvention};
use rg_grid::{MultilinearInterpolator, SourceGrid};
use tracing::{debug, warn};

/// 径向采样器
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RadialSampler {
    earth: EarthModel,
    /// 指定经度约定；`None` 时按源网格推断
    lon_convention: Option<LonConvention>,
}

impl RadialSampler {
    /// 使用指定地球模型创建
    pub fn new(earth: EarthModel) -> Self {
        Self {
            earth,
            lon_convention: None,
        }
    }

    /// 固定经度约定（不再从网格推断）
    #[must_use]
    pub fn with_lon_convention(mut self, convention: LonConvention) -> Self {
        self.lon_convention = Some(convention);
        self
    }

    /// 地球模型
    #[inline]
    pub fn earth_model(&self) -> &EarthModel {
        &self.earth
    }

    /// 对给定网格生效的经度约定
    pub fn convention_for(&self, source: &SourceGrid) -> LonConvention {
        self.lon_convention.unwrap_or_else(|| source.lon_convention())
    }

    /// 计算采样位置
    ///
    /// 返回点的经度已按 `convention` 归一化。
    pub fn locations(
        &self,
        center: GeoPoint,
        grid: &RadialGrid,
        convention: LonConvention,
    ) -> RgResult<SampleLocations> {
        validate_center(&center)?;
        let center = center.with_lon(convention.normalize(center.lon));

        let prepend = grid.has_center_sample();
        let mut points = Vec::with_capacity(grid.n_samples());
        if prepend {
            points.push(center);
        }

        for (radius_km, azimuth_deg) in grid.pairs() {
            let dest = self.earth.destination(center, radius_km, azimuth_deg)?;
            points.push(dest.with_lon(convention.normalize(dest.lon)));
        }

        Ok(SampleLocations::new(points, prepend))
    }

    /// 在已知采样位置上插值
    pub fn interpolate_locations(
        &self,
        source: &SourceGrid,
        locations: &SampleLocations,
    ) -> RgResult<InterpolatedSamples> {
        let pairs = locations.lon_lat_pairs();
        let interp = MultilinearInterpolator::new(source, &pairs);

        let n_time = source.n_time();
        let mut values = vec![f64::NAN; pairs.len() * n_time];
        interp.interpolate_into(source, &mut values)?;

        let outside = interp.n_outside();
        if outside > 0 {
            warn!(
                outside,
                total = pairs.len(),
                "radial samples fall outside the source grid, filled with NaN"
            );
        }

        Ok(InterpolatedSamples::from_raw(values, pairs.len(), n_time))
    }

    /// 径向采样
    ///
    /// 返回 `n_samples × n_time` 的结果，第 `i` 行对应第 `i` 个采样位置。
    pub fn sample(
        &self,
        source: &SourceGrid,
        center: GeoPoint,
        grid: &RadialGrid,
    ) -> RgResult<InterpolatedSamples> {
        Ok(self.sample_with_locations(source, center, grid)?.1)
    }

    /// 径向采样，同时返回采样位置
    pub fn sample_with_locations(
        &self,
        source: &SourceGrid,
        center: GeoPoint,
        grid: &RadialGrid,
    ) -> RgResult<(SampleLocations, InterpolatedSamples)> {
        let convention = self.convention_for(source);
        let locations = self.locations(center, grid, convention)?;

        debug!(
            lat = center.lat,
            lon = center.lon,
            rings = grid.n_rings(),
            azimuths = grid.n_azimuths(),
            samples = locations.len(),
            time_slices = source.n_time(),
            model = self.earth.name(),
            "radial sampling"
        );

        let samples = self.interpolate_locations(source, &locations)?;
        Ok((locations, samples))
    }
}

/// 圆心纬度必须在 [-90, 90]，经度为任意有限值
fn validate_center(center: &GeoPoint) -> RgResult<()> {
    if !center.lon.is_finite() {
        return Err(GeoError::non_finite("center_lon", center.lon).into());
    }
    if !center.lat.is_finite() {
        return Err(GeoError::non_finite("center_lat", center.lat).into());
    }
    if !(-90.0..=90.0).contains(&center.lat) {
        return Err(RgError::invalid_argument(
            "center_lat",
            format!("纬度 {} 超出 [-90, 90]", center.lat),
        ));
    }
    Ok(())
}

/// 径向插值（WGS84 椭球体）
///
/// # Arguments
/// - `source`: 源网格
/// - `center_lat` / `center_lon`: 圆心（度）
/// - `radii`: 半径序列 (km)，非空且 `radii[0] ≥ 0`
/// - `azimuths`: 方位角序列（度），非空
pub fn radial_interp(
    source: &SourceGrid,
    center_lat: f64,
    center_lon: f64,
    radii: &[f64],
    azimuths: &[f64],
) -> RgResult<InterpolatedSamples> {
    let grid = RadialGrid::new(radii.to_vec(), azimuths.to_vec())?;
    RadialSampler::default().sample(source, GeoPoint::new(center_lat, center_lon), &grid)
}
