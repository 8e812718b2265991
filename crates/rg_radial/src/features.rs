// crates/rg_radial/src/features.rs

//! 径向统计特征
//!
//! 从一次径向采样结果中提取标量特征，每个特征对每个时间片各给出一个值：
//!
//! - 圆心值
//! - 圆盘均值 / 极差：圆心样本（若有）加上半径不超过给定值的全部环
//! - 单环均值
//! - 方向差：同一环上两个方位角的样本之差（如东北减西南）
//!
//! 下标由 [`RadialGrid`] 的采样顺序决定。例如起始半径 50 km、分辨率 10° 时，
//! 50 km 圆盘恰为样本 `0..37`。

use crate::geometry::RadialGrid;
use crate::samples::InterpolatedSamples;
use rg_foundation::error::{RgError, RgResult};
use rg_foundation::{ensure, require};
use serde::{Deserialize, Serialize};

/// 聚合时的 NaN 处理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NanPolicy {
    /// 任一 NaN 使结果为 NaN
    #[default]
    Propagate,
    /// 忽略 NaN，全为 NaN 时结果为 NaN
    Skip,
}

impl NanPolicy {
    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Propagate => "propagate",
            Self::Skip => "skip",
        }
    }

    fn mean(self, values: impl Iterator<Item = f64>) -> f64 {
        let (sum, count) = values
            .filter(|v| self == Self::Propagate || !v.is_nan())
            .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
        if count == 0 {
            f64::NAN
        } else {
            sum / count as f64
        }
    }

    fn peak_to_peak(self, values: impl Iterator<Item = f64>) -> f64 {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in values {
            if v.is_nan() {
                match self {
                    Self::Propagate => return f64::NAN,
                    Self::Skip => continue,
                }
            }
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if lo > hi {
            f64::NAN
        } else {
            hi - lo
        }
    }
}

// ============================================================================
// 特征提取器
// ============================================================================

/// 径向特征提取器
#[derive(Debug, Clone, Copy)]
pub struct RadialFeatures<'a> {
    samples: &'a InterpolatedSamples,
    grid: &'a RadialGrid,
    policy: NanPolicy,
}

impl<'a> RadialFeatures<'a> {
    /// 绑定采样结果与其几何
    ///
    /// # 错误
    /// 样本数与几何不一致时返回 `SizeMismatch`
    pub fn new(samples: &'a InterpolatedSamples, grid: &'a RadialGrid) -> RgResult<Self> {
        RgError::check_size("radial samples", grid.n_samples(), samples.n_samples())?;
        Ok(Self {
            samples,
            grid,
            policy: NanPolicy::default(),
        })
    }

    /// 设置 NaN 处理方式
    #[must_use]
    pub fn with_nan_policy(mut self, policy: NanPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 圆心值
    ///
    /// 前置圆心时为样本 0；否则首环半径为 0，样本 0 同样位于圆心。
    pub fn origin(&self) -> Vec<f64> {
        self.samples.row(0).to_vec()
    }

    /// 圆盘均值
    pub fn disc_mean(&self, radius_km: f64) -> RgResult<Vec<f64>> {
        let end = self.disc_end(radius_km)?;
        Ok(self.per_time(|t| self.policy.mean((0..end).map(|i| self.samples.get(i, t)))))
    }

    /// 圆盘极差（最大值 − 最小值）
    pub fn disc_range(&self, radius_km: f64) -> RgResult<Vec<f64>> {
        let end = self.disc_end(radius_km)?;
        Ok(self.per_time(|t| {
            self.policy
                .peak_to_peak((0..end).map(|i| self.samples.get(i, t)))
        }))
    }

    /// 单环均值
    pub fn ring_mean(&self, radius_km: f64) -> RgResult<Vec<f64>> {
        let ring = self.ring(radius_km)?;
        let range = self.grid.ring_range(ring);
        Ok(self.per_time(|t| {
            self.policy
                .mean(range.clone().map(|i| self.samples.get(i, t)))
        }))
    }

    /// 同一环上 `bearing_a` 与 `bearing_b` 方向的样本之差
    pub fn directional_difference(
        &self,
        radius_km: f64,
        bearing_a: f64,
        bearing_b: f64,
    ) -> RgResult<Vec<f64>> {
        let ring = self.ring(radius_km)?;
        let ia = self.grid.sample_index(ring, self.azimuth(bearing_a)?);
        let ib = self.grid.sample_index(ring, self.azimuth(bearing_b)?);
        Ok(self.per_time(|t| self.samples.get(ia, t) - self.samples.get(ib, t)))
    }

    /// 按特征集合批量提取
    pub fn extract(&self, set: &FeatureSet) -> RgResult<Vec<NamedFeature>> {
        let mut out = Vec::with_capacity(set.len());
        if set.origin {
            out.push(NamedFeature::new("origin".to_string(), self.origin()));
        }
        for &r in &set.disc_radii_km {
            out.push(NamedFeature::new(format!("disc_mean_{r}km"), self.disc_mean(r)?));
            out.push(NamedFeature::new(format!("disc_range_{r}km"), self.disc_range(r)?));
        }
        for &r in &set.ring_radii_km {
            out.push(NamedFeature::new(format!("ring_mean_{r}km"), self.ring_mean(r)?));
        }
        for d in &set.directional {
            out.push(NamedFeature::new(
                format!("diff_{}km_{}_{}", d.radius_km, d.bearing_a, d.bearing_b),
                self.directional_difference(d.radius_km, d.bearing_a, d.bearing_b)?,
            ));
        }
        Ok(out)
    }

    fn per_time(&self, f: impl Fn(usize) -> f64) -> Vec<f64> {
        (0..self.samples.n_time()).map(f).collect()
    }

    fn disc_end(&self, radius_km: f64) -> RgResult<usize> {
        RgError::check_finite("radius_km", radius_km)?;
        ensure!(
            radius_km >= 0.0,
            RgError::invalid_argument("radius_km", format!("圆盘半径不能为负: {radius_km}"))
        );
        let end = self.grid.ring_offset() + self.grid.rings_within(radius_km) * self.grid.n_azimuths();
        ensure!(
            end > 0,
            RgError::invalid_argument("radius_km", format!("{radius_km} km 圆盘内没有采样点"))
        );
        Ok(end)
    }

    fn ring(&self, radius_km: f64) -> RgResult<usize> {
        let ring = require!(
            self.grid.ring_index_of(radius_km),
            RgError::invalid_argument("radius_km", format!("几何中没有 {radius_km} km 环"))
        );
        Ok(ring)
    }

    fn azimuth(&self, bearing_deg: f64) -> RgResult<usize> {
        let azimuth = require!(
            self.grid.azimuth_index_of(bearing_deg),
            RgError::invalid_argument("bearing", format!("几何中没有 {bearing_deg}° 方位角"))
        );
        Ok(azimuth)
    }
}

// ============================================================================
// 特征集合
// ============================================================================

/// 方向差定义
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalSpec {
    /// 环半径 (km)
    pub radius_km: f64,
    /// 被减方位角（度）
    pub bearing_a: f64,
    /// 减数方位角（度）
    pub bearing_b: f64,
}

/// 需要提取的特征
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSet {
    /// 是否输出圆心值
    pub origin: bool,
    /// 圆盘均值 / 极差半径 (km)
    pub disc_radii_km: Vec<f64>,
    /// 单环均值半径 (km)
    pub ring_radii_km: Vec<f64>,
    /// 方向差
    pub directional: Vec<DirectionalSpec>,
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self {
            origin: true,
            disc_radii_km: Vec::new(),
            ring_radii_km: Vec::new(),
            directional: Vec::new(),
        }
    }
}

impl FeatureSet {
    /// 圆心值加上以每个环为半径的圆盘均值与极差
    pub fn standard(grid: &RadialGrid) -> Self {
        Self {
            origin: true,
            disc_radii_km: grid.radii().to_vec(),
            ..Self::default()
        }
    }

    /// 输出的特征列数
    pub fn len(&self) -> usize {
        usize::from(self.origin)
            + 2 * self.disc_radii_km.len()
            + self.ring_radii_km.len()
            + self.directional.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 命名特征（每个时间片一个值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedFeature {
    /// 特征名，如 `disc_mean_50km`
    pub name: String,
    /// 各时间片的值
    pub values: Vec<f64>,
}

impl NamedFeature {
    fn new(name: String, values: Vec<f64>) -> Self {
        Self { name, values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometrySpec;

    /// 50..500 km、10° 几何，样本值 = 下标
    fn indexed() -> (RadialGrid, InterpolatedSamples) {
        let grid = GeometrySpec::new(50.0, 50.0, 500.0, 10.0).build().unwrap();
        let n = grid.n_samples();
        let samples = InterpolatedSamples::new((0..n).map(|i| i as f64).collect(), n, 1).unwrap();
        (grid, samples)
    }

    #[test]
    fn test_disc_matches_index_ranges() {
        let (grid, samples) = indexed();
        let f = RadialFeatures::new(&samples, &grid).unwrap();

        // 样本 0..37 的均值 = 18
        assert_eq!(f.disc_mean(50.0).unwrap(), vec![18.0]);
        // 样本 0..73
        assert_eq!(f.disc_mean(100.0).unwrap(), vec![36.0]);
        assert_eq!(f.disc_range(100.0).unwrap(), vec![72.0]);
        // 全部样本
        assert_eq!(f.disc_range(500.0).unwrap(), vec![360.0]);
        // 只有圆心
        assert_eq!(f.disc_mean(10.0).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_origin_and_ring() {
        let (grid, samples) = indexed();
        let f = RadialFeatures::new(&samples, &grid).unwrap();
        assert_eq!(f.origin(), vec![0.0]);
        // 100 km 环 = 样本 37..73
        assert_eq!(f.ring_mean(100.0).unwrap(), vec![54.5]);
    }

    #[test]
    fn test_directional_difference_indices() {
        let (grid, samples) = indexed();
        let f = RadialFeatures::new(&samples, &grid).unwrap();
        // 350 km 环：60° 为样本 222，240° 为样本 240
        assert_eq!(f.directional_difference(350.0, 60.0, 240.0).unwrap(), vec![-18.0]);
        assert_eq!(f.directional_difference(350.0, 90.0, 270.0).unwrap(), vec![-18.0]);
    }

    #[test]
    fn test_unknown_ring_or_bearing() {
        let (grid, samples) = indexed();
        let f = RadialFeatures::new(&samples, &grid).unwrap();
        assert!(f.ring_mean(75.0).unwrap_err().is_invalid_argument());
        assert!(f.directional_difference(100.0, 15.0, 195.0).unwrap_err().is_invalid_argument());
        assert!(f.disc_mean(-1.0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_nan_policy() {
        let grid = RadialGrid::new(vec![10.0], vec![180.0, 360.0]).unwrap();
        let samples = InterpolatedSamples::new(vec![1.0, f64::NAN, 5.0], 3, 1).unwrap();

        let f = RadialFeatures::new(&samples, &grid).unwrap();
        assert!(f.disc_mean(10.0).unwrap()[0].is_nan());
        assert!(f.disc_range(10.0).unwrap()[0].is_nan());

        let f = f.with_nan_policy(NanPolicy::Skip);
        assert_eq!(f.disc_mean(10.0).unwrap(), vec![3.0]);
        assert_eq!(f.disc_range(10.0).unwrap(), vec![4.0]);
    }

    #[test]
    fn test_skip_all_nan() {
        let grid = RadialGrid::new(vec![10.0], vec![360.0]).unwrap();
        let samples = InterpolatedSamples::new(vec![f64::NAN; 2], 2, 1).unwrap();
        let f = RadialFeatures::new(&samples, &grid)
            .unwrap()
            .with_nan_policy(NanPolicy::Skip);
        assert!(f.disc_mean(10.0).unwrap()[0].is_nan());
        assert!(f.disc_range(10.0).unwrap()[0].is_nan());
    }

    #[test]
    fn test_start_zero_geometry_without_center() {
        let grid = GeometrySpec::new(0.0, 100.0, 100.0, 180.0).build().unwrap();
        let samples = InterpolatedSamples::new(vec![2.0, 2.0, 2.0, 4.0, 6.0, 8.0], 6, 1).unwrap();
        let f = RadialFeatures::new(&samples, &grid).unwrap();
        assert_eq!(f.origin(), vec![2.0]);
        assert_eq!(f.disc_mean(0.0).unwrap(), vec![2.0]);
        assert_eq!(f.ring_mean(100.0).unwrap(), vec![6.0]);
    }

    #[test]
    fn test_size_mismatch() {
        let (grid, _) = indexed();
        let samples = InterpolatedSamples::new(vec![0.0; 10], 10, 1).unwrap();
        assert!(RadialFeatures::new(&samples, &grid).is_err());
    }

    #[test]
    fn test_extract_names_and_order() {
        let (grid, samples) = indexed();
        let f = RadialFeatures::new(&samples, &grid).unwrap();
        let set = FeatureSet {
            origin: true,
            disc_radii_km: vec![50.0],
            ring_radii_km: vec![100.0],
            directional: vec![DirectionalSpec {
                radius_km: 350.0,
                bearing_a: 60.0,
                bearing_b: 240.0,
            }],
        };
        let out = f.extract(&set).unwrap();
        let names: Vec<_> = out.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(
            names,
            ["origin", "disc_mean_50km", "disc_range_50km", "ring_mean_100km", "diff_350km_60_240"]
        );
        assert_eq!(out.len(), set.len());

        assert_eq!(FeatureSet::standard(&grid).len(), 21);
    }
}
