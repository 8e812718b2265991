// crates/rg_radial/src/geometry.rs

//! 径向采样几何
//!
//! 由 [`GeometrySpec`] 生成极坐标采样格架 [`RadialGrid`]：
//! 半径环序列 × 方位角序列。两者的笛卡尔积（环优先、方位角次之）
//! 定义了全部采样点的顺序，下游特征计算按固定下标取值，因此该顺序
//! 必须稳定可复现。
//!
//! # 两种几何
//!
//! | 起始半径 | 方位角序列 | 圆心 |
//! |---------|-----------|------|
//! | `0` | `[0, res, …, 360]`（0° 与 360° 重复） | 半径 0 环在每个方位角各采一次 |
//! | `> 0` | `[res, 2·res, …, 360]` | 采样时单独前置为第 0 个样本 |
//!
//! 起始半径为 0 的版本用于等值线绘图（圆心与 0° 方向连续），
//! 起始半径大于 0 的版本用于空间统计（每个采样点物理位置唯一）。
//!
//! # 示例
//!
//! ```
//! use rg_radial::GeometrySpec;
//!
//! let grid = GeometrySpec::new(50.0, 50.0, 150.0, 90.0).build().unwrap();
//! assert_eq!(grid.radii(), &[50.0, 100.0, 150.0]);
//! assert_eq!(grid.azimuths(), &[90.0, 180.0, 270.0, 360.0]);
//! assert_eq!(grid.n_samples(), 13);
//! ```

use rg_foundation::ensure;
use rg_foundation::error::{RgError, RgResult};
use rg_foundation::float::{approx_eq, approx_eq_rel, whole_steps};
use serde::{Deserialize, Serialize};

/// 半径 / 方位角匹配容差
const MATCH_TOLERANCE: f64 = 1e-9;

/// 单个序列允许的最大步数
const MAX_STEPS: f64 = 1.0e6;

/// 径向几何参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometrySpec {
    /// 最内环半径 (km)，≥ 0
    pub start_radius_km: f64,
    /// 环间距 (km)，> 0
    pub radius_step_km: f64,
    /// 最外环半径上限 (km)，≥ start_radius_km
    pub end_radius_km: f64,
    /// 方位角分辨率（度），(0, 360]
    pub degree_resolution: f64,
}

impl GeometrySpec {
    /// 创建几何参数（不校验，`build` 时校验）
    pub const fn new(
        start_radius_km: f64,
        radius_step_km: f64,
        end_radius_km: f64,
        degree_resolution: f64,
    ) -> Self {
        Self {
            start_radius_km,
            radius_step_km,
            end_radius_km,
            degree_resolution,
        }
    }

    /// 校验参数
    pub fn validate(&self) -> RgResult<()> {
        RgError::check_finite("start_radius_km", self.start_radius_km)?;
        RgError::check_finite("radius_step_km", self.radius_step_km)?;
        RgError::check_finite("end_radius_km", self.end_radius_km)?;
        RgError::check_finite("degree_resolution", self.degree_resolution)?;

        ensure!(
            self.start_radius_km >= 0.0,
            RgError::invalid_argument(
                "start_radius_km",
                format!("半径不能为负: {}", self.start_radius_km),
            )
        );
        ensure!(
            self.radius_step_km > 0.0,
            RgError::invalid_argument(
                "radius_step_km",
                format!("环间距必须为正: {}", self.radius_step_km),
            )
        );
        ensure!(
            self.end_radius_km >= self.start_radius_km,
            RgError::invalid_argument(
                "end_radius_km",
                format!(
                    "最外环半径 {} 小于起始半径 {}",
                    self.end_radius_km, self.start_radius_km
                ),
            )
        );
        ensure!(
            self.degree_resolution > 0.0 && self.degree_resolution <= 360.0,
            RgError::invalid_argument(
                "degree_resolution",
                format!("方位角分辨率必须在 (0, 360] 内: {}", self.degree_resolution),
            )
        );

        let ring_steps = (self.end_radius_km - self.start_radius_km) / self.radius_step_km;
        ensure!(
            ring_steps <= MAX_STEPS,
            RgError::invalid_argument(
                "radius_step_km",
                format!("环数过多: {ring_steps:.3e} 步，上限 {MAX_STEPS:.0e}"),
            )
        );
        let azimuth_steps = 360.0 / self.degree_resolution;
        ensure!(
            azimuth_steps <= MAX_STEPS,
            RgError::invalid_argument(
                "degree_resolution",
                format!("方位角过多: {azimuth_steps:.3e} 步，上限 {MAX_STEPS:.0e}"),
            )
        );
        Ok(())
    }

    /// 生成半径序列
    ///
    /// 每个半径按 `start + k·step` 直接计算，不做累加；端点恰好落在步长上时
    /// 包含端点（容忍浮点舍入），任何半径都不超过 `end_radius_km`。
    pub fn radii(&self) -> RgResult<Vec<f64>> {
        self.validate()?;
        let n_steps = whole_steps(self.end_radius_km - self.start_radius_km, self.radius_step_km);
        Ok((0..=n_steps)
            .map(|k| (self.start_radius_km + k as f64 * self.radius_step_km).min(self.end_radius_km))
            .collect())
    }

    /// 生成方位角序列（度）
    pub fn azimuths(&self) -> RgResult<Vec<f64>> {
        self.validate()?;
        let res = self.degree_resolution;
        let n_steps = whole_steps(360.0, res);
        let first = if self.start_radius_km == 0.0 { 0 } else { 1 };
        Ok((first..=n_steps).map(|k| (k as f64 * res).min(360.0)).collect())
    }

    /// 构建采样格架
    pub fn build(&self) -> RgResult<RadialGrid> {
        RadialGrid::new(self.radii()?, self.azimuths()?)
    }

    /// 预计的采样点总数（含前置圆心）
    pub fn expected_samples(&self) -> RgResult<usize> {
        Ok(self.build()?.n_samples())
    }
}

/// 生成 `(radii, azimuths)` 两个有序序列
pub fn build_geometry(spec: &GeometrySpec) -> RgResult<(Vec<f64>, Vec<f64>)> {
    Ok((spec.radii()?, spec.azimuths()?))
}

/// 极坐标采样格架
///
/// 采样顺序：若首环半径大于 0，第 0 个样本为圆心；
/// 随后是 `radii[0]` 环上的全部方位角，再是 `radii[1]` 环，依此类推。
///
/// 反序列化经由 [`RadialGrid::new`] 校验。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRadialGrid")]
pub struct RadialGrid {
    radii: Vec<f64>,
    azimuths: Vec<f64>,
}

/// 未校验的序列化形式
#[derive(Deserialize)]
struct RawRadialGrid {
    radii: Vec<f64>,
    azimuths: Vec<f64>,
}

impl TryFrom<RawRadialGrid> for RadialGrid {
    type Error = RgError;

    fn try_from(raw: RawRadialGrid) -> RgResult<Self> {
        Self::new(raw.radii, raw.azimuths)
    }
}

impl RadialGrid {
    /// 由半径与方位角序列创建
    ///
    /// # 错误
    /// - 任一序列为空
    /// - 含非有限值
    /// - `radii[0] < 0`
    pub fn new(radii: Vec<f64>, azimuths: Vec<f64>) -> RgResult<Self> {
        ensure!(!radii.is_empty(), RgError::invalid_argument("radii", "半径序列不能为空"));
        ensure!(
            !azimuths.is_empty(),
            RgError::invalid_argument("azimuths", "方位角序列不能为空")
        );
        ensure!(
            radii.iter().chain(&azimuths).all(|v| v.is_finite()),
            RgError::invalid_argument("radii/azimuths", "含非有限值")
        );
        ensure!(
            radii[0] >= 0.0,
            RgError::invalid_argument("radii", format!("起始半径不能为负: {}", radii[0]))
        );
        Ok(Self { radii, azimuths })
    }

    /// 半径序列 (km)
    #[inline]
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// 方位角序列（度）
    #[inline]
    pub fn azimuths(&self) -> &[f64] {
        &self.azimuths
    }

    /// 环数
    #[inline]
    pub fn n_rings(&self) -> usize {
        self.radii.len()
    }

    /// 每环方位角数
    #[inline]
    pub fn n_azimuths(&self) -> usize {
        self.azimuths.len()
    }

    /// 环上采样点数（不含前置圆心）
    #[inline]
    pub fn n_ring_samples(&self) -> usize {
        self.radii.len() * self.azimuths.len()
    }

    /// 是否前置圆心样本（首环半径大于 0）
    #[inline]
    pub fn has_center_sample(&self) -> bool {
        self.radii[0] > 0.0
    }

    /// 环上样本的下标偏移（前置圆心时为 1）
    #[inline]
    pub fn ring_offset(&self) -> usize {
        usize::from(self.has_center_sample())
    }

    /// 采样点总数
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.ring_offset() + self.n_ring_samples()
    }

    /// 最外环半径 (km)
    pub fn outer_radius(&self) -> f64 {
        self.radii.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// 第 `ring` 环、第 `azimuth` 个方位角对应的样本下标
    #[inline]
    pub fn sample_index(&self, ring: usize, azimuth: usize) -> usize {
        self.ring_offset() + ring * self.azimuths.len() + azimuth
    }

    /// 第 `ring` 环的样本下标范围
    pub fn ring_range(&self, ring: usize) -> std::ops::Range<usize> {
        let start = self.sample_index(ring, 0);
        start..start + self.azimuths.len()
    }

    /// 按半径查找环下标
    pub fn ring_index_of(&self, radius_km: f64) -> Option<usize> {
        self.radii
            .iter()
            .position(|&r| approx_eq_rel(r, radius_km, MATCH_TOLERANCE))
    }

    /// 按方位角查找下标，0° 与 360° 视为同一方向
    pub fn azimuth_index_of(&self, bearing_deg: f64) -> Option<usize> {
        if let Some(i) = self
            .azimuths
            .iter()
            .position(|&a| approx_eq(a, bearing_deg, MATCH_TOLERANCE))
        {
            return Some(i);
        }
        let target = bearing_deg.rem_euclid(360.0);
        self.azimuths.iter().position(|&a| {
            let d = (a.rem_euclid(360.0) - target).abs();
            approx_eq(d, 0.0, MATCH_TOLERANCE) || approx_eq(d, 360.0, MATCH_TOLERANCE)
        })
    }

    /// 从首环起连续不超过 `radius_km` 的环数，即圆盘内的环数
    pub fn rings_within(&self, radius_km: f64) -> usize {
        let limit = radius_km + MATCH_TOLERANCE * radius_km.abs().max(1.0);
        self.radii.iter().take_while(|&&r| r <= limit).count()
    }

    /// 按采样顺序遍历 (半径, 方位角)，不含前置圆心
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.radii
            .iter()
            .flat_map(move |&r| self.azimuths.iter().map(move |&a| (r, a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_zero_azimuths_include_both_ends() {
        let spec = GeometrySpec::new(0.0, 50.0, 500.0, 10.0);
        let az = spec.azimuths().unwrap();
        assert_eq!(az.len(), 37);
        assert_eq!(az[0], 0.0);
        assert_eq!(az[36], 360.0);
    }

    #[test]
    fn test_start_positive_azimuths_skip_zero() {
        let spec = GeometrySpec::new(50.0, 50.0, 500.0, 10.0);
        let az = spec.azimuths().unwrap();
        assert_eq!(az.len(), 36);
        assert_eq!(az[0], 10.0);
        assert_eq!(az[35], 360.0);
    }

    #[test]
    fn test_azimuth_counts_for_divisors() {
        for res in [1.0, 2.0, 5.0, 10.0, 15.0, 45.0, 90.0, 120.0, 180.0, 360.0] {
            let n = (360.0 / res) as usize;
            assert_eq!(GeometrySpec::new(0.0, 1.0, 1.0, res).azimuths().unwrap().len(), n + 1);
            assert_eq!(GeometrySpec::new(1.0, 1.0, 1.0, res).azimuths().unwrap().len(), n);
        }
    }

    #[test]
    fn test_fractional_resolution_keeps_360() {
        let az = GeometrySpec::new(10.0, 10.0, 10.0, 0.1).azimuths().unwrap();
        assert_eq!(az.len(), 3600);
        assert_eq!(*az.last().unwrap(), 360.0);
    }

    #[test]
    fn test_radii_inclusive_endpoint() {
        let radii = GeometrySpec::new(50.0, 50.0, 1500.0, 10.0).radii().unwrap();
        assert_eq!(radii.len(), 30);
        assert_eq!(radii[0], 50.0);
        assert_eq!(*radii.last().unwrap(), 1500.0);
    }

    #[test]
    fn test_radii_non_multiple_end() {
        let radii = GeometrySpec::new(0.0, 50.0, 170.0, 10.0).radii().unwrap();
        assert_eq!(radii, vec![0.0, 50.0, 100.0, 150.0]);
    }

    #[test]
    fn test_radii_float_steps_never_exceed_end() {
        let spec = GeometrySpec::new(0.0, 0.1, 0.7, 90.0);
        let radii = spec.radii().unwrap();
        assert_eq!(radii.len(), 8);
        assert!(radii.iter().all(|&r| r <= 0.7));
        assert_eq!(*radii.last().unwrap(), 0.7);
    }

    #[test]
    fn test_single_ring() {
        let grid = GeometrySpec::new(100.0, 50.0, 100.0, 90.0).build().unwrap();
        assert_eq!(grid.radii(), &[100.0]);
        assert_eq!(grid.n_samples(), 5);
    }

    #[test]
    fn test_invalid_specs() {
        let cases = [
            GeometrySpec::new(-1.0, 50.0, 100.0, 10.0),
            GeometrySpec::new(0.0, 0.0, 100.0, 10.0),
            GeometrySpec::new(0.0, -5.0, 100.0, 10.0),
            GeometrySpec::new(100.0, 50.0, 50.0, 10.0),
            GeometrySpec::new(0.0, 50.0, 100.0, 0.0),
            GeometrySpec::new(0.0, 50.0, 100.0, 400.0),
            GeometrySpec::new(0.0, 50.0, f64::INFINITY, 10.0),
        ];
        for spec in cases {
            let err = spec.build().unwrap_err();
            assert!(err.is_invalid_argument(), "{spec:?}: {err}");
        }
    }

    #[test]
    fn test_excessive_step_counts_rejected() {
        let cases = [
            GeometrySpec::new(50.0, 50.0, 500.0, 1e-300),
            GeometrySpec::new(0.0, 1e-9, 500.0, 10.0),
        ];
        for spec in cases {
            let err = spec.build().unwrap_err();
            assert!(err.is_invalid_argument(), "{spec:?}: {err}");
        }
        // 上限以内仍可构建
        let fine = GeometrySpec::new(0.0, 0.5, 500.0, 0.1).build().unwrap();
        assert_eq!(fine.n_rings(), 1001);
        assert_eq!(fine.n_azimuths(), 3601);
    }

    #[test]
    fn test_deserialize_goes_through_validation() {
        let empty = serde_json::from_str::<RadialGrid>(r#"{"radii": [], "azimuths": [10.0]}"#);
        assert!(empty.is_err());
        let negative =
            serde_json::from_str::<RadialGrid>(r#"{"radii": [-5.0, 10.0], "azimuths": [90.0]}"#);
        assert!(negative.is_err());

        let grid = GeometrySpec::new(50.0, 50.0, 150.0, 90.0).build().unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: RadialGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
        assert_eq!(back.n_samples(), 13);
    }

    #[test]
    fn test_radial_grid_validation() {
        assert!(RadialGrid::new(vec![], vec![10.0]).unwrap_err().is_invalid_argument());
        assert!(RadialGrid::new(vec![10.0], vec![]).unwrap_err().is_invalid_argument());
        assert!(RadialGrid::new(vec![-10.0, 0.0], vec![10.0]).unwrap_err().is_invalid_argument());
        assert!(RadialGrid::new(vec![f64::NAN], vec![10.0]).is_err());
    }

    #[test]
    fn test_layout_with_center() {
        let grid = GeometrySpec::new(50.0, 50.0, 500.0, 10.0).build().unwrap();
        assert!(grid.has_center_sample());
        assert_eq!(grid.n_samples(), 361);

        // 原始特征脚本的下标：50 km 圆盘 = 样本 0..37
        assert_eq!(grid.ring_range(0), 1..37);
        // 350 km 环 60° 方向
        assert_eq!(grid.sample_index(6, 5), 222);
        assert_eq!(grid.ring_index_of(350.0), Some(6));
        assert_eq!(grid.azimuth_index_of(60.0), Some(5));
        assert_eq!(grid.azimuth_index_of(0.0), Some(35));
    }

    #[test]
    fn test_layout_without_center() {
        let grid = GeometrySpec::new(0.0, 500.0, 500.0, 180.0).build().unwrap();
        assert!(!grid.has_center_sample());
        assert_eq!(grid.n_samples(), 6);
        assert_eq!(grid.sample_index(1, 0), 3);
        assert_eq!(grid.azimuth_index_of(360.0), Some(2));
        assert_eq!(grid.azimuth_index_of(720.0), Some(0));
    }

    #[test]
    fn test_pairs_order() {
        let grid = RadialGrid::new(vec![10.0, 20.0], vec![90.0, 180.0]).unwrap();
        let pairs: Vec<_> = grid.pairs().collect();
        assert_eq!(pairs, vec![(10.0, 90.0), (10.0, 180.0), (20.0, 90.0), (20.0, 180.0)]);
    }

    #[test]
    fn test_rings_within() {
        let grid = GeometrySpec::new(50.0, 50.0, 500.0, 10.0).build().unwrap();
        assert_eq!(grid.rings_within(25.0), 0);
        assert_eq!(grid.rings_within(50.0), 1);
        assert_eq!(grid.rings_within(300.0), 6);
        assert_eq!(grid.rings_within(10_000.0), 10);
    }

    #[test]
    fn test_build_geometry_tuple() {
        let (radii, az) = build_geometry(&GeometrySpec::new(50.0, 50.0, 150.0, 90.0)).unwrap();
        assert_eq!(radii, vec![50.0, 100.0, 150.0]);
        assert_eq!(az, vec![90.0, 180.0, 270.0, 360.0]);
    }
}
