// crates/rg_geo/src/geometry.rs

//! 地理点类型与距离计算
//!
//! 提供经纬度点 [`GeoPoint`]，以及用于校验目标点解算结果的距离与方位角计算。
//!
//! # 距离计算
//!
//! - `haversine_distance`: Haversine 公式（正球体）
//! - `vincenty_distance`: Vincenty 反解（椭球面，毫米级精度）
//!
//! 坐标均以度为单位，纬度在前。

use crate::ellipsoid::{Ellipsoid, EARTH_MEAN_RADIUS};
use crate::error::{GeoError, GeoResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// 角度转弧度
#[inline]
pub(crate) fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// 弧度转角度
#[inline]
pub(crate) fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// 经纬度点（度）
///
/// 径向采样的圆心以及所有采样目标点都用该类型表示。
///
/// # 示例
///
/// ```
/// use rg_geo::GeoPoint;
///
/// let portland = GeoPoint::new(45.52, -122.68);
/// let seattle = GeoPoint::new(47.61, -122.33);
/// let km = portland.haversine_distance(&seattle) / 1000.0;
/// assert!((km - 234.0).abs() < 5.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// 纬度（度）
    pub lat: f64,
    /// 经度（度）
    pub lon: f64,
}

impl GeoPoint {
    /// 创建点（不做校验）
    #[inline]
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// 创建并校验：纬度在 [-90, 90]，经度为有限数
    pub fn try_new(lat: f64, lon: f64) -> GeoResult<Self> {
        let p = Self::new(lat, lon);
        p.validate()?;
        Ok(p)
    }

    /// 校验坐标
    pub fn validate(&self) -> GeoResult<()> {
        GeoError::check_latitude(self.lat)?;
        GeoError::check_finite("longitude", self.lon)
    }

    /// 经纬度是否均为有限数
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// 替换经度
    #[inline]
    #[must_use]
    pub const fn with_lon(self, lon: f64) -> Self {
        Self { lat: self.lat, lon }
    }

    // ========================================================================
    // 距离
    // ========================================================================

    /// Haversine 大圆距离（米），地球平均半径
    #[must_use]
    pub fn haversine_distance(&self, other: &Self) -> f64 {
        self.haversine_distance_with_radius(other, EARTH_MEAN_RADIUS)
    }

    /// Haversine 公式（可自定义球体半径）
    #[must_use]
    pub fn haversine_distance_with_radius(&self, other: &Self, radius: f64) -> f64 {
        let lat1 = deg_to_rad(self.lat);
        let lat2 = deg_to_rad(other.lat);
        let dlat = lat2 - lat1;
        let dlon = deg_to_rad(other.lon - self.lon);

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().min(1.0).asin();

        radius * c
    }

    /// Vincenty 反解：椭球面测地线距离（米）
    ///
    /// 近对跖点可能不收敛，此时返回 [`GeoError::VincentyNotConverged`]。
    pub fn vincenty_distance(&self, other: &Self, ellipsoid: &Ellipsoid) -> GeoResult<f64> {
        let a = ellipsoid.a;
        let f = ellipsoid.f;
        let b = ellipsoid.b();

        let l = deg_to_rad(other.lon - self.lon);

        // 归化纬度
        let u1 = ((1.0 - f) * deg_to_rad(self.lat).tan()).atan();
        let u2 = ((1.0 - f) * deg_to_rad(other.lat).tan()).atan();

        let (sin_u1, cos_u1) = u1.sin_cos();
        let (sin_u2, cos_u2) = u2.sin_cos();

        let mut lambda = l;
        let mut cos_sq_alpha;
        let mut sin_sigma;
        let mut cos_sigma;
        let mut cos_2sigma_m;
        let mut sigma;
        let mut converged = false;

        const MAX_ITER: usize = 200;
        const TOLERANCE: f64 = 1e-12;

        let mut iter = 0;
        loop {
            let (sin_lambda, cos_lambda) = lambda.sin_cos();

            sin_sigma = ((cos_u2 * sin_lambda).powi(2)
                + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
            .sqrt();

            if sin_sigma < 1e-12 {
                // 两点重合
                return Ok(0.0);
            }

            cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            sigma = sin_sigma.atan2(cos_sigma);

            let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

            // 沿赤道的测地线 cos²α = 0
            cos_2sigma_m = if cos_sq_alpha.abs() < 1e-12 {
                0.0
            } else {
                cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
            };

            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));

            let lambda_prev = lambda;
            lambda = l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

            iter += 1;
            if (lambda - lambda_prev).abs() < TOLERANCE {
                converged = true;
                break;
            }
            if iter >= MAX_ITER {
                break;
            }
        }

        if !converged {
            return Err(GeoError::VincentyNotConverged { operation: "inverse" });
        }

        let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
        let aa = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let bb = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

        let delta_sigma = bb
            * sin_sigma
            * (cos_2sigma_m
                + bb / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                        - bb / 6.0
                            * cos_2sigma_m
                            * (-3.0 + 4.0 * sin_sigma.powi(2))
                            * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

        Ok(b * aa * (sigma - delta_sigma))
    }

    /// 初始方位角（从 self 到 other，正球体）
    ///
    /// 返回从正北顺时针的角度（度），范围 [0, 360)
    #[must_use]
    pub fn initial_bearing_to(&self, other: &Self) -> f64 {
        let lat1 = deg_to_rad(self.lat);
        let lat2 = deg_to_rad(other.lat);
        let dlon = deg_to_rad(other.lon - self.lon);

        let x = lat2.cos() * dlon.sin();
        let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

        let bearing = x.atan2(y);
        (rad_to_deg(bearing) + 360.0) % 360.0
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new() {
        assert!(GeoPoint::try_new(45.0, -120.0).is_ok());
        assert!(GeoPoint::try_new(91.0, 0.0).is_err());
        assert!(GeoPoint::try_new(0.0, f64::INFINITY).is_err());
        // 经度不限范围，由调用方按网格约定归一化
        assert!(GeoPoint::try_new(0.0, 540.0).is_ok());
    }

    #[test]
    fn test_haversine_distance() {
        // 北京到上海，约 1068 km
        let beijing = GeoPoint::new(39.9, 116.4);
        let shanghai = GeoPoint::new(31.2, 121.5);

        let dist_km = beijing.haversine_distance(&shanghai) / 1000.0;
        assert!((dist_km - 1068.0).abs() < 20.0, "Beijing-Shanghai: {dist_km} km");
    }

    #[test]
    fn test_haversine_same_point() {
        let p = GeoPoint::new(39.9, 116.4);
        assert!(p.haversine_distance(&p).abs() < 1e-10);
    }

    #[test]
    fn test_haversine_antipodal() {
        let p1 = GeoPoint::new(0.0, 0.0);
        let p2 = GeoPoint::new(0.0, 180.0);

        let dist = p1.haversine_distance(&p2);
        assert!((dist - PI * EARTH_MEAN_RADIUS).abs() < 1000.0, "Antipodal distance: {dist}");
    }

    #[test]
    fn test_vincenty_distance() {
        let beijing = GeoPoint::new(39.9, 116.4);
        let shanghai = GeoPoint::new(31.2, 121.5);

        let dist_km = beijing.vincenty_distance(&shanghai, &Ellipsoid::WGS84).unwrap() / 1000.0;
        assert!((dist_km - 1068.0).abs() < 10.0, "Vincenty Beijing-Shanghai: {dist_km} km");
    }

    #[test]
    fn test_vincenty_one_degree_of_equator() {
        // 赤道 1° 经度弧长 = a * π / 180
        let p1 = GeoPoint::new(0.0, 0.0);
        let p2 = GeoPoint::new(0.0, 1.0);
        let dist = p1.vincenty_distance(&p2, &Ellipsoid::WGS84).unwrap();
        let expected = Ellipsoid::WGS84.a * PI / 180.0;
        assert!((dist - expected).abs() < 1e-3, "equator: {dist}");
    }

    #[test]
    fn test_vincenty_same_point() {
        let p = GeoPoint::new(39.9, 116.4);
        let dist = p.vincenty_distance(&p, &Ellipsoid::WGS84).unwrap();
        assert!(dist < 1e-6);
    }

    #[test]
    fn test_initial_bearing() {
        let origin = GeoPoint::new(0.0, 0.0);

        let north = GeoPoint::new(10.0, 0.0);
        assert!(origin.initial_bearing_to(&north).abs() < 0.1);

        let east = GeoPoint::new(0.0, 10.0);
        assert!((origin.initial_bearing_to(&east) - 90.0).abs() < 0.1);
    }
}
