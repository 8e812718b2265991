// crates/rg_geo/src/geodesic.rs

//! 测地线正解：给定起点、距离和方位角求目标点
//!
//! 径向采样的每个 (半径, 方位角) 对都通过这里换算成经纬度。
//!
//! # 地球模型
//!
//! - [`EarthModel::Ellipsoid`]：Vincenty (1975) 正解，默认 WGS84，
//!   与常用大地测量库的测地线结果在毫米级一致
//! - [`EarthModel::Sphere`]：正球体大圆公式，速度快，
//!   1500 km 半径下相对椭球体会有千米量级偏差
//!
//! 方位角约定：0°/360° 为正北，顺时针递增。
//!
//! # 示例
//!
//! ```
//! use rg_geo::{EarthModel, GeoPoint};
//!
//! let model = EarthModel::default();
//! let start = GeoPoint::new(45.0, -120.0);
//! let north = model.destination(start, 100.0, 0.0).unwrap();
//! assert!(north.lat > 45.8 && north.lat < 46.0);
//! assert!((north.lon + 120.0).abs() < 1e-9);
//! ```

use crate::ellipsoid::{Ellipsoid, EARTH_MEAN_RADIUS};
use crate::error::{GeoError, GeoResult};
use crate::geometry::{deg_to_rad, rad_to_deg, GeoPoint};
use serde::{Deserialize, Serialize};

/// Vincenty 正解最大迭代次数
const VINCENTY_MAX_ITER: usize = 200;

/// Vincenty 正解收敛容差（弧度）
const VINCENTY_TOLERANCE: f64 = 1e-12;

/// 地球模型
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EarthModel {
    /// 旋转椭球体（Vincenty 正解）
    Ellipsoid(Ellipsoid),
    /// 正球体（大圆公式）
    Sphere {
        /// 球体半径（米）
        radius_m: f64,
    },
}

impl Default for EarthModel {
    fn default() -> Self {
        Self::Ellipsoid(Ellipsoid::WGS84)
    }
}

impl EarthModel {
    /// WGS84 椭球体
    pub const WGS84: Self = Self::Ellipsoid(Ellipsoid::WGS84);

    /// 平均半径球体
    pub const MEAN_SPHERE: Self = Self::Sphere {
        radius_m: EARTH_MEAN_RADIUS,
    };

    /// 模型名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ellipsoid(_) => "ellipsoid",
            Self::Sphere { .. } => "sphere",
        }
    }

    /// 校验模型参数
    pub fn validate(&self) -> GeoResult<()> {
        match self {
            Self::Ellipsoid(e) => e.validate(),
            Self::Sphere { radius_m } => Ellipsoid::sphere(*radius_m).validate(),
        }
    }

    /// 从 `start` 沿方位角 `bearing_deg` 前进 `distance_km` 千米后的目标点
    ///
    /// 距离为 0 时原样返回起点；返回的经度未归一化。
    pub fn destination(&self, start: GeoPoint, distance_km: f64, bearing_deg: f64) -> GeoResult<GeoPoint> {
        let distance_m = distance_km * 1000.0;
        match self {
            Self::Ellipsoid(e) => destination_vincenty(start, distance_m, bearing_deg, e),
            Self::Sphere { radius_m } => destination_spherical(start, distance_m, bearing_deg, *radius_m),
        }
    }
}

fn check_inputs(start: &GeoPoint, distance_m: f64, bearing_deg: f64) -> GeoResult<()> {
    start.validate()?;
    GeoError::check_finite("distance", distance_m)?;
    GeoError::check_finite("bearing", bearing_deg)?;
    if distance_m < 0.0 {
        return Err(GeoError::NegativeDistance { distance: distance_m });
    }
    Ok(())
}

/// Vincenty 正解（椭球面）
///
/// # Arguments
/// - `start`: 起点（度）
/// - `distance_m`: 测地线长度（米），非负
/// - `bearing_deg`: 起始方位角（度，正北顺时针）
/// - `ellipsoid`: 椭球体
///
/// # Returns
/// 目标点（度），经度为 `start.lon + Δλ`，未归一化
pub fn destination_vincenty(
    start: GeoPoint,
    distance_m: f64,
    bearing_deg: f64,
    ellipsoid: &Ellipsoid,
) -> GeoResult<GeoPoint> {
    check_inputs(&start, distance_m, bearing_deg)?;
    if distance_m == 0.0 {
        return Ok(start);
    }

    let a = ellipsoid.a;
    let f = ellipsoid.f;
    let b = ellipsoid.b();

    let (sin_alpha1, cos_alpha1) = deg_to_rad(bearing_deg).sin_cos();

    // 归化纬度
    let tan_u1 = (1.0 - f) * deg_to_rad(start.lat).tan();
    let cos_u1 = 1.0 / (1.0 + tan_u1 * tan_u1).sqrt();
    let sin_u1 = tan_u1 * cos_u1;

    // 赤道到起点的角距离
    let sigma1 = tan_u1.atan2(cos_alpha1);
    let sin_alpha = cos_u1 * sin_alpha1;
    let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
    let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
    let aa = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let bb = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

    let sigma0 = distance_m / (b * aa);
    let mut sigma = sigma0;
    let mut converged = false;

    for _ in 0..VINCENTY_MAX_ITER {
        let cos_2sigma_m = (2.0 * sigma1 + sigma).cos();
        let (sin_sigma, cos_sigma) = sigma.sin_cos();
        let delta_sigma = bb
            * sin_sigma
            * (cos_2sigma_m
                + bb / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                        - bb / 6.0
                            * cos_2sigma_m
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));
        let sigma_prev = sigma;
        sigma = sigma0 + delta_sigma;
        if (sigma - sigma_prev).abs() < VINCENTY_TOLERANCE {
            converged = true;
            break;
        }
    }

    if !converged {
        return Err(GeoError::VincentyNotConverged { operation: "direct" });
    }

    let cos_2sigma_m = (2.0 * sigma1 + sigma).cos();
    let (sin_sigma, cos_sigma) = sigma.sin_cos();

    let x = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
    let lat2 = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1)
        .atan2((1.0 - f) * (sin_alpha * sin_alpha + x * x).sqrt());

    let lambda = (sin_sigma * sin_alpha1).atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1);
    let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
    let l = lambda
        - (1.0 - c)
            * f
            * sin_alpha
            * (sigma + c * sin_sigma * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

    Ok(GeoPoint::new(rad_to_deg(lat2), start.lon + rad_to_deg(l)))
}

/// 正球体大圆正解
///
/// 参数含义同 [`destination_vincenty`]，`radius_m` 为球体半径。
pub fn destination_spherical(
    start: GeoPoint,
    distance_m: f64,
    bearing_deg: f64,
    radius_m: f64,
) -> GeoResult<GeoPoint> {
    check_inputs(&start, distance_m, bearing_deg)?;
    Ellipsoid::sphere(radius_m).validate()?;
    if distance_m == 0.0 {
        return Ok(start);
    }

    let lat1 = deg_to_rad(start.lat);
    let bearing = deg_to_rad(bearing_deg);
    let delta = distance_m / radius_m;

    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_delta, cos_delta) = delta.sin_cos();

    let sin_lat2 = (sin_lat1 * cos_delta + cos_lat1 * sin_delta * bearing.cos()).clamp(-1.0, 1.0);
    let lat2 = sin_lat2.asin();
    let dlon = (bearing.sin() * sin_delta * cos_lat1).atan2(cos_delta - sin_lat1 * sin_lat2);

    Ok(GeoPoint::new(rad_to_deg(lat2), start.lon + rad_to_deg(dlon)))
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dms(deg: f64, min: f64, sec: f64) -> f64 {
        deg.signum() * (deg.abs() + min / 60.0 + sec / 3600.0)
    }

    #[test]
    fn test_vincenty_flinders_peak() {
        // Vincenty (1975) 算例：Flinders Peak → Buninyong（GRS80）
        let start = GeoPoint::new(dms(-37.0, 57.0, 3.72030), dms(144.0, 25.0, 29.52440));
        let bearing = dms(306.0, 52.0, 5.37);
        let dest = destination_vincenty(start, 54_972.271, bearing, &Ellipsoid::GRS80).unwrap();

        let expected_lat = dms(-37.0, 39.0, 10.15610);
        let expected_lon = dms(143.0, 55.0, 35.38390);
        assert!((dest.lat - expected_lat).abs() < 1e-6, "lat: {}", dest.lat);
        assert!((dest.lon - expected_lon).abs() < 1e-6, "lon: {}", dest.lon);
    }

    #[test]
    fn test_vincenty_round_trip_with_inverse() {
        let start = GeoPoint::new(45.0, -120.0);
        for bearing in [10.0, 95.0, 180.0, 233.0, 350.0] {
            let dest = destination_vincenty(start, 1_500_000.0, bearing, &Ellipsoid::WGS84).unwrap();
            let back = start.vincenty_distance(&dest, &Ellipsoid::WGS84).unwrap();
            assert!((back - 1_500_000.0).abs() < 1e-3, "bearing {bearing}: {back}");
        }
    }

    #[test]
    fn test_zero_distance_returns_start_exactly() {
        let start = GeoPoint::new(43.0, -116.0);
        for bearing in [0.0, 90.0, 180.0, 270.0, 360.0] {
            assert_eq!(destination_vincenty(start, 0.0, bearing, &Ellipsoid::WGS84).unwrap(), start);
            assert_eq!(destination_spherical(start, 0.0, bearing, EARTH_MEAN_RADIUS).unwrap(), start);
        }
    }

    #[test]
    fn test_bearing_convention() {
        let start = GeoPoint::new(0.0, 0.0);
        let model = EarthModel::WGS84;

        let north = model.destination(start, 500.0, 0.0).unwrap();
        assert!(north.lat > 4.0 && north.lon.abs() < 1e-9);

        let east = model.destination(start, 500.0, 90.0).unwrap();
        assert!(east.lon > 4.0 && east.lat.abs() < 1e-9);

        let south = model.destination(start, 500.0, 180.0).unwrap();
        assert!(south.lat < -4.0);

        let west = model.destination(start, 500.0, 270.0).unwrap();
        assert!(west.lon < -4.0);

        // 360° 与 0° 等价
        let full = model.destination(start, 500.0, 360.0).unwrap();
        assert!((full.lat - north.lat).abs() < 1e-9);
        assert!((full.lon - north.lon).abs() < 1e-9);
    }

    #[test]
    fn test_spherical_one_degree_north() {
        let start = GeoPoint::new(0.0, 0.0);
        let one_degree = EARTH_MEAN_RADIUS * std::f64::consts::PI / 180.0;
        let dest = destination_spherical(start, one_degree, 0.0, EARTH_MEAN_RADIUS).unwrap();
        assert!((dest.lat - 1.0).abs() < 1e-9);
        assert!(dest.lon.abs() < 1e-9);
    }

    #[test]
    fn test_sphere_and_ellipsoid_agree_roughly() {
        let start = GeoPoint::new(45.0, -120.0);
        let e = EarthModel::WGS84.destination(start, 1500.0, 45.0).unwrap();
        let s = EarthModel::MEAN_SPHERE.destination(start, 1500.0, 45.0).unwrap();
        // 差异在 0.1° 量级以内，但不为零
        assert!((e.lat - s.lat).abs() < 0.1);
        assert!((e.lon - s.lon).abs() < 0.1);
        assert!((e.lat - s.lat).abs() + (e.lon - s.lon).abs() > 1e-4);
    }

    #[test]
    fn test_invalid_inputs() {
        let model = EarthModel::WGS84;
        assert!(model.destination(GeoPoint::new(95.0, 0.0), 10.0, 0.0).is_err());
        assert!(model.destination(GeoPoint::new(0.0, 0.0), -10.0, 0.0).is_err());
        assert!(model.destination(GeoPoint::new(0.0, 0.0), 10.0, f64::NAN).is_err());

        let bad_sphere = EarthModel::Sphere { radius_m: 0.0 };
        assert!(bad_sphere.destination(GeoPoint::new(0.0, 0.0), 10.0, 0.0).is_err());
    }

    #[test]
    fn test_earth_model_serde() {
        let json = serde_json::to_string(&EarthModel::MEAN_SPHERE).unwrap();
        assert!(json.contains("\"kind\":\"sphere\""));
        let parsed: EarthModel = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, EarthModel::MEAN_SPHERE);

        let parsed: EarthModel =
            serde_json::from_str(r#"{"kind":"ellipsoid","a":6378137.0,"f":0.0033528106647474805}"#).unwrap();
        assert!(matches!(parsed, EarthModel::Ellipsoid(_)));
    }
}
