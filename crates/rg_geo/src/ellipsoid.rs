// crates/rg_geo/src/ellipsoid.rs
//! 椭球体定义
//!
//! 提供地球椭球体参数，支持 WGS84、GRS80 以及正球体。
//!
//! # 示例
//!
//! ```
//! use rg_geo::ellipsoid::Ellipsoid;
//!
//! let wgs84 = Ellipsoid::WGS84;
//! println!("长半轴: {} m", wgs84.a);
//! println!("第一偏心率平方: {}", wgs84.e2());
//! ```

use crate::error::{GeoError, GeoResult};
use serde::{Deserialize, Serialize};

/// 地球平均半径 (米)，IUGG R1
pub const EARTH_MEAN_RADIUS: f64 = 6_371_008.8;

/// 地球椭球体
///
/// 定义椭球体的几何参数，并提供派生参数的计算方法。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    /// 长半轴 (m)
    pub a: f64,
    /// 扁率 (flattening)
    pub f: f64,
}

impl Ellipsoid {
    // ========================================================================
    // 预定义椭球体
    // ========================================================================

    /// WGS84 椭球体 (GPS 标准)
    ///
    /// - EPSG: 7030
    /// - 长半轴: 6378137.0 m
    /// - 扁率: 1/298.257223563
    pub const WGS84: Self = Self {
        a: 6_378_137.0,
        f: 1.0 / 298.257_223_563,
    };

    /// GRS80 椭球体
    ///
    /// - EPSG: 7019
    /// - 扁率: 1/298.257222101
    pub const GRS80: Self = Self {
        a: 6_378_137.0,
        f: 1.0 / 298.257_222_101,
    };

    // ========================================================================
    // 构造方法
    // ========================================================================

    /// 从长半轴和扁率创建椭球体
    #[must_use]
    pub const fn new(a: f64, f: f64) -> Self {
        Self { a, f }
    }

    /// 正球体（扁率为 0）
    #[must_use]
    pub const fn sphere(radius: f64) -> Self {
        Self { a: radius, f: 0.0 }
    }

    /// 从长半轴和短半轴创建椭球体
    #[must_use]
    pub fn from_semi_axes(a: f64, b: f64) -> Self {
        let f = (a - b) / a;
        Self { a, f }
    }

    /// 按名称查找预定义椭球体（大小写不敏感）
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "wgs84" | "wgs-84" => Some(Self::WGS84),
            "grs80" | "grs-80" => Some(Self::GRS80),
            _ => None,
        }
    }

    /// 校验参数：长半轴为正有限数，扁率在 [0, 1) 内
    pub fn validate(&self) -> GeoResult<()> {
        if !self.a.is_finite() || self.a <= 0.0 || !self.f.is_finite() || !(0.0..1.0).contains(&self.f) {
            return Err(GeoError::InvalidEllipsoid { a: self.a, f: self.f });
        }
        Ok(())
    }

    // ========================================================================
    // 派生参数（几何常量）
    // ========================================================================

    /// 短半轴 b = a(1-f)
    #[inline]
    #[must_use]
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// 第一偏心率的平方 e² = 2f - f²
    #[inline]
    #[must_use]
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// 第二偏心率的平方 e'² = (a² - b²) / b²
    #[inline]
    #[must_use]
    pub fn ep2(&self) -> f64 {
        let e2 = self.e2();
        e2 / (1.0 - e2)
    }

    /// 是否为正球体
    #[inline]
    #[must_use]
    pub fn is_sphere(&self) -> bool {
        self.f == 0.0
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

impl std::fmt::Display for Ellipsoid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_sphere() {
            write!(f, "Sphere(r={})", self.a)
        } else {
            write!(f, "Ellipsoid(a={}, f=1/{:.6})", self.a, 1.0 / self.f)
        }
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgs84_parameters() {
        let e = Ellipsoid::WGS84;

        assert!((e.a - 6_378_137.0).abs() < 1e-6);

        // 短半轴标准值约 6356752.314245
        assert!((e.b() - 6_356_752.314_245).abs() < 0.001);

        // 第一偏心率平方约 0.00669437999014
        assert!((e.e2() - 0.006_694_379_990_14).abs() < 1e-12);

        let a2 = e.a * e.a;
        let b2 = e.b() * e.b();
        assert!((e.ep2() - (a2 - b2) / b2).abs() < 1e-12);
    }

    #[test]
    fn test_grs80_vs_wgs84() {
        let wgs84 = Ellipsoid::WGS84;
        let grs = Ellipsoid::GRS80;

        assert_eq!(wgs84.a, grs.a);
        assert!((wgs84.f - grs.f).abs() > 1e-12);
        assert!((wgs84.f - grs.f).abs() < 1e-9);
    }

    #[test]
    fn test_sphere() {
        let s = Ellipsoid::sphere(EARTH_MEAN_RADIUS);
        assert!(s.is_sphere());
        assert_eq!(s.b(), s.a);
        assert_eq!(s.e2(), 0.0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(Ellipsoid::WGS84.validate().is_ok());
        assert!(Ellipsoid::new(-1.0, 0.0).validate().is_err());
        assert!(Ellipsoid::new(6_378_137.0, 1.0).validate().is_err());
        assert!(Ellipsoid::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Ellipsoid::from_name("WGS84"), Some(Ellipsoid::WGS84));
        assert_eq!(Ellipsoid::from_name("grs80"), Some(Ellipsoid::GRS80));
        assert_eq!(Ellipsoid::from_name("clarke1866"), None);
    }

    #[test]
    fn test_from_semi_axes() {
        let e = Ellipsoid::from_semi_axes(6_378_137.0, 6_356_752.314_245);
        assert!((e.f - Ellipsoid::WGS84.f).abs() < 1e-9);
    }
}
