// crates/rg_geo/src/longitude.rs

//! 经度约定与归一化
//!
//! 网格数据的经度可能采用 [-180, 180) 或 [0, 360) 两种约定。
//! 采样点的经度必须换算到与源网格完全一致的约定，
//! 否则插值会静默落在网格之外得到 NaN。

use serde::{Deserialize, Serialize};

/// 经度约定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LonConvention {
    /// [-180, 180)
    #[default]
    Signed180,
    /// [0, 360)
    Positive360,
}

impl LonConvention {
    /// 根据网格经度推断约定：任一经度大于 180 视为 [0, 360)
    pub fn detect(lons: &[f64]) -> Self {
        if lons.iter().any(|&lon| lon > 180.0) {
            Self::Positive360
        } else {
            Self::Signed180
        }
    }

    /// 经度是否已在本约定的取值区间内
    #[inline]
    pub fn contains(&self, lon: f64) -> bool {
        match self {
            Self::Signed180 => (-180.0..180.0).contains(&lon),
            Self::Positive360 => (0.0..360.0).contains(&lon),
        }
    }

    /// 归一化经度；区间内的值与 NaN / Inf 原样返回
    #[inline]
    pub fn normalize(&self, lon: f64) -> f64 {
        if !lon.is_finite() || self.contains(lon) {
            return lon;
        }
        match self {
            Self::Signed180 => {
                let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
                // rem_euclid 在极小负数时可能得到 360.0
                if wrapped >= 180.0 {
                    wrapped - 360.0
                } else {
                    wrapped
                }
            }
            Self::Positive360 => {
                let wrapped = lon.rem_euclid(360.0);
                if wrapped >= 360.0 {
                    0.0
                } else {
                    wrapped
                }
            }
        }
    }

    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Signed180 => "signed_180",
            Self::Positive360 => "positive_360",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(LonConvention::detect(&[-161.25, -67.5]), LonConvention::Signed180);
        assert_eq!(LonConvention::detect(&[0.0, 90.0, 180.0]), LonConvention::Signed180);
        assert_eq!(LonConvention::detect(&[198.75, 292.5]), LonConvention::Positive360);
    }

    #[test]
    fn test_normalize_signed() {
        let c = LonConvention::Signed180;
        assert_eq!(c.normalize(-120.0), -120.0);
        assert_eq!(c.normalize(240.0), -120.0);
        assert_eq!(c.normalize(-200.0), 160.0);
        assert_eq!(c.normalize(180.0), -180.0);
        assert_eq!(c.normalize(540.0), -180.0);
        assert!(c.normalize(f64::NAN).is_nan());
    }

    #[test]
    fn test_normalize_positive() {
        let c = LonConvention::Positive360;
        assert_eq!(c.normalize(-120.0), 240.0);
        assert_eq!(c.normalize(240.0), 240.0);
        assert_eq!(c.normalize(360.0), 0.0);
        assert_eq!(c.normalize(-360.0), 0.0);
    }

    #[test]
    fn test_in_range_untouched() {
        let lon = -121.7;
        assert_eq!(LonConvention::Signed180.normalize(lon).to_bits(), lon.to_bits());
        assert!(LonConvention::Positive360.contains(359.9));
        assert!(!LonConvention::Positive360.contains(360.0));
    }
}
