// crates/rg_geo/src/error.rs

//! 大地测量错误类型
//!
//! 包含坐标校验、椭球体参数和测地线解算相关的错误。
//! 所有错误可转换为 `rg_foundation::RgError` 向上传播。
//!
//! # 错误分类
//!
//! - **验证错误**：纬度越界、坐标非有限、距离为负
//! - **配置错误**：椭球体参数无效
//! - **计算错误**：Vincenty 迭代不收敛

use rg_foundation::RgError;
use thiserror::Error;

/// Geo 模块结果类型
pub type GeoResult<T> = Result<T, GeoError>;

/// 大地测量错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    /// 坐标超出有效范围
    #[error("{coord_type} 超出范围: {value:.6} (允许范围: {min} 到 {max})")]
    CoordinateOutOfRange {
        /// 坐标类型（如"纬度"）
        coord_type: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 数值非有限（NaN / Inf）
    #[error("{name} 不是有限数: {value}")]
    NonFinite {
        /// 数值名称
        name: &'static str,
        /// 实际值
        value: f64,
    },

    /// 距离为负
    #[error("测地线距离不能为负: {distance}")]
    NegativeDistance {
        /// 实际距离
        distance: f64,
    },

    /// 椭球体参数无效
    #[error("无效的椭球体参数: a={a}, f={f}")]
    InvalidEllipsoid {
        /// 长半轴
        a: f64,
        /// 扁率
        f: f64,
    },

    /// Vincenty 迭代不收敛
    #[error("Vincenty 公式迭代不收敛 ({operation})")]
    VincentyNotConverged {
        /// 正解 / 反解
        operation: &'static str,
    },
}

// ============================================================================
// 转换实现
// ============================================================================

impl From<GeoError> for RgError {
    fn from(err: GeoError) -> Self {
        match err {
            GeoError::CoordinateOutOfRange { coord_type, value, min, max } => {
                RgError::invalid_argument(
                    coord_type,
                    format!("{value:.6} 超出允许范围 [{min}, {max}]"),
                )
            }
            GeoError::NonFinite { name, value } => {
                RgError::invalid_argument(name, format!("必须为有限数, 实际为 {value}"))
            }
            GeoError::NegativeDistance { distance } => {
                RgError::invalid_argument("distance", format!("不能为负: {distance}"))
            }
            GeoError::InvalidEllipsoid { a, f } => {
                RgError::config(format!("无效的椭球体参数: a={a}, f={f}"))
            }
            GeoError::VincentyNotConverged { operation } => {
                RgError::computation("Vincenty", format!("{operation} 迭代不收敛"))
            }
        }
    }
}

// ============================================================================
// 便捷构造函数
// ============================================================================

impl GeoError {
    /// 创建坐标越界错误
    #[inline]
    pub fn coordinate_out_of_range(
        coord_type: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> Self {
        Self::CoordinateOutOfRange {
            coord_type,
            value,
            min,
            max,
        }
    }

    /// 创建非有限值错误
    #[inline]
    pub fn non_finite(name: &'static str, value: f64) -> Self {
        Self::NonFinite { name, value }
    }

    /// 检查数值有限
    #[inline]
    pub fn check_finite(name: &'static str, value: f64) -> GeoResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::non_finite(name, value))
        }
    }

    /// 检查纬度在 [-90, 90] 内
    #[inline]
    pub fn check_latitude(lat: f64) -> GeoResult<()> {
        Self::check_finite("latitude", lat)?;
        if (-90.0..=90.0).contains(&lat) {
            Ok(())
        } else {
            Err(Self::coordinate_out_of_range("latitude", lat, -90.0, 90.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_out_of_range_error() {
        let err = GeoError::coordinate_out_of_range("latitude", 95.5, -90.0, 90.0);
        let msg = err.to_string();
        assert!(msg.contains("95.5"));
        assert!(msg.contains("-90"));
    }

    #[test]
    fn test_check_latitude() {
        assert!(GeoError::check_latitude(90.0).is_ok());
        assert!(GeoError::check_latitude(-90.0).is_ok());
        assert!(GeoError::check_latitude(90.5).is_err());
        assert!(matches!(
            GeoError::check_latitude(f64::NAN),
            Err(GeoError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_conversion_to_rg_error() {
        let err: RgError = GeoError::coordinate_out_of_range("latitude", 100.0, -90.0, 90.0).into();
        assert!(err.is_invalid_argument());

        let err: RgError = GeoError::VincentyNotConverged { operation: "direct" }.into();
        assert!(matches!(err, RgError::Computation { .. }));
    }
}
