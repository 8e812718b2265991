// crates/rg_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `RgError` 枚举和 `RgResult` 类型别名，用于整个项目的错误处理。
//!
//! # 错误分类
//!
//! - **参数错误**：几何参数非法（负半径、非正步长、空序列）
//! - **输入错误**：网格坐标轴非单调、数组尺寸不匹配
//! - **配置错误**：椭球体等模型参数非法
//! - **计算错误**：迭代不收敛
//!
//! 注意：插值点落在源网格范围之外**不是**错误，结果以 `NaN` 表示。
//!
//! # 示例
//!
//! ```
//! use rg_foundation::error::{RgError, RgResult};
//!
//! fn check_step(step: f64) -> RgResult<()> {
//!     if step <= 0.0 {
//!         return Err(RgError::invalid_argument("radius_step_km", "必须为正"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_step(-1.0).is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type RgResult<T> = Result<T, RgError>;

/// RadialGeo 错误类型
#[derive(Error, Debug)]
pub enum RgError {
    /// 参数非法（几何定义错误等），总是同步返回给调用方
    #[error("参数非法: {name} - {reason}")]
    InvalidArgument {
        /// 参数名
        name: &'static str,
        /// 非法原因
        reason: String,
    },

    /// 无效输入数据
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 数值计算失败
    #[error("{operation} 计算失败: {message}")]
    Computation {
        /// 计算类型
        operation: &'static str,
        /// 失败原因
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl RgError {
    /// 参数非法
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 数值计算失败
    pub fn computation(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Computation {
            operation,
            message: message.into(),
        }
    }

    /// 是否为参数非法错误
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl RgError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &'static str, expected: usize, actual: usize) -> RgResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }

    /// 检查值是否为有限数
    #[inline]
    pub fn check_finite(name: &'static str, value: f64) -> RgResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::invalid_argument(name, format!("必须为有限数, 实际为 {value}")))
        }
    }
}

// ========================================================================
// 宏
// ========================================================================

/// 条件不满足时返回错误
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}

/// 从 `Option` 取值，`None` 时返回错误
#[macro_export]
macro_rules! require {
    ($opt:expr, $err:expr $(,)?) => {
        match $opt {
            Some(v) => v,
            None => return Err($err.into()),
        }
    };
}

// ========================================================================
// 测试
// ========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RgError::invalid_argument("start_radius_km", "不能为负");
        let msg = err.to_string();
        assert!(msg.contains("参数非法"));
        assert!(msg.contains("start_radius_km"));
    }

    #[test]
    fn test_is_invalid_argument() {
        assert!(RgError::invalid_argument("x", "bad").is_invalid_argument());
        assert!(!RgError::invalid_input("bad").is_invalid_argument());
    }

    #[test]
    fn test_check_size() {
        assert!(RgError::check_size("test", 10, 10).is_ok());
        assert!(RgError::check_size("test", 10, 5).is_err());
    }

    #[test]
    fn test_check_finite() {
        assert!(RgError::check_finite("x", 1.0).is_ok());
        assert!(RgError::check_finite("x", f64::INFINITY).is_err());
        assert!(RgError::check_finite("x", f64::NAN).is_err());
    }

    #[test]
    fn test_ensure_macro() {
        fn check(value: i32) -> RgResult<()> {
            ensure!(value > 0, RgError::invalid_input("value must be positive"));
            Ok(())
        }

        assert!(check(1).is_ok());
        assert!(check(-1).is_err());
    }

    #[test]
    fn test_require_macro() {
        fn get_value(opt: Option<i32>) -> RgResult<i32> {
            let v = require!(opt, RgError::invalid_input("value"));
            Ok(v)
        }

        assert_eq!(get_value(Some(42)).unwrap(), 42);
        assert!(get_value(None).is_err());
    }
}
