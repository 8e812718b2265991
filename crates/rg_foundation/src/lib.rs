// crates/rg_foundation/src/lib.rs

//! RadialGeo Foundation Layer
//!
//! 零依赖基础层（仅依赖 thiserror），提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 `RgError` 与 `ensure!` / `require!` 宏
//! - [`float`]: 浮点比较与步长计数工具
//!
//! # 示例
//!
//! ```
//! use rg_foundation::prelude::*;
//!
//! fn positive(x: f64) -> RgResult<f64> {
//!     ensure!(x > 0.0, RgError::invalid_argument("x", "必须为正"));
//!     Ok(x)
//! }
//!
//! assert!(positive(1.0).is_ok());
//! assert!(positive(0.0).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod float;

// 重导出常用类型
pub use error::{RgError, RgResult};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{RgError, RgResult};
    pub use crate::float::{approx_eq, approx_eq_rel, whole_steps};
    pub use crate::{ensure, require};
}
