// crates/rg_config/src/error.rs

//! 配置层错误类型

use rg_foundation::RgError;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 缺失配置
    #[error("缺失配置: {0}")]
    Missing(String),
}

impl ConfigError {
    /// 创建无效值错误
    pub fn invalid(key: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// 把核心层校验错误归到某个配置键下
    pub fn from_core(key: impl Into<String>, err: RgError) -> Self {
        let value = match &err {
            RgError::InvalidArgument { name, .. } => (*name).to_string(),
            _ => String::new(),
        };
        Self::InvalidValue {
            key: key.into(),
            value,
            reason: err.to_string(),
        }
    }
}
