//! 配置相关错误类型。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件失败: {0}")]
    ReadFile(#[from] dotenvy::Error),

    #[error("缺少配置项: {0}")]
    Missing(String),

    #[error("配置项格式错误: {0}")]
    Invalid(String),
}

impl serde::de::Error for ConfigError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        ConfigError::Invalid(msg.to_string())
    }
}
