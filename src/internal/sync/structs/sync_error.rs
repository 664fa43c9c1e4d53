//! 同步引擎错误类型。
//!
//! 单个文件的下载结果不是错误，见 [`DownloadOutcome`](crate::remote_file::DownloadOutcome)。

use thiserror::Error;

use crate::internal::config::structs::config_error::ConfigError;
use crate::internal::portal::structs::session_error::SessionError;

#[derive(Debug, Error)]
pub enum SyncError {
    /// 登录失败：没有会话就什么也做不了，整个同步中止
    #[error("登录失败: {0}")]
    Auth(String),

    #[error("门户会话异常: {0}")]
    Session(SessionError),

    /// 本地目录创建、读取失败；只中止当前分支
    #[error("本地文件操作失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("同步被取消")]
    Cancelled,

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

impl From<SessionError> for SyncError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Auth(message) => SyncError::Auth(message),
            other => SyncError::Session(other),
        }
    }
}

impl SyncError {
    /// 致命错误会中止整个同步，而不仅是当前分支
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::Auth(_) | SyncError::Config(_) | SyncError::Cancelled
        )
    }
}
