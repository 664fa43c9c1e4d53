//! 门户会话错误类型。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// 账号或密码错误、登录页结构变化等，整个同步无法继续
    #[error("登录失败: {0}")]
    Auth(String),

    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("页面中找不到元素: {0}")]
    ElementNotFound(String),

    #[error("下载目录操作失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("服务器返回异常状态 {0}")]
    Status(u16),
}

impl SessionError {
    pub fn is_auth(&self) -> bool {
        matches!(self, SessionError::Auth(_))
    }
}
