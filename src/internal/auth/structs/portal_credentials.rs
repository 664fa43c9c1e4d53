use core::fmt;
use std::sync::Arc;

use base64::Engine;
use sha2::{Digest, Sha256};
use url::Url;

/// 门户认证信息
///
/// 该结构体定位
/// - 保存门户根地址与账号密码，供会话提供者登录时使用
/// - 每次打开新会话都会重新登录，所以这里只存凭据，不存 cookie
///
/// 默认Eq时会匹配base_url和指纹，如果只需要比较账号，使用eq_only_account方法
#[derive(Clone)]
pub struct PortalCredentials {
    pub base_url: Arc<Url>,
    pub(crate) username: Arc<String>,
    pub(crate) password: Arc<String>, // 对外不允许直接访问
    fingerprint: Arc<String>,
}

impl PortalCredentials {
    pub fn new(
        username: &str,
        password: &str,
        base_url: &str,
    ) -> Result<Self, String> {
        if username.is_empty() {
            return Err("用户名为空".to_string());
        }

        let base_url = _format_base_url(base_url)?;
        let fingerprint = _fingerprint(username, password);

        Ok(Self {
            base_url: Arc::new(base_url),
            username: Arc::new(username.to_string()),
            password: Arc::new(password.to_string()),
            fingerprint: Arc::new(fingerprint),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// 仅比较账号是否相同（不关心门户地址）
    pub fn eq_only_account(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
    }
}

impl PartialEq for PortalCredentials {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
            && self.base_url == other.base_url
    }
}

/// 防止debug泄漏密码
impl fmt::Debug for PortalCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalCredentials")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("password", &"<hidden>")
            .finish()
    }
}

fn _format_base_url(url: &str) -> Result<Url, String> {
    if url.is_empty() {
        return Err("门户地址为空".to_string());
    }

    let mut base_url = Url::parse(url).map_err(|e| e.to_string())?;

    if !base_url.path().ends_with('/') {
        let new_path = format!("{}/", base_url.path());
        base_url.set_path(&new_path);
    }

    Ok(base_url)
}

fn _fingerprint(username: &str, password: &str) -> String {
    let token = base64::engine::general_purpose::STANDARD
        .encode(format!("{username}:{password}"));

    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
