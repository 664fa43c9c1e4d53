use core::fmt;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::de::value::MapDeserializer;
use serde::{Deserialize, Deserializer};

use crate::internal::auth::structs::portal_credentials::PortalCredentials;

use super::config_error::ConfigError;
use super::sync_options::{
    SyncOptions, DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_LISTING_CONTAINER_ID,
    DEFAULT_MAX_DEPTH, DEFAULT_PARTIAL_SUFFIX, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_SETTLE_DELAY_MS,
};

/// 环境变量与配置文件中的键名前缀
pub const ENV_PREFIX: &str = "PORTAL_MIRROR_";

/// 未指定 `--config` 时读取的配置文件
pub const DEFAULT_CONFIG_FILE: &str = "portal_mirror.env";

const REQUIRED_KEYS: [&str; 4] = ["portal_url", "root_path", "username", "password"];

/// 同步配置
///
/// 来源按优先级从低到高：配置文件（dotenv 格式） -> 进程环境变量。
/// 键名统一为 `PORTAL_MIRROR_<字段名大写>`，例如 `PORTAL_MIRROR_ROOT_PATH`。
#[derive(Clone, Deserialize)]
pub struct SyncConfig {
    pub portal_url: String,
    pub root_path: PathBuf,
    pub username: String,
    pub password: String,

    #[serde(default = "default_settle_delay_ms", deserialize_with = "de_from_str")]
    pub settle_delay_ms: u64,

    #[serde(default = "default_poll_interval_ms", deserialize_with = "de_from_str")]
    pub poll_interval_ms: u64,

    #[serde(
        default = "default_download_timeout_secs",
        deserialize_with = "de_from_str"
    )]
    pub download_timeout_secs: u64,

    #[serde(default = "default_max_depth", deserialize_with = "de_from_str")]
    pub max_depth: usize,

    #[serde(default = "default_branch_workers", deserialize_with = "de_from_str")]
    pub branch_workers: usize,

    #[serde(default = "default_listing_container_id")]
    pub listing_container_id: String,

    #[serde(default = "default_partial_suffix")]
    pub partial_suffix: String,
}

impl SyncConfig {
    /// 读取配置文件并叠加环境变量
    ///
    /// `path` 为 `None` 时尝试读取 [`DEFAULT_CONFIG_FILE`]，文件不存在则只使用环境变量；
    /// 显式指定的文件不存在时返回错误。
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut vars = BTreeMap::new();

        let file = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if path.is_some() || file.exists() {
            for item in dotenvy::from_path_iter(&file)? {
                let (key, value) = item?;
                vars.insert(key, value);
            }
        }

        for (key, value) in std::env::vars() {
            if key.starts_with(ENV_PREFIX) {
                vars.insert(key, value);
            }
        }

        Self::from_vars(vars)
    }

    /// 从键值对构建配置，键名需要带 [`ENV_PREFIX`] 前缀，其余键会被忽略
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let fields: BTreeMap<String, String> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|field| (field.to_ascii_lowercase(), value))
            })
            .collect();

        for key in REQUIRED_KEYS {
            let present = fields
                .get(key)
                .map(|v| !v.trim().is_empty())
                .unwrap_or(false);
            if !present {
                return Err(ConfigError::Missing(format!(
                    "{ENV_PREFIX}{}",
                    key.to_ascii_uppercase()
                )));
            }
        }

        let deserializer =
            MapDeserializer::<_, ConfigError>::new(fields.into_iter());
        let config = Self::deserialize(deserializer)?;

        if config.branch_workers == 0 {
            return Err(ConfigError::Invalid(
                "branch_workers 必须大于 0".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn credentials(&self) -> Result<PortalCredentials, ConfigError> {
        PortalCredentials::new(&self.username, &self.password, &self.portal_url)
            .map_err(ConfigError::Invalid)
    }

    pub fn to_options(&self) -> SyncOptions {
        SyncOptions {
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            download_timeout: Duration::from_secs(self.download_timeout_secs),
            max_depth: self.max_depth,
            branch_workers: self.branch_workers.max(1),
            listing_container_id: self.listing_container_id.clone(),
            partial_suffix: self.partial_suffix.clone(),
        }
    }
}

/// 防止debug泄漏密码
impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("portal_url", &self.portal_url)
            .field("root_path", &self.root_path)
            .field("username", &self.username)
            .field("password", &"<hidden>")
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field("branch_workers", &self.branch_workers)
            .finish_non_exhaustive()
    }
}

/// 环境变量只有字符串，数值字段需要先取字符串再解析
fn de_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<T>().map_err(serde::de::Error::custom)
}

fn default_settle_delay_ms() -> u64 {
    DEFAULT_SETTLE_DELAY_MS
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_download_timeout_secs() -> u64 {
    DEFAULT_DOWNLOAD_TIMEOUT_SECS
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_branch_workers() -> usize {
    1
}

fn default_listing_container_id() -> String {
    DEFAULT_LISTING_CONTAINER_ID.to_string()
}

fn default_partial_suffix() -> String {
    DEFAULT_PARTIAL_SUFFIX.to_string()
}
