use std::time::Duration;

/// 默认稳定等待：1s，与门户页面异步渲染所需时间一致
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1000;

/// 默认下载轮询间隔
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// 默认单文件最长等待时间（秒）
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 600;

/// 默认最大递归深度
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// 门户文件列表容器的 id
pub const DEFAULT_LISTING_CONTAINER_ID: &str = "mainTable";

/// 浏览器下载中的临时文件后缀
pub const DEFAULT_PARTIAL_SUFFIX: &str = ".crdownload";

/// 同步引擎运行参数，由 [`SyncConfig`](super::sync_config::SyncConfig) 转换而来，
/// 测试中也可以直接构造。
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub settle_delay: Duration,
    pub poll_interval: Duration,
    /// 单个文件从出现临时文件到完成的最长等待
    pub download_timeout: Duration,
    pub max_depth: usize,
    /// 分支级并发数，1 表示逐个分支顺序同步
    pub branch_workers: usize,
    pub listing_container_id: String,
    pub partial_suffix: String,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            download_timeout: Duration::from_secs(DEFAULT_DOWNLOAD_TIMEOUT_SECS),
            max_depth: DEFAULT_MAX_DEPTH,
            branch_workers: 1,
            listing_container_id: DEFAULT_LISTING_CONTAINER_ID.to_string(),
            partial_suffix: DEFAULT_PARTIAL_SUFFIX.to_string(),
        }
    }
}

impl SyncOptions {
    /// 判断目录中的某个名字是否为下载中的临时文件
    pub fn is_partial(&self, name: &str) -> bool {
        name.ends_with(&self.partial_suffix)
    }
}
