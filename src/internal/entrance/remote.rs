use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::internal::config::structs::sync_config::SyncConfig;
use crate::internal::portal::structs::aspx_classifier::AspxClassifier;
use crate::internal::portal::structs::http_portal::HttpPortal;
use crate::internal::remote_file::structs::branch::BranchMap;
use crate::internal::states::progress_state::ProgressState;
use crate::internal::sync::structs::sync_engine::SyncEngine;
use crate::internal::sync::structs::sync_error::SyncError;
use crate::internal::sync::structs::sync_report::SyncReport;

/// 按配置组装 HTTP 门户驱动与同步引擎
pub fn build_engine(config: &SyncConfig) -> Result<SyncEngine, SyncError> {
    let credentials = config.credentials()?;
    let options = config.to_options();

    let portal = HttpPortal::new(credentials, &options.partial_suffix);
    let landing_url = portal.landing_url().to_string();

    Ok(SyncEngine::new(
        Arc::new(portal),
        Arc::new(AspxClassifier::default()),
        &landing_url,
        &config.root_path,
    )
    .with_options(options))
}

/// 本库主入口：把门户上的课程文件同步到 `config.root_path`
///
/// `selection` 为 `None` 时同步全部课程。`progress` 可用于在同步过程中监听进度。
///
/// example:
/// ```
/// use portal_mirror::{sync_portal, config::SyncConfig, states::ProgressState};
/// use tokio_util::sync::CancellationToken;
///
/// let config = SyncConfig::load(None)?;
/// let report = sync_portal(&config, None, CancellationToken::new(), ProgressState::new()).await?;
/// println!("下载了 {} 个文件", report.downloaded());
/// ```
pub async fn sync_portal(
    config: &SyncConfig,
    selection: Option<&[String]>,
    cancel: CancellationToken,
    progress: ProgressState,
) -> Result<SyncReport, SyncError> {
    let engine = build_engine(config)?
        .with_cancel_token(cancel)
        .with_progress(progress);
    engine.sync(selection).await
}

/// 只读取课程列表，不下载
pub async fn list_portal_branches(config: &SyncConfig) -> Result<BranchMap, SyncError> {
    build_engine(config)?.list_branches().await
}
