//! 同步引擎：枚举课程，逐个分支递归同步。
//!
//! 使用方式：`SyncEngine::new(factory, classifier, landing_url, root).with_options(options).sync(None).await`

mod branch_run;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, Instrument};

use crate::internal::config::structs::sync_options::SyncOptions;
use crate::internal::local_file::functions::ensure_folder::ensure_folder;
use crate::internal::local_file::functions::sanitize_name::sanitize_name;
use crate::internal::portal::traits::node_classifier::NodeClassifier;
use crate::internal::portal::traits::portal_session::SessionFactory;
use crate::internal::remote_file::functions::list_branches::list_branches;
use crate::internal::remote_file::structs::branch::{Branch, BranchMap};
use crate::internal::states::progress_state::ProgressState;

use super::sync_error::SyncError;
use super::sync_report::{BranchReport, SyncReport};

use branch_run::BranchRun;

pub struct SyncEngine {
    factory: Arc<dyn SessionFactory>,
    classifier: Arc<dyn NodeClassifier>,
    landing_url: String,
    root: PathBuf,
    options: SyncOptions,
    cancel: CancellationToken,
    progress: ProgressState,
}

impl SyncEngine {
    pub fn new(
        factory: Arc<dyn SessionFactory>,
        classifier: Arc<dyn NodeClassifier>,
        landing_url: &str,
        root: &Path,
    ) -> Self {
        Self {
            factory,
            classifier,
            landing_url: landing_url.to_string(),
            root: root.to_path_buf(),
            options: SyncOptions::default(),
            cancel: CancellationToken::new(),
            progress: ProgressState::new(),
        }
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    /// 外部持有同一个 token，调用 `cancel()` 即可中止同步
    pub fn with_cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// 共享外部的进度状态，便于在同步过程中监听
    pub fn with_progress(mut self, progress: ProgressState) -> Self {
        self.progress = progress;
        self
    }

    pub fn progress(&self) -> ProgressState {
        self.progress.clone()
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// 用默认下载目录的会话读取课程列表，读完即关闭会话
    pub async fn list_branches(&self) -> Result<BranchMap, SyncError> {
        let mut session = self.factory.open(None).await?;
        let result =
            list_branches(session.as_mut(), self.classifier.as_ref(), &self.landing_url)
                .await;
        session.close().await;
        Ok(result?)
    }

    /// 同步课程
    ///
    /// `selection` 为 `None` 时同步全部课程，否则只同步其中列出的课程，
    /// 顺序以课程表为准，不认识的代码直接忽略。
    ///
    /// 只有致命错误（登录失败）会返回 `Err`，单个分支的失败记录在报告中。
    pub async fn sync(
        &self,
        selection: Option<&[String]>,
    ) -> Result<SyncReport, SyncError> {
        let started_at = Utc::now();

        tokio::fs::create_dir_all(&self.root).await?;

        let branches = self.list_branches().await?;
        if let Some(ids) = selection {
            for id in ids.iter().filter(|id| !branches.contains(id)) {
                debug!("忽略未知课程: {}", id);
            }
        }

        // 致命错误时通知其他分支尽快结束，但不影响外部 token
        let run_cancel = self.cancel.child_token();
        let workers = self.options.branch_workers.max(1);

        let mut results = stream::iter(branches.select(selection))
            .map(|branch| self.sync_branch(branch, &run_cancel))
            .buffered(workers);

        let mut reports = Vec::new();
        let mut fatal: Option<SyncError> = None;

        while let Some(result) = results.next().await {
            match result {
                Ok(report) => reports.push(report),
                Err(err) => {
                    error!("同步中止: {}", err);
                    run_cancel.cancel();
                    fatal.get_or_insert(err);
                }
            }
        }

        if let Some(err) = fatal {
            return Err(err);
        }

        Ok(SyncReport {
            started_at,
            finished_at: Utc::now(),
            branches: reports,
            cancelled: self.cancel.is_cancelled(),
        })
    }

    async fn sync_branch(
        &self,
        branch: Branch,
        cancel: &CancellationToken,
    ) -> Result<BranchReport, SyncError> {
        let span = info_span!("branch", id = %branch.id);

        async move {
            let name = sanitize_name(&branch.id).unwrap_or_else(|| "_".to_string());
            let mut report = BranchReport::new(&branch.id, self.root.join(&name));

            if cancel.is_cancelled() {
                report.cancelled = true;
                return Ok(report);
            }

            info!("开始同步");
            let mut run = BranchRun::new(
                self.factory.as_ref(),
                self.classifier.as_ref(),
                &self.options,
                cancel,
                &self.progress,
                report,
            );

            let result = run.start(&self.root, &name, &branch.url).await;
            let mut report = run.into_report();
            self.progress.update_field(|p| p.branches_done += 1);

            match result {
                Ok(()) => {
                    info!("同步完成");
                    Ok(report)
                }
                Err(SyncError::Cancelled) => {
                    info!("同步被取消");
                    report.cancelled = true;
                    Ok(report)
                }
                Err(err) if err.is_fatal() => Err(err),
                Err(err) => {
                    error!("分支中止: {}", err);
                    report.error = Some(err.to_string());
                    Ok(report)
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// 确保目录存在，并记录到报告与进度
pub(crate) async fn materialize(
    parent: &Path,
    name: &str,
    report: &mut BranchReport,
    progress: &ProgressState,
) -> Result<PathBuf, SyncError> {
    let (path, created) = ensure_folder(parent, name).await?;
    if created {
        report.folders_created.push(path.clone());
        progress.update_field(|p| p.folders_created += 1);
    }
    Ok(path)
}
