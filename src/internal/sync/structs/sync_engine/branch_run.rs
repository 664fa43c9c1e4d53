//! 单个分支的递归遍历。
//!
//! 每个文件夹使用自己的会话：会话的下载目录在打开时就已确定，
//! 进入子文件夹时必须打开新会话，当前文件夹的会话在下载阶段结束后关闭。

use std::collections::HashSet;
use std::path::Path;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info_span, warn, Instrument};

use crate::internal::config::structs::sync_options::SyncOptions;
use crate::internal::local_file::functions::sanitize_name::sanitize_name;
use crate::internal::local_file::structs::local_directory::LocalDirectory;
use crate::internal::portal::structs::session_error::SessionError;
use crate::internal::portal::traits::node_classifier::NodeClassifier;
use crate::internal::portal::traits::portal_session::{PortalSession, SessionFactory};
use crate::internal::remote_file::downloader::structs::completion_watcher::CompletionWatcher;
use crate::internal::remote_file::structs::pending_download::PendingDownload;
use crate::internal::remote_file::structs::remote_node::RemoteNode;
use crate::internal::states::progress_state::ProgressState;
use crate::internal::sync::structs::sync_error::SyncError;
use crate::internal::sync::structs::sync_report::BranchReport;

use super::materialize;

pub(super) struct BranchRun<'a> {
    factory: &'a dyn SessionFactory,
    classifier: &'a dyn NodeClassifier,
    options: &'a SyncOptions,
    cancel: &'a CancellationToken,
    progress: &'a ProgressState,
    /// 本分支已进入过的文件夹地址，防止门户列表成环
    visited: HashSet<String>,
    report: BranchReport,
}

impl<'a> BranchRun<'a> {
    pub(super) fn new(
        factory: &'a dyn SessionFactory,
        classifier: &'a dyn NodeClassifier,
        options: &'a SyncOptions,
        cancel: &'a CancellationToken,
        progress: &'a ProgressState,
        report: BranchReport,
    ) -> Self {
        Self {
            factory,
            classifier,
            options,
            cancel,
            progress,
            visited: HashSet::new(),
            report,
        }
    }

    pub(super) fn into_report(self) -> BranchReport {
        self.report
    }

    /// 创建 `root/name`，打开绑定该目录的会话，从分支入口开始遍历
    pub(super) async fn start(
        &mut self,
        root: &Path,
        name: &str,
        url: &str,
    ) -> Result<(), SyncError> {
        let path = materialize(root, name, &mut self.report, self.progress).await?;
        let session = self.factory.open(Some(&path)).await?;
        self.walk(url, &path, session, 0).await
    }

    /// 遍历一个远程文件夹，返回前一定会关闭 `session`
    async fn walk(
        &mut self,
        url: &str,
        local: &Path,
        session: Box<dyn PortalSession>,
        depth: usize,
    ) -> Result<(), SyncError> {
        let mut session = session;
        self.visited.insert(url.to_string());

        let span = info_span!("folder", path = %local.display());
        let pending = match self
            .collect(url, local, session.as_mut(), depth)
            .instrument(span)
            .await
        {
            Ok(pending) => pending,
            Err(err) => {
                session.close().await;
                return Err(err);
            }
        };

        let watcher =
            CompletionWatcher::new(self.factory, self.options, self.cancel, self.progress);
        let reports = watcher.resolve(pending, session).await?;
        self.report.files.extend(reports);

        if self.cancel.is_cancelled() {
            return Err(SyncError::Cancelled);
        }
        Ok(())
    }

    /// 读取远程列表，递归处理子文件夹，返回本文件夹需要下载的文件
    async fn collect(
        &mut self,
        url: &str,
        local: &Path,
        session: &mut dyn PortalSession,
        depth: usize,
    ) -> Result<Vec<PendingDownload>, SyncError> {
        // 本地内容必须在读取远程列表之前拿到
        let listing = LocalDirectory::read(local).await?;
        let nodes = self.read_remote(url, session).await?;

        let mut pending: Vec<PendingDownload> = Vec::new();

        for node in nodes {
            match node {
                RemoteNode::Folder(entry) => {
                    let Some(name) = sanitize_name(&entry.name) else {
                        warn!("文件夹名无法落盘，已跳过: {:?}", entry.name);
                        continue;
                    };
                    if self.visited.contains(&entry.url) {
                        warn!("文件夹 {} 已访问过，跳过以避免循环", name);
                        continue;
                    }
                    if depth + 1 > self.options.max_depth {
                        warn!("文件夹 {} 超过最大深度 {}，已跳过", name, self.options.max_depth);
                        continue;
                    }
                    if self.cancel.is_cancelled() {
                        return Err(SyncError::Cancelled);
                    }

                    let child = materialize(local, &name, &mut self.report, self.progress).await?;
                    let child_session = self.factory.open(Some(&child)).await?;
                    Box::pin(self.walk(&entry.url, &child, child_session, depth + 1)).await?;
                }
                RemoteNode::File(entry) => {
                    let Some(name) = sanitize_name(&entry.name) else {
                        warn!("文件名无法落盘，已跳过: {:?}", entry.name);
                        continue;
                    };
                    if listing.contains(&name) {
                        self.report.skipped_existing += 1;
                        self.progress.update_field(|p| p.skipped_existing += 1);
                        continue;
                    }
                    // 同名文件在列表中出现多次时只下载一次
                    if pending.iter().any(|p| p.name == name) {
                        continue;
                    }
                    pending.push(PendingDownload::new(name, entry.url, local));
                }
                RemoteNode::Ignore => {}
            }
        }

        Ok(pending)
    }

    async fn read_remote(
        &self,
        url: &str,
        session: &mut dyn PortalSession,
    ) -> Result<Vec<RemoteNode>, SyncError> {
        if self.cancel.is_cancelled() {
            return Err(SyncError::Cancelled);
        }

        debug!(url, "打开文件夹");
        let page = session.navigate(url).await?;

        // 等待门户异步渲染
        tokio::select! {
            _ = self.cancel.cancelled() => return Err(SyncError::Cancelled),
            _ = sleep(self.options.settle_delay) => {}
        }

        let container = self.options.listing_container_id.as_str();
        if !page.has_element(container) {
            return Err(SessionError::ElementNotFound(container.to_string()).into());
        }

        Ok(page
            .links_in(container)
            .map(|anchor| self.classifier.classify(anchor))
            .collect())
    }
}
