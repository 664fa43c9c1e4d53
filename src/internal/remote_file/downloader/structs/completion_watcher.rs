//! 下载完成检测：轮询下载目录判断「下载中 / 完成 / 被拦截」。
//!
//! 浏览器下载时会先写一个带临时后缀的文件（默认 `.crdownload`），完成后改名。
//! 被安全机制拦截的下载不会产生任何文件，只能靠「稳定等待后仍没有本文件的临时文件」来判断。
//! 只看 `<name><后缀>` 这一个标记，目录里其它文件留下的临时文件不影响判断。

use std::path::Path;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::internal::config::structs::sync_options::SyncOptions;
use crate::internal::local_file::structs::local_directory::LocalDirectory;
use crate::internal::portal::traits::portal_session::{PortalSession, SessionFactory};
use crate::internal::remote_file::structs::pending_download::PendingDownload;
use crate::internal::states::progress_state::ProgressState;
use crate::internal::sync::structs::sync_error::SyncError;

use super::download_outcome::{DownloadOutcome, FileReport};

/// 逐个处理一个文件夹的待下载文件
///
/// 同一目录同一时间只有一个下载在进行，所以这里不做并发。
pub struct CompletionWatcher<'a> {
    factory: &'a dyn SessionFactory,
    options: &'a SyncOptions,
    cancel: &'a CancellationToken,
    progress: &'a ProgressState,
}

impl<'a> CompletionWatcher<'a> {
    pub fn new(
        factory: &'a dyn SessionFactory,
        options: &'a SyncOptions,
        cancel: &'a CancellationToken,
        progress: &'a ProgressState,
    ) -> Self {
        Self {
            factory,
            options,
            cancel,
            progress,
        }
    }

    /// 按顺序下载 `pending` 中的文件，返回每个文件的结果
    ///
    /// 会话在返回前一定会被关闭（包括出错时）。遇到被拦截或超时的文件时，
    /// 关闭当前会话并重新打开一个绑定同一目录的会话，再继续后面的文件。
    pub async fn resolve(
        &self,
        pending: Vec<PendingDownload>,
        session: Box<dyn PortalSession>,
    ) -> Result<Vec<FileReport>, SyncError> {
        let mut session = session;
        let mut reports = Vec::with_capacity(pending.len());

        for item in pending {
            if self.cancel.is_cancelled() {
                reports.push(Self::report(&item, DownloadOutcome::Cancelled));
                continue;
            }

            let outcome = match self.fetch_one(&item, session.as_mut()).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    session.close().await;
                    return Err(err);
                }
            };

            match &outcome {
                DownloadOutcome::Succeeded => {
                    self.progress.update_field(|p| p.downloaded += 1);
                }
                DownloadOutcome::Blocked => {
                    warn!("{} 被浏览器标记为危险文件，已跳过", item.name);
                    self.progress.update_field(|p| p.blocked += 1);

                    // 被拦截后的会话不再可靠，换一个绑定同一目录的新会话
                    session = self.reopen(session, &item.target_dir).await?;
                }
                DownloadOutcome::TimedOut => {
                    warn!(
                        "{} 在 {:?} 内没有下载完成",
                        item.name, self.options.download_timeout
                    );
                    self.progress.update_field(|p| p.timed_out += 1);

                    // 关闭会话以中止卡住的下载
                    session = self.reopen(session, &item.target_dir).await?;
                }
                DownloadOutcome::Failed(reason) => {
                    warn!("{} 下载失败: {}", item.name, reason);
                    self.progress.update_field(|p| p.failed += 1);
                }
                DownloadOutcome::Cancelled => {}
            }

            reports.push(Self::report(&item, outcome));
        }

        session.close().await;
        Ok(reports)
    }

    async fn reopen(
        &self,
        session: Box<dyn PortalSession>,
        dir: &Path,
    ) -> Result<Box<dyn PortalSession>, SyncError> {
        session.close().await;
        Ok(self.factory.open(Some(dir)).await?)
    }

    async fn fetch_one(
        &self,
        item: &PendingDownload,
        session: &mut dyn PortalSession,
    ) -> Result<DownloadOutcome, SyncError> {
        info!("正在下载: {}", item.name);

        if let Err(err) = session.trigger_download(&item.url, &item.name).await {
            if err.is_auth() {
                return Err(err.into());
            }
            return Ok(DownloadOutcome::Failed(err.to_string()));
        }

        if !self.pause(self.options.settle_delay).await {
            return Ok(DownloadOutcome::Cancelled);
        }

        self.await_completion(&item.target_dir, &item.name).await
    }

    /// 判断下载结果：稳定等待后既没有目标文件也没有它的临时文件即为被拦截，
    /// 否则轮询直到目标文件出现或超时
    pub async fn await_completion(
        &self,
        dir: &Path,
        name: &str,
    ) -> Result<DownloadOutcome, SyncError> {
        let listing = LocalDirectory::read(dir).await?;
        if listing.contains(name) {
            return Ok(DownloadOutcome::Succeeded);
        }
        let marker = format!("{}{}", name, self.options.partial_suffix);
        if !listing.contains(&marker) {
            return Ok(DownloadOutcome::Blocked);
        }

        let deadline = Instant::now() + self.options.download_timeout;

        loop {
            if !self.pause(self.options.poll_interval).await {
                return Ok(DownloadOutcome::Cancelled);
            }

            if LocalDirectory::read(dir).await?.contains(name) {
                return Ok(DownloadOutcome::Succeeded);
            }

            if Instant::now() >= deadline {
                return Ok(DownloadOutcome::TimedOut);
            }
        }
    }

    /// 等待一段时间；被取消时返回 false
    async fn pause(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = sleep(duration) => true,
        }
    }

    fn report(item: &PendingDownload, outcome: DownloadOutcome) -> FileReport {
        FileReport {
            name: item.name.clone(),
            url: item.url.clone(),
            outcome,
        }
    }
}
