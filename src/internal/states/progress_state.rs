//! # ProgressState — 同步进度响应式状态
//!
//! 基于 [`tokio::sync::watch`]，同步引擎在各个阶段更新计数，
//! 命令行或测试通过 [`ProgressWatcher`] 异步监听。
//!
//! 读写都不阻塞；多个工作者共享同一个 `ProgressState`（内部是 Arc）。

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

/// 进度状态错误
#[derive(Debug, Error)]
pub enum ProgressStateError {
    /// 状态已被销毁
    #[error("进度状态已被销毁")]
    Destroyed,
}

/// 一次同步运行的累计进度
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncProgress {
    pub branches_done: usize,
    pub folders_created: usize,
    pub downloaded: usize,
    pub skipped_existing: usize,
    pub blocked: usize,
    pub timed_out: usize,
    pub failed: usize,
}

impl SyncProgress {
    pub fn has_problems(&self) -> bool {
        self.blocked + self.timed_out + self.failed > 0
    }
}

/// 同步进度的共享句柄
#[derive(Clone, Debug)]
pub struct ProgressState {
    sender: Arc<watch::Sender<SyncProgress>>,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressState {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(SyncProgress::default());
        Self {
            sender: Arc::new(sender),
        }
    }

    /// 使用闭包修改部分计数，所有监听者都会收到通知
    pub fn update_field<F>(&self, updater: F)
    where
        F: FnOnce(&mut SyncProgress),
    {
        // send_modify 在没有接收者时也会写入
        self.sender.send_modify(updater);
    }

    /// 当前进度的快照
    pub fn get_current(&self) -> SyncProgress {
        self.sender.borrow().clone()
    }

    pub fn watch(&self) -> ProgressWatcher {
        ProgressWatcher {
            receiver: self.sender.subscribe(),
        }
    }
}

/// 进度监听器
pub struct ProgressWatcher {
    receiver: watch::Receiver<SyncProgress>,
}

impl ProgressWatcher {
    /// 等待下一次变化，返回新值；状态销毁后返回错误
    pub async fn changed(&mut self) -> Result<SyncProgress, ProgressStateError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| ProgressStateError::Destroyed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    pub fn borrow(&self) -> SyncProgress {
        self.receiver.borrow().clone()
    }
}
