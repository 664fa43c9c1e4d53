use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::internal::remote_file::downloader::structs::download_outcome::{
    DownloadOutcome, FileReport,
};

/// 全部成功
pub const EXIT_OK: i32 = 0;
/// 登录失败、配置错误等致命错误
pub const EXIT_FATAL: i32 = 1;
/// 部分文件被拦截、超时、失败，或有分支中止、同步被取消
pub const EXIT_PARTIAL: i32 = 2;

/// 单个分支的同步结果
#[derive(Debug, Clone)]
pub struct BranchReport {
    pub id: String,
    pub path: PathBuf,
    /// 本次新建的本地目录，按创建顺序
    pub folders_created: Vec<PathBuf>,
    /// 本地已存在而跳过的文件数
    pub skipped_existing: usize,
    pub files: Vec<FileReport>,
    /// 分支被中止时的原因
    pub error: Option<String>,
    pub cancelled: bool,
}

impl BranchReport {
    pub fn new(id: &str, path: PathBuf) -> Self {
        Self {
            id: id.to_string(),
            path,
            folders_created: Vec::new(),
            skipped_existing: 0,
            files: Vec::new(),
            error: None,
            cancelled: false,
        }
    }

    pub fn count(&self, outcome: &DownloadOutcome) -> usize {
        self.files.iter().filter(|f| &f.outcome == outcome).count()
    }

    pub fn has_problems(&self) -> bool {
        self.error.is_some()
            || self.cancelled
            || self.files.iter().any(|f| f.outcome.is_problem())
    }
}

/// 一次同步运行的结果
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub branches: Vec<BranchReport>,
    pub cancelled: bool,
}

impl SyncReport {
    pub fn branch(&self, id: &str) -> Option<&BranchReport> {
        self.branches.iter().find(|b| b.id == id)
    }

    pub fn files(&self) -> impl Iterator<Item = &FileReport> {
        self.branches.iter().flat_map(|b| b.files.iter())
    }

    pub fn downloaded(&self) -> usize {
        self.files().filter(|f| f.outcome.is_success()).count()
    }

    pub fn has_problems(&self) -> bool {
        self.cancelled || self.branches.iter().any(BranchReport::has_problems)
    }

    pub fn exit_code(&self) -> i32 {
        if self.has_problems() {
            EXIT_PARTIAL
        } else {
            EXIT_OK
        }
    }
}
