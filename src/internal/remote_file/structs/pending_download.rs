use std::path::{Path, PathBuf};

/// 一次待下载的文件，仅在单个文件夹的下载阶段存在
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDownload {
    pub name: String,
    pub url: String,
    pub target_dir: PathBuf,
}

impl PendingDownload {
    pub fn new(name: impl Into<String>, url: impl Into<String>, target_dir: &Path) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            target_dir: target_dir.to_path_buf(),
        }
    }

    pub fn target_path(&self) -> PathBuf {
        self.target_dir.join(&self.name)
    }
}
