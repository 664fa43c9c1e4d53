use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// 本地目录及其当前内容（只记录名字）
#[derive(Debug, Clone)]
pub struct LocalDirectory {
    pub path: PathBuf,
    names: HashSet<String>,
}

impl LocalDirectory {
    /// 读取目录的当前内容；目录必须已经存在
    pub async fn read(path: &Path) -> io::Result<Self> {
        let mut names = HashSet::new();
        let mut entries = tokio::fs::read_dir(path).await?;

        while let Some(entry) = entries.next_entry().await? {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(Self {
            path: path.to_path_buf(),
            names,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
