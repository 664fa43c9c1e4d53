use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::internal::local_file::structs::local_directory::LocalDirectory;

/// 确保 `parent/name` 目录存在
///
/// 只有在 `parent` 的当前内容里没有 `name` 时才创建，返回目录路径和是否新建。
pub async fn ensure_folder(parent: &Path, name: &str) -> io::Result<(PathBuf, bool)> {
    let target = parent.join(name);
    let listing = LocalDirectory::read(parent).await?;

    if listing.contains(name) {
        return Ok((target, false));
    }

    info!("创建文件夹: {}", name);
    tokio::fs::create_dir(&target).await?;
    Ok((target, true))
}
