use std::path::Path;

use crate::internal::local_file::structs::local_directory::LocalDirectory;

/// 本库主入口之一，读取本地目录下的文件与文件夹名（按名称排序）
pub async fn get_local_files(path: &Path) -> Result<Vec<String>, String> {
    let listing = LocalDirectory::read(path)
        .await
        .map_err(|e| format!("读取 {} 失败: {}", path.display(), e))?;

    let mut names: Vec<String> = listing.names().map(str::to_string).collect();
    names.sort();
    Ok(names)
}
