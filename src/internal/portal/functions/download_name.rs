use std::path::PathBuf;

use percent_encoding::percent_decode_str;
use url::Url;

/// 从 `Content-Disposition` 中取出文件名
///
/// 优先使用 RFC 5987 的 `filename*=UTF-8''...`，其次是 `filename="..."`。
pub fn content_disposition_filename(value: &str) -> Option<String> {
    let mut plain: Option<String> = None;

    for part in value.split(';').map(str::trim) {
        let Some((key, raw)) = part.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let raw = raw.trim();

        if key == "filename*" {
            // charset'language'encoded
            let encoded = raw.splitn(3, '\'').nth(2).unwrap_or(raw);
            let decoded = percent_decode_str(encoded.trim_matches('"'))
                .decode_utf8_lossy()
                .to_string();
            if !decoded.is_empty() {
                return Some(decoded);
            }
        } else if key == "filename" {
            let name = raw.trim_matches('"').to_string();
            if !name.is_empty() {
                plain = Some(name);
            }
        }
    }

    plain
}

/// 取地址最后一段路径作为文件名（URL 解码）
pub fn name_from_url(url: &Url) -> Option<String> {
    let last = url.path_segments()?.filter(|s| !s.is_empty()).next_back()?;
    let decoded = percent_decode_str(last).decode_utf8_lossy().to_string();
    if decoded.is_empty() { None } else { Some(decoded) }
}

/// 进程默认下载目录：系统下载目录，取不到时为当前目录
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
