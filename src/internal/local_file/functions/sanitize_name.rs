/// Windows 文件名中不允许的字符，所有平台统一替换，保证同一棵树在各系统上一致
const RESERVED_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// 把门户上的显示名转换为可用的本地文件名
///
/// 路径分隔符、保留字符和控制字符替换为 `_`；
/// 空名、`.`、`..` 无法安全落盘，返回 `None`。
pub fn sanitize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .map(|c| {
            if c.is_control() || RESERVED_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    Some(cleaned)
}
