use super::branch::Branch;

/// 远程列表中的一项：显示名 + 地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub url: String,
}

/// 文件列表中一个链接的分类结果，遍历时即用即弃
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteNode {
    Folder(RemoteEntry),
    File(RemoteEntry),
    /// 占位链接、导航链接等与同步无关的内容
    Ignore,
}

/// 门户首页中一个条目的分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchEntry {
    Opened(Branch),
    /// 用户尚未在门户上打开的课程；其后的条目都不再处理
    Unopened,
    /// 不是课程条目
    Other,
}
