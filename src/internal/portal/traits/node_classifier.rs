use crate::internal::portal::structs::page::Anchor;
use crate::internal::remote_file::structs::remote_node::{BranchEntry, RemoteNode};

/// 链接分类器：把门户的地址约定与遍历算法隔开
///
/// 门户改版时只需要换一个实现。
pub trait NodeClassifier: Send + Sync {
    /// 文件列表容器中的链接 -> 文件夹 / 文件 / 忽略
    fn classify(&self, anchor: &Anchor) -> RemoteNode;

    /// 门户首页中的链接 -> 已打开课程 / 未打开课程 / 其他
    fn classify_branch(&self, anchor: &Anchor) -> BranchEntry;
}
