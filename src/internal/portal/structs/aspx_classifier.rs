use crate::internal::portal::structs::page::Anchor;
use crate::internal::portal::traits::node_classifier::NodeClassifier;
use crate::internal::remote_file::structs::branch::Branch;
use crate::internal::remote_file::structs::remote_node::{
    BranchEntry, RemoteEntry, RemoteNode,
};

/// ASP.NET 门户的地址约定
///
/// - 文件列表中，子文件夹链接含 `default.aspx`，文件链接含 `download.aspx`
/// - 首页课程链接位于 `<u>` 中，已打开的课程链接含 `Default.aspx`
/// - 课程首页地址中的 `Module` 替换为 `File` 即为文件区地址
/// - 联合开课的课程名形如 `CS1010/CS1010E`，只取第一段
#[derive(Debug, Clone)]
pub struct AspxClassifier {
    pub folder_marker: String,
    pub file_marker: String,
    pub opened_marker: String,
    pub branch_tag: String,
    pub module_segment: String,
    pub files_segment: String,
    pub id_separator: char,
}

impl Default for AspxClassifier {
    fn default() -> Self {
        Self {
            folder_marker: "default.aspx".to_string(),
            file_marker: "download.aspx".to_string(),
            opened_marker: "Default.aspx".to_string(),
            branch_tag: "u".to_string(),
            module_segment: "Module".to_string(),
            files_segment: "File".to_string(),
            id_separator: '/',
        }
    }
}

impl NodeClassifier for AspxClassifier {
    fn classify(&self, anchor: &Anchor) -> RemoteNode {
        if anchor.is_placeholder() || anchor.text.is_empty() {
            return RemoteNode::Ignore;
        }

        let entry = RemoteEntry {
            name: anchor.text.clone(),
            url: anchor.href.clone(),
        };

        if anchor.href.contains(&self.folder_marker) {
            RemoteNode::Folder(entry)
        } else if anchor.href.contains(&self.file_marker) {
            RemoteNode::File(entry)
        } else {
            RemoteNode::Ignore
        }
    }

    fn classify_branch(&self, anchor: &Anchor) -> BranchEntry {
        if !anchor.is_enclosed_by(&self.branch_tag) {
            return BranchEntry::Other;
        }

        if !anchor.href.contains(&self.opened_marker) {
            return BranchEntry::Unopened;
        }

        let id = anchor
            .text
            .split(self.id_separator)
            .next()
            .unwrap_or_default()
            .trim();
        if id.is_empty() {
            return BranchEntry::Other;
        }

        BranchEntry::Opened(Branch {
            id: id.to_string(),
            url: anchor.href.replace(&self.module_segment, &self.files_segment),
        })
    }
}
