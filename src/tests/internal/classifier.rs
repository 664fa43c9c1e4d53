//! 链接分类测试

use crate::internal::portal::structs::aspx_classifier::AspxClassifier;
use crate::internal::portal::structs::page::Anchor;
use crate::internal::portal::traits::node_classifier::NodeClassifier;
use crate::internal::remote_file::structs::remote_node::{BranchEntry, RemoteNode};

fn anchor(href: &str, text: &str, tags: &[&str]) -> Anchor {
    Anchor {
        raw_href: href.to_string(),
        href: href.to_string(),
        text: text.to_string(),
        enclosing_tags: tags.iter().map(|t| t.to_string()).collect(),
        container_ids: vec!["mainTable".to_string()],
    }
}

#[test]
fn classify_folder_file_and_other() {
    let c = AspxClassifier::default();

    match c.classify(&anchor("https://p/File/default.aspx?FolderID=1", "Week 1", &[])) {
        RemoteNode::Folder(entry) => assert_eq!(entry.name, "Week 1"),
        other => panic!("应为文件夹: {other:?}"),
    }
    match c.classify(&anchor("https://p/File/download.aspx?FileID=2", "a.pdf", &[])) {
        RemoteNode::File(entry) => {
            assert_eq!(entry.name, "a.pdf");
            assert_eq!(entry.url, "https://p/File/download.aspx?FileID=2");
        }
        other => panic!("应为文件: {other:?}"),
    }
    assert_eq!(
        c.classify(&anchor("https://p/help.html", "帮助", &[])),
        RemoteNode::Ignore
    );
}

#[test]
fn classify_ignores_placeholders_and_blank_text() {
    let c = AspxClassifier::default();

    assert_eq!(c.classify(&anchor("#", "download.aspx", &[])), RemoteNode::Ignore);
    assert_eq!(
        c.classify(&anchor("javascript:void(0)", "x", &[])),
        RemoteNode::Ignore
    );
    assert_eq!(
        c.classify(&anchor("https://p/File/download.aspx?FileID=2", "", &[])),
        RemoteNode::Ignore
    );
}

#[test]
fn folder_marker_is_case_sensitive() {
    let c = AspxClassifier::default();
    // 大写的 Default.aspx 是课程首页，不是文件夹
    assert_eq!(
        c.classify(&anchor("https://p/File/Default.aspx?CourseID=1", "课程", &[])),
        RemoteNode::Ignore
    );
}

#[test]
fn classify_branch_entries() {
    let c = AspxClassifier::default();

    match c.classify_branch(&anchor(
        "https://p/v1/Module/Default.aspx?CourseID=9",
        "CS1010/CS1010E/CS1010S",
        &["body", "u"],
    )) {
        BranchEntry::Opened(branch) => {
            assert_eq!(branch.id, "CS1010");
            assert_eq!(branch.url, "https://p/v1/File/Default.aspx?CourseID=9");
        }
        other => panic!("应为已打开课程: {other:?}"),
    }

    assert_eq!(
        c.classify_branch(&anchor("https://p/v1/Module/Wait.aspx", "GE1000", &["u"])),
        BranchEntry::Unopened
    );
    assert_eq!(
        c.classify_branch(&anchor("https://p/v1/Module/Default.aspx", "CS1010", &["div"])),
        BranchEntry::Other
    );
}
