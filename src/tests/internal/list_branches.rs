//! 课程枚举测试

use std::sync::Arc;

use tempfile::TempDir;

use crate::internal::portal::structs::aspx_classifier::AspxClassifier;
use crate::internal::portal::traits::portal_session::SessionFactory;
use crate::internal::remote_file::functions::list_branches::list_branches;
use crate::tests::{engine_for, FakePortal, PORTAL_BASE};

#[tokio::test]
async fn stops_at_first_unopened_branch() {
    let dir = TempDir::new().unwrap();
    let mut portal = FakePortal::new(dir.path());
    let cs = portal.add_branch("CS1010/CS1010E");
    portal.add_unopened_branch("GE1000");
    portal.add_branch("MA1101R");
    let portal = Arc::new(portal);

    let mut session = portal.open(None).await.unwrap();
    let branches = list_branches(session.as_mut(), &AspxClassifier::default(), PORTAL_BASE)
        .await
        .unwrap();
    session.close().await;

    assert_eq!(branches.len(), 1);
    let branch = branches.get("CS1010").unwrap();
    assert_eq!(branch.url, cs);
    assert!(branch.url.contains("/File/"));
    assert!(!branches.contains("MA1101R"));
}

#[tokio::test]
async fn engine_lists_with_default_session() {
    let dir = TempDir::new().unwrap();
    let mut portal = FakePortal::new(dir.path());
    portal.add_branch("CS1010");
    portal.add_branch("MA1101R");
    let portal = Arc::new(portal);

    let branches = engine_for(&portal, &dir.path().join("mirror"))
        .list_branches()
        .await
        .unwrap();

    let ids: Vec<_> = branches.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["CS1010", "MA1101R"]);
    assert_eq!(portal.opened(), vec![None]);
    assert!(portal.all_sessions_closed());
    assert_eq!(portal.navigations(), vec![PORTAL_BASE.to_string()]);
}

#[tokio::test]
async fn empty_landing_page_yields_empty_map() {
    let dir = TempDir::new().unwrap();
    let portal = Arc::new(FakePortal::new(dir.path()));

    let branches = engine_for(&portal, dir.path()).list_branches().await.unwrap();

    assert!(branches.is_empty());
}

#[test]
fn branch_map_keeps_first_position() {
    use crate::internal::remote_file::structs::branch::BranchMap;

    let map: BranchMap = [
        ("CS1010".to_string(), "u1".to_string()),
        ("MA1101R".to_string(), "u2".to_string()),
        ("CS1010".to_string(), "u3".to_string()),
    ]
    .into_iter()
    .collect();

    assert_eq!(map.len(), 2);
    assert_eq!(map.get("CS1010").unwrap().url, "u3");
    let ids: Vec<_> = map.iter().map(|b| b.id.clone()).collect();
    assert_eq!(ids, ["CS1010", "MA1101R"]);

    // 选择结果按分支表顺序，忽略未知代码
    let selection = vec!["MA1101R".to_string(), "CS1010".to_string(), "XX".to_string()];
    let picked: Vec<_> = map
        .select(Some(&selection))
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(picked, ["CS1010", "MA1101R"]);
    assert_eq!(map.select(None).len(), 2);
}
