//! 真实门户测试：需要 `src/tests/env/live.env`，没有账号时直接跳过

use std::sync::Arc;

use crate::internal::portal::structs::aspx_classifier::AspxClassifier;
use crate::internal::portal::structs::http_portal::HttpPortal;
use crate::internal::sync::structs::sync_engine::SyncEngine;
use crate::tests::load_account_optional;

#[tokio::test]
async fn live_list_branches() {
    let Some(account) = load_account_optional() else {
        return;
    };
    let credentials = account.to_credentials().unwrap();
    let dir = tempfile::TempDir::new().unwrap();

    let portal = HttpPortal::new(credentials, ".crdownload").with_default_dir(dir.path());
    let landing = portal.landing_url().to_string();
    let engine = SyncEngine::new(
        Arc::new(portal),
        Arc::new(AspxClassifier::default()),
        &landing,
        dir.path(),
    );

    let branches = engine.list_branches().await.unwrap();
    for branch in branches.iter() {
        println!("branch: {} -> {}", branch.id, branch.url);
    }
}
