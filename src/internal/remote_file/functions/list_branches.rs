use tracing::{debug, info};

use crate::internal::portal::structs::session_error::SessionError;
use crate::internal::portal::traits::node_classifier::NodeClassifier;
use crate::internal::portal::traits::portal_session::PortalSession;
use crate::internal::remote_file::structs::branch::BranchMap;
use crate::internal::remote_file::structs::remote_node::BranchEntry;

/// 读取门户首页，列出所有已打开的课程
///
/// 门户把已打开的课程排在前面，遇到第一个未打开的课程就停止，
/// 其后的条目一律不看。这不是错误。
pub async fn list_branches(
    session: &mut dyn PortalSession,
    classifier: &dyn NodeClassifier,
    landing_url: &str,
) -> Result<BranchMap, SessionError> {
    let page = session.navigate(landing_url).await?;

    let mut branches = BranchMap::new();

    for anchor in &page.anchors {
        match classifier.classify_branch(anchor) {
            BranchEntry::Opened(branch) => {
                debug!(id = %branch.id, url = %branch.url, "发现课程");
                branches.insert(branch.id, branch.url);
            }
            BranchEntry::Unopened => {
                debug!(text = %anchor.text, "课程尚未打开，停止枚举");
                break;
            }
            BranchEntry::Other => {}
        }
    }

    info!("共 {} 门课程", branches.len());
    Ok(branches)
}
