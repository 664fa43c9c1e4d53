pub mod node_classifier;
pub mod portal_session;
