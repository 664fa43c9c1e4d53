pub mod branch;
pub mod pending_download;
pub mod remote_node;
