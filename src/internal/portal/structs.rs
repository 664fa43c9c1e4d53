pub mod aspx_classifier;
pub mod http_portal;
pub mod http_session;
pub mod page;
pub mod session_error;
