pub mod sync_engine;
pub mod sync_error;
pub mod sync_report;

pub use sync_engine::SyncEngine;
pub use sync_error::SyncError;
pub use sync_report::{BranchReport, SyncReport};
