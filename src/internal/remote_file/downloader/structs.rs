pub mod completion_watcher;
pub mod download_outcome;

pub use completion_watcher::CompletionWatcher;
pub use download_outcome::{DownloadOutcome, FileReport};
