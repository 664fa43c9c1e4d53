pub mod config_error;
pub mod sync_config;
pub mod sync_options;

pub use config_error::ConfigError;
pub use sync_config::SyncConfig;
pub use sync_options::SyncOptions;
