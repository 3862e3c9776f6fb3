//! Utility modules for error handling, configuration and paths

pub mod config;
pub mod error;
pub mod paths;

// Re-export for convenience
pub use config::{AppSettings, CancelMode};
pub use error::VidQueueError;
pub use paths::{app_data_dir, default_output_dir, settings_db_path};
