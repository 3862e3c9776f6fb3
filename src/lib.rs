//! VidQueue library

pub mod database;
pub mod extractor;
pub mod gui;
pub mod queue;
pub mod utils;

// Re-export main types for easier use
pub use extractor::{DownloadConfig, Extractor, QualityPreset, YtDlpExtractor};
pub use gui::{Message, VidQueueApp, View};
pub use queue::{ItemStatus, QueueEvent, QueueItem, QueueManager};
pub use utils::{AppSettings, CancelMode, VidQueueError};
