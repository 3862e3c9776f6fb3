//! Error handling for VidQueue

use thiserror::Error;

/// Main error type for VidQueue
#[derive(Debug, Error)]
pub enum VidQueueError {
    /// Rejected at enqueue time; the item never reaches the queue.
    #[error("Invalid URL: {0}")]
    InvalidInput(String),

    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    /// Site-handler failure, unsupported URL, geo/auth restriction.
    #[error("Download failed: {0}")]
    Extraction(String),

    /// ffmpeg missing or failing during post-processing.
    #[error("Transcoding failed: {0}")]
    Transcode(String),

    /// Deliberate stop requested by the user. Not a failure.
    #[error("Download canceled")]
    Cancelled,

    #[error("Queue item not found: {0}")]
    ItemNotFound(String),

    #[error("The queue is running; stop it before {0}")]
    QueueRunning(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl VidQueueError {
    /// True for the deliberate cancel terminal state.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, VidQueueError::Cancelled)
    }
}
