use crate::extractor::models::{DownloadConfig, DownloadOutcome, ExtractorEvent};
use crate::utils::error::VidQueueError;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Core trait for the external extraction backend
///
/// The queue only knows this contract: hand over a configuration, receive
/// progress events, get back completion or a failure. Site handling,
/// format negotiation and transcoding all live behind it.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns a unique identifier for this extractor (e.g. "yt-dlp")
    fn id(&self) -> &'static str;

    /// Download one item.
    ///
    /// Implementations that can stop mid-download should watch `cancel` and
    /// return [`VidQueueError::Cancelled`] once it fires. Implementations that
    /// cannot may ignore it and run to completion.
    async fn download(
        &self,
        config: &DownloadConfig,
        events: mpsc::UnboundedSender<ExtractorEvent>,
        cancel: CancellationToken,
    ) -> Result<DownloadOutcome, VidQueueError>;
}
