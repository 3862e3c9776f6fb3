//! Scripted extractor shared by the queue integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, Notify};
use tokio_util::sync::CancellationToken;
use vidqueue::extractor::{DownloadConfig, DownloadOutcome, Extractor, ExtractorEvent, ProgressEvent};
use vidqueue::queue::{QueueEvent, QueueManager};
use vidqueue::utils::{AppSettings, CancelMode};
use vidqueue::VidQueueError;

/// What the scripted extractor does for a URL
#[derive(Clone)]
pub enum Behavior {
    Succeed,
    Fail(String),
    /// Sleep, then succeed
    Slow(Duration),
    /// Run until the interrupt token fires
    UntilCanceled,
    /// Ignore the interrupt token and wait for the gate to open
    Gated(Arc<Notify>),
}

/// Extractor whose outcome per URL is set up by the test
#[derive(Default)]
pub struct ScriptedExtractor {
    behaviors: Mutex<HashMap<String, Behavior>>,
    calls: Mutex<Vec<DownloadConfig>>,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl ScriptedExtractor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script(&self, url: &str, behavior: Behavior) {
        self.behaviors
            .lock()
            .unwrap()
            .insert(url.to_string(), behavior);
    }

    /// Configs received so far, in call order
    pub fn calls(&self) -> Vec<DownloadConfig> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called_urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.url).collect()
    }

    /// Highest number of downloads that overlapped
    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Extractor for ScriptedExtractor {
    fn id(&self) -> &'static str {
        "scripted"
    }

    async fn download(
        &self,
        config: &DownloadConfig,
        events: mpsc::UnboundedSender<ExtractorEvent>,
        cancel: CancellationToken,
    ) -> Result<DownloadOutcome, VidQueueError> {
        self.calls.lock().unwrap().push(config.clone());
        let behavior = self
            .behaviors
            .lock()
            .unwrap()
            .get(&config.url)
            .cloned()
            .unwrap_or(Behavior::Succeed);

        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);

        let _ = events.send(ExtractorEvent::Message(format!("Quality: {}", config.preset)));
        let _ = events.send(ExtractorEvent::Progress(ProgressEvent::downloading(
            50,
            Some(100),
            None,
            None,
        )));

        let result = match behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail(message) => Err(VidQueueError::Extraction(message)),
            Behavior::Slow(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            Behavior::UntilCanceled => {
                cancel.cancelled().await;
                Err(VidQueueError::Cancelled)
            }
            Behavior::Gated(gate) => {
                gate.notified().await;
                Ok(())
            }
        };

        self.active.fetch_sub(1, Ordering::SeqCst);

        result.map(|()| {
            let _ = events.send(ExtractorEvent::Progress(ProgressEvent::finished()));
            let ext = if config.preset.needs_transcoder() { "mp3" } else { "mp4" };
            DownloadOutcome {
                output_path: Some(config.output_dir.join(format!("video.{}", ext))),
                title: Some("video".to_string()),
            }
        })
    }
}

pub fn settings(output_dir: PathBuf, cancel_mode: CancelMode) -> AppSettings {
    AppSettings {
        output_dir,
        cancel_mode,
        ..AppSettings::default()
    }
}

pub fn queue_with(
    extractor: Arc<ScriptedExtractor>,
    settings: AppSettings,
) -> (QueueManager, mpsc::UnboundedReceiver<QueueEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (QueueManager::new(extractor, settings, tx), rx)
}

/// Wait for the next `Started` event
pub async fn wait_for_start(rx: &mut mpsc::UnboundedReceiver<QueueEvent>) -> usize {
    let started = tokio::time::timeout(Duration::from_secs(5), async {
        while let Some(event) = rx.recv().await {
            if let QueueEvent::Started { position, .. } = event {
                return position;
            }
        }
        panic!("event channel closed before an item started");
    });
    started.await.expect("no item started in time")
}

pub fn drain(rx: &mut mpsc::UnboundedReceiver<QueueEvent>) -> Vec<QueueEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
