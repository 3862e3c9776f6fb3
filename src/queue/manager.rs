//! Sequential download queue

use crate::extractor::{DownloadConfig, DownloadOutcome, Extractor, ExtractorEvent, QualityPreset};
use crate::queue::events::QueueEvent;
use crate::utils::config::AppSettings;
use crate::utils::error::VidQueueError;
use chrono::{DateTime, Utc};
use path_absolutize::Absolutize;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Download queue manager
///
/// Items are processed one at a time, in insertion order, on a tokio task.
/// Queue state sits behind a synchronous mutex that is never held across an
/// `.await`, so the GUI can read and edit it directly. Everything that
/// happens is reported on the event channel handed to [`QueueManager::new`].
#[derive(Clone)]
pub struct QueueManager {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<QueueState>,
    extractor: Arc<dyn Extractor>,
    events: mpsc::UnboundedSender<QueueEvent>,
}

#[derive(Default)]
struct QueueState {
    items: Vec<QueueItem>,
    settings: AppSettings,
    running: bool,
    /// Fired by `cancel()`; checked between items
    stop: Option<CancellationToken>,
    /// Handed to the extractor for the item in flight
    interrupt: Option<CancellationToken>,
}

/// One download request
#[derive(Debug, Clone, PartialEq)]
pub struct QueueItem {
    pub id: String,
    pub url: String,
    pub preset: QualityPreset,
    pub status: ItemStatus,
    /// 0.0 to 100.0
    pub progress_percent: f32,
    pub error_message: Option<String>,
    pub output_path: Option<PathBuf>,
    pub added_at: DateTime<Utc>,
}

impl QueueItem {
    pub fn new(url: impl Into<String>, preset: QualityPreset) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            url: url.into(),
            preset,
            status: ItemStatus::Queued,
            progress_percent: 0.0,
            error_message: None,
            output_path: None,
            added_at: Utc::now(),
        }
    }
}

/// Item status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ItemStatus {
    #[default]
    Queued,
    Downloading,
    Done,
    Failed,
    Canceled,
}

impl ItemStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ItemStatus::Done | ItemStatus::Failed | ItemStatus::Canceled)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemStatus::Queued => "Queued",
            ItemStatus::Downloading => "Downloading",
            ItemStatus::Done => "Done",
            ItemStatus::Failed => "Failed",
            ItemStatus::Canceled => "Canceled",
        };
        f.write_str(label)
    }
}

/// Work claimed by the processing loop for a single item
struct Job {
    id: String,
    url: String,
    position: usize,
    total: usize,
    config: DownloadConfig,
    missing_cookie_file: Option<PathBuf>,
    interrupt: CancellationToken,
}

/// Check and normalize a user-supplied URL.
///
/// Returns the trimmed URL. Only absolute http(s) URLs with a host are
/// accepted; everything else is [`VidQueueError::InvalidInput`].
pub fn validate_url(raw: &str) -> Result<String, VidQueueError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(VidQueueError::InvalidInput("please enter a URL".to_string()));
    }

    let parsed = url::Url::parse(trimmed)
        .map_err(|e| VidQueueError::InvalidInput(format!("{} ({})", trimmed, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(VidQueueError::InvalidInput(format!(
            "{} (only http and https links are supported)",
            trimmed
        )));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        _ => Err(VidQueueError::InvalidInput(format!("{} (missing host)", trimmed))),
    }
}

impl QueueManager {
    /// Create new queue manager
    pub fn new(
        extractor: Arc<dyn Extractor>,
        settings: AppSettings,
        events: mpsc::UnboundedSender<QueueEvent>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(QueueState {
                    settings,
                    ..Default::default()
                }),
                extractor,
                events,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, QueueState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: QueueEvent) {
        if self.inner.events.send(event).is_err() {
            debug!("Queue event dropped; no listener");
        }
    }

    /// Append one item to the queue
    pub fn enqueue(&self, url: &str, preset: QualityPreset) -> Result<String, VidQueueError> {
        let url = validate_url(url)?;
        Ok(self.push_items(vec![url], preset).remove(0))
    }

    /// Append several items at once.
    ///
    /// Blank entries are skipped. If any remaining entry is invalid nothing
    /// is added.
    pub fn enqueue_many<I, S>(&self, urls: I, preset: QualityPreset) -> Result<Vec<String>, VidQueueError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls = urls
            .into_iter()
            .map(|url| url.as_ref().trim().to_string())
            .filter(|url| !url.is_empty())
            .map(|url| validate_url(&url))
            .collect::<Result<Vec<_>, _>>()?;

        if urls.is_empty() {
            return Err(VidQueueError::InvalidInput("please enter a URL".to_string()));
        }

        Ok(self.push_items(urls, preset))
    }

    fn push_items(&self, urls: Vec<String>, preset: QualityPreset) -> Vec<String> {
        let added: Vec<(String, String, usize)> = {
            let mut state = self.state();
            let mut added = Vec::with_capacity(urls.len());
            for url in urls {
                let item = QueueItem::new(url, preset);
                added.push((item.id.clone(), item.url.clone(), state.items.len() + 1));
                state.items.push(item);
            }
            added
        };

        added
            .into_iter()
            .map(|(id, url, position)| {
                info!("Added item {} to queue: {}", position, url);
                self.emit(QueueEvent::Enqueued {
                    id: id.clone(),
                    url,
                    preset,
                    position,
                });
                id
            })
            .collect()
    }

    /// Start processing queued items.
    ///
    /// Returns `None` without doing anything when the queue is already
    /// running or nothing is queued. Must be called from within a tokio
    /// runtime.
    pub fn start(&self) -> Option<JoinHandle<()>> {
        let stop = {
            let mut state = self.state();
            if state.running {
                debug!("Queue already running");
                return None;
            }
            if !state.items.iter().any(|item| item.status == ItemStatus::Queued) {
                debug!("Nothing queued");
                return None;
            }
            let token = CancellationToken::new();
            state.running = true;
            state.stop = Some(token.clone());
            token
        };

        info!("Starting queue processing");
        let manager = self.clone();
        Some(tokio::spawn(async move { manager.run(stop).await }))
    }

    /// Stop the queue.
    ///
    /// Every Queued item becomes Canceled right away. The item in flight is
    /// interrupted or left to finish depending on the configured
    /// [`CancelMode`](crate::utils::config::CancelMode). Returns the number of
    /// queued items that were canceled.
    pub fn cancel(&self) -> usize {
        let canceled: Vec<(String, usize)> = {
            let mut state = self.state();
            let canceled: Vec<(String, usize)> = state
                .items
                .iter_mut()
                .enumerate()
                .filter(|(_, item)| item.status == ItemStatus::Queued)
                .map(|(idx, item)| {
                    item.status = ItemStatus::Canceled;
                    (item.id.clone(), idx + 1)
                })
                .collect();

            if let Some(stop) = &state.stop {
                stop.cancel();
            }
            if state.settings.cancel_mode.interrupts() {
                if let Some(interrupt) = &state.interrupt {
                    info!("Interrupting active download");
                    interrupt.cancel();
                }
            }
            canceled
        };

        info!("Canceled {} queued item(s)", canceled.len());
        let count = canceled.len();
        for (id, position) in canceled {
            self.emit(QueueEvent::Canceled { id, position });
        }
        count
    }

    /// Change the preset of a queued item
    pub fn set_preset(&self, id: &str, preset: QualityPreset) -> Result<(), VidQueueError> {
        let mut state = self.state();
        if state.running {
            return Err(VidQueueError::QueueRunning("changing presets"));
        }
        let item = state
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| VidQueueError::ItemNotFound(id.to_string()))?;
        if item.status != ItemStatus::Queued {
            return Err(VidQueueError::OperationFailed(format!(
                "only queued items can change preset (item is {})",
                item.status
            )));
        }
        item.preset = preset;
        debug!("Item {} preset set to {}", id, preset);
        Ok(())
    }

    /// Remove an item from the queue
    pub fn remove(&self, id: &str) -> Result<QueueItem, VidQueueError> {
        let mut state = self.state();
        if state.running {
            return Err(VidQueueError::QueueRunning("removing items"));
        }
        let idx = state
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| VidQueueError::ItemNotFound(id.to_string()))?;
        let removed = state.items.remove(idx);
        info!("Removed item {} from queue", removed.url);
        Ok(removed)
    }

    /// Remove Done, Failed and Canceled items. Returns how many went.
    pub fn clear_finished(&self) -> Result<usize, VidQueueError> {
        let mut state = self.state();
        if state.running {
            return Err(VidQueueError::QueueRunning("clearing finished items"));
        }
        let before = state.items.len();
        state.items.retain(|item| !item.status.is_terminal());
        let cleared = before - state.items.len();
        info!("Cleared {} finished item(s) from queue", cleared);
        Ok(cleared)
    }

    /// Snapshot of all items in queue order
    pub fn items(&self) -> Vec<QueueItem> {
        self.state().items.clone()
    }

    pub fn is_running(&self) -> bool {
        self.state().running
    }

    /// Overall completion from 0.0 to 1.0.
    ///
    /// Finished items count fully, the active item by its own progress.
    pub fn overall_progress(&self) -> f32 {
        let state = self.state();
        if state.items.is_empty() {
            return 0.0;
        }
        let done: f32 = state
            .items
            .iter()
            .map(|item| match item.status {
                status if status.is_terminal() => 1.0,
                ItemStatus::Downloading => (item.progress_percent / 100.0).clamp(0.0, 1.0),
                _ => 0.0,
            })
            .sum();
        done / state.items.len() as f32
    }

    pub fn settings(&self) -> AppSettings {
        self.state().settings.clone()
    }

    /// Replace the settings. Takes effect from the next item.
    pub fn update_settings(&self, settings: AppSettings) {
        self.state().settings = settings;
        debug!("Queue settings updated");
    }

    async fn run(self, stop: CancellationToken) {
        while !stop.is_cancelled() {
            let Some(job) = self.claim_next() else {
                break;
            };
            self.process(job).await;
        }

        let stopped = stop.is_cancelled();
        {
            let mut state = self.state();
            state.running = false;
            state.stop = None;
            state.interrupt = None;
        }

        info!("Queue processing {}", if stopped { "stopped" } else { "finished" });
        self.emit(QueueEvent::QueueFinished { stopped });
    }

    /// Mark the first Queued item as Downloading and build its job
    fn claim_next(&self) -> Option<Job> {
        let mut state = self.state();
        let total = state.items.len();
        let settings = state.settings.clone();
        let interrupt = CancellationToken::new();

        let (idx, item) = state
            .items
            .iter_mut()
            .enumerate()
            .find(|(_, item)| item.status == ItemStatus::Queued)?;

        item.status = ItemStatus::Downloading;
        item.progress_percent = 0.0;
        item.error_message = None;

        let output_dir = settings
            .output_dir
            .absolutize()
            .map(|dir| dir.into_owned())
            .unwrap_or_else(|_| settings.output_dir.clone());

        let (cookie_file, missing_cookie_file) = match settings.cookie_file {
            Some(path) if path.is_file() => (Some(path), None),
            Some(path) => (None, Some(path)),
            None => (None, None),
        };

        let job = Job {
            id: item.id.clone(),
            url: item.url.clone(),
            position: idx + 1,
            total,
            config: DownloadConfig::new(item.url.clone(), item.preset, output_dir, cookie_file),
            missing_cookie_file,
            interrupt: interrupt.clone(),
        };

        state.interrupt = Some(interrupt);
        Some(job)
    }

    async fn process(&self, job: Job) {
        info!(
            "Starting download {}/{} with {}: {}",
            job.position,
            job.total,
            self.inner.extractor.id(),
            job.url
        );
        self.emit(QueueEvent::Started {
            id: job.id.clone(),
            url: job.url.clone(),
            position: job.position,
            total: job.total,
        });

        if let Some(path) = &job.missing_cookie_file {
            warn!("Cookie file {:?} not found, continuing without it", path);
            self.emit(QueueEvent::Message {
                id: job.id.clone(),
                position: job.position,
                text: format!(
                    "Cookie file not found: {}. Continuing without cookies.",
                    path.display()
                ),
            });
        }

        if let Err(e) = tokio::fs::create_dir_all(&job.config.output_dir).await {
            error!("Cannot create output dir {:?}: {}", job.config.output_dir, e);
            self.finish(&job, Err(VidQueueError::Io(e)));
            return;
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut download = self
            .inner
            .extractor
            .download(&job.config, tx, job.interrupt.clone());

        let result = loop {
            tokio::select! {
                result = &mut download => break result,
                Some(event) = rx.recv() => self.apply(&job, event),
            }
        };

        while let Ok(event) = rx.try_recv() {
            self.apply(&job, event);
        }

        self.finish(&job, result);
    }

    fn apply(&self, job: &Job, event: ExtractorEvent) {
        match event {
            ExtractorEvent::Progress(progress) => {
                if let Some(percent) = progress.percent {
                    let mut state = self.state();
                    if let Some(item) = state.items.iter_mut().find(|item| item.id == job.id) {
                        item.progress_percent = (percent as f32).clamp(0.0, 100.0);
                    }
                }
                self.emit(QueueEvent::Progress {
                    id: job.id.clone(),
                    position: job.position,
                    percent: progress.percent,
                    status_text: progress.status_text,
                });
            }
            ExtractorEvent::Message(text) => self.emit(QueueEvent::Message {
                id: job.id.clone(),
                position: job.position,
                text,
            }),
        }
    }

    fn finish(&self, job: &Job, result: Result<DownloadOutcome, VidQueueError>) {
        let event = {
            let mut state = self.state();
            state.interrupt = None;

            let Some(item) = state.items.iter_mut().find(|item| item.id == job.id) else {
                warn!("Item {} vanished while downloading", job.id);
                return;
            };

            match result {
                Ok(outcome) => {
                    info!("Item {} completed: {}", job.position, job.url);
                    item.status = ItemStatus::Done;
                    item.progress_percent = 100.0;
                    item.output_path = outcome.output_path.clone();
                    QueueEvent::Completed {
                        id: job.id.clone(),
                        position: job.position,
                        output_path: outcome.output_path,
                        title: outcome.title,
                    }
                }
                Err(e) if e.is_cancellation() => {
                    info!("Item {} canceled", job.position);
                    item.status = ItemStatus::Canceled;
                    QueueEvent::Canceled {
                        id: job.id.clone(),
                        position: job.position,
                    }
                }
                Err(e) => {
                    error!("Item {} failed: {}", job.position, e);
                    let message = e.to_string();
                    item.status = ItemStatus::Failed;
                    item.error_message = Some(message.clone());
                    QueueEvent::Failed {
                        id: job.id.clone(),
                        position: job.position,
                        error: message,
                    }
                }
            }
        };

        self.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct InstantExtractor;

    #[async_trait]
    impl Extractor for InstantExtractor {
        fn id(&self) -> &'static str {
            "instant"
        }

        async fn download(
            &self,
            config: &DownloadConfig,
            events: mpsc::UnboundedSender<ExtractorEvent>,
            _cancel: CancellationToken,
        ) -> Result<DownloadOutcome, VidQueueError> {
            let _ = events.send(ExtractorEvent::Progress(
                crate::extractor::ProgressEvent::finished(),
            ));
            Ok(DownloadOutcome {
                output_path: Some(config.output_dir.join("video.mp4")),
                title: Some("video".to_string()),
            })
        }
    }

    fn manager() -> (QueueManager, mpsc::UnboundedReceiver<QueueEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dir = std::env::temp_dir().join("vidqueue-manager-tests");
        let settings = AppSettings {
            output_dir: dir,
            ..Default::default()
        };
        (QueueManager::new(Arc::new(InstantExtractor), settings, tx), rx)
    }

    #[test]
    fn validate_url_accepts_http_and_https() {
        assert_eq!(
            validate_url("  https://www.tiktok.com/@user/video/1 ").unwrap(),
            "https://www.tiktok.com/@user/video/1"
        );
        assert!(validate_url("http://youtu.be/abc").is_ok());
    }

    #[test]
    fn validate_url_rejects_garbage() {
        for bad in ["", "   ", "not-a-url", "ftp://example.com/file", "file:///etc/passwd", "https://"] {
            assert!(
                matches!(validate_url(bad), Err(VidQueueError::InvalidInput(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn enqueue_appends_in_order() {
        let (queue, mut rx) = manager();
        let a = queue.enqueue("https://example.com/a", QualityPreset::BestVideoAudio).unwrap();
        let b = queue.enqueue("https://example.com/b", QualityPreset::AudioOnlyMp3).unwrap();

        let items = queue.items();
        assert_eq!(items.iter().map(|i| i.id.clone()).collect::<Vec<_>>(), vec![a, b]);
        assert!(items.iter().all(|i| i.status == ItemStatus::Queued));
        assert!(matches!(rx.try_recv(), Ok(QueueEvent::Enqueued { position: 1, .. })));
        assert!(matches!(rx.try_recv(), Ok(QueueEvent::Enqueued { position: 2, .. })));
    }

    #[test]
    fn enqueue_many_is_all_or_nothing() {
        let (queue, _rx) = manager();
        let result = queue.enqueue_many(
            ["https://example.com/a", "not-a-url"],
            QualityPreset::BestVideoAudio,
        );
        assert!(matches!(result, Err(VidQueueError::InvalidInput(_))));
        assert!(queue.items().is_empty());

        let ids = queue
            .enqueue_many(
                ["https://example.com/a", "", "  https://example.com/b"],
                QualityPreset::Res720pMp4,
            )
            .unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(queue.items()[1].url, "https://example.com/b");
    }

    #[test]
    fn cancel_without_running_cancels_queued_items() {
        let (queue, _rx) = manager();
        queue.enqueue("https://example.com/a", QualityPreset::BestVideoAudio).unwrap();
        queue.enqueue("https://example.com/b", QualityPreset::BestVideoAudio).unwrap();

        assert_eq!(queue.cancel(), 2);
        assert!(queue.items().iter().all(|i| i.status == ItemStatus::Canceled));
        assert_eq!(queue.overall_progress(), 1.0);
    }

    #[test]
    fn maintenance_edits_idle_queue() {
        let (queue, _rx) = manager();
        let a = queue.enqueue("https://example.com/a", QualityPreset::BestVideoAudio).unwrap();
        let b = queue.enqueue("https://example.com/b", QualityPreset::BestVideoAudio).unwrap();

        queue.set_preset(&a, QualityPreset::Res1080pMp4).unwrap();
        assert_eq!(queue.items()[0].preset, QualityPreset::Res1080pMp4);

        queue.remove(&b).unwrap();
        assert_eq!(queue.items().len(), 1);
        assert!(matches!(queue.remove(&b), Err(VidQueueError::ItemNotFound(_))));

        assert_eq!(queue.clear_finished().unwrap(), 0);
        queue.cancel();
        assert_eq!(queue.clear_finished().unwrap(), 1);
        assert!(queue.items().is_empty());
    }

    #[test]
    fn overall_progress_is_zero_for_empty_queue() {
        let (queue, _rx) = manager();
        assert_eq!(queue.overall_progress(), 0.0);
    }

    #[tokio::test]
    async fn start_runs_every_item_to_done() {
        let (queue, mut rx) = manager();
        queue.enqueue("https://example.com/a", QualityPreset::BestVideoAudio).unwrap();
        queue.enqueue("https://example.com/b", QualityPreset::Res720pMp4).unwrap();

        let handle = queue.start().expect("queue should start");
        assert!(queue.start().is_none());
        handle.await.unwrap();

        assert!(!queue.is_running());
        let items = queue.items();
        assert!(items.iter().all(|i| i.status == ItemStatus::Done));
        assert!(items.iter().all(|i| i.progress_percent == 100.0));
        assert!(items[0].output_path.is_some());

        let mut finished = false;
        while let Ok(event) = rx.try_recv() {
            if let QueueEvent::QueueFinished { stopped } = event {
                assert!(!stopped);
                finished = true;
            }
        }
        assert!(finished);
    }

    #[tokio::test]
    async fn start_with_nothing_queued_is_a_no_op() {
        let (queue, _rx) = manager();
        assert!(queue.start().is_none());
    }
}
