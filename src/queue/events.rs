use crate::extractor::QualityPreset;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Events that describe changes in the download queue state
///
/// `position` is the 1-based row of the item in the queue, which is what the
/// activity log shows as `[Item n]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueueEvent {
    /// A new item was appended to the queue
    Enqueued {
        id: String,
        url: String,
        preset: QualityPreset,
        position: usize,
    },
    /// An item started downloading
    Started {
        id: String,
        url: String,
        position: usize,
        total: usize,
    },
    /// Progress reported by the extractor for the active item
    Progress {
        id: String,
        position: usize,
        percent: Option<f64>,
        status_text: String,
    },
    /// Informational line from the extractor or the controller
    Message {
        id: String,
        position: usize,
        text: String,
    },
    /// An item completed successfully
    Completed {
        id: String,
        position: usize,
        output_path: Option<PathBuf>,
        title: Option<String>,
    },
    /// An item failed; later items still run
    Failed {
        id: String,
        position: usize,
        error: String,
    },
    /// An item was canceled, either while queued or mid-download
    Canceled { id: String, position: usize },
    /// The processing loop exited. `stopped` is true after `cancel()`.
    QueueFinished { stopped: bool },
}

/// One activity-log line per event
impl fmt::Display for QueueEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueEvent::Enqueued {
                url,
                preset,
                position,
                ..
            } => write!(f, "[Item {}] Added to queue: {} ({})", position, url, preset),
            QueueEvent::Started {
                url,
                position,
                total,
                ..
            } => write!(
                f,
                "[Item {}] Starting download ({}/{}): {}",
                position, position, total, url
            ),
            QueueEvent::Progress {
                position,
                status_text,
                ..
            } => write!(f, "[Item {}] {}", position, status_text),
            QueueEvent::Message { position, text, .. } => {
                write!(f, "[Item {}] {}", position, text)
            }
            QueueEvent::Completed {
                position,
                output_path,
                title,
                ..
            } => match (output_path, title) {
                (Some(path), _) => write!(f, "[Item {}] Done: {}", position, path.display()),
                (None, Some(title)) => write!(f, "[Item {}] Done: {}", position, title),
                (None, None) => write!(f, "[Item {}] Done", position),
            },
            QueueEvent::Failed {
                position, error, ..
            } => write!(f, "[Item {}] Failed: {}", position, error),
            QueueEvent::Canceled { position, .. } => write!(f, "[Item {}] Canceled", position),
            QueueEvent::QueueFinished { stopped: true } => f.write_str("Queue stopped."),
            QueueEvent::QueueFinished { stopped: false } => f.write_str("Queue finished."),
        }
    }
}
