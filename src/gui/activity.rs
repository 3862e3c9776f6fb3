//! Activity log and status line bookkeeping
//!
//! Kept free of widgets so the rules for what gets logged can be tested
//! without a window.

use crate::gui::theme::StatusState;
use crate::queue::QueueEvent;
use chrono::Local;
use std::collections::{HashMap, VecDeque};

/// Oldest lines are dropped past this
pub const MAX_LOG_LINES: usize = 500;

/// Text and colour of the status pill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub state: StatusState,
}

impl StatusLine {
    pub fn new(text: impl Into<String>, state: StatusState) -> Self {
        Self {
            text: text.into(),
            state,
        }
    }

    pub fn idle(text: impl Into<String>) -> Self {
        Self::new(text, StatusState::Idle)
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::idle("Ready")
    }
}

/// Timestamped activity log
#[derive(Debug, Default)]
pub struct ActivityLog {
    lines: VecDeque<String>,
    /// Last 25% step logged per item id
    milestones: HashMap<String, u8>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = &String> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn push(&mut self, message: impl AsRef<str>) {
        self.lines.push_back(format!(
            "[{}] {}",
            Local::now().format("%H:%M:%S"),
            message.as_ref()
        ));
        while self.lines.len() > MAX_LOG_LINES {
            self.lines.pop_front();
        }
    }

    /// Log a queue event. Returns whether a line was added.
    ///
    /// Progress is only logged when an item crosses 25%, 50%, 75% and 100%.
    pub fn record(&mut self, event: &QueueEvent) -> bool {
        match event {
            QueueEvent::Progress {
                id,
                position,
                percent: Some(percent),
                ..
            } => {
                let step = ((percent / 25.0).floor().max(0.0) as u8).min(4);
                let advanced = {
                    let last = self.milestones.entry(id.clone()).or_insert(0);
                    if step > *last {
                        *last = step;
                        true
                    } else {
                        false
                    }
                };
                if advanced {
                    self.push(format!("[Item {}] {}% downloaded", position, u32::from(step) * 25));
                }
                advanced
            }
            QueueEvent::Progress { percent: None, .. } => false,
            QueueEvent::Started { id, .. } => {
                self.milestones.insert(id.clone(), 0);
                self.push(event.to_string());
                true
            }
            QueueEvent::Completed { id, .. }
            | QueueEvent::Failed { id, .. }
            | QueueEvent::Canceled { id, .. } => {
                self.milestones.remove(id);
                self.push(event.to_string());
                true
            }
            _ => {
                self.push(event.to_string());
                true
            }
        }
    }
}

/// New status pill content for an event, if the event should change it
pub fn status_for(event: &QueueEvent) -> Option<StatusLine> {
    match event {
        QueueEvent::Started {
            position, total, ..
        } => Some(StatusLine::new(
            format!("Downloading item {}/{}", position, total),
            StatusState::Active,
        )),
        QueueEvent::Progress {
            position,
            status_text,
            ..
        } => Some(StatusLine::new(
            format!("Item {}: {}", position, status_text),
            StatusState::Active,
        )),
        QueueEvent::Completed { position, .. } => Some(StatusLine::new(
            format!("Item {}: Download complete", position),
            StatusState::Success,
        )),
        QueueEvent::Failed {
            position, error, ..
        } => Some(StatusLine::new(
            format!("Item {}: {}", position, error),
            StatusState::Error,
        )),
        QueueEvent::Canceled { position, .. } => Some(StatusLine::new(
            format!("Item {}: Canceled", position),
            StatusState::Warning,
        )),
        QueueEvent::QueueFinished { stopped: true } => {
            Some(StatusLine::new("Queue stopped.", StatusState::Warning))
        }
        QueueEvent::QueueFinished { stopped: false } => {
            Some(StatusLine::new("Queue completed.", StatusState::Success))
        }
        QueueEvent::Enqueued { .. } | QueueEvent::Message { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(id: &str, percent: Option<f64>) -> QueueEvent {
        QueueEvent::Progress {
            id: id.to_string(),
            position: 1,
            percent,
            status_text: String::new(),
        }
    }

    #[test]
    fn progress_is_logged_at_quarter_milestones() {
        let mut log = ActivityLog::new();
        let logged: Vec<bool> = [1.0, 20.0, 26.0, 30.0, 49.9, 51.0, 99.0, 100.0, 100.0]
            .into_iter()
            .map(|p| log.record(&progress("a", Some(p))))
            .collect();

        assert_eq!(
            logged,
            vec![false, false, true, false, false, true, true, true, false]
        );
        assert!(log.lines().last().unwrap().ends_with("[Item 1] 100% downloaded"));
    }

    #[test]
    fn jumps_log_only_the_highest_milestone() {
        let mut log = ActivityLog::new();
        assert!(log.record(&progress("a", Some(80.0))));
        assert_eq!(log.len(), 1);
        assert!(log.lines().next().unwrap().ends_with("75% downloaded"));
    }

    #[test]
    fn unknown_percent_is_not_logged() {
        let mut log = ActivityLog::new();
        assert!(!log.record(&progress("a", None)));
        assert!(log.is_empty());
    }

    #[test]
    fn restarted_item_logs_milestones_again() {
        let mut log = ActivityLog::new();
        log.record(&progress("a", Some(60.0)));
        log.record(&QueueEvent::Started {
            id: "a".into(),
            url: "https://example.com".into(),
            position: 1,
            total: 1,
        });
        assert!(log.record(&progress("a", Some(30.0))));
    }

    #[test]
    fn log_is_capped() {
        let mut log = ActivityLog::new();
        for i in 0..(MAX_LOG_LINES + 10) {
            log.push(format!("line {}", i));
        }
        assert_eq!(log.len(), MAX_LOG_LINES);
        assert!(log.lines().next().unwrap().ends_with("line 10"));
    }

    #[test]
    fn lines_are_timestamped() {
        let mut log = ActivityLog::new();
        log.push("hello");
        let line = log.lines().next().unwrap();
        assert!(line.starts_with('['));
        assert_eq!(&line[9..], "] hello");
    }

    #[test]
    fn status_follows_outcomes() {
        let failed = QueueEvent::Failed {
            id: "a".into(),
            position: 2,
            error: "Download failed: Private video".into(),
        };
        assert_eq!(
            status_for(&failed),
            Some(StatusLine::new(
                "Item 2: Download failed: Private video",
                StatusState::Error
            ))
        );
        assert_eq!(
            status_for(&QueueEvent::QueueFinished { stopped: false }).map(|s| s.state),
            Some(StatusState::Success)
        );
        assert_eq!(
            status_for(&QueueEvent::Message {
                id: "a".into(),
                position: 1,
                text: "Title: x".into()
            }),
            None
        );
    }
}
