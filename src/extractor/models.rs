//! Data structures crossing the extractor boundary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// User-facing quality preset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityPreset {
    #[default]
    BestVideoAudio,
    Res1080pMp4,
    Res720pMp4,
    AudioOnlyMp3,
}

impl QualityPreset {
    pub const ALL: [QualityPreset; 4] = [
        QualityPreset::BestVideoAudio,
        QualityPreset::Res1080pMp4,
        QualityPreset::Res720pMp4,
        QualityPreset::AudioOnlyMp3,
    ];

    /// Label shown in the form and the queue table
    pub fn label(self) -> &'static str {
        match self {
            QualityPreset::BestVideoAudio => "Best (Video + Audio)",
            QualityPreset::Res1080pMp4 => "1080p (MP4)",
            QualityPreset::Res720pMp4 => "720p (MP4)",
            QualityPreset::AudioOnlyMp3 => "Audio Only (MP3)",
        }
    }

    /// yt-dlp `-f` format selector
    pub fn format_selector(self) -> &'static str {
        match self {
            QualityPreset::BestVideoAudio => "best",
            QualityPreset::Res1080pMp4 => {
                "bestvideo[height<=1080]+bestaudio/best[height<=1080]/best"
            }
            QualityPreset::Res720pMp4 => "bestvideo[height<=720]+bestaudio/best[height<=720]/best",
            QualityPreset::AudioOnlyMp3 => "bestaudio/best",
        }
    }

    /// Container separate video/audio streams get merged into
    pub fn merge_output_format(self) -> Option<&'static str> {
        match self {
            QualityPreset::Res1080pMp4 | QualityPreset::Res720pMp4 => Some("mp4"),
            _ => None,
        }
    }

    /// The audio preset runs ffmpeg to produce the mp3.
    pub fn needs_transcoder(self) -> bool {
        matches!(self, QualityPreset::AudioOnlyMp3)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.label() == label)
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-item parameters handed to the extractor, derived at dispatch time
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadConfig {
    pub url: String,
    pub preset: QualityPreset,
    pub format_selector: String,
    pub output_dir: PathBuf,
    pub cookie_file: Option<PathBuf>,
}

impl DownloadConfig {
    pub fn new(
        url: impl Into<String>,
        preset: QualityPreset,
        output_dir: PathBuf,
        cookie_file: Option<PathBuf>,
    ) -> Self {
        Self {
            url: url.into(),
            preset,
            format_selector: preset.format_selector().to_string(),
            output_dir,
            cookie_file,
        }
    }
}

/// Progress reported while a download runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressEvent {
    /// 0.0 to 100.0, `None` while the total size is unknown
    pub percent: Option<f64>,
    pub downloaded_bytes: Option<u64>,
    pub total_bytes: Option<u64>,
    /// bytes per second
    pub speed: Option<f64>,
    /// seconds
    pub eta: Option<u64>,
    pub status_text: String,
}

impl ProgressEvent {
    /// Build the event the way the status line displays it:
    /// `"42.0% | 1.50 MB/s | ETA: 12s"`.
    pub fn downloading(
        downloaded: u64,
        total: Option<u64>,
        speed: Option<f64>,
        eta: Option<u64>,
    ) -> Self {
        match total.filter(|t| *t > 0) {
            Some(total) => {
                let percent = (downloaded as f64 / total as f64 * 100.0).clamp(0.0, 100.0);
                let speed_text = speed
                    .map(|s| format!("{:.2} MB/s", s / 1024.0 / 1024.0))
                    .unwrap_or_else(|| "N/A".to_string());
                let eta_text = eta
                    .map(|e| format!("{}s", e))
                    .unwrap_or_else(|| "N/A".to_string());
                Self {
                    percent: Some(percent),
                    downloaded_bytes: Some(downloaded),
                    total_bytes: Some(total),
                    speed,
                    eta,
                    status_text: format!("{:.1}% | {} | ETA: {}", percent, speed_text, eta_text),
                }
            }
            None => Self {
                percent: None,
                downloaded_bytes: Some(downloaded),
                speed,
                eta,
                status_text: "Downloading...".to_string(),
                ..Default::default()
            },
        }
    }

    pub fn finished() -> Self {
        Self {
            percent: Some(100.0),
            status_text: "Download complete, processing file...".to_string(),
            ..Default::default()
        }
    }
}

/// Everything an extractor can report while it works
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractorEvent {
    Progress(ProgressEvent),
    /// Informational line for the activity log
    Message(String),
}

/// Result of a successful download
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DownloadOutcome {
    pub output_path: Option<PathBuf>,
    pub title: Option<String>,
}
