//! Application configuration

use crate::extractor::QualityPreset;
use crate::utils::paths::default_output_dir;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Directory downloaded files are written to
    pub output_dir: PathBuf,

    /// Optional Netscape cookie jar passed through to yt-dlp
    pub cookie_file: Option<PathBuf>,

    /// Preset preselected in the form
    pub default_preset: QualityPreset,

    /// What happens to the in-flight item when the queue is canceled
    pub cancel_mode: CancelMode,

    /// Dark palette instead of the light one
    pub dark_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            cookie_file: None,
            default_preset: QualityPreset::default(),
            cancel_mode: CancelMode::default(),
            dark_mode: false,
        }
    }
}

impl AppSettings {
    /// Empty strings from the form mean "no cookie file".
    pub fn set_cookie_file(&mut self, raw: &str) {
        let trimmed = raw.trim();
        self.cookie_file = if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        };
    }
}

/// Behaviour of `cancel()` for the item that is currently downloading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelMode {
    /// Kill the running yt-dlp process; the item ends up Canceled.
    #[default]
    InterruptCurrent,
    /// Let the running item finish, then stop.
    FinishCurrent,
}

impl CancelMode {
    pub fn interrupts(self) -> bool {
        matches!(self, CancelMode::InterruptCurrent)
    }
}
