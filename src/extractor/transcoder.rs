//! ffmpeg discovery
//!
//! yt-dlp invokes ffmpeg on its own for merging and audio extraction; we only
//! need to know whether it is there and, for bundled copies, tell yt-dlp where.

use crate::extractor::locate::{bundled_binary, is_executable};
use std::path::PathBuf;
use tracing::{debug, warn};

#[cfg(windows)]
const FFMPEG_BIN: &str = "ffmpeg.exe";
#[cfg(not(windows))]
const FFMPEG_BIN: &str = "ffmpeg";

/// Where ffmpeg was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcoder {
    /// Shipped next to our executable; yt-dlp must be pointed at it.
    Bundled(PathBuf),
    /// On the executable search path; yt-dlp finds it by itself.
    System(PathBuf),
}

impl Transcoder {
    pub fn path(&self) -> &PathBuf {
        match self {
            Transcoder::Bundled(path) | Transcoder::System(path) => path,
        }
    }

    /// Value for `--ffmpeg-location`, only needed for bundled copies
    pub fn location_arg(&self) -> Option<&PathBuf> {
        match self {
            Transcoder::Bundled(path) => Some(path),
            Transcoder::System(_) => None,
        }
    }
}

/// Find ffmpeg: bundled first, then PATH.
pub fn find_ffmpeg() -> Option<Transcoder> {
    if let Some(path) = bundled_binary(FFMPEG_BIN) {
        debug!("Using bundled ffmpeg: {:?}", path);
        return Some(Transcoder::Bundled(path));
    }

    match which::which(FFMPEG_BIN) {
        Ok(path) if is_executable(&path) => {
            debug!("Using system ffmpeg: {:?}", path);
            Some(Transcoder::System(path))
        }
        _ => {
            warn!("ffmpeg not found; audio extraction and stream merging will fail");
            None
        }
    }
}

/// User-facing explanation for a missing transcoder
pub fn missing_transcoder_message() -> String {
    "ffmpeg was not found on the system PATH. It is required to convert audio to MP3; \
     install ffmpeg and try again"
        .to_string()
}
