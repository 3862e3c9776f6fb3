pub mod locate;
pub mod models;
pub mod traits;
pub mod transcoder;
pub mod ytdlp;

pub use models::{DownloadConfig, DownloadOutcome, ExtractorEvent, ProgressEvent, QualityPreset};
pub use traits::Extractor;
pub use transcoder::{find_ffmpeg, Transcoder};
pub use ytdlp::{YtDlpCommand, YtDlpExtractor};
