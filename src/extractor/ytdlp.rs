//! yt-dlp wrapper for downloading
//!
//! Every download is one yt-dlp process. Progress, the video title and the
//! final file path come back as marker-prefixed lines produced by
//! `--progress-template` and `--print`, so we never have to scrape the human
//! readable output.

use crate::extractor::locate::{bundled_binary, in_common_paths};
use crate::extractor::models::{DownloadConfig, DownloadOutcome, ExtractorEvent, ProgressEvent};
use crate::extractor::traits::Extractor;
use crate::extractor::transcoder::{find_ffmpeg, missing_transcoder_message, Transcoder};
use crate::utils::error::VidQueueError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as AsyncCommand;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

#[cfg(windows)]
const YTDLP_BIN: &str = "yt-dlp.exe";
#[cfg(not(windows))]
const YTDLP_BIN: &str = "yt-dlp";

pub const PROGRESS_MARKER: &str = "vq-progress:";
pub const TITLE_MARKER: &str = "vq-title:";
pub const FILE_MARKER: &str = "vq-file:";

const PROGRESS_TEMPLATE: &str = "download:vq-progress:%(progress.status)s|%(progress.downloaded_bytes)s|%(progress.total_bytes)s|%(progress.total_bytes_estimate)s|%(progress.speed)s|%(progress.eta)s";
const TITLE_PRINT: &str = "before_dl:vq-title:%(title)s";
const FILE_PRINT: &str = "after_move:vq-file:%(filepath)s";
const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// stderr lines that can blame the transcoder
const POSTPROCESS_PREFIXES: [&str; 3] = ["ERROR:", "[ExtractAudio]", "[Merger]"];

/// Number of stderr lines kept to explain a failure
const ERROR_CONTEXT_LINES: usize = 20;

/// How to launch yt-dlp: a binary, or an interpreter plus leading arguments
/// (`python3 -m yt_dlp`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YtDlpCommand {
    pub program: PathBuf,
    pub prefix: Vec<String>,
}

impl YtDlpCommand {
    pub fn new(program: impl Into<PathBuf>, prefix: Vec<String>) -> Self {
        Self {
            program: program.into(),
            prefix,
        }
    }

    pub fn display(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.prefix.iter().cloned());
        parts.join(" ")
    }
}

/// Extractor backed by the yt-dlp command line program
pub struct YtDlpExtractor {
    command: Option<YtDlpCommand>,
    transcoder: Option<Transcoder>,
}

impl YtDlpExtractor {
    /// Look up yt-dlp and ffmpeg on this machine.
    ///
    /// A missing yt-dlp is not fatal here: the app still starts and every
    /// queued item fails with [`VidQueueError::YtDlpNotFound`].
    pub fn detect() -> Self {
        Self {
            command: find_ytdlp(),
            transcoder: find_ffmpeg(),
        }
    }

    pub fn from_command(command: YtDlpCommand, transcoder: Option<Transcoder>) -> Self {
        Self {
            command: Some(command),
            transcoder,
        }
    }

    pub fn command(&self) -> Option<&YtDlpCommand> {
        self.command.as_ref()
    }

    pub fn transcoder(&self) -> Option<&Transcoder> {
        self.transcoder.as_ref()
    }

    /// yt-dlp arguments for one download, URL last
    pub fn build_args(&self, config: &DownloadConfig) -> Vec<String> {
        let mut args: Vec<String> = [
            "--no-playlist",
            "--windows-filenames",
            "--no-warnings",
            "--newline",
            "--encoding",
            "utf-8",
            "--progress",
            "--no-simulate",
            "--progress-template",
            PROGRESS_TEMPLATE,
            "--print",
            TITLE_PRINT,
            "--print",
            FILE_PRINT,
        ]
        .iter()
        .map(|arg| arg.to_string())
        .collect();

        args.push("-P".to_string());
        args.push(config.output_dir.to_string_lossy().into_owned());
        args.push("-o".to_string());
        args.push(OUTPUT_TEMPLATE.to_string());
        args.push("-f".to_string());
        args.push(config.format_selector.clone());

        if let Some(container) = config.preset.merge_output_format() {
            args.push("--merge-output-format".to_string());
            args.push(container.to_string());
        }

        if config.preset.needs_transcoder() {
            args.extend(
                ["-x", "--audio-format", "mp3", "--audio-quality", "192K"]
                    .iter()
                    .map(|arg| arg.to_string()),
            );
        }

        if let Some(cookies) = &config.cookie_file {
            args.push("--cookies".to_string());
            args.push(cookies.to_string_lossy().into_owned());
        }

        if let Some(location) = self.transcoder.as_ref().and_then(Transcoder::location_arg) {
            args.push("--ffmpeg-location".to_string());
            args.push(location.to_string_lossy().into_owned());
        }

        args.push("--".to_string());
        args.push(config.url.clone());
        args
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    fn id(&self) -> &'static str {
        "yt-dlp"
    }

    async fn download(
        &self,
        config: &DownloadConfig,
        events: mpsc::UnboundedSender<ExtractorEvent>,
        cancel: CancellationToken,
    ) -> Result<DownloadOutcome, VidQueueError> {
        let command = self.command.as_ref().ok_or(VidQueueError::YtDlpNotFound)?;

        if config.preset.needs_transcoder() && self.transcoder.is_none() {
            return Err(VidQueueError::Transcode(missing_transcoder_message()));
        }
        if cancel.is_cancelled() {
            return Err(VidQueueError::Cancelled);
        }

        let args = self.build_args(config);
        debug!("Running {} {:?}", command.display(), args);

        let _ = events.send(ExtractorEvent::Message(format!("Quality: {}", config.preset)));
        if config.cookie_file.is_some() {
            let _ = events.send(ExtractorEvent::Message(
                "Using cookies file for authenticated download.".to_string(),
            ));
        }
        let _ = events.send(ExtractorEvent::Message("Fetching video info...".to_string()));

        let mut cmd = AsyncCommand::new(&command.program);
        cmd.args(&command.prefix)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(windows)]
        cmd.creation_flags(0x0800_0000); // CREATE_NO_WINDOW

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VidQueueError::YtDlpNotFound
            } else {
                VidQueueError::Io(e)
            }
        })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| VidQueueError::OperationFailed("yt-dlp stdout unavailable".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| VidQueueError::OperationFailed("yt-dlp stderr unavailable".into()))?;

        // Raw lines: titles are not guaranteed to be valid UTF-8
        let mut out_lines = BufReader::new(stdout).split(b'\n');
        let mut err_lines = BufReader::new(stderr).split(b'\n');
        let mut report = RunReport::default();
        let mut stdout_done = false;
        let mut stderr_done = false;

        let status = loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Cancelling yt-dlp for {}", config.url);
                    if let Err(e) = child.start_kill() {
                        warn!("Failed to kill yt-dlp process: {}", e);
                    }
                    let _ = child.wait().await;
                    return Err(VidQueueError::Cancelled);
                }

                line = out_lines.next_segment(), if !stdout_done => match line {
                    Ok(Some(raw)) => report.consume(&decode_line(&raw), false, &events),
                    Ok(None) => stdout_done = true,
                    Err(e) => {
                        warn!("Error reading yt-dlp stdout: {}", e);
                        stdout_done = true;
                    }
                },

                line = err_lines.next_segment(), if !stderr_done => match line {
                    Ok(Some(raw)) => report.consume(&decode_line(&raw), true, &events),
                    Ok(None) => stderr_done = true,
                    Err(e) => {
                        warn!("Error reading yt-dlp stderr: {}", e);
                        stderr_done = true;
                    }
                },

                status = child.wait(), if stdout_done && stderr_done => break status?,
            }
        };

        if status.success() {
            info!("yt-dlp finished {}", config.url);
            return Ok(DownloadOutcome {
                output_path: report.output_path,
                title: report.title,
            });
        }

        if cancel.is_cancelled() {
            return Err(VidQueueError::Cancelled);
        }

        let error = classify_failure(report.error_lines.make_contiguous(), status.code());
        error!("yt-dlp failed for {}: {}", config.url, error);
        Err(error)
    }
}

/// What we learned from one yt-dlp run
#[derive(Debug, Default)]
struct RunReport {
    title: Option<String>,
    output_path: Option<PathBuf>,
    error_lines: VecDeque<String>,
}

impl RunReport {
    fn consume(
        &mut self,
        line: &str,
        from_stderr: bool,
        events: &mpsc::UnboundedSender<ExtractorEvent>,
    ) {
        if let Some(progress) = parse_progress_line(line) {
            let _ = events.send(ExtractorEvent::Progress(progress));
        } else if let Some(title) = marker_value(line, TITLE_MARKER) {
            let _ = events.send(ExtractorEvent::Message(format!("Title: {}", title)));
            let _ = events.send(ExtractorEvent::Message("Starting download...".to_string()));
            self.title = Some(title.to_string());
        } else if let Some(path) = marker_value(line, FILE_MARKER) {
            self.output_path = Some(PathBuf::from(path));
        } else if from_stderr && !line.trim().is_empty() {
            debug!("yt-dlp: {}", line);
            if self.error_lines.len() == ERROR_CONTEXT_LINES {
                self.error_lines.pop_front();
            }
            self.error_lines.push_back(line.trim().to_string());
        }
    }
}

/// Decode one output line, replacing invalid UTF-8 instead of failing
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

fn marker_value<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let idx = line.find(marker)?;
    let value = line[idx + marker.len()..].trim();
    (!value.is_empty() && value != "NA").then_some(value)
}

/// Parse one line produced by our `--progress-template`.
///
/// Format: `vq-progress:<status>|<downloaded>|<total>|<estimate>|<speed>|<eta>`,
/// unknown fields print as `NA`.
pub fn parse_progress_line(line: &str) -> Option<ProgressEvent> {
    let idx = line.find(PROGRESS_MARKER)?;
    let payload = line[idx + PROGRESS_MARKER.len()..].trim();
    let mut fields = payload.split('|');

    let status = fields.next()?.trim();
    let downloaded = parse_number(fields.next());
    let total = parse_number(fields.next());
    let estimate = parse_number(fields.next());
    let speed = parse_number(fields.next());
    let eta = parse_number(fields.next());

    match status {
        "downloading" => Some(ProgressEvent::downloading(
            downloaded.unwrap_or(0.0) as u64,
            total.or(estimate).map(|t| t as u64),
            speed,
            eta.map(|e| e as u64),
        )),
        "finished" => Some(ProgressEvent::finished()),
        _ => None,
    }
}

fn parse_number(field: Option<&str>) -> Option<f64> {
    field
        .map(str::trim)
        .filter(|f| !f.is_empty() && *f != "NA" && *f != "None")
        .and_then(|f| f.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Turn yt-dlp's error output into an error the queue can show.
///
/// Post-processing failures (ffmpeg/ffprobe in an `ERROR:`, `[ExtractAudio]`
/// or `[Merger]` line) are reported as
/// [`VidQueueError::Transcode`], everything else as
/// [`VidQueueError::Extraction`].
pub fn classify_failure(stderr_lines: &[String], exit_code: Option<i32>) -> VidQueueError {
    let message = stderr_lines
        .iter()
        .rev()
        .find_map(|line| line.strip_prefix("ERROR:").map(|rest| rest.trim().to_string()))
        .or_else(|| stderr_lines.last().cloned())
        .unwrap_or_else(|| match exit_code {
            Some(code) => format!("yt-dlp exited with status {}", code),
            None => "yt-dlp was terminated".to_string(),
        });

    // Only error and post-processor lines count; other output may echo titles or URLs
    let transcoder_involved = stderr_lines
        .iter()
        .filter(|line| POSTPROCESS_PREFIXES.iter().any(|prefix| line.starts_with(prefix)))
        .any(|line| {
            let lower = line.to_lowercase();
            lower.contains("ffmpeg") || lower.contains("ffprobe") || lower.contains("postprocessing")
        });

    if transcoder_involved {
        VidQueueError::Transcode(message)
    } else {
        VidQueueError::Extraction(message)
    }
}

// ============================================================
// yt-dlp Detection Functions
// ============================================================

/// Find yt-dlp with priority:
/// 1. Bundled (next to the executable / inside the .app bundle)
/// 2. System PATH
/// 3. Common installation paths
/// 4. The Python module (`python3 -m yt_dlp`)
pub fn find_ytdlp() -> Option<YtDlpCommand> {
    if let Some(bundled) = bundled_binary(YTDLP_BIN) {
        info!("✓ Using bundled yt-dlp: {:?}", bundled);
        return Some(YtDlpCommand::new(bundled, Vec::new()));
    }

    if let Ok(system) = which::which(YTDLP_BIN) {
        info!("✓ Using system yt-dlp: {:?}", system);
        return Some(YtDlpCommand::new(system, Vec::new()));
    }

    if let Some(common) = in_common_paths(YTDLP_BIN) {
        info!("✓ Using yt-dlp from common path: {:?}", common);
        return Some(YtDlpCommand::new(common, Vec::new()));
    }

    if let Some(module) = find_python_module() {
        info!("✓ Using yt-dlp Python module: {}", module.display());
        return Some(module);
    }

    warn!("✗ yt-dlp not found anywhere!");
    None
}

fn find_python_module() -> Option<YtDlpCommand> {
    ["python3", "python"].iter().find_map(|interpreter| {
        let python = which::which(interpreter).ok()?;
        let prefix = vec!["-m".to_string(), "yt_dlp".to_string()];
        let output = Command::new(&python)
            .args(&prefix)
            .arg("--version")
            .output()
            .ok()?;
        output
            .status
            .success()
            .then(|| YtDlpCommand::new(python, prefix))
    })
}

// ============================================================
// Tests
// ============================================================
