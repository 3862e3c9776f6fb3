//! VidQueue - queue video downloads and run them one by one
//!
//! A desktop front end for yt-dlp: paste links, pick a quality preset and let
//! the queue download them in order, with ffmpeg handling merging and audio
//! extraction.

#![cfg_attr(windows, windows_subsystem = "windows")]

use anyhow::Result;
use clap::Parser;
use iced::Application;
use std::sync::Arc;
use tracing::{info, warn};
use vidqueue::database::{initialize_database, DatabaseManager};
use vidqueue::extractor::{Extractor, YtDlpExtractor};
use vidqueue::gui::{self, Flags, VidQueueApp};
use vidqueue::utils::{settings_db_path, AppSettings};

#[derive(Parser)]
#[command(version, about)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let runtime = Arc::new(tokio::runtime::Runtime::new()?);
    let mut startup_notes = Vec::new();

    // Settings database; the app still runs on defaults without it
    let (db, settings) = runtime.block_on(async {
        match open_settings().await {
            Ok((db, settings)) => (Some(Arc::new(db)), settings),
            Err(e) => {
                warn!("Settings database unavailable: {:#}", e);
                (None, AppSettings::default())
            }
        }
    });
    if db.is_none() {
        startup_notes.push("Settings could not be loaded; using defaults.".to_string());
    }

    let extractor = YtDlpExtractor::detect();
    match extractor.command() {
        Some(command) => info!("Using yt-dlp: {}", command.display()),
        None => {
            warn!("yt-dlp not found");
            startup_notes.push(
                "yt-dlp was not found. Install it (pip install yt-dlp) or place it next to the app."
                    .to_string(),
            );
        }
    }
    match extractor.transcoder() {
        Some(ffmpeg) => info!("Using ffmpeg: {}", ffmpeg.path().display()),
        None => {
            warn!("ffmpeg not found");
            startup_notes.push(
                "ffmpeg was not found; the audio preset and merging will not work.".to_string(),
            );
        }
    }
    let extractor: Arc<dyn Extractor> = Arc::new(extractor);

    VidQueueApp::run(iced::Settings {
        window: iced::window::Settings {
            size: iced::Size::new(1100.0, 760.0),
            min_size: Some(iced::Size::new(900.0, 600.0)),
            icon: gui::icon::load_icon(),
            ..Default::default()
        },
        antialiasing: true,
        ..iced::Settings::with_flags(Flags {
            runtime,
            db,
            settings,
            extractor,
            startup_notes,
        })
    })?;

    Ok(())
}

async fn open_settings() -> Result<(DatabaseManager, AppSettings)> {
    let path = settings_db_path();
    info!("Settings database: {}", path.display());

    let pool = initialize_database(&path).await?;
    let db = DatabaseManager::new(pool);
    let settings = db.load_app_settings().await?;
    Ok((db, settings))
}
