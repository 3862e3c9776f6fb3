//! Platform path resolution
//!
//! Everything is resolved to absolute paths. When the app is launched from
//! Finder/Dock/Explorer the working directory is not the user's, so relative
//! paths like `./downloads` would land in the wrong place.

use std::path::PathBuf;
use tracing::{debug, warn};

const APP_DIR_NAME: &str = "VidQueue";

/// Application data directory.
///
/// - macOS: `~/Library/Application Support/VidQueue`
/// - Windows: `%APPDATA%\VidQueue`
/// - Linux: `~/.local/share/vidqueue`
///
/// Creates the directory if it doesn't exist.
pub fn app_data_dir() -> PathBuf {
    let name = if cfg!(target_os = "linux") {
        APP_DIR_NAME.to_lowercase()
    } else {
        APP_DIR_NAME.to_string()
    };

    let dir = dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .unwrap_or_else(std::env::temp_dir)
        .join(name);

    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!("Failed to create app data directory {:?}: {}", dir, e);
    }

    debug!("App data directory: {:?}", dir);
    dir
}

/// Settings database location.
pub fn settings_db_path() -> PathBuf {
    app_data_dir().join("vidqueue.db")
}

/// Default output directory: the user's Downloads folder.
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| {
            warn!("Could not determine Downloads directory, using temp dir");
            std::env::temp_dir()
        })
}
