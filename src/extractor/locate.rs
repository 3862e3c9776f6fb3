//! Locating external helper binaries (yt-dlp, ffmpeg)
//!
//! Search order:
//! 1. Bundled next to our executable, or in `Contents/Resources/bin` of a macOS .app
//! 2. System PATH
//! 3. Common installation paths (Homebrew, pip --user, ...)

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Find a binary shipped alongside the application.
pub fn bundled_binary(name: &str) -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;
    debug!("Looking for bundled {} near {:?}", name, exe_dir);

    // Structure: VidQueue.app/Contents/MacOS/vidqueue
    //                                  /Resources/bin/<name>
    if exe_dir.ends_with("MacOS") {
        let candidate = exe_dir.parent()?.join("Resources").join("bin").join(name);
        if candidate.is_file() {
            if is_executable(&candidate) {
                return Some(candidate);
            }
            warn!("Bundled {} exists but is not executable: {:?}", name, candidate);
        }
    }

    let side_by_side = exe_dir.join(name);
    if side_by_side.is_file() && is_executable(&side_by_side) {
        return Some(side_by_side);
    }

    None
}

/// Find a binary in one of the usual install locations that a GUI launch
/// might not have on its PATH.
pub fn in_common_paths(name: &str) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = [
        // macOS Homebrew (Apple Silicon)
        "/opt/homebrew/bin",
        // macOS Homebrew (Intel) / manual installs
        "/usr/local/bin",
        "/usr/bin",
        // Python.org installation
        "/Library/Frameworks/Python.framework/Versions/Current/bin",
    ]
    .iter()
    .map(|dir| Path::new(dir).join(name))
    .collect();

    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".local").join("bin").join(name));
    }

    candidates
        .into_iter()
        .find(|path| path.is_file() && is_executable(path))
}

/// Check if a file is executable
pub fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path)
            .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_executable() {
        let path = PathBuf::from("/bin/sh");
        if path.exists() {
            assert!(is_executable(&path));
        }
    }

    #[cfg(unix)]
    #[test]
    fn plain_files_are_not_executable() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, "hello").unwrap();
        assert!(!is_executable(&file));
    }

    #[test]
    fn missing_binaries_are_not_found() {
        assert_eq!(bundled_binary("definitely-not-a-real-binary-name"), None);
        assert_eq!(in_common_paths("definitely-not-a-real-binary-name"), None);
    }
}
