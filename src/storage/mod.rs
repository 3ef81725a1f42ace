//! Persistent storage
//!
//! This module handles the config file and on-disk asset lookup.

pub mod assets;
pub mod settings;

use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing local files
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not determine the user config directory")]
    NoConfigDir,
}

/// Platform config directory for Karu (e.g. `~/.config/karu` on Linux)
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    ProjectDirs::from("", "", "karu")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(StorageError::NoConfigDir)
}

/// Root of the bundled asset tree.
///
/// Resolution order: `$KARU_ASSETS_DIR`, `<exe dir>/assets`, `./assets`.
pub fn get_assets_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("KARU_ASSETS_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("assets")))
    {
        if dir.is_dir() {
            return dir;
        }
    }

    PathBuf::from("assets")
}

pub fn image_dir() -> PathBuf {
    get_assets_dir().join("images")
}

pub fn music_dir() -> PathBuf {
    get_assets_dir().join("music")
}

pub fn logo_icon_path() -> PathBuf {
    image_dir().join("logo.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_subdirectories() {
        let root = get_assets_dir();
        assert_eq!(image_dir(), root.join("images"));
        assert_eq!(music_dir(), root.join("music"));
        assert!(logo_icon_path().ends_with("images/logo.png"));
    }
}
