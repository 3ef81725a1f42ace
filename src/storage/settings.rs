//! Settings storage
//!
//! Persists player and pomodoro preferences to a flat `config.json`.

use crate::music::player::PlaybackMode;
use crate::pomodoro::themes::{resolve_theme_name, DEFAULT_THEME};
use crate::pomodoro::timer::{clamp_duration_minutes, DEFAULT_MINUTES};
use crate::storage::{get_data_dir, StorageError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Index into the scanned playlist, -1 when nothing was playing
    #[serde(default = "default_last_track_index")]
    pub last_track_index: i64,
    /// Music volume (0 - 100)
    #[serde(default = "default_volume")]
    pub volume: i64,
    #[serde(default)]
    pub is_muted: bool,
    /// "normal", "loop_all" or "shuffle"
    #[serde(default = "default_playback_mode")]
    pub playback_mode: String,
    /// Pomodoro length in minutes (10 - 60)
    #[serde(default = "default_pomodoro_duration")]
    pub pomodoro_duration: i64,
    /// Pomodoro colour theme name
    #[serde(default = "default_pomodoro_theme")]
    pub pomodoro_theme: String,
    /// Keys written by other versions, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_last_track_index() -> i64 {
    -1
}

fn default_volume() -> i64 {
    100
}

fn default_playback_mode() -> String {
    PlaybackMode::Shuffle.as_config_str().to_string()
}

fn default_pomodoro_duration() -> i64 {
    DEFAULT_MINUTES as i64
}

fn default_pomodoro_theme() -> String {
    DEFAULT_THEME.to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            last_track_index: default_last_track_index(),
            volume: default_volume(),
            is_muted: false,
            playback_mode: default_playback_mode(),
            pomodoro_duration: default_pomodoro_duration(),
            pomodoro_theme: default_pomodoro_theme(),
            extra: Map::new(),
        }
    }
}

impl AppSettings {
    /// Validate settings values
    ///
    /// Brings every field back into the range the UI can represent.
    pub fn validate(&mut self) {
        self.volume = self.volume.clamp(0, 100);

        if self.last_track_index < -1 {
            self.last_track_index = -1;
        }

        self.playback_mode = PlaybackMode::from_config_str(&self.playback_mode)
            .as_config_str()
            .to_string();

        self.pomodoro_duration = clamp_duration_minutes(self.pomodoro_duration) as i64;

        self.pomodoro_theme = resolve_theme_name(&self.pomodoro_theme).to_string();
    }

    pub fn playback_mode(&self) -> PlaybackMode {
        PlaybackMode::from_config_str(&self.playback_mode)
    }

    pub fn volume_percent(&self) -> u8 {
        self.volume.clamp(0, 100) as u8
    }
}

/// Get the settings file path
///
/// `KARU_CONFIG` overrides the platform location.
pub fn get_settings_path() -> Result<PathBuf, StorageError> {
    if let Ok(path) = std::env::var("KARU_CONFIG") {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    Ok(get_data_dir()?.join("config.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> AppSettings {
    let result = get_settings_path().and_then(|path| load_settings_from(&path));
    match result {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

/// Load settings from an explicit path, merging stored keys over the defaults
pub fn load_settings_from(path: &Path) -> Result<AppSettings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(AppSettings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: AppSettings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Save settings to disk
pub fn save_settings(settings: &AppSettings) -> Result<(), StorageError> {
    let path = get_settings_path()?;
    save_settings_to(settings, &path)
}

/// Save settings to an explicit path.
///
/// Whatever is already in the file is read back first so keys this version
/// does not know about survive the write.
pub fn save_settings_to(settings: &AppSettings, path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut merged = read_existing_object(path);
    if let Value::Object(current) = serde_json::to_value(settings)? {
        merged.extend(current);
    }

    let json = serde_json::to_string_pretty(&Value::Object(merged))?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to {}", path.display());
    Ok(())
}

fn read_existing_object(path: &Path) -> Map<String, Value> {
    fs::read_to_string(path)
        .ok()
        .and_then(|json| serde_json::from_str::<Value>(&json).ok())
        .and_then(|value| match value {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .unwrap_or_default()
}
