//! System tray icon and menu

use crate::music::player::PlaybackMode;
use dioxus::desktop::trayicon::menu::{Menu, MenuItem, PredefinedMenuItem, Submenu};
use dioxus::desktop::trayicon::{Icon, TrayIcon, TrayIconBuilder};
use image::GenericImageView;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrayError {
    #[error("Menu error: {0}")]
    Menu(#[from] dioxus::desktop::trayicon::menu::Error),
    #[error("Tray error: {0}")]
    Tray(#[from] dioxus::desktop::trayicon::Error),
}

/// Everything the tray menu can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    Chat,
    Pomodoro,
    OpenMusic,
    PlayPause,
    Prev,
    Next,
    Mode,
    Mute,
    ToggleVisibility,
    Help,
    Exit,
}

impl TrayAction {
    pub const ALL: [TrayAction; 11] = [
        TrayAction::Chat,
        TrayAction::Pomodoro,
        TrayAction::OpenMusic,
        TrayAction::PlayPause,
        TrayAction::Prev,
        TrayAction::Next,
        TrayAction::Mode,
        TrayAction::Mute,
        TrayAction::ToggleVisibility,
        TrayAction::Help,
        TrayAction::Exit,
    ];

    pub fn as_id(self) -> &'static str {
        match self {
            TrayAction::Chat => "chat",
            TrayAction::Pomodoro => "pomodoro",
            TrayAction::OpenMusic => "music_open",
            TrayAction::PlayPause => "play_pause",
            TrayAction::Prev => "prev",
            TrayAction::Next => "next",
            TrayAction::Mode => "mode",
            TrayAction::Mute => "mute",
            TrayAction::ToggleVisibility => "toggle_visibility",
            TrayAction::Help => "help",
            TrayAction::Exit => "exit",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_id() == id)
    }
}

pub fn play_pause_label(playing: bool) -> &'static str {
    if playing {
        "Pause"
    } else {
        "Play"
    }
}

pub fn mode_label(mode: PlaybackMode) -> String {
    format!("Mode: {}", mode.label())
}

pub fn mute_label(muted: bool) -> &'static str {
    if muted {
        "Unmute"
    } else {
        "Mute"
    }
}

pub fn visibility_label(visible: bool) -> &'static str {
    if visible {
        "Hide"
    } else {
        "Show"
    }
}

/// The dynamic part of the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayLabels {
    pub play_pause: &'static str,
    pub mode: String,
    pub mute: &'static str,
    pub visibility: &'static str,
    pub music_enabled: bool,
}

impl TrayLabels {
    pub fn new(
        playing: bool,
        mode: PlaybackMode,
        muted: bool,
        visible: bool,
        music_enabled: bool,
    ) -> Self {
        Self {
            play_pause: play_pause_label(playing),
            mode: mode_label(mode),
            mute: mute_label(muted),
            visibility: visibility_label(visible),
            music_enabled,
        }
    }
}

/// Tray menu with handles on the items whose text changes
pub struct TrayMenu {
    menu: Menu,
    music: Submenu,
    play_pause: MenuItem,
    mode: MenuItem,
    mute: MenuItem,
    visibility: MenuItem,
    shown: Option<TrayLabels>,
}

fn item(action: TrayAction, text: &str) -> MenuItem {
    MenuItem::with_id(action.as_id(), text, true, None)
}

impl TrayMenu {
    pub fn build() -> Result<Self, TrayError> {
        let menu = Menu::new();
        let title = MenuItem::new("Karu the Fox", false, None);
        menu.append(&title)?;
        menu.append(&PredefinedMenuItem::separator())?;
        menu.append(&item(TrayAction::Chat, "Chat with Karu"))?;
        menu.append(&item(TrayAction::Pomodoro, "Pomodoro Timer"))?;

        let music = Submenu::new("Music with Karu", false);
        let play_pause = item(TrayAction::PlayPause, play_pause_label(false));
        let mode = item(TrayAction::Mode, &mode_label(PlaybackMode::Shuffle));
        let mute = item(TrayAction::Mute, mute_label(false));
        music.append(&item(TrayAction::OpenMusic, "Open Music Player"))?;
        music.append(&PredefinedMenuItem::separator())?;
        music.append(&play_pause)?;
        music.append(&item(TrayAction::Prev, "Previous"))?;
        music.append(&item(TrayAction::Next, "Next"))?;
        music.append(&PredefinedMenuItem::separator())?;
        music.append(&mode)?;
        music.append(&mute)?;
        menu.append(&music)?;

        let visibility = item(TrayAction::ToggleVisibility, visibility_label(true));
        menu.append(&visibility)?;
        menu.append(&PredefinedMenuItem::separator())?;
        menu.append(&item(TrayAction::Help, "Help"))?;
        menu.append(&item(TrayAction::Exit, "Exit"))?;

        Ok(Self {
            menu,
            music,
            play_pause,
            mode,
            mute,
            visibility,
            shown: None,
        })
    }

    /// Push new labels to the native menu, skipping unchanged ones
    pub fn sync(&mut self, labels: &TrayLabels) {
        let previous = self.shown.as_ref();
        if previous.map(|p| p.play_pause) != Some(labels.play_pause) {
            self.play_pause.set_text(labels.play_pause);
        }
        if previous.map(|p| p.mode.as_str()) != Some(labels.mode.as_str()) {
            self.mode.set_text(&labels.mode);
        }
        if previous.map(|p| p.mute) != Some(labels.mute) {
            self.mute.set_text(labels.mute);
        }
        if previous.map(|p| p.visibility) != Some(labels.visibility) {
            self.visibility.set_text(labels.visibility);
        }
        if previous.map(|p| p.music_enabled) != Some(labels.music_enabled) {
            self.music.set_enabled(labels.music_enabled);
        }
        self.shown = Some(labels.clone());
    }
}

/// Decode the logo for the tray, or a blank square when it cannot be read
pub fn load_tray_icon(path: &Path) -> Option<Icon> {
    let (rgba, width, height) = match image::open(path) {
        Ok(img) => {
            let (width, height) = img.dimensions();
            tracing::info!("Loaded tray icon: {}x{}", width, height);
            (img.to_rgba8().into_raw(), width, height)
        }
        Err(e) => {
            tracing::warn!("Failed to load tray icon {}: {}", path.display(), e);
            (vec![0; 32 * 32 * 4], 32, 32)
        }
    };

    match Icon::from_rgba(rgba, width, height) {
        Ok(icon) => Some(icon),
        Err(e) => {
            tracing::warn!("Invalid tray icon: {}", e);
            None
        }
    }
}

pub fn create_tray(menu: &TrayMenu, icon_path: &Path) -> Result<TrayIcon, TrayError> {
    let mut builder = TrayIconBuilder::new()
        .with_menu(Box::new(menu.menu.clone()))
        .with_tooltip("Karu the Fox");
    if let Some(icon) = load_tray_icon(icon_path) {
        builder = builder.with_icon(icon);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_action_ids_round_trip() {
        for action in TrayAction::ALL {
            assert_eq!(TrayAction::from_id(action.as_id()), Some(action));
        }
        assert_eq!(TrayAction::from_id("quit"), None);
    }

    #[test]
    fn test_labels() {
        let labels = TrayLabels::new(true, PlaybackMode::LoopAll, true, false, true);
        assert_eq!(labels.play_pause, "Pause");
        assert_eq!(labels.mode, "Mode: Loop All");
        assert_eq!(labels.mute, "Unmute");
        assert_eq!(labels.visibility, "Show");

        assert_eq!(play_pause_label(false), "Play");
        assert_eq!(mode_label(PlaybackMode::Normal), "Mode: Normal");
        assert_eq!(mute_label(false), "Mute");
        assert_eq!(visibility_label(true), "Hide");
    }

    #[test]
    fn test_missing_logo_gives_blank_icon() {
        let dir = tempdir().unwrap();
        assert!(load_tray_icon(&dir.path().join("logo.png")).is_some());
    }
}
