//! Music with Karu
//!
//! Song discovery, playback rules and audio output.

pub mod audio;
pub mod format;
pub mod player;
pub mod playlist;

pub use audio::{AlertPlayer, AudioError, AudioOutput, PlaybackBackend};
pub use player::{MusicPlayer, PlaybackMode, PlayerKey};
pub use playlist::{scan_music_directory, Song};
