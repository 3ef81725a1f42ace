//! Music player state
//!
//! Owns the playlist, navigation rules per playback mode and the persisted
//! player preferences. Sound goes through a [`PlaybackBackend`].

use crate::music::audio::PlaybackBackend;
use crate::music::playlist::{
    build_shuffle_queue, ensure_shuffle_queue, remove_from_shuffle_queue, Song,
};
use crate::storage::settings::AppSettings;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode {
    Normal,
    LoopAll,
    Shuffle,
}

impl PlaybackMode {
    /// Parse a stored mode. Unknown values, including the retired
    /// "loop_one", fall back to looping the whole list.
    pub fn from_config_str(value: &str) -> Self {
        match value {
            "normal" => PlaybackMode::Normal,
            "shuffle" => PlaybackMode::Shuffle,
            _ => PlaybackMode::LoopAll,
        }
    }

    pub fn as_config_str(self) -> &'static str {
        match self {
            PlaybackMode::Normal => "normal",
            PlaybackMode::LoopAll => "loop_all",
            PlaybackMode::Shuffle => "shuffle",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlaybackMode::Normal => "Normal",
            PlaybackMode::LoopAll => "Loop All",
            PlaybackMode::Shuffle => "Shuffle",
        }
    }

    pub fn next(self) -> Self {
        match self {
            PlaybackMode::Normal => PlaybackMode::LoopAll,
            PlaybackMode::LoopAll => PlaybackMode::Shuffle,
            PlaybackMode::Shuffle => PlaybackMode::Normal,
        }
    }
}

/// Keyboard shortcuts understood by the player window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKey {
    Up,
    Down,
    Enter,
    PlayPause,
    Mode,
}

impl PlayerKey {
    /// Map a DOM `key` value to a shortcut
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "k" | "K" => Some(PlayerKey::Up),
            "ArrowDown" | "j" | "J" => Some(PlayerKey::Down),
            "Enter" => Some(PlayerKey::Enter),
            "p" | "P" => Some(PlayerKey::PlayPause),
            "m" | "M" => Some(PlayerKey::Mode),
            _ => None,
        }
    }
}

pub struct MusicPlayer {
    playlist: Vec<Song>,
    current: Option<usize>,
    mode: PlaybackMode,
    shuffle_queue: Vec<usize>,
    volume: u8,
    muted: bool,
    selection: Option<usize>,
    backend: Box<dyn PlaybackBackend>,
    rng: StdRng,
}

impl MusicPlayer {
    pub fn new(backend: Box<dyn PlaybackBackend>) -> Self {
        Self::with_rng(backend, StdRng::from_entropy())
    }

    pub fn with_rng(backend: Box<dyn PlaybackBackend>, rng: StdRng) -> Self {
        let mut player = Self {
            playlist: Vec::new(),
            current: None,
            mode: PlaybackMode::Shuffle,
            shuffle_queue: Vec::new(),
            volume: 100,
            muted: false,
            selection: None,
            backend,
            rng,
        };
        player.sync_volume();
        player
    }

    /// Replace the playlist, forgetting the current track
    pub fn set_playlist(&mut self, playlist: Vec<Song>) {
        self.backend.stop();
        self.playlist = playlist;
        self.current = None;
        self.selection = None;
        self.shuffle_queue.clear();
        if self.mode == PlaybackMode::Shuffle {
            self.rebuild_shuffle_queue();
        }
    }

    pub fn playlist(&self) -> &[Song] {
        &self.playlist
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.current.and_then(|i| self.playlist.get(i))
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Muted, or turned all the way down
    pub fn is_silent(&self) -> bool {
        self.muted || self.volume == 0
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn is_playing(&self) -> bool {
        self.backend.is_playing()
    }

    pub fn shuffle_queue(&self) -> &[usize] {
        &self.shuffle_queue
    }

    pub fn position(&self) -> Duration {
        self.backend.position()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.backend.duration()
    }

    /// Header text: (title, artist)
    pub fn labels(&self) -> (String, String) {
        if self.playlist.is_empty() {
            return (
                "No music found".to_string(),
                "Check ./music folder structure".to_string(),
            );
        }
        match self.current_song() {
            Some(song) => (song.title.clone(), song.artist.clone()),
            None => (
                "Welcome to Your Pet Music Player".to_string(),
                "Select a song to start".to_string(),
            ),
        }
    }

    fn sync_volume(&mut self) {
        let gain = if self.muted {
            0.0
        } else {
            f32::from(self.volume) / 100.0
        };
        self.backend.set_volume(gain);
    }

    fn rebuild_shuffle_queue(&mut self) {
        self.shuffle_queue = build_shuffle_queue(self.playlist.len(), self.current, &mut self.rng);
    }

    fn pop_shuffle_queue(&mut self) -> Option<usize> {
        ensure_shuffle_queue(
            &mut self.shuffle_queue,
            self.playlist.len(),
            self.current,
            &mut self.rng,
        );
        if self.shuffle_queue.is_empty() {
            None
        } else {
            Some(self.shuffle_queue.remove(0))
        }
    }

    fn load(&mut self, index: usize, autoplay: bool) -> bool {
        let Some(song) = self.playlist.get(index) else {
            return false;
        };
        let path = song.path.clone();
        self.current = Some(index);
        self.selection = Some(index);

        match self.backend.load(&path, false) {
            Ok(()) => {
                self.sync_volume();
                if autoplay {
                    self.backend.play();
                }
                tracing::info!("Now playing {}", path.display());
            }
            Err(e) => tracing::warn!("Failed to load {}: {}", path.display(), e),
        }
        true
    }

    /// Start the song at `index`. Out of range indexes are ignored.
    pub fn play_song(&mut self, index: usize) {
        self.load(index, true);
    }

    pub fn next(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        match self.mode {
            PlaybackMode::Shuffle => {
                if let Some(index) = self.pop_shuffle_queue() {
                    self.play_song(index);
                }
            }
            PlaybackMode::Normal => match self.current {
                None => self.play_song(0),
                Some(i) if i + 1 < len => self.play_song(i + 1),
                Some(_) => {}
            },
            PlaybackMode::LoopAll => {
                let next = self.current.map(|i| (i + 1) % len).unwrap_or(0);
                self.play_song(next);
            }
        }
    }

    pub fn prev(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        match (self.mode, self.current) {
            (PlaybackMode::Normal, Some(i)) if i > 0 => self.play_song(i - 1),
            (PlaybackMode::Normal, _) => {}
            (_, Some(i)) => self.play_song((i + len - 1) % len),
            (_, None) => self.play_song(len - 1),
        }
    }

    pub fn toggle_play_pause(&mut self) {
        if self.backend.is_playing() {
            self.backend.pause();
        } else if self.current.is_none() && !self.playlist.is_empty() {
            let first = if self.mode == PlaybackMode::Shuffle {
                self.pop_shuffle_queue().unwrap_or(0)
            } else {
                0
            };
            self.play_song(first);
        } else if let Some(index) = self
            .current
            .filter(|_| !self.backend.is_loaded() || self.backend.finished())
        {
            // The track ended or was dropped; start it over
            self.load(index, true);
        } else {
            self.backend.play();
        }

        if self.mode == PlaybackMode::Shuffle {
            if let Some(current) = self.current {
                remove_from_shuffle_queue(&mut self.shuffle_queue, current);
            }
        }
    }

    pub fn set_mode(&mut self, mode: PlaybackMode) {
        self.mode = mode;
        if mode == PlaybackMode::Shuffle {
            self.rebuild_shuffle_queue();
        } else {
            self.shuffle_queue.clear();
        }
        tracing::debug!("Playback mode: {}", mode.as_config_str());
    }

    pub fn cycle_mode(&mut self) {
        self.set_mode(self.mode.next());
    }

    /// Picking a song by hand plays the list in order from there
    pub fn play_from_list(&mut self, index: usize) {
        if index >= self.playlist.len() {
            return;
        }
        self.set_mode(PlaybackMode::Normal);
        self.play_song(index);
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        if self.muted && self.volume > 0 {
            self.muted = false;
        }
        self.sync_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.sync_volume();
    }

    pub fn seek(&mut self, position: Duration) {
        if let Err(e) = self.backend.seek(position) {
            tracing::warn!("Seek failed: {}", e);
        }
    }

    pub fn select(&mut self, index: usize) {
        if index < self.playlist.len() {
            self.selection = Some(index);
        }
    }

    pub fn move_selection(&mut self, delta: i64) {
        let count = self.playlist.len() as i64;
        if count == 0 {
            return;
        }
        let row = match self.selection {
            None if delta > 0 => 0,
            None => count - 1,
            Some(current) => (current as i64 + delta).clamp(0, count - 1),
        };
        self.selection = Some(row as usize);
    }

    pub fn handle_key(&mut self, key: PlayerKey) {
        match key {
            PlayerKey::Up => self.move_selection(-1),
            PlayerKey::Down => self.move_selection(1),
            PlayerKey::Enter => {
                if let Some(row) = self.selection {
                    self.play_from_list(row);
                }
            }
            PlayerKey::PlayPause => self.toggle_play_pause(),
            PlayerKey::Mode => self.cycle_mode(),
        }
    }

    /// Check for the end of the current track. Returns true when it ended.
    pub fn poll(&mut self) -> bool {
        if !self.backend.finished() {
            return false;
        }
        let last = self.playlist.len().saturating_sub(1);
        if !(self.mode == PlaybackMode::Normal && self.current.map_or(true, |i| i >= last)) {
            self.next();
        }
        if self.backend.finished() {
            // Nothing to move on to: park the ended track at its start
            match self.current {
                Some(index) => {
                    self.load(index, false);
                }
                None => self.backend.stop(),
            }
        }
        true
    }

    /// Restore persisted preferences; the last track is loaded but not played.
    pub fn apply_settings(&mut self, settings: &AppSettings) {
        self.volume = settings.volume_percent();
        self.muted = settings.is_muted;
        self.set_mode(settings.playback_mode());
        self.sync_volume();

        if let Ok(index) = usize::try_from(settings.last_track_index) {
            if index < self.playlist.len() {
                self.load(index, false);
                if self.mode == PlaybackMode::Shuffle {
                    self.rebuild_shuffle_queue();
                }
            }
        }
    }

    pub fn write_settings(&self, settings: &mut AppSettings) {
        settings.last_track_index = self.current.map_or(-1, |i| i as i64);
        settings.volume = i64::from(self.volume);
        settings.is_muted = self.muted;
        settings.playback_mode = self.mode.as_config_str().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::audio::AudioError;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct FakeState {
        loaded: Option<PathBuf>,
        playing: bool,
        finished: bool,
        volume: f32,
    }

    struct FakeBackend(Rc<RefCell<FakeState>>);

    impl PlaybackBackend for FakeBackend {
        fn load(&mut self, path: &Path, _looping: bool) -> Result<(), AudioError> {
            let mut state = self.0.borrow_mut();
            state.loaded = Some(path.to_path_buf());
            state.playing = false;
            state.finished = false;
            Ok(())
        }
        fn play(&mut self) {
            let mut state = self.0.borrow_mut();
            state.playing = state.loaded.is_some();
        }
        fn pause(&mut self) {
            self.0.borrow_mut().playing = false;
        }
        fn stop(&mut self) {
            let mut state = self.0.borrow_mut();
            state.loaded = None;
            state.playing = false;
            state.finished = false;
        }
        fn is_loaded(&self) -> bool {
            self.0.borrow().loaded.is_some()
        }
        fn is_playing(&self) -> bool {
            self.0.borrow().playing
        }
        fn set_volume(&mut self, volume: f32) {
            self.0.borrow_mut().volume = volume;
        }
        fn position(&self) -> Duration {
            Duration::ZERO
        }
        fn duration(&self) -> Option<Duration> {
            None
        }
        fn seek(&mut self, _position: Duration) -> Result<(), AudioError> {
            Ok(())
        }
        fn finished(&self) -> bool {
            self.0.borrow().finished
        }
    }

    fn songs(n: usize) -> Vec<Song> {
        (0..n)
            .map(|i| Song {
                title: format!("Song {}", i),
                artist: "Karu".to_string(),
                path: PathBuf::from(format!("{}.mp3", i)),
                thumbnail: None,
            })
            .collect()
    }

    fn new_player(n: usize, mode: PlaybackMode) -> (MusicPlayer, Rc<RefCell<FakeState>>) {
        let state = Rc::new(RefCell::new(FakeState::default()));
        let mut player = MusicPlayer::with_rng(
            Box::new(FakeBackend(state.clone())),
            StdRng::seed_from_u64(3),
        );
        player.set_playlist(songs(n));
        player.set_mode(mode);
        (player, state)
    }

    #[test]
    fn test_mode_strings_and_cycle() {
        assert_eq!(PlaybackMode::from_config_str("normal"), PlaybackMode::Normal);
        assert_eq!(PlaybackMode::from_config_str("loop_one"), PlaybackMode::LoopAll);
        assert_eq!(PlaybackMode::from_config_str("???"), PlaybackMode::LoopAll);
        assert_eq!(PlaybackMode::Shuffle.as_config_str(), "shuffle");
        assert_eq!(PlaybackMode::Normal.next(), PlaybackMode::LoopAll);
        assert_eq!(PlaybackMode::LoopAll.next(), PlaybackMode::Shuffle);
        assert_eq!(PlaybackMode::Shuffle.next(), PlaybackMode::Normal);
    }

    #[test]
    fn test_play_song_ignores_out_of_range() {
        let (mut player, state) = new_player(3, PlaybackMode::Normal);
        player.play_song(7);
        assert_eq!(player.current_index(), None);
        assert!(state.borrow().loaded.is_none());

        player.play_song(1);
        assert_eq!(player.current_index(), Some(1));
        assert!(player.is_playing());
    }

    #[test]
    fn test_normal_mode_stops_at_ends() {
        let (mut player, _) = new_player(3, PlaybackMode::Normal);
        player.next();
        assert_eq!(player.current_index(), Some(0));
        player.prev();
        assert_eq!(player.current_index(), Some(0));

        player.play_song(2);
        player.next();
        assert_eq!(player.current_index(), Some(2));
    }

    #[test]
    fn test_loop_all_wraps() {
        let (mut player, _) = new_player(3, PlaybackMode::LoopAll);
        player.play_song(2);
        player.next();
        assert_eq!(player.current_index(), Some(0));
        player.prev();
        assert_eq!(player.current_index(), Some(2));
    }

    #[test]
    fn test_shuffle_visits_every_song_before_repeating() {
        let (mut player, _) = new_player(5, PlaybackMode::Shuffle);
        player.toggle_play_pause();
        let mut seen = vec![player.current_index().unwrap()];
        for _ in 0..4 {
            player.next();
            seen.push(player.current_index().unwrap());
        }
        seen.sort();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_toggle_play_pause() {
        let (mut player, state) = new_player(2, PlaybackMode::Normal);
        player.toggle_play_pause();
        assert_eq!(player.current_index(), Some(0));
        assert!(state.borrow().playing);

        player.toggle_play_pause();
        assert!(!state.borrow().playing);

        player.toggle_play_pause();
        assert!(state.borrow().playing);
        assert_eq!(player.current_index(), Some(0));
    }

    #[test]
    fn test_mode_change_rebuilds_or_clears_queue() {
        let (mut player, _) = new_player(4, PlaybackMode::Normal);
        assert!(player.shuffle_queue().is_empty());
        player.play_song(1);
        player.set_mode(PlaybackMode::Shuffle);
        assert_eq!(player.shuffle_queue().len(), 3);
        assert!(!player.shuffle_queue().contains(&1));
        player.cycle_mode();
        assert_eq!(player.mode(), PlaybackMode::Normal);
        assert!(player.shuffle_queue().is_empty());
    }

    #[test]
    fn test_play_from_list_forces_normal() {
        let (mut player, _) = new_player(3, PlaybackMode::Shuffle);
        player.play_from_list(2);
        assert_eq!(player.mode(), PlaybackMode::Normal);
        assert_eq!(player.current_index(), Some(2));
    }

    #[test]
    fn test_volume_unmutes() {
        let (mut player, state) = new_player(1, PlaybackMode::Normal);
        player.toggle_mute();
        assert!(player.is_muted());
        assert_eq!(state.borrow().volume, 0.0);

        player.set_volume(0);
        assert!(player.is_muted());
        player.set_volume(40);
        assert!(!player.is_muted());
        assert!((state.borrow().volume - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn test_end_of_media() {
        let (mut player, state) = new_player(2, PlaybackMode::Normal);
        player.play_song(0);
        state.borrow_mut().finished = true;
        assert!(player.poll());
        assert_eq!(player.current_index(), Some(1));

        state.borrow_mut().finished = true;
        assert!(player.poll());
        assert_eq!(player.current_index(), Some(1));
        assert!(!player.is_playing());
        assert!(!player.poll());
    }

    #[test]
    fn test_play_after_last_track_ended() {
        let (mut player, state) = new_player(2, PlaybackMode::Normal);
        player.play_song(1);
        state.borrow_mut().finished = true;
        assert!(player.poll());
        assert_eq!(state.borrow().loaded, Some(PathBuf::from("1.mp3")));
        assert!(!player.is_playing());

        player.toggle_play_pause();
        assert!(player.is_playing());
        assert_eq!(player.current_index(), Some(1));
    }

    #[test]
    fn test_play_reloads_dropped_track() {
        let (mut player, state) = new_player(2, PlaybackMode::Normal);
        player.play_song(0);
        player.toggle_play_pause();
        state.borrow_mut().loaded = None;

        player.toggle_play_pause();
        assert_eq!(state.borrow().loaded, Some(PathBuf::from("0.mp3")));
        assert!(player.is_playing());
    }

    #[test]
    fn test_end_of_media_loop_all_wraps() {
        let (mut player, state) = new_player(3, PlaybackMode::LoopAll);
        player.play_song(2);
        state.borrow_mut().finished = true;
        assert!(player.poll());
        assert_eq!(player.current_index(), Some(0));
        assert!(player.is_playing());
    }

    #[test]
    fn test_end_of_media_shuffle_pops_queue() {
        let (mut player, state) = new_player(3, PlaybackMode::Shuffle);
        player.toggle_play_pause();
        let first = player.current_index();
        assert_eq!(player.shuffle_queue().len(), 2);

        state.borrow_mut().finished = true;
        assert!(player.poll());
        assert_ne!(player.current_index(), first);
        assert!(player.is_playing());
        assert_eq!(player.shuffle_queue().len(), 1);
    }

    #[test]
    fn test_single_song_shuffle_ends_once() {
        let (mut player, state) = new_player(1, PlaybackMode::Shuffle);
        player.toggle_play_pause();
        assert_eq!(player.current_index(), Some(0));

        state.borrow_mut().finished = true;
        assert!(player.poll());
        assert!(!player.poll());
        assert!(!player.is_playing());
        assert_eq!(player.current_index(), Some(0));
        assert!(state.borrow().loaded.is_some());
    }

    #[test]
    fn test_keyboard_selection() {
        let (mut player, _) = new_player(3, PlaybackMode::LoopAll);
        player.handle_key(PlayerKey::Up);
        assert_eq!(player.selection(), Some(2));
        player.handle_key(PlayerKey::Down);
        assert_eq!(player.selection(), Some(2));
        player.handle_key(PlayerKey::Up);
        player.handle_key(PlayerKey::Enter);
        assert_eq!(player.current_index(), Some(1));
        assert_eq!(player.mode(), PlaybackMode::Normal);

        assert_eq!(PlayerKey::from_key_name("j"), Some(PlayerKey::Down));
        assert_eq!(PlayerKey::from_key_name("ArrowUp"), Some(PlayerKey::Up));
        assert_eq!(PlayerKey::from_key_name("x"), None);
    }

    #[test]
    fn test_labels() {
        let (player, _) = new_player(0, PlaybackMode::Normal);
        assert_eq!(player.labels().0, "No music found");

        let (mut player, _) = new_player(2, PlaybackMode::Normal);
        assert_eq!(player.labels().0, "Welcome to Your Pet Music Player");
        player.play_song(1);
        assert_eq!(player.labels(), ("Song 1".to_string(), "Karu".to_string()));
    }

    #[test]
    fn test_settings_round_trip() {
        let (mut player, state) = new_player(3, PlaybackMode::Normal);
        let mut settings = AppSettings::default();
        settings.volume = 30;
        settings.is_muted = true;
        settings.playback_mode = "loop_all".to_string();
        settings.last_track_index = 2;

        player.apply_settings(&settings);
        assert_eq!(player.current_index(), Some(2));
        assert!(!state.borrow().playing);
        assert_eq!(player.mode(), PlaybackMode::LoopAll);

        let mut out = AppSettings::default();
        player.write_settings(&mut out);
        assert_eq!(out.last_track_index, 2);
        assert_eq!(out.volume, 30);
        assert!(out.is_muted);
        assert_eq!(out.playback_mode, "loop_all");
    }

    #[test]
    fn test_stale_track_index_is_ignored() {
        let (mut player, _) = new_player(1, PlaybackMode::Normal);
        let mut settings = AppSettings::default();
        settings.last_track_index = 5;
        player.apply_settings(&settings);
        assert_eq!(player.current_index(), None);
    }
}
