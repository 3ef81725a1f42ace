//! Audio output
//!
//! Thin layer over rodio. The player talks to a [`PlaybackBackend`] so it can
//! run without a sound card, and so tests can drive it.

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("No audio output available: {0}")]
    Device(#[from] rodio::StreamError),
    #[error("Could not create audio sink: {0}")]
    Play(#[from] rodio::PlayError),
    #[error("Could not decode audio: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
    #[error("Seek failed: {0}")]
    Seek(#[from] rodio::source::SeekError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that can play one track at a time
pub trait PlaybackBackend {
    /// Load a track, paused at the start. `looping` repeats it forever.
    fn load(&mut self, path: &Path, looping: bool) -> Result<(), AudioError>;
    fn play(&mut self);
    fn pause(&mut self);
    /// Drop the loaded track
    fn stop(&mut self);
    fn is_loaded(&self) -> bool;
    fn is_playing(&self) -> bool;
    /// Linear gain, 0.0 - 1.0
    fn set_volume(&mut self, volume: f32);
    fn position(&self) -> Duration;
    fn duration(&self) -> Option<Duration>;
    fn seek(&mut self, position: Duration) -> Result<(), AudioError>;
    /// The loaded track played through to its end
    fn finished(&self) -> bool;
}

/// Shared handle to the default output device
#[derive(Clone)]
pub struct AudioOutput {
    _stream: Rc<OutputStream>,
    handle: OutputStreamHandle,
}

impl AudioOutput {
    pub fn open() -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: Rc::new(stream),
            handle,
        })
    }
}

/// Open a backend on the default device, or a silent one if there is none
pub fn default_backend(output: Option<&AudioOutput>) -> Box<dyn PlaybackBackend> {
    match output {
        Some(output) => Box::new(RodioBackend::new(output.clone())),
        None => Box::new(SilentBackend::default()),
    }
}

pub struct RodioBackend {
    output: AudioOutput,
    sink: Option<Sink>,
    duration: Option<Duration>,
    volume: f32,
}

impl RodioBackend {
    pub fn new(output: AudioOutput) -> Self {
        Self {
            output,
            sink: None,
            duration: None,
            volume: 1.0,
        }
    }
}

impl PlaybackBackend for RodioBackend {
    fn load(&mut self, path: &Path, looping: bool) -> Result<(), AudioError> {
        self.stop();

        let file = BufReader::new(File::open(path)?);
        let source = Decoder::new(file)?;
        let sink = Sink::try_new(&self.output.handle)?;
        sink.pause();
        sink.set_volume(self.volume);

        if looping {
            self.duration = None;
            sink.append(source.repeat_infinite());
        } else {
            self.duration = source.total_duration();
            sink.append(source);
        }

        self.sink = Some(sink);
        tracing::debug!("Loaded {}", path.display());
        Ok(())
    }

    fn play(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.duration = None;
    }

    fn is_loaded(&self) -> bool {
        self.sink.is_some()
    }

    fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .map(|sink| !sink.is_paused() && !sink.empty())
            .unwrap_or(false)
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }

    fn position(&self) -> Duration {
        self.sink
            .as_ref()
            .map(|sink| sink.get_pos())
            .unwrap_or_default()
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn seek(&mut self, position: Duration) -> Result<(), AudioError> {
        if let Some(sink) = &self.sink {
            sink.try_seek(position)?;
        }
        Ok(())
    }

    fn finished(&self) -> bool {
        self.sink
            .as_ref()
            .map(|sink| !sink.is_paused() && sink.empty())
            .unwrap_or(false)
    }
}

/// Keeps track of state without making a sound
#[derive(Debug, Default)]
pub struct SilentBackend {
    loaded: Option<PathBuf>,
    playing: bool,
}

impl PlaybackBackend for SilentBackend {
    fn load(&mut self, path: &Path, _looping: bool) -> Result<(), AudioError> {
        self.loaded = Some(path.to_path_buf());
        self.playing = false;
        Ok(())
    }

    fn play(&mut self) {
        self.playing = self.loaded.is_some();
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn stop(&mut self) {
        self.loaded = None;
        self.playing = false;
    }

    fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn set_volume(&mut self, _volume: f32) {}

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
        false
    }
}

/// Looping alarm played when a pomodoro completes
pub struct AlertPlayer {
    backend: Box<dyn PlaybackBackend>,
    path: PathBuf,
}

impl AlertPlayer {
    pub fn new(backend: Box<dyn PlaybackBackend>, path: PathBuf) -> Self {
        Self { backend, path }
    }

    pub fn start(&mut self) {
        if !self.path.exists() {
            tracing::warn!("Alert sound missing: {}", self.path.display());
            return;
        }
        match self.backend.load(&self.path, true) {
            Ok(()) => self.backend.play(),
            Err(e) => tracing::warn!("Failed to play alert sound: {}", e),
        }
    }

    pub fn stop(&mut self) {
        self.backend.stop();
    }

    pub fn is_active(&self) -> bool {
        self.backend.is_playing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_silent_backend_tracks_state() {
        let mut backend = SilentBackend::default();
        backend.play();
        assert!(!backend.is_playing());

        backend.load(Path::new("song.mp3"), false).unwrap();
        assert!(!backend.is_playing());
        backend.play();
        assert!(backend.is_playing());
        backend.stop();
        assert!(!backend.is_playing());
    }

    #[test]
    fn test_alert_with_missing_file_stays_quiet() {
        let dir = tempdir().unwrap();
        let mut alert = AlertPlayer::new(
            Box::new(SilentBackend::default()),
            dir.path().join("pomodoro-alert.mp3"),
        );
        alert.start();
        assert!(!alert.is_active());
    }

    #[test]
    fn test_alert_start_and_stop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pomodoro-alert.mp3");
        std::fs::write(&path, b"").unwrap();

        let mut alert = AlertPlayer::new(Box::new(SilentBackend::default()), path);
        alert.start();
        assert!(alert.is_active());
        alert.stop();
        assert!(!alert.is_active());
    }
}
