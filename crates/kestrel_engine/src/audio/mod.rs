//! Audio collaborator
//!
//! Thin wrapper over the rodio mixer for background music. Audio is a
//! best-effort subsystem: every failure here is non-fatal to the engine, so
//! callers log errors and keep running (a machine with no audio device still
//! plays the game, silently).

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// Audio errors, all non-fatal by design
#[derive(Error, Debug)]
pub enum AudioError {
    /// No audio output device could be opened
    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The sound file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The sound file could not be decoded or queued
    #[error("playback failed: {0}")]
    PlaybackFailed(String),
}

/// Background music player
pub struct Audio {
    // The stream must be kept alive for the sink to keep playing
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    music: Option<Sink>,
}

impl Audio {
    /// Open the default audio output device
    pub fn new() -> Result<Self, AudioError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| AudioError::DeviceUnavailable(e.to_string()))?;
        log::info!("audio output initialized");
        Ok(Self {
            _stream: stream,
            stream_handle,
            music: None,
        })
    }

    /// Play a sound file as looping background music
    ///
    /// Any currently playing music is stopped first.
    pub fn play_looping_music<P: AsRef<Path>>(&mut self, path: P) -> Result<(), AudioError> {
        let path = path.as_ref();
        self.stop_music();

        let file = File::open(path)?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| AudioError::PlaybackFailed(format!("{}: {e}", path.display())))?;

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| AudioError::PlaybackFailed(e.to_string()))?;
        sink.append(source.repeat_infinite());

        log::info!("looping music started: {}", path.display());
        self.music = Some(sink);
        Ok(())
    }

    /// Stop the current background music, if any
    pub fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
            log::debug!("music stopped");
        }
    }

    /// Whether background music is currently playing
    #[must_use]
    pub fn is_music_playing(&self) -> bool {
        self.music.as_ref().is_some_and(|sink| !sink.empty())
    }

    /// Release the output device
    ///
    /// Idempotent; also happens on drop.
    pub fn shutdown(&mut self) {
        self.stop_music();
    }
}
