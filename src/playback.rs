use std::path::Path;
use std::process::{Child, Command, Stdio};

use chrono::TimeDelta;
use log::{debug, warn};

use crate::errors::PlaybackError;

// @module: Song playback through an external player process

/// Something that can play a song in the background
pub trait AudioPlayer {
    /// Start playing `path` from `start_offset`, replacing any current playback
    fn play(&mut self, path: &Path, start_offset: TimeDelta) -> Result<(), PlaybackError>;

    /// Stop playback. Must succeed when nothing is playing.
    fn stop(&mut self) -> Result<(), PlaybackError>;
}

/// `ffplay`-compatible player owning at most one child process
pub struct FfplayPlayer {
    // @field: Player executable
    command: String,

    // @field: Running player, if any
    process: Option<Child>,
}

impl FfplayPlayer {
    pub fn new(command: impl Into<String>) -> Self {
        FfplayPlayer {
            command: command.into(),
            process: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.process.is_some()
    }

    /// Seconds with millisecond precision, as `-ss` expects
    fn format_offset(offset: TimeDelta) -> String {
        let millis = offset.num_milliseconds().max(0);
        format!("{}.{:03}", millis / 1_000, millis % 1_000)
    }
}

impl AudioPlayer for FfplayPlayer {
    fn play(&mut self, path: &Path, start_offset: TimeDelta) -> Result<(), PlaybackError> {
        self.stop()?;

        let offset = Self::format_offset(start_offset);
        debug!("Starting {} at {}s: {:?}", self.command, offset, path);

        let child = Command::new(&self.command)
            .args(["-nodisp", "-autoexit", "-ss", &offset])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PlaybackError::SpawnFailed {
                command: self.command.clone(),
                message: e.to_string(),
            })?;

        self.process = Some(child);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        let Some(mut child) = self.process.take() else {
            return Ok(());
        };

        match child.kill() {
            Ok(()) => {}
            // already exited on its own
            Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => {}
            Err(e) => return Err(PlaybackError::StopFailed(e.to_string())),
        }
        let _ = child.wait();
        debug!("Player stopped");
        Ok(())
    }
}

impl Drop for FfplayPlayer {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("{}", e);
        }
    }
}

/// Scoped playback: stops the player when dropped, on every exit path
pub struct PlaybackGuard<'a, P: AudioPlayer + ?Sized> {
    player: &'a mut P,
    stopped: bool,
}

impl<'a, P: AudioPlayer + ?Sized> PlaybackGuard<'a, P> {
    pub fn start(player: &'a mut P, path: &Path, start_offset: TimeDelta) -> Result<Self, PlaybackError> {
        let mut guard = PlaybackGuard {
            player,
            stopped: false,
        };
        // a failed start still runs the stop in Drop
        guard.player.play(path, start_offset)?;
        Ok(guard)
    }

    /// Stop explicitly and surface the stop error
    pub fn finish(mut self) -> Result<(), PlaybackError> {
        self.stopped = true;
        self.player.stop()
    }
}

impl<P: AudioPlayer + ?Sized> Drop for PlaybackGuard<'_, P> {
    fn drop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            if let Err(e) = self.player.stop() {
                warn!("{}", e);
            }
        }
    }
}
