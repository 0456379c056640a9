/*!
 * Scripted stand-ins for the terminal, the clock and the player.
 *
 * These replay a fixed keystroke sequence so capture sessions can run
 * without a terminal or an audio device.
 */

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use chrono::TimeDelta;

use crate::capture::clock::Clock;
use crate::capture::keys::{Key, KeyReader};
use crate::errors::{CaptureError, PlaybackError};
use crate::playback::AudioPlayer;

/// Replays a fixed list of keys, failing once the script runs out
#[derive(Debug, Default)]
pub struct ScriptedKeyReader {
    keys: VecDeque<Key>,
}

impl ScriptedKeyReader {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        ScriptedKeyReader {
            keys: keys.into_iter().collect(),
        }
    }

    /// Build from characters: ' ' is space, '\n' is Enter, '!' is Ctrl-C
    pub fn from_chars(script: &str) -> Self {
        Self::new(script.chars().map(|c| match c {
            ' ' => Key::Space,
            '\n' | '\r' => Key::Enter,
            '!' => Key::Interrupt,
            other => Key::Char(other),
        }))
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeyReader for ScriptedKeyReader {
    fn next_key(&mut self) -> Result<Key, CaptureError> {
        self.keys
            .pop_front()
            .ok_or_else(|| CaptureError::Input("key script exhausted".to_string()))
    }
}

/// Clock that advances by a fixed step on every reading
#[derive(Debug)]
pub struct ScriptedClock {
    step: TimeDelta,
    now: TimeDelta,
    started: bool,
}

impl ScriptedClock {
    pub fn stepping(step: TimeDelta) -> Self {
        ScriptedClock {
            step,
            now: TimeDelta::zero(),
            started: false,
        }
    }
}

impl Clock for ScriptedClock {
    fn mark_start(&mut self) {
        self.started = true;
        self.now = TimeDelta::zero();
    }

    fn elapsed(&mut self) -> TimeDelta {
        if self.started {
            self.now += self.step;
        }
        self.now
    }
}

/// Records play/stop calls instead of running a process
#[derive(Debug, Default)]
pub struct RecordingPlayer {
    pub played: Vec<(PathBuf, TimeDelta)>,
    pub stop_calls: usize,
    pub playing: bool,
}

impl AudioPlayer for RecordingPlayer {
    fn play(&mut self, path: &Path, start_offset: TimeDelta) -> Result<(), PlaybackError> {
        self.stop()?;
        self.played.push((path.to_path_buf(), start_offset));
        self.playing = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        self.stop_calls += 1;
        self.playing = false;
        Ok(())
    }
}
