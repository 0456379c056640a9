use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info};
use tokio::process::Command;

use crate::app_config::SplitterConfig;
use crate::errors::SplitError;

// @module: Vocal/instrumental separation through an external tool

/// Stems produced from one song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitTracks {
    pub instrumental: PathBuf,
    pub vocals: PathBuf,
}

/// Separates a song into instrumental and vocal tracks
#[async_trait]
pub trait TrackSplitter: Send + Sync {
    async fn split(&self, song: &Path) -> Result<SplitTracks, SplitError>;
}

/// Runs the `spleeter` command line tool.
///
/// Stems land next to the song in a directory named after it:
/// `music/song.mp3` gives `music/song/accompaniment.wav` and
/// `music/song/vocals.wav`.
pub struct SpleeterSplitter {
    command: String,
    model: String,
    timeout: Duration,
}

impl SpleeterSplitter {
    pub fn new(command: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        SpleeterSplitter {
            command: command.into(),
            model: model.into(),
            timeout,
        }
    }

    pub fn from_config(config: &SplitterConfig) -> Self {
        Self::new(
            config.command.clone(),
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Where the stems for `song` are expected
    pub fn expected_outputs(song: &Path) -> SplitTracks {
        let stem_dir = song.with_extension("");
        SplitTracks {
            instrumental: stem_dir.join("accompaniment.wav"),
            vocals: stem_dir.join("vocals.wav"),
        }
    }

    /// Keep the last few lines of tool output for the error message
    fn tail_output(output: &str) -> String {
        let lines: Vec<&str> = output.lines().filter(|l| !l.trim().is_empty()).collect();
        let start = lines.len().saturating_sub(5);
        lines[start..].join("\n")
    }
}

#[async_trait]
impl TrackSplitter for SpleeterSplitter {
    async fn split(&self, song: &Path) -> Result<SplitTracks, SplitError> {
        if !song.is_file() {
            return Err(SplitError::MissingInput(song.display().to_string()));
        }

        let song = song
            .canonicalize()
            .map_err(|e| SplitError::MissingInput(format!("{}: {}", song.display(), e)))?;
        let output_dir = song.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));

        info!("Splitting {:?} with {}", song, self.model);
        let split_future = Command::new(&self.command)
            .arg("separate")
            .args(["-p", &self.model])
            .arg("-o")
            .arg(&output_dir)
            .arg(&song)
            .kill_on_drop(true)
            .output();

        let result = tokio::select! {
            result = split_future => {
                result.map_err(|e| SplitError::ProcessFailed(format!("{}: {}", self.command, e)))?
            },
            _ = tokio::time::sleep(self.timeout) => {
                return Err(SplitError::Timeout(self.timeout.as_secs()));
            }
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let tail = Self::tail_output(&stderr);
            error!("Track splitting failed: {}", tail);
            return Err(SplitError::ProcessFailed(tail));
        }

        let tracks = Self::expected_outputs(&song);
        for stem in [&tracks.instrumental, &tracks.vocals] {
            if !stem.is_file() {
                return Err(SplitError::MissingOutput(stem.display().to_string()));
            }
        }

        debug!("Stems: {:?}", tracks);
        Ok(tracks)
    }
}
