use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::errors::LyricsError;
use crate::file_utils::FileManager;
use crate::lyrics::{LyricLine, LyricScreen};
use crate::timestamps::{format_timestamp, parse_timestamp};

// @module: Persisted timing data (JSON)

/// Timing file written after capture and read back for synthesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingFile {
    // @field: Track to play under the subtitles (instrumental when split)
    pub song_file: String,

    // @field: Screens in display order
    pub screens: Vec<ScreenRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenRecord {
    pub lines: Vec<LineRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    // @field: Line text
    pub line: String,

    // @field: Start offset, e.g. "0:00:12.345678"
    pub ts: String,

    // @field: End offset, null while pending
    #[serde(default)]
    pub end_ts: Option<String>,
}

impl TimingFile {
    /// Capture result to its persisted form
    pub fn from_screens<P: AsRef<Path>>(song_file: P, screens: &[LyricScreen]) -> Self {
        let screens = screens
            .iter()
            .map(|screen| ScreenRecord {
                lines: screen
                    .lines
                    .iter()
                    .map(|line| LineRecord {
                        line: line.text.clone(),
                        ts: format_timestamp(line.start_ts),
                        end_ts: line.end_ts.map(format_timestamp),
                    })
                    .collect(),
            })
            .collect();

        TimingFile {
            song_file: song_file.as_ref().to_string_lossy().to_string(),
            screens,
        }
    }

    /// Rebuild the screens, validating every timestamp
    pub fn to_screens(&self) -> Result<Vec<LyricScreen>, LyricsError> {
        let mut screens = Vec::with_capacity(self.screens.len());

        for (idx, record) in self.screens.iter().enumerate() {
            if record.lines.is_empty() {
                warn!("Skipping empty screen {} in timing file", idx + 1);
                continue;
            }

            let mut lines = Vec::with_capacity(record.lines.len());
            for line_record in &record.lines {
                let mut line = LyricLine::new(line_record.line.clone(), parse_timestamp(&line_record.ts)?, None);
                if let Some(end) = &line_record.end_ts {
                    line.set_end(parse_timestamp(end)?)?;
                }
                lines.push(line);
            }

            let screen = LyricScreen::from_lines(lines)?;
            if !screen.is_ordered() {
                warn!("Screen {} has lines out of order", idx + 1);
            }
            screens.push(screen);
        }

        Ok(screens)
    }

    pub fn song_path(&self) -> PathBuf {
        PathBuf::from(&self.song_file)
    }

    /// Read a timing file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open timing file: {}", path.display()))?;
        let timing: TimingFile = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse timing file: {}", path.display()))?;
        info!("Loaded {} screens from {:?}", timing.screens.len(), path);
        Ok(timing)
    }

    /// Write the timing file as indented JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        FileManager::ensure_parent_dir(path)?;
        let file = File::create(path)
            .with_context(|| format!("Failed to create timing file: {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("Failed to write timing file: {}", path.display()))?;
        info!("Wrote timing data to {:?}", path);
        Ok(())
    }
}
