use std::fmt;

use chrono::TimeDelta;

use crate::app_config::VideoConfig;
use crate::errors::LyricsError;
use crate::timestamps::format_timestamp;

// @module: Timed lyric lines and screens

/// A single lyric line with its sung interval
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    // @field: Line text
    pub text: String,

    // @field: Offset from playback start when the line begins
    pub start_ts: TimeDelta,

    // @field: Offset when the line ends, pending until resolved
    pub end_ts: Option<TimeDelta>,
}

impl LyricLine {
    pub fn new(text: impl Into<String>, start_ts: TimeDelta, end_ts: Option<TimeDelta>) -> Self {
        LyricLine {
            text: text.into(),
            start_ts,
            end_ts,
        }
    }

    /// Resolve the end of this line, rejecting ends before the start
    pub fn set_end(&mut self, end_ts: TimeDelta) -> Result<(), LyricsError> {
        if end_ts < self.start_ts {
            return Err(LyricsError::invalid_timing(
                &self.text,
                format!(
                    "end {} is before start {}",
                    format_timestamp(end_ts),
                    format_timestamp(self.start_ts)
                ),
            ));
        }
        self.end_ts = Some(end_ts);
        Ok(())
    }

    /// End timestamp or an `IncompleteData` error naming the line
    pub fn end(&self) -> Result<TimeDelta, LyricsError> {
        self.end_ts.ok_or_else(|| {
            LyricsError::IncompleteData(format!("line '{}' has no end timestamp", self.text))
        })
    }

    /// Copy with every set timestamp shifted by `delta`
    pub fn adjust_timestamps(&self, delta: TimeDelta) -> LyricLine {
        LyricLine {
            text: self.text.clone(),
            start_ts: self.start_ts + delta,
            end_ts: self.end_ts.map(|end| end + delta),
        }
    }
}

impl fmt::Display for LyricLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let end = self
            .end_ts
            .map(format_timestamp)
            .unwrap_or_else(|| "?".to_string());
        write!(f, "[{} - {}] {}", format_timestamp(self.start_ts), end, self.text)
    }
}

/// Lines displayed together on one subtitle page
#[derive(Debug, Clone, PartialEq)]
pub struct LyricScreen {
    // @field: Lines in display order
    pub lines: Vec<LyricLine>,

    // @field: When the screen appears
    pub start_ts: TimeDelta,
}

impl LyricScreen {
    /// Build a screen that appears when its first line starts
    pub fn from_lines(lines: Vec<LyricLine>) -> Result<Self, LyricsError> {
        let start_ts = lines
            .first()
            .map(|line| line.start_ts)
            .ok_or_else(|| LyricsError::IncompleteData("screen has no lines".to_string()))?;
        Ok(LyricScreen { lines, start_ts })
    }

    /// End of the screen: the end of its last line
    pub fn screen_end(&self) -> Result<TimeDelta, LyricsError> {
        self.lines
            .last()
            .ok_or_else(|| LyricsError::IncompleteData("screen has no lines".to_string()))?
            .end()
    }

    /// Top offset of line `line_index`, centering the block vertically
    pub fn line_y_position(&self, line_index: usize, video: &VideoConfig) -> f64 {
        let height = f64::from(video.height);
        let line_height = f64::from(video.line_height);
        let line_count = self.lines.len() as f64;
        height / 2.0 - (line_count * line_height) / 2.0 + line_index as f64 * line_height
    }

    /// Vertical center of line `line_index`
    pub fn line_center_y(&self, line_index: usize, video: &VideoConfig) -> f64 {
        self.line_y_position(line_index, video) + f64::from(video.line_height) / 2.0
    }

    /// Copy with the screen and all lines shifted by `delta`
    pub fn adjust_timestamps(&self, delta: TimeDelta) -> LyricScreen {
        LyricScreen {
            lines: self.lines.iter().map(|l| l.adjust_timestamps(delta)).collect(),
            start_ts: self.start_ts + delta,
        }
    }

    /// Check that line starts never go backwards
    pub fn is_ordered(&self) -> bool {
        self.lines.windows(2).all(|pair| pair[0].start_ts <= pair[1].start_ts)
    }
}

impl fmt::Display for LyricScreen {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let end = self
            .screen_end()
            .map(format_timestamp)
            .unwrap_or_else(|_| "?".to_string());
        writeln!(f, "{} - {}:", format_timestamp(self.start_ts), end)?;
        for line in &self.lines {
            writeln!(f, "\t{}", line)?;
        }
        Ok(())
    }
}

/// Shift a whole capture session
pub fn adjust_screens(screens: &[LyricScreen], delta: TimeDelta) -> Vec<LyricScreen> {
    screens.iter().map(|s| s.adjust_timestamps(delta)).collect()
}

/// Copy where each pending end is closed at the next line's start.
///
/// The last line of the session has no successor and stays pending.
pub fn close_open_lines(screens: &[LyricScreen]) -> Vec<LyricScreen> {
    let next_starts: Vec<Option<TimeDelta>> = {
        let starts: Vec<TimeDelta> = screens
            .iter()
            .flat_map(|s| s.lines.iter().map(|l| l.start_ts))
            .collect();
        (0..starts.len()).map(|i| starts.get(i + 1).copied()).collect()
    };

    let mut position = 0;
    screens
        .iter()
        .map(|screen| {
            let lines = screen
                .lines
                .iter()
                .map(|line| {
                    let mut closed = line.clone();
                    if closed.end_ts.is_none() {
                        closed.end_ts = next_starts[position];
                    }
                    position += 1;
                    closed
                })
                .collect();
            LyricScreen {
                lines,
                start_ts: screen.start_ts,
            }
        })
        .collect()
}
