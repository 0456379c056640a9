/*!
 * Common test utilities for the karaoke-maker test suite
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::TimeDelta;
use tempfile::TempDir;

use karaoke_maker::capture::scripted::{ScriptedClock, ScriptedKeyReader};
use karaoke_maker::lyrics::{LyricLine, LyricScreen};
use karaoke_maker::TimingCapture;

/// Two screens, three lines, with stray blank lines
pub const SAMPLE_LYRICS: &str = "Twinkle twinkle little star\nHow I wonder what you are\n\n\nUp above the world so high\n";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Capture session fed by a key script, one second per key read
pub fn scripted_session(script: &str) -> TimingCapture<ScriptedKeyReader, ScriptedClock, Vec<u8>> {
    TimingCapture::new(
        ScriptedKeyReader::from_chars(script),
        ScriptedClock::stepping(TimeDelta::seconds(1)),
        Vec::new(),
    )
}

/// Shorthand for a line with times in milliseconds
pub fn line_ms(text: &str, start_ms: i64, end_ms: Option<i64>) -> LyricLine {
    LyricLine::new(text, TimeDelta::milliseconds(start_ms), end_ms.map(TimeDelta::milliseconds))
}

/// Screen starting with its first line
pub fn screen(lines: Vec<LyricLine>) -> LyricScreen {
    LyricScreen::from_lines(lines).expect("screen needs at least one line")
}
