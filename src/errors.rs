/*!
 * Error types for the karaoke-maker application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised by the lyrics model and the subtitle synthesizer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LyricsError {
    /// A required timestamp was requested before being set
    #[error("Incomplete timing data: {0}")]
    IncompleteData(String),

    /// A computed delay or duration is negative
    #[error("Invalid timing for line '{line}': {message}")]
    InvalidTiming {
        /// Text of the offending line
        line: String,
        /// What went wrong
        message: String,
    },

    /// A persisted timestamp could not be parsed
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),
}

impl LyricsError {
    pub fn invalid_timing(line: &str, message: impl Into<String>) -> Self {
        Self::InvalidTiming {
            line: line.to_string(),
            message: message.into(),
        }
    }
}

/// Errors from the audio player process
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The player process could not be started
    #[error("Failed to start player '{command}': {message}")]
    SpawnFailed {
        /// Player executable
        command: String,
        /// Underlying failure
        message: String,
    },

    /// The player process could not be stopped
    #[error("Failed to stop player: {0}")]
    StopFailed(String),
}

/// Errors from vocal/instrumental separation
#[derive(Error, Debug)]
pub enum SplitError {
    /// The song file is missing
    #[error("Song file does not exist: {0}")]
    MissingInput(String),

    /// The splitter process could not be run
    #[error("Failed to run splitter: {0}")]
    ProcessFailed(String),

    /// The splitter exceeded its time budget
    #[error("Splitter timed out after {0} seconds")]
    Timeout(u64),

    /// The splitter finished but an expected stem is missing
    #[error("Splitter output not found: {0}")]
    MissingOutput(String),
}

/// Errors that abort an interactive capture session
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The lyric text contains no non-blank line
    #[error("Lyrics contain no lines to time")]
    NoLyrics,

    /// Enter was pressed before any line was started
    #[error("End marker received before any line was started")]
    EndBeforeStart,

    /// The user interrupted the session
    #[error("Capture interrupted by user")]
    Interrupted,

    /// Reading keys or writing prompts failed
    #[error("Terminal I/O error: {0}")]
    Input(String),

    /// Error from the audio player
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// Error while assembling the captured lines
    #[error("Lyrics error: {0}")]
    Lyrics(#[from] LyricsError),
}

impl From<std::io::Error> for CaptureError {
    fn from(error: std::io::Error) -> Self {
        Self::Input(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the lyrics model or synthesizer
    #[error("Lyrics error: {0}")]
    Lyrics(#[from] LyricsError),

    /// Error from a capture session
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// Error from the audio player
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// Error from the track splitter
    #[error("Split error: {0}")]
    Split(#[from] SplitError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::File(error.to_string())
    }
}
