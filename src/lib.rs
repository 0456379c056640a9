/*!
 * # Karaoke Maker
 *
 * A Rust library for building karaoke subtitles from a song and its lyrics.
 *
 * ## Features
 *
 * - Interactive timing capture: the song plays while the lyrics are shown
 *   line by line and keystrokes mark when each line starts and ends
 * - Optional vocal/instrumental separation of the song
 * - JSON timing files that can be re-used for later subtitle runs
 * - Karaoke `.ass` subtitles with per-line highlight sweeps
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `capture`: Keystroke-driven timing capture
 * - `lyrics`: Lyric sheets, timing events and timed screens
 * - `subtitles`: Subtitle synthesis and ASS output
 * - `timing_file`: Persisted timing data
 * - `playback`: External audio player
 * - `splitter`: External vocal/instrumental splitter
 * - `timestamps`: Duration parsing and formatting
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod capture;
pub mod errors;
pub mod file_utils;
pub mod lyrics;
pub mod playback;
pub mod splitter;
pub mod subtitles;
pub mod timestamps;
pub mod timing_file;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{CaptureRequest, Controller, SubtitleRequest};
pub use capture::{CaptureOutcome, TimingCapture};
pub use errors::{AppError, CaptureError, LyricsError, PlaybackError, SplitError};
pub use lyrics::{LyricLine, LyricMarker, LyricScreen, LyricSheet, TimingEvent};
pub use subtitles::{SubtitleDocument, SubtitleSynthesizer};
pub use timing_file::TimingFile;
