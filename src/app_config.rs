use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Subtitle style settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Video canvas and line layout
    #[serde(default)]
    pub video: VideoConfig,

    /// Audio player settings
    #[serde(default)]
    pub player: PlayerConfig,

    /// Track splitter settings
    #[serde(default)]
    pub splitter: SplitterConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Karaoke subtitle style parameters
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DisplayConfig {
    // @field: Font family
    #[serde(rename = "FontName", default = "default_font_name")]
    pub font_name: String,

    // @field: Font size in script pixels
    #[serde(rename = "FontSize", default = "default_font_size")]
    pub font_size: u32,

    // @field: Unsung text colour (ASS &HAABBGGRR)
    #[serde(rename = "PrimaryColor", default = "default_primary_color")]
    pub primary_color: String,

    // @field: Highlight colour (ASS &HAABBGGRR)
    #[serde(rename = "SecondaryColor", default = "default_secondary_color")]
    pub secondary_color: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            font_name: default_font_name(),
            font_size: default_font_size(),
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
        }
    }
}

/// Video canvas used for vertical line placement
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VideoConfig {
    /// Canvas width in pixels
    #[serde(default = "default_video_width")]
    pub width: u32,

    /// Canvas height in pixels
    #[serde(default = "default_video_height")]
    pub height: u32,

    /// Vertical distance between consecutive lines of a screen
    #[serde(default = "default_line_height")]
    pub line_height: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: default_video_width(),
            height: default_video_height(),
            line_height: default_line_height(),
        }
    }
}

/// External audio player
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Player executable (ffplay compatible arguments)
    #[serde(default = "default_player_command")]
    pub command: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            command: default_player_command(),
        }
    }
}

/// External vocal/instrumental splitter
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SplitterConfig {
    /// Splitter executable (spleeter compatible arguments)
    #[serde(default = "default_splitter_command")]
    pub command: String,

    /// Separation model name
    #[serde(default = "default_splitter_model")]
    pub model: String,

    /// Timeout in seconds for one separation run
    #[serde(default = "default_splitter_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            command: default_splitter_command(),
            model: default_splitter_model(),
            timeout_secs: default_splitter_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_font_name() -> String {
    "Arial".to_string()
}

fn default_font_size() -> u32 {
    20
}

fn default_primary_color() -> String {
    "&H00FFFFFF".to_string()
}

fn default_secondary_color() -> String {
    "&H000000FF".to_string()
}

fn default_video_width() -> u32 {
    400
}

fn default_video_height() -> u32 {
    320
}

fn default_line_height() -> u32 {
    30
}

fn default_player_command() -> String {
    "ffplay".to_string()
}

fn default_splitter_command() -> String {
    "spleeter".to_string()
}

fn default_splitter_model() -> String {
    "spleeter:2stems".to_string()
}

fn default_splitter_timeout_secs() -> u64 {
    600 // separation of a full song can take minutes on CPU
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.display.font_name.trim().is_empty() {
            return Err(anyhow!("FontName must not be empty"));
        }
        if self.display.font_size == 0 {
            return Err(anyhow!("FontSize must be greater than zero"));
        }
        for (key, colour) in [
            ("PrimaryColor", &self.display.primary_color),
            ("SecondaryColor", &self.display.secondary_color),
        ] {
            if colour.trim().is_empty() {
                return Err(anyhow!("{} must not be empty", key));
            }
        }

        if self.video.width == 0 || self.video.height == 0 {
            return Err(anyhow!(
                "Video size must be positive, got {}x{}",
                self.video.width,
                self.video.height
            ));
        }
        if self.video.line_height == 0 {
            return Err(anyhow!("Line height must be greater than zero"));
        }

        if self.player.command.trim().is_empty() {
            return Err(anyhow!("Player command must not be empty"));
        }
        if self.splitter.command.trim().is_empty() {
            return Err(anyhow!("Splitter command must not be empty"));
        }
        if self.splitter.timeout_secs == 0 {
            return Err(anyhow!("Splitter timeout must be greater than zero"));
        }

        Ok(())
    }
}
