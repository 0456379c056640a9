// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use karaoke_maker::app_config::{self, Config};
use karaoke_maker::file_utils::FileManager;
use karaoke_maker::timestamps::from_seconds;
use karaoke_maker::{CaptureRequest, Controller, SubtitleRequest};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play the song and record line timings from keystrokes
    Capture(CaptureArgs),

    /// Generate karaoke subtitles from a timing file
    #[command(alias = "subs")]
    Subtitles(SubtitleArgs),

    /// Generate shell completions for karaoke-maker
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct CaptureArgs {
    /// File containing the lyrics text (blank line between screens)
    #[arg(long, value_name = "LYRICS_FILE")]
    lyrics: PathBuf,

    /// Song to play while capturing
    #[arg(long, value_name = "SONG_FILE")]
    song: PathBuf,

    /// Timing JSON to write
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: PathBuf,

    /// Pre-split instrumental track (skips vocal separation)
    #[arg(long, value_name = "INSTRUMENTAL_FILE")]
    instrumental: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SubtitleArgs {
    /// Timing JSON produced by the capture command
    #[arg(long, value_name = "TIMING_FILE")]
    timing: PathBuf,

    /// Subtitle file to write (defaults to the timing file with .ass)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<PathBuf>,

    /// Shift every timestamp by this many seconds
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    offset: f64,

    /// End lines that were never closed at the next line's start
    #[arg(long)]
    close_open_lines: bool,
}

/// Karaoke Maker - time lyrics to a song and build karaoke subtitles
#[derive(Parser, Debug)]
#[command(name = "karaoke-maker")]
#[command(version)]
#[command(about = "Interactive karaoke timing capture and subtitle generation")]
#[command(long_about = "Karaoke Maker plays a song while showing its lyrics line by line. Press space
when the displayed line starts and Enter when the previous line ends; the timings
are saved as JSON and can be turned into karaoke subtitles.

EXAMPLES:
    karaoke-maker capture --lyrics song.txt --song song.mp3 -o song.json
    karaoke-maker capture --lyrics song.txt --song song.mp3 -o song.json --instrumental inst.wav
    karaoke-maker subtitles --timing song.json -o song.ass
    karaoke-maker subtitles --timing song.json --offset -0.25
    karaoke-maker completions bash > karaoke-maker.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI colour for log level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, colour) = Self::decoration(record.level());

            // raw terminal mode during capture needs the carriage return
            let mut stderr = std::io::stderr();
            let _ = write!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m\r\n",
                colour,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Load the config file, creating a default one when it is missing
fn load_config(config_path: &str, cli_log_level: Option<&CliLogLevel>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        FileManager::write_to_file(config_path, &config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    // Command line wins over the config file
    if let Some(level) = cli_log_level {
        config.log_level = level.clone().into();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let command = match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "karaoke-maker", &mut std::io::stdout());
            return Ok(());
        }
        other => other,
    };

    let config = load_config(&cli.config_path, cli.log_level.as_ref())?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;

    match command {
        Commands::Capture(args) => {
            controller
                .run_capture(CaptureRequest {
                    lyrics_file: args.lyrics,
                    song_file: args.song,
                    output_file: args.output,
                    instrumental_file: args.instrumental,
                })
                .await
        }
        Commands::Subtitles(args) => {
            let output_file = args
                .output
                .unwrap_or_else(|| FileManager::sibling_with_extension(&args.timing, "ass"));
            controller.run_subtitles(&SubtitleRequest {
                timing_file: args.timing,
                output_file,
                offset: from_seconds(args.offset),
                close_open_lines: args.close_open_lines,
            })
        }
        Commands::Completions { .. } => Ok(()),
    }
}
