use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::TimeDelta;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use crate::app_config::Config;
use crate::capture::{CaptureOutcome, Clock, KeyReader, SystemClock, TerminalKeyReader, TimingCapture};
use crate::file_utils::FileManager;
use crate::lyrics::{adjust_screens, close_open_lines};
use crate::playback::{AudioPlayer, FfplayPlayer};
use crate::splitter::{SpleeterSplitter, TrackSplitter};
use crate::subtitles::{SubtitleDocument, SubtitleSynthesizer};
use crate::timing_file::TimingFile;

// @module: Application controller for capture and subtitle generation

/// Inputs of a capture run
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub lyrics_file: PathBuf,
    pub song_file: PathBuf,
    pub output_file: PathBuf,
    pub instrumental_file: Option<PathBuf>,
}

/// Inputs of a subtitle run
#[derive(Debug, Clone)]
pub struct SubtitleRequest {
    pub timing_file: PathBuf,
    pub output_file: PathBuf,
    pub offset: TimeDelta,
    pub close_open_lines: bool,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Full capture workflow on the real terminal, player and splitter
    pub async fn run_capture(&self, request: CaptureRequest) -> Result<()> {
        if !FileManager::file_exists(&request.song_file) {
            return Err(anyhow!("Song file does not exist: {:?}", request.song_file));
        }
        let lyrics = FileManager::read_to_string(&request.lyrics_file)?;

        let splitter = SpleeterSplitter::from_config(&self.config.splitter);
        let instrumental = self
            .resolve_instrumental(&request.song_file, request.instrumental_file.clone(), &splitter)
            .await?;

        let song = request.song_file.clone();
        let player_command = self.config.player.command.clone();
        let outcome = tokio::task::spawn_blocking(move || -> Result<CaptureOutcome> {
            let mut player = FfplayPlayer::new(player_command);
            let keys = TerminalKeyReader::new()?;
            let mut capture = TimingCapture::new(keys, SystemClock::new(), std::io::stdout());
            let result = capture.run(&lyrics, &song, &mut player);
            let (mut keys, _, _) = capture.into_parts();
            keys.restore()?;
            Ok(result?)
        })
        .await
        .context("Capture task failed")??;

        self.save_capture(&outcome, &instrumental, &request.output_file)
    }

    /// Use the given instrumental or split one out of the song
    pub async fn resolve_instrumental(
        &self,
        song: &Path,
        instrumental: Option<PathBuf>,
        splitter: &dyn TrackSplitter,
    ) -> Result<PathBuf> {
        if let Some(path) = instrumental {
            if !FileManager::file_exists(&path) {
                return Err(anyhow!("Instrumental file does not exist: {:?}", path));
            }
            return Ok(path);
        }

        info!("Creating instrumental track...");
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message("Separating vocals");
        spinner.enable_steady_tick(Duration::from_millis(120));

        let result = splitter.split(song).await;
        spinner.finish_and_clear();

        let tracks = result.context("Failed to create instrumental track")?;
        info!("Wrote instrumental track to {:?}", tracks.instrumental);
        Ok(tracks.instrumental)
    }

    /// Run a capture session over any key source, clock and player
    pub fn capture_with<K, C, W, P>(
        &self,
        capture: &mut TimingCapture<K, C, W>,
        lyrics: &str,
        song: &Path,
        player: &mut P,
    ) -> Result<CaptureOutcome>
    where
        K: KeyReader,
        C: Clock,
        W: Write,
        P: AudioPlayer + ?Sized,
    {
        capture
            .run(lyrics, song, player)
            .map_err(|e| anyhow!(e))
            .context("Timing capture aborted")
    }

    /// Persist a finished capture
    pub fn save_capture(&self, outcome: &CaptureOutcome, song_file: &Path, output: &Path) -> Result<()> {
        let timing = TimingFile::from_screens(song_file, &outcome.screens);
        timing.save(output)
    }

    /// Build the subtitle document for a loaded timing file
    pub fn synthesize(&self, timing: &TimingFile, offset: TimeDelta, close_open: bool) -> Result<SubtitleDocument> {
        let mut screens = timing.to_screens().context("Invalid timing data")?;

        if close_open {
            screens = close_open_lines(&screens);
        }
        if offset != TimeDelta::zero() {
            info!("Shifting all timestamps by {} ms", offset.num_milliseconds());
            screens = adjust_screens(&screens, offset);
        }

        let synthesizer = SubtitleSynthesizer::new(&self.config.display, &self.config.video);
        let document = synthesizer
            .synthesize(&screens)
            .context("Failed to synthesize subtitles")?;
        Ok(document)
    }

    /// Timing file in, `.ass` file out
    pub fn run_subtitles(&self, request: &SubtitleRequest) -> Result<()> {
        let timing = TimingFile::load(&request.timing_file)?;
        if !Path::new(&timing.song_file).exists() {
            warn!("Song file referenced by timing data is missing: {}", timing.song_file);
        }

        let document = self.synthesize(&timing, request.offset, request.close_open_lines)?;
        document.write_to_ass(&request.output_file)?;
        info!(
            "Wrote {} subtitle events to {:?}",
            document.events.len(),
            request.output_file
        );
        Ok(())
    }
}
