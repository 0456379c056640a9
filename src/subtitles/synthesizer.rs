use chrono::TimeDelta;
use log::debug;

use crate::app_config::{DisplayConfig, VideoConfig};
use crate::errors::LyricsError;
use crate::lyrics::{LyricLine, LyricScreen};
use crate::timestamps::to_centiseconds;

// @module: Karaoke subtitle synthesis from timed screens

/// Numpad-style ASS alignment for top-center
pub const ALIGN_TOP_CENTER: u8 = 8;

/// Name of the single style every event uses
pub const DEFAULT_STYLE_NAME: &str = "Default";

/// Subtitle style record
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub name: String,
    pub font_name: String,
    pub font_size: u32,
    pub primary_color: String,
    pub secondary_color: String,
    pub bold: bool,
    pub alignment: u8,
}

impl Style {
    /// The karaoke style described by the display settings
    pub fn from_display(display: &DisplayConfig) -> Self {
        Style {
            name: DEFAULT_STYLE_NAME.to_string(),
            font_name: display.font_name.clone(),
            font_size: display.font_size,
            primary_color: display.primary_color.clone(),
            secondary_color: display.secondary_color.clone(),
            bold: true,
            alignment: ALIGN_TOP_CENTER,
        }
    }
}

/// Highlight timing of one line, in centiseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KaraokeTiming {
    // @field: Wait after the screen appears before the sweep starts
    pub delay_cs: u64,

    // @field: Length of the sweep across the line
    pub duration_cs: u64,
}

impl KaraokeTiming {
    /// Compute the tags for `line` on a screen that appears at `screen_start`
    pub fn for_line(line: &LyricLine, screen_start: TimeDelta) -> Result<Self, LyricsError> {
        let delay = to_centiseconds(line.start_ts - screen_start);
        let duration = to_centiseconds(line.end()? - line.start_ts);

        if delay < 0 {
            return Err(LyricsError::invalid_timing(
                &line.text,
                format!("line starts {} cs before its screen", -delay),
            ));
        }
        if duration < 0 {
            return Err(LyricsError::invalid_timing(
                &line.text,
                format!("highlight duration is negative ({} cs)", duration),
            ));
        }

        Ok(KaraokeTiming {
            delay_cs: delay as u64,
            duration_cs: duration as u64,
        })
    }

    /// Prefix `text` with the delay and sweep tags
    pub fn decorate(&self, text: &str) -> String {
        format!("{{\\k{}}}{{\\kf{}}}{}", self.delay_cs, self.duration_cs, text)
    }
}

/// One timed, positioned subtitle line
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub layer: u32,
    pub style: String,
    pub start_cs: u64,
    pub end_cs: u64,
    pub margin_v: i32,
    pub text: String,
}

/// Styles and events ready to be written out
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleDocument {
    pub play_res_x: u32,
    pub play_res_y: u32,
    pub styles: Vec<Style>,
    pub events: Vec<Event>,
}

/// Turns screens into a karaoke subtitle document
pub struct SubtitleSynthesizer<'a> {
    display: &'a DisplayConfig,
    video: &'a VideoConfig,
}

impl<'a> SubtitleSynthesizer<'a> {
    pub fn new(display: &'a DisplayConfig, video: &'a VideoConfig) -> Self {
        SubtitleSynthesizer { display, video }
    }

    /// Build the document.
    ///
    /// Every line of a screen is shown for the whole screen interval and
    /// highlighted during its own sung interval. Any line with missing or
    /// negative timing aborts the document.
    pub fn synthesize(&self, screens: &[LyricScreen]) -> Result<SubtitleDocument, LyricsError> {
        let style = Style::from_display(self.display);
        let mut events = Vec::with_capacity(screens.iter().map(|s| s.lines.len()).sum());

        for screen in screens {
            events.extend(self.screen_events(screen, &style)?);
        }

        debug!("Synthesized {} events from {} screens", events.len(), screens.len());
        Ok(SubtitleDocument {
            play_res_x: self.video.width,
            play_res_y: self.video.height,
            styles: vec![style],
            events,
        })
    }

    /// Events for all lines of one screen
    pub fn screen_events(&self, screen: &LyricScreen, style: &Style) -> Result<Vec<Event>, LyricsError> {
        let screen_end = screen.screen_end()?;
        let first_text = screen.lines.first().map(|l| l.text.as_str()).unwrap_or_default();
        let start_cs = non_negative_cs(screen.start_ts, first_text, "screen start")?;
        let end_cs = non_negative_cs(screen_end, first_text, "screen end")?;
        if end_cs < start_cs {
            return Err(LyricsError::invalid_timing(first_text, "screen ends before it starts"));
        }

        screen
            .lines
            .iter()
            .enumerate()
            .map(|(idx, line)| -> Result<Event, LyricsError> {
                let timing = KaraokeTiming::for_line(line, screen.start_ts)?;
                Ok(Event {
                    layer: 0,
                    style: style.name.clone(),
                    start_cs,
                    end_cs,
                    margin_v: screen.line_y_position(idx, self.video).round() as i32,
                    text: timing.decorate(&line.text),
                })
            })
            .collect()
    }
}

fn non_negative_cs(ts: TimeDelta, line: &str, what: &str) -> Result<u64, LyricsError> {
    let cs = to_centiseconds(ts);
    if cs < 0 {
        return Err(LyricsError::invalid_timing(line, format!("{} is negative", what)));
    }
    Ok(cs as u64)
}
