use chrono::TimeDelta;
use log::debug;

use crate::errors::{CaptureError, LyricsError};
use crate::lyrics::model::{LyricLine, LyricScreen};
use crate::lyrics::sheet::LyricSheet;
use crate::timestamps::format_timestamp;

// @module: Timing events and their replay onto a lyric sheet

/// Boundary kind recorded by a keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricMarker {
    // @marker: The displayed line starts now
    SegmentStart,
    // @marker: The previous line ends now
    SegmentEnd,
}

/// A marker and when it was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingEvent {
    pub timestamp: TimeDelta,
    pub marker: LyricMarker,
}

impl TimingEvent {
    pub fn new(timestamp: TimeDelta, marker: LyricMarker) -> Self {
        TimingEvent { timestamp, marker }
    }

    pub fn start(timestamp: TimeDelta) -> Self {
        Self::new(timestamp, LyricMarker::SegmentStart)
    }

    pub fn end(timestamp: TimeDelta) -> Self {
        Self::new(timestamp, LyricMarker::SegmentEnd)
    }
}

/// Replay captured events onto the sheet's lines.
///
/// A start event times the next unstarted line; an end event resolves the
/// most recently started line (a later end overrides an earlier one). Every
/// line must be started exactly once.
pub fn build_screens(sheet: &LyricSheet, events: &[TimingEvent]) -> Result<Vec<LyricScreen>, CaptureError> {
    let texts: Vec<(usize, &str)> = sheet.lines().collect();
    if texts.is_empty() {
        return Err(CaptureError::NoLyrics);
    }

    let mut timed: Vec<(usize, LyricLine)> = Vec::with_capacity(texts.len());

    for event in events {
        match event.marker {
            LyricMarker::SegmentStart => {
                let Some(&(screen_idx, text)) = texts.get(timed.len()) else {
                    return Err(LyricsError::invalid_timing(
                        "",
                        format!(
                            "start marker at {} has no line left to time",
                            format_timestamp(event.timestamp)
                        ),
                    )
                    .into());
                };
                timed.push((screen_idx, LyricLine::new(text, event.timestamp, None)));
            }
            LyricMarker::SegmentEnd => {
                let (_, previous) = timed.last_mut().ok_or(CaptureError::EndBeforeStart)?;
                previous.set_end(event.timestamp)?;
            }
        }
    }

    if timed.len() < texts.len() {
        return Err(LyricsError::IncompleteData(format!(
            "only {} of {} lines were started",
            timed.len(),
            texts.len()
        ))
        .into());
    }

    let mut screens: Vec<Vec<LyricLine>> = vec![Vec::new(); sheet.screen_count()];
    for (screen_idx, line) in timed {
        screens[screen_idx].push(line);
    }

    let screens = screens
        .into_iter()
        .map(LyricScreen::from_lines)
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Built {} screens from {} events", screens.len(), events.len());
    Ok(screens)
}
