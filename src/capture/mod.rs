/*!
 * Interactive timing capture.
 *
 * Plays the song, shows the lyrics one line at a time and turns keystrokes
 * into timestamped line boundaries:
 * - space marks the start of the displayed line
 * - Enter marks the end of the previous line
 * - any other key is ignored
 */

pub mod clock;
pub mod keys;
pub mod scripted;

use std::io::Write;
use std::path::Path;

use chrono::TimeDelta;
use log::{debug, info, trace};

use crate::errors::CaptureError;
use crate::lyrics::{build_screens, LyricMarker, LyricScreen, LyricSheet, TimingEvent};
use crate::playback::{AudioPlayer, PlaybackGuard};
use crate::timestamps::format_timestamp;

pub use clock::{Clock, SystemClock};
pub use keys::{Key, KeyReader, TerminalKeyReader};

/// Everything a finished session produced
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    // @field: Markers in the order they were recorded
    pub events: Vec<TimingEvent>,

    // @field: Finalized screens
    pub screens: Vec<LyricScreen>,
}

/// One capture session over a key source, a clock and a prompt sink
pub struct TimingCapture<K: KeyReader, C: Clock, W: Write> {
    keys: K,
    clock: C,
    out: W,
}

impl<K: KeyReader, C: Clock, W: Write> TimingCapture<K, C, W> {
    pub fn new(keys: K, clock: C, out: W) -> Self {
        TimingCapture { keys, clock, out }
    }

    /// Hand back the parts, e.g. to restore the terminal
    pub fn into_parts(self) -> (K, C, W) {
        (self.keys, self.clock, self.out)
    }

    /// Run the session for `lyrics` while `song` plays on `player`
    pub fn run<P: AudioPlayer + ?Sized>(
        &mut self,
        lyrics: &str,
        song: &Path,
        player: &mut P,
    ) -> Result<CaptureOutcome, CaptureError> {
        let sheet = LyricSheet::parse(lyrics);
        if sheet.is_empty() {
            return Err(CaptureError::NoLyrics);
        }
        info!(
            "Capturing {} lines in {} screens",
            sheet.line_count(),
            sheet.screen_count()
        );

        self.print_preamble()?;
        self.wait_for_any_key()?;

        let playback = PlaybackGuard::start(player, song, TimeDelta::zero())?;
        self.clock.mark_start();

        let mut events = Vec::with_capacity(sheet.line_count() * 2 + 1);
        let mut started_any = false;

        for screen in &sheet.screens {
            self.say("")?;
            for line in screen {
                self.say(line)?;
                loop {
                    let event = self.next_event()?;
                    match event.marker {
                        LyricMarker::SegmentEnd => {
                            if !started_any {
                                return Err(CaptureError::EndBeforeStart);
                            }
                            debug!("Previous line ends at {}", format_timestamp(event.timestamp));
                            events.push(event);
                        }
                        LyricMarker::SegmentStart => {
                            debug!("'{}' starts at {}", line, format_timestamp(event.timestamp));
                            events.push(event);
                            started_any = true;
                            break;
                        }
                    }
                }
            }
        }

        self.say("Press space or enter when the last line ends")?;
        let last = self.next_event()?;
        events.push(TimingEvent::end(last.timestamp));

        playback.finish()?;

        let screens = build_screens(&sheet, &events)?;
        info!("Captured {} timing events", events.len());
        Ok(CaptureOutcome { events, screens })
    }

    /// Block until a marker key arrives, skipping everything else
    fn next_event(&mut self) -> Result<TimingEvent, CaptureError> {
        loop {
            let key = self.keys.next_key()?;
            let timestamp = self.clock.elapsed();
            match key {
                Key::Space => return Ok(TimingEvent::start(timestamp)),
                Key::Enter => return Ok(TimingEvent::end(timestamp)),
                Key::Interrupt => return Err(CaptureError::Interrupted),
                other => trace!("Ignoring key {:?}", other),
            }
        }
    }

    fn wait_for_any_key(&mut self) -> Result<(), CaptureError> {
        self.say("Press any key to start the song...")?;
        match self.keys.next_key()? {
            Key::Interrupt => Err(CaptureError::Interrupted),
            _ => Ok(()),
        }
    }

    fn print_preamble(&mut self) -> Result<(), CaptureError> {
        self.say("This is the Karaoke Song Maker!")?;
        self.say("The song will play, and lyrics will be shown line by line.")?;
        self.say("Press spacebar to mark the start of the displayed line.")?;
        self.say("Press Enter to mark the *end* of the *previous* line.")?;
        Ok(())
    }

    // raw mode needs explicit carriage returns
    fn say(&mut self, text: &str) -> Result<(), CaptureError> {
        write!(self.out, "{}\r\n", text)?;
        self.out.flush()?;
        Ok(())
    }
}
