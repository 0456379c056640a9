use chrono::TimeDelta;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::LyricsError;

// @module: Duration parsing and formatting for timing files and subtitles

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_CENTISECOND: i64 = 10_000;
const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

// @const: "[N day(s), ]H:MM:SS[.ffffff]"
static CLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(-?\d+) days?, )?(\d+):(\d{1,2}):(\d{1,2})(?:\.(\d{1,6}))?$").unwrap()
});

// @const: Bare seconds, e.g. "12.5"
static SECONDS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-)?(\d+)(?:\.(\d{1,6}))?$").unwrap()
});

fn total_micros(ts: TimeDelta) -> i64 {
    ts.num_microseconds().unwrap_or(if ts < TimeDelta::zero() { i64::MIN } else { i64::MAX })
}

/// Pad a fractional-second string to microseconds ("5" -> 500000)
fn fraction_to_micros(fraction: Option<&str>) -> i64 {
    match fraction {
        Some(digits) => {
            let padded = format!("{:0<6}", digits);
            padded.parse().unwrap_or(0)
        }
        None => 0,
    }
}

/// Format a duration the way timing files store it.
///
/// The layout is `H:MM:SS` with a `.ffffff` microsecond suffix only when the
/// fraction is non-zero. Negative values borrow a whole day, e.g. minus one
/// second is `-1 day, 23:59:59`.
pub fn format_timestamp(ts: TimeDelta) -> String {
    let micros = total_micros(ts);
    let days = micros.div_euclid(MICROS_PER_DAY);
    let rest = micros.rem_euclid(MICROS_PER_DAY);

    let hours = rest / (3_600 * MICROS_PER_SECOND);
    let minutes = (rest / (60 * MICROS_PER_SECOND)) % 60;
    let seconds = (rest / MICROS_PER_SECOND) % 60;
    let fraction = rest % MICROS_PER_SECOND;

    let mut out = String::new();
    if days != 0 {
        let suffix = if days.abs() == 1 { "" } else { "s" };
        out.push_str(&format!("{} day{}, ", days, suffix));
    }
    out.push_str(&format!("{}:{:02}:{:02}", hours, minutes, seconds));
    if fraction != 0 {
        out.push_str(&format!(".{:06}", fraction));
    }
    out
}

/// Parse a stored duration.
///
/// Accepts everything `format_timestamp` produces plus bare seconds
/// (`"12.5"`, `"-3"`).
pub fn parse_timestamp(raw: &str) -> Result<TimeDelta, LyricsError> {
    let trimmed = raw.trim();

    if let Some(caps) = CLOCK_REGEX.captures(trimmed) {
        let number = |idx: usize| -> Result<i64, LyricsError> {
            caps.get(idx)
                .map(|m| m.as_str().parse::<i64>())
                .transpose()
                .map(|v| v.unwrap_or(0))
                .map_err(|_| LyricsError::MalformedTimestamp(raw.to_string()))
        };

        let days = number(1)?;
        let hours = number(2)?;
        let minutes = number(3)?;
        let seconds = number(4)?;
        if minutes >= 60 || seconds >= 60 {
            return Err(LyricsError::MalformedTimestamp(raw.to_string()));
        }

        let micros = days
            .checked_mul(MICROS_PER_DAY)
            .and_then(|d| d.checked_add(hours.checked_mul(3_600 * MICROS_PER_SECOND)?))
            .and_then(|v| v.checked_add(minutes * 60 * MICROS_PER_SECOND))
            .and_then(|v| v.checked_add(seconds * MICROS_PER_SECOND))
            .and_then(|v| v.checked_add(fraction_to_micros(caps.get(5).map(|m| m.as_str()))))
            .ok_or_else(|| LyricsError::MalformedTimestamp(raw.to_string()))?;

        return Ok(TimeDelta::microseconds(micros));
    }

    if let Some(caps) = SECONDS_REGEX.captures(trimmed) {
        let whole: i64 = caps[2]
            .parse()
            .map_err(|_| LyricsError::MalformedTimestamp(raw.to_string()))?;
        let micros = whole
            .checked_mul(MICROS_PER_SECOND)
            .and_then(|v| v.checked_add(fraction_to_micros(caps.get(3).map(|m| m.as_str()))))
            .ok_or_else(|| LyricsError::MalformedTimestamp(raw.to_string()))?;
        let sign = if caps.get(1).is_some() { -1 } else { 1 };
        return Ok(TimeDelta::microseconds(sign * micros));
    }

    Err(LyricsError::MalformedTimestamp(raw.to_string()))
}

/// Convert fractional seconds (as given on the command line) to a duration
pub fn from_seconds(seconds: f64) -> TimeDelta {
    TimeDelta::microseconds((seconds * MICROS_PER_SECOND as f64).round() as i64)
}

/// Round a duration to whole centiseconds, half away from zero
pub fn to_centiseconds(ts: TimeDelta) -> i64 {
    let micros = total_micros(ts);
    let half = MICROS_PER_CENTISECOND / 2;
    if micros >= 0 {
        micros.saturating_add(half) / MICROS_PER_CENTISECOND
    } else {
        -(micros.saturating_neg().saturating_add(half) / MICROS_PER_CENTISECOND)
    }
}

/// Format a non-negative centisecond count as an ASS time (`H:MM:SS.CC`)
pub fn format_ass_time(centiseconds: u64) -> String {
    let cs = centiseconds % 100;
    let total_seconds = centiseconds / 100;
    let seconds = total_seconds % 60;
    let minutes = (total_seconds / 60) % 60;
    let hours = total_seconds / 3_600;
    format!("{}:{:02}:{:02}.{:02}", hours, minutes, seconds, cs)
}
