/*!
 * Tests for the lyric sheet and the timed screen model
 */

use chrono::TimeDelta;
use karaoke_maker::app_config::VideoConfig;
use karaoke_maker::lyrics::{adjust_screens, LyricSheet};
use karaoke_maker::LyricsError;
use crate::common::{line_ms, screen, SAMPLE_LYRICS};

/// Line and screen counts follow the non-blank lines and blocks
#[test]
fn test_sheet_counts_withVariousTexts_shouldMatchNonBlankLinesAndBlocks() {
    let cases = [
        ("", 0, 0),
        ("one", 1, 1),
        ("one\ntwo", 2, 1),
        ("one\n\ntwo", 2, 2),
        ("one\n\n\n\ntwo\nthree\n\n", 3, 2),
        (SAMPLE_LYRICS, 3, 2),
        ("  \n a \n\t\n b \n c \n\n d", 4, 3),
    ];

    for (text, lines, screens) in cases {
        let sheet = LyricSheet::parse(text);
        let non_blank = text.lines().filter(|l| !l.trim().is_empty()).count();
        assert_eq!(sheet.line_count(), lines, "lines for {:?}", text);
        assert_eq!(sheet.line_count(), non_blank, "non-blank for {:?}", text);
        assert_eq!(sheet.screen_count(), screens, "screens for {:?}", text);
    }
}

/// Shifting forth and back restores every set timestamp
#[test]
fn test_adjustScreens_withInverseDelta_shouldRoundTrip() {
    let screens = vec![
        screen(vec![line_ms("a", 1_000, Some(1_900)), line_ms("b", 2_000, None)]),
        screen(vec![line_ms("c", 3_000, Some(4_500))]),
    ];

    for delta_ms in [0, 1, -1, 250, -2_500, 90_000] {
        let delta = TimeDelta::milliseconds(delta_ms);
        let shifted = adjust_screens(&screens, delta);
        assert_eq!(adjust_screens(&shifted, -delta), screens, "delta {}", delta_ms);
    }
}

/// Shifting keeps pending ends pending and leaves the source untouched
#[test]
fn test_adjustTimestamps_withPendingEnd_shouldStayPending() {
    let original = screen(vec![line_ms("a", 1_000, None)]);
    let shifted = original.adjust_timestamps(TimeDelta::seconds(5));

    assert_eq!(shifted.lines[0].end_ts, None);
    assert_eq!(shifted.start_ts, TimeDelta::seconds(6));
    assert_eq!(original.start_ts, TimeDelta::seconds(1));
}

/// The screen end comes from its last line
#[test]
fn test_screenEnd_withPendingLastLine_shouldReportIncompleteData() {
    let finished = screen(vec![line_ms("a", 0, Some(500)), line_ms("b", 600, Some(900))]);
    assert_eq!(finished.screen_end().unwrap(), TimeDelta::milliseconds(900));

    let pending = screen(vec![line_ms("a", 0, Some(500)), line_ms("b", 600, None)]);
    assert!(matches!(pending.screen_end(), Err(LyricsError::IncompleteData(_))));
}

/// A single line is centered on the canvas whatever the line height
#[test]
fn test_lineLayout_withSingleLine_shouldCenterOnHalfHeight() {
    let single = screen(vec![line_ms("solo", 0, None)]);
    for line_height in [1, 24, 30, 55] {
        let video = VideoConfig { line_height, ..VideoConfig::default() };
        assert_eq!(single.line_center_y(0, &video), f64::from(video.height) / 2.0);
        assert_eq!(
            single.line_y_position(0, &video),
            f64::from(video.height) / 2.0 - f64::from(line_height) / 2.0
        );
    }
}

/// Consecutive lines are one line height apart
#[test]
fn test_lineYPosition_withFourLines_shouldStepByLineHeight() {
    let video = VideoConfig::default();
    let block = screen((0..4).map(|i| line_ms("x", i * 1_000, None)).collect());

    assert_eq!(block.line_y_position(0, &video), 100.0);
    for idx in 1..4 {
        let step = block.line_y_position(idx, &video) - block.line_y_position(idx - 1, &video);
        assert_eq!(step, 30.0);
    }
    assert!(block.is_ordered());
}
