/*!
 * Tests for the persisted timing JSON
 */

use chrono::TimeDelta;
use karaoke_maker::timestamps::{format_timestamp, parse_timestamp};
use karaoke_maker::timing_file::TimingFile;
use crate::common::{create_temp_dir, create_test_file, line_ms, screen};

#[test]
fn test_saveAndLoad_withMixedEnds_shouldRestoreScreens() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("nested").join("timing.json");
    let screens = vec![
        screen(vec![line_ms("first", 1_500, Some(2_250)), line_ms("second", 3_000, None)]),
        screen(vec![line_ms("third", 61_001, Some(3_725_250))]),
    ];

    TimingFile::from_screens("/music/song/accompaniment.wav", &screens)
        .save(&path)
        .unwrap();
    let loaded = TimingFile::load(&path).unwrap();

    assert_eq!(loaded.song_file, "/music/song/accompaniment.wav");
    assert_eq!(loaded.to_screens().unwrap(), screens);
}

#[test]
fn test_save_shouldUseStringTimestampsAndKeys() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("timing.json");
    let screens = vec![screen(vec![line_ms("hello", 12_000, Some(13_500))])];

    TimingFile::from_screens("song.wav", &screens).save(&path).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(raw["song_file"], "song.wav");
    let line = &raw["screens"][0]["lines"][0];
    assert_eq!(line["line"], "hello");
    assert_eq!(line["ts"], "0:00:12");
    assert_eq!(line["end_ts"], "0:00:13.500000");
}

#[test]
fn test_load_withHandWrittenFile_shouldAcceptMissingEnd() {
    let temp_dir = create_temp_dir().unwrap();
    let path = create_test_file(
        temp_dir.path(),
        "timing.json",
        r#"{"song_file": "a.wav", "screens": [{"lines": [{"line": "x", "ts": "1:02:03.040000"}]}, {"lines": []}]}"#,
    )
    .unwrap();

    let screens = TimingFile::load(&path).unwrap().to_screens().unwrap();

    assert_eq!(screens.len(), 1);
    assert_eq!(screens[0].lines[0].start_ts, TimeDelta::milliseconds(3_723_040));
    assert_eq!(screens[0].lines[0].end_ts, None);
}

#[test]
fn test_load_withInvalidJson_shouldFail() {
    let temp_dir = create_temp_dir().unwrap();
    let path = create_test_file(temp_dir.path(), "timing.json", "{ not json").unwrap();
    assert!(TimingFile::load(&path).is_err());
}

/// Formatting then parsing keeps every duration, negative ones included
#[test]
fn test_timestampText_withAssortedDurations_shouldRoundTrip() {
    for micros in [0i64, 1, 999_999, 1_000_000, 59_999_999, 3_600_000_000, 90_061_000_001, -1, -1_000_000, -86_400_000_001] {
        let ts = TimeDelta::microseconds(micros);
        let text = format_timestamp(ts);
        assert_eq!(parse_timestamp(&text).unwrap(), ts, "via {:?}", text);
    }
}

#[test]
fn test_formatTimestamp_withNegativeSecond_shouldUseDayNotation() {
    assert_eq!(format_timestamp(TimeDelta::seconds(-1)), "-1 day, 23:59:59");
}
