/*!
 * Scripted capture sessions through the controller
 */

use std::path::Path;

use chrono::TimeDelta;
use karaoke_maker::capture::scripted::RecordingPlayer;
use karaoke_maker::timing_file::TimingFile;
use karaoke_maker::{CaptureError, Config, Controller, LyricMarker};
use crate::common::{create_temp_dir, scripted_session, SAMPLE_LYRICS};

fn controller() -> Controller {
    Controller::with_config(Config::default()).unwrap()
}

#[test]
fn test_captureWorkflow_withSampleLyrics_shouldSaveTimingFile() {
    let temp_dir = create_temp_dir().unwrap();
    let output = temp_dir.path().join("out").join("timing.json");
    let controller = controller();
    let mut capture = scripted_session("k \n \n \n");
    let mut player = RecordingPlayer::default();

    let outcome = controller
        .capture_with(&mut capture, SAMPLE_LYRICS, Path::new("song.mp3"), &mut player)
        .unwrap();
    controller
        .save_capture(&outcome, Path::new("song/accompaniment.wav"), &output)
        .unwrap();

    assert_eq!(outcome.events.len(), 6);
    assert_eq!(outcome.events.last().unwrap().marker, LyricMarker::SegmentEnd);
    assert_eq!(outcome.screens.len(), 2);
    assert_eq!(outcome.screens[0].lines.len(), 2);
    assert_eq!(outcome.screens[1].lines.len(), 1);
    assert_eq!(outcome.screens[1].start_ts, TimeDelta::seconds(5));
    assert_eq!(outcome.screens[1].lines[0].end_ts, Some(TimeDelta::seconds(6)));

    assert_eq!(player.played, vec![(Path::new("song.mp3").to_path_buf(), TimeDelta::zero())]);
    assert!(!player.playing);

    let loaded = TimingFile::load(&output).unwrap();
    assert_eq!(loaded.song_file, "song/accompaniment.wav");
    assert_eq!(loaded.to_screens().unwrap(), outcome.screens);
}

#[test]
fn test_captureWorkflow_shouldShowLinesInOrder() {
    let controller = controller();
    let mut capture = scripted_session("k \n \n \n");
    let mut player = RecordingPlayer::default();

    controller
        .capture_with(&mut capture, SAMPLE_LYRICS, Path::new("song.mp3"), &mut player)
        .unwrap();
    let (_, _, out) = capture.into_parts();
    let shown = String::from_utf8(out).unwrap();

    let positions: Vec<usize> = [
        "Twinkle twinkle little star",
        "How I wonder what you are",
        "Up above the world so high",
        "Press space or enter when the last line ends",
    ]
    .iter()
    .map(|text| shown.find(text).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(shown.contains("\r\n"));
}

/// Every recorded line keeps end >= start whatever extra keys arrive
#[test]
fn test_captureWorkflow_withNoisyScripts_shouldKeepLinesOrdered() {
    let lyrics = "one\ntwo\nthree\n\nfour\nfive\n\nsix\nseven\neight\nnine";
    let line_total = 9;

    for noise in 0..4 {
        let mut script = String::from("k");
        for idx in 0..line_total {
            script.push_str(&"x".repeat((idx + noise) % 3));
            script.push(' ');
            if (idx + noise) % 4 != 0 {
                script.push('\n');
            }
            if (idx * noise) % 5 == 1 {
                script.push('\n');
            }
        }
        script.push('\n');

        let mut capture = scripted_session(&script);
        let mut player = RecordingPlayer::default();
        let outcome = controller()
            .capture_with(&mut capture, lyrics, Path::new("song.wav"), &mut player)
            .unwrap();

        let lines: Vec<_> = outcome.screens.iter().flat_map(|s| s.lines.iter()).collect();
        assert_eq!(outcome.screens.len(), 3, "noise {}", noise);
        assert_eq!(lines.len(), line_total, "noise {}", noise);
        for line in &lines {
            if let Some(end) = line.end_ts {
                assert!(end >= line.start_ts, "noise {}: {:?}", noise, line);
            }
        }
        assert!(lines.windows(2).all(|w| w[0].start_ts < w[1].start_ts));
        assert!(lines.last().unwrap().end_ts.is_some());
        for screen in &outcome.screens {
            assert_eq!(screen.start_ts, screen.lines[0].start_ts);
        }
    }
}

#[test]
fn test_captureWorkflow_withRepeatedEnter_shouldKeepLatestEnd() {
    let controller = controller();
    let mut capture = scripted_session("k \n\n \n");
    let mut player = RecordingPlayer::default();

    let outcome = controller
        .capture_with(&mut capture, "a\nb", Path::new("song.wav"), &mut player)
        .unwrap();

    let lines = &outcome.screens[0].lines;
    assert_eq!(lines[0].end_ts, Some(TimeDelta::seconds(3)));
    assert_eq!(lines[1].start_ts, TimeDelta::seconds(4));
    assert_eq!(lines[1].end_ts, Some(TimeDelta::seconds(5)));
}

#[test]
fn test_captureWorkflow_withEnterFirst_shouldFailWithEndBeforeStart() {
    let controller = controller();
    let mut capture = scripted_session("k\n");
    let mut player = RecordingPlayer::default();

    let error = controller
        .capture_with(&mut capture, SAMPLE_LYRICS, Path::new("song.wav"), &mut player)
        .unwrap_err();

    assert!(matches!(error.downcast_ref::<CaptureError>(), Some(CaptureError::EndBeforeStart)));
    assert!(!player.playing);
}

#[test]
fn test_captureWorkflow_withInterrupt_shouldStopPlayback() {
    let controller = controller();
    let mut capture = scripted_session("k \n!");
    let mut player = RecordingPlayer::default();

    let error = controller
        .capture_with(&mut capture, SAMPLE_LYRICS, Path::new("song.wav"), &mut player)
        .unwrap_err();

    assert!(matches!(error.downcast_ref::<CaptureError>(), Some(CaptureError::Interrupted)));
    assert_eq!(player.played.len(), 1);
    assert!(!player.playing);
    assert!(player.stop_calls >= 2);
}

#[test]
fn test_captureWorkflow_withBlankLyrics_shouldNotStartPlayback() {
    let controller = controller();
    let mut capture = scripted_session("k \n");
    let mut player = RecordingPlayer::default();

    let error = controller
        .capture_with(&mut capture, "\n  \n\t\n", Path::new("song.wav"), &mut player)
        .unwrap_err();

    assert!(matches!(error.downcast_ref::<CaptureError>(), Some(CaptureError::NoLyrics)));
    assert!(player.played.is_empty());
}
