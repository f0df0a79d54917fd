//! Settings file → validated config → control loop.

use std::fs;

use irrigator::adapters::settings_file::JsonSettingsFile;
use irrigator::app::ports::{ConfigError, ConfigPort};
use irrigator::app::service::ControlLoop;
use irrigator::control::Decision;

use super::mock_hw::{FakeClock, MockBoard, RecordingMetrics, RecordingSink};

#[test]
fn custom_thresholds_flow_into_the_loop() {
    let path = std::env::temp_dir().join(format!("irrigator-it-settings-{}.json", std::process::id()));
    fs::write(
        &path,
        r#"{
            "pump_pin": 5,
            "metric_key": "garden.pump",
            "thresholds": { "desired_humidity": 300, "max_humidity": 500, "normal_pump_seconds": 9 }
        }"#,
    )
    .unwrap();

    let config = JsonSettingsFile::new(&path).load().unwrap();
    let _ = fs::remove_file(&path);

    let mut control = ControlLoop::new(config);
    let mut board = MockBoard::with_frames(&["250 80 0\r\n"]);
    let mut clock = FakeClock::default();
    let mut metrics = RecordingMetrics::default();
    let mut sink = RecordingSink::default();
    control.start(&mut board, &clock, &mut sink);

    assert_eq!(
        control.tick(&mut board, &mut clock, &mut metrics, &mut sink),
        Decision::NormalWater
    );
    assert_eq!(clock.sleeps[..2], [9, 9]);
    assert_eq!(metrics.sent, [("garden.pump".to_owned(), 1)]);
}

#[test]
fn oversized_chunk_length_is_rejected() {
    let path = std::env::temp_dir().join(format!("irrigator-it-chunk-{}.json", std::process::id()));
    fs::write(&path, r#"{ "frame_chunk_len": 4096 }"#).unwrap();

    let result = JsonSettingsFile::new(&path).load();
    let _ = fs::remove_file(&path);

    assert!(matches!(result, Err(ConfigError::ValidationFailed(_))));
}
