// Integration tests for config persistence and how config defaults seed the
// converter session.

use mediarage::config::Config;
use mediarage::engine::options::{Crf, FrameRate, SpeedPreset};
use mediarage::engine::{CompatibilityTable, ConvertError};
use mediarage::ui::ConverterState;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::helpers::*;

#[test]
fn test_save_and_load_from_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.defaults.quality = Crf::new(30).unwrap();
    config.defaults.preset = SpeedPreset::Veryslow;
    config.defaults.frame_rate = FrameRate::fixed(15).unwrap();
    config.defaults.output_dir = Some(PathBuf::from("/exports"));
    config.defaults.overwrite = true;
    config.encoder.ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg".to_string();

    config.save_to(&path).unwrap();
    assert!(path.exists());

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_from_hand_written_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[defaults]
quality = 18
resolution = "1280x720 (16:9)"
frame_rate = 30
filename_pattern = "{basename}_{target}"

[encoder]
ffmpeg_path = "ffmpeg7"
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.defaults.quality.value(), 18);
    assert_eq!(config.defaults.resolution.label(), "1280x720 (16:9)");
    assert_eq!(config.defaults.frame_rate.fps(), Some(30));
    assert_eq!(config.defaults.preset, SpeedPreset::Medium);
    assert_eq!(config.encoder.ffmpeg_path, "ffmpeg7");
}

#[test]
fn test_load_from_reports_bad_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[defaults]\nquality = 99\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));

    let missing = dir.path().join("missing.toml");
    let err = Config::load_from(&missing).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read config file"));
}

#[test]
fn test_config_defaults_seed_session() {
    let mut config = Config::default();
    config.defaults.quality = Crf::new(35).unwrap();
    config.defaults.resolution = "640x480".parse().unwrap();
    config.defaults.filename_pattern = "{basename}-{source}".to_string();

    let table = CompatibilityTable::builtin();
    let mut state = ConverterState::with_defaults(&table, config.defaults.encoding_options());
    state.choose_file("/videos/trip.avi").unwrap();
    state.select_target(fmt("MP4")).unwrap();

    let request = state.convert(&config.defaults.convert_settings()).unwrap();
    assert_eq!(request.output, PathBuf::from("/videos/trip-avi.mp4"));
    assert_eq!(
        request.args.to_string(),
        "-crf 35 -vf scale=640:480 -preset medium"
    );
}

#[test]
fn test_convert_without_file_is_reported() {
    let table = CompatibilityTable::builtin();
    let state = ConverterState::new(&table);
    let config = Config::default();

    assert!(matches!(
        state.convert(&config.defaults.convert_settings()),
        Err(ConvertError::EmptySourcePath)
    ));
}
