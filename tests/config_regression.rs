use std::{fs, path::PathBuf};

use gesture_engine::{
    config::{ConfigError, GestureConfig},
    GestureManager, GestureType,
};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn fixture(name: &str) -> PathBuf {
    repo_root().join("tests").join("fixtures").join(name)
}

#[test]
fn shipped_config_matches_defaults() {
    let config = GestureConfig::from_path(&repo_root().join("config/gestures.toml"))
        .expect("shipped config should load");
    assert_eq!(
        config,
        GestureConfig::default(),
        "config/gestures.toml drifted from GestureConfig::default()"
    );
}

#[test]
fn custom_fixture_overrides_only_named_keys() {
    let config =
        GestureConfig::from_path(&fixture("valid_custom.toml")).expect("fixture should load");
    assert_eq!(config.move_threshold_px, 24);
    assert_eq!(config.edge_margin_px, 48);
    assert_eq!(config.tap.max_duration_ms, 250);
    assert!(!config.tap.defer_for_double_tap);
    assert_eq!(config.tap.min_duration_ms, 0);
    assert_eq!(config.long_press.duration_ms, 600);
    assert_eq!(config.double_tap, GestureConfig::default().double_tap);
    assert!(!config.recognizers.pinch3f);
    assert!(config.recognizers.pinch);

    let manager = GestureManager::from_config(&config);
    assert_eq!(manager.move_threshold(), 24);
    assert!(manager
        .recognizer_types()
        .all(|kind| kind != GestureType::Pinch3f));
    assert_eq!(manager.len(), 5);
}

#[test]
fn semantic_validation_names_the_offending_field() {
    let cases = [
        ("invalid/negative_threshold.toml", "move_threshold_px must be >= 0"),
        ("invalid/negative_edge_margin.toml", "edge_margin_px must be >= 0"),
        (
            "invalid/tap_min_above_max.toml",
            "tap.min_duration_ms must be <= tap.max_duration_ms",
        ),
        (
            "invalid/tap_overlaps_long_press.toml",
            "tap.max_duration_ms must be < long_press.duration_ms",
        ),
        (
            "invalid/zero_double_tap_interval.toml",
            "double_tap.interval_ms must be > 0",
        ),
        (
            "invalid/negative_double_tap_distance.toml",
            "double_tap.max_distance_px must be >= 0",
        ),
    ];

    for (name, needle) in cases {
        let err = GestureConfig::from_path(&fixture(name))
            .expect_err(&format!("{name} should fail validation"));
        assert!(
            matches!(err, ConfigError::Invalid { .. }),
            "{name}: expected a validation error, got {err:?}"
        );
        let message = err.to_string();
        assert!(
            message.contains(needle),
            "{name}: `{message}` does not mention `{needle}`"
        );
    }
}

#[test]
fn unknown_keys_fail_to_parse() {
    let err = GestureConfig::from_path(&fixture("invalid/unknown_key.toml"))
        .expect_err("misspelled key should be rejected");
    assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");
    let err = GestureConfig::from_path(&path).expect_err("missing file should fail");
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn loads_from_written_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gestures.toml");
    fs::write(&path, "[double_tap]\ninterval_ms = 250\n").expect("write config");

    let config = GestureConfig::from_path(&path).expect("written config should load");
    assert_eq!(config.double_tap.interval_ms, 250);
    assert_eq!(config.long_press, GestureConfig::default().long_press);
}
