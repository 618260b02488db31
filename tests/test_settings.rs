use std::path::PathBuf;

use space_shooter::settings::{Settings, SettingsError};

#[test]
fn defaults() {
    let s = Settings::default();
    assert_eq!(s.key_hold_frames, 8);
    assert!(s.mouse_capture);
    assert!(s.show_controls_hint);
    assert!(s.log_file.is_none());
    assert!(s.log_path().ends_with("space_shooter.log"));
}

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let s = Settings::load(&dir.path().join("nope.json")).unwrap();
    assert_eq!(s, Settings::default());
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let s = Settings {
        key_hold_frames: 3,
        mouse_capture: false,
        show_controls_hint: false,
        log_file: Some(PathBuf::from("/tmp/shooter.log")),
    };
    s.save(&path).unwrap();
    assert_eq!(Settings::load(&path).unwrap(), s);
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "mouse_capture": false }"#).unwrap();
    let s = Settings::load(&path).unwrap();
    assert!(!s.mouse_capture);
    assert_eq!(s.key_hold_frames, 8);
    assert!(s.show_controls_hint);
}

#[test]
fn invalid_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "not json").unwrap();
    let err = Settings::load(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Parse(_)));
    assert!(err.to_string().starts_with("invalid settings file"));
}

#[test]
fn unreadable_path_is_an_io_error() {
    // A directory cannot be read as a file
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::load(dir.path()).unwrap_err();
    assert!(matches!(err, SettingsError::Io(_)));
}
