//! Settings persistence against a temporary directory

use cursor_meter_lib::meter::MeterError;
use cursor_meter_lib::settings::{
    Settings, SettingsPatch, SettingsStore, MAX_RECORDS_LIMIT, SETTINGS_FILE_NAME,
};
use tempfile::tempdir;

#[test]
fn test_missing_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::in_dir(dir.path());
    assert_eq!(store.load().unwrap(), Settings::default());
    assert!(!store.path().exists());
}

#[test]
fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::in_dir(dir.path().join("nested").join("config"));

    let settings = Settings {
        always_on_top: true,
        hold_to_measure: true,
        interval_ms: 16,
        max_records: 200,
    };
    store.save(&settings).unwrap();

    assert!(store.path().ends_with(SETTINGS_FILE_NAME));
    assert_eq!(store.load().unwrap(), settings);

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"intervalMs\": 16"));
    assert!(raw.contains("\"alwaysOnTop\": true"));
}

#[test]
fn test_update_writes_only_on_change() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::in_dir(dir.path());
    let mut current = store.load().unwrap();

    let unchanged = SettingsPatch {
        interval_ms: Some(current.interval_ms),
        ..Default::default()
    };
    assert!(!store.update(&mut current, &unchanged).unwrap());
    assert!(!store.path().exists());

    let changed = SettingsPatch {
        max_records: Some(10),
        ..Default::default()
    };
    assert!(store.update(&mut current, &changed).unwrap());
    assert_eq!(current.max_records, 10);
    assert_eq!(store.load().unwrap().max_records, 10);
}

#[test]
fn test_update_rejects_invalid_values() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::in_dir(dir.path());
    let mut current = Settings::default();

    let patch = SettingsPatch {
        max_records: Some(0),
        ..Default::default()
    };
    assert!(matches!(
        store.update(&mut current, &patch),
        Err(MeterError::Configuration(_))
    ));
    assert_eq!(current, Settings::default());
    assert!(!store.path().exists());
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::in_dir(dir.path());
    std::fs::write(store.path(), "not json").unwrap();
    assert!(matches!(store.load(), Err(MeterError::Serialization(_))));
}

#[test]
fn test_zero_values_on_disk_are_rejected() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::in_dir(dir.path());
    std::fs::write(store.path(), r#"{"intervalMs": 0}"#).unwrap();
    assert!(matches!(store.load(), Err(MeterError::Configuration(_))));
}

#[test]
fn test_failed_save_keeps_previous_settings() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::in_dir(dir.path());
    // a directory where the file should be makes the write fail
    std::fs::create_dir(store.path()).unwrap();

    let mut current = Settings::default();
    let patch = SettingsPatch {
        max_records: Some(7),
        ..Default::default()
    };
    assert!(matches!(
        store.update(&mut current, &patch),
        Err(MeterError::Io(_))
    ));
    assert_eq!(current, Settings::default());
}

#[test]
fn test_oversized_record_count_on_disk_is_rejected() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::in_dir(dir.path());
    std::fs::write(
        store.path(),
        format!(r#"{{"maxRecords": {}}}"#, MAX_RECORDS_LIMIT + 1),
    )
    .unwrap();
    assert!(matches!(store.load(), Err(MeterError::Configuration(_))));
}
