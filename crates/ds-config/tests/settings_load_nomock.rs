//! No-mock settings loading tests.
//!
//! Covers:
//! - Absent-file fallback to defaults
//! - Binding and clamping from real XML files on disk
//! - Error shape for malformed files

use std::fs;
use std::path::{Path, PathBuf};

use ds_config::{Settings, SettingsError};
use tempfile::TempDir;

fn write_settings(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("downshift.xml");
    fs::write(&path, content).expect("write settings file");
    path
}

#[test]
fn test_missing_file_yields_defaults() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("downshift.xml");

    let settings = Settings::from_file(&path).expect("absent file is not an error");
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_well_formed_file_binds_all_fields() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_settings(
        temp.path(),
        r#"<settings>
            <workers>8</workers>
            <processLoadMax>60</processLoadMax>
            <normalizationTime>15</normalizationTime>
            <suspensions>backup.exe indexer.exe</suspensions>
            <decreases>encoder.exe miner.exe</decreases>
        </settings>"#,
    );

    let settings = Settings::from_file(&path).expect("well-formed file loads");
    assert_eq!(settings.workers(), 8);
    assert_eq!(settings.process_load_max(), 60);
    assert_eq!(settings.normalization_time(), 15);
    assert_eq!(settings.suspensions(), vec!["backup.exe", "indexer.exe"]);
    assert_eq!(settings.decreases(), vec!["encoder.exe", "miner.exe"]);
}

#[test]
fn test_partial_file_keeps_defaults_for_missing_elements() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_settings(temp.path(), "<settings><workers>2</workers></settings>");

    let settings = Settings::from_file(&path).expect("partial file loads");
    assert_eq!(settings.workers(), 2);
    assert_eq!(settings.process_load_max(), 25);
    assert_eq!(settings.normalization_time(), 5);
    assert_eq!(settings.suspension(), "");
}

#[test]
fn test_out_of_range_values_clamp_on_load() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_settings(
        temp.path(),
        r#"<settings>
            <workers>999</workers>
            <processLoadMax>150</processLoadMax>
            <normalizationTime>-3</normalizationTime>
        </settings>"#,
    );

    let settings = Settings::from_file(&path).expect("clamped file loads");
    assert_eq!(settings.workers(), 25);
    assert_eq!(settings.process_load_max(), 100);
    assert_eq!(settings.normalization_time(), 1);
}

#[test]
fn test_workers_floor_clamps_on_load() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_settings(temp.path(), "<settings><workers>0</workers></settings>");

    let settings = Settings::from_file(&path).expect("clamped file loads");
    assert_eq!(settings.workers(), 1);
}

#[test]
fn test_padded_suspensions_trim_and_tokenize() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_settings(
        temp.path(),
        "<settings><suspensions> foo   bar </suspensions></settings>",
    );

    let settings = Settings::from_file(&path).expect("file loads");
    assert_eq!(settings.suspensions(), vec!["foo", "bar"]);
}

#[test]
fn test_broken_markup_fails_with_composed_error() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_settings(temp.path(), "<settings><workers>3</workers>");

    let err: SettingsError =
        Settings::from_file(&path).expect_err("malformed file must fail the whole load");
    assert!(err.message().starts_with("The settings file is incorrect:"));
    assert!(err.message().lines().count() >= 2);
    assert!(err.cause().is_some());
}

#[test]
fn test_type_mismatch_fails_with_cause() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_settings(
        temp.path(),
        "<settings><normalizationTime>soon</normalizationTime></settings>",
    );

    let err = Settings::from_file(&path).expect_err("non-integer content must fail binding");
    assert!(!err.message().is_empty());
    assert!(err.cause().is_some());
}
