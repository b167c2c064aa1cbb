use super::{Config, ConfigKey};
use crate::core::types::{ApplyMode, CascadeMode};
use crate::errors::Error;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_path() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let uniq = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("stitchplan-config-test-{nanos}-{uniq}.json"))
}

fn sample_config_file(path: &std::path::Path) {
    let json = r#"{
  "day_width": { "value": 28, "description": "px per day" },
  "padding_before": { "value": 3, "description": "before" },
  "padding_after": { "value": 10, "description": "after" },
  "cascade_mode": { "value": "supplier", "description": "mode" },
  "apply_mode": { "value": "sequential", "description": "apply" },
  "today": { "value": "2025-01-06", "description": "today" },
  "file_logging_enabled": { "value": "False", "description": "file logging" }
}"#;
    fs::write(path, json).unwrap();
}

#[test]
fn load_from_reads_every_key() {
    let path = temp_path();
    sample_config_file(&path);
    let cfg = Config::load_from(&path).expect("config should load");

    assert_eq!(cfg.day_width(), 28);
    assert_eq!(cfg.padding_before(), 3);
    assert_eq!(cfg.padding_after(), 10);
    assert_eq!(cfg.cascade_mode(), CascadeMode::Supplier);
    assert_eq!(cfg.apply_mode(), ApplyMode::Sequential);
    assert_eq!(cfg.today(), NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
    assert!(!cfg.file_logging_enabled());

    let rows = cfg.rows();
    assert_eq!(rows.len(), 7);
    assert!(rows.iter().any(|(k, _, v)| k == "DAY_WIDTH" && v == "28"));
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let path = temp_path();
    fs::write(&path, "{}").unwrap();
    let cfg = Config::load_from(&path).unwrap();

    assert_eq!(cfg.day_width(), 40);
    assert_eq!(cfg.padding_before(), 7);
    assert_eq!(cfg.padding_after(), 14);
    assert_eq!(cfg.cascade_mode(), CascadeMode::Chain);
    assert_eq!(cfg.apply_mode(), ApplyMode::Atomic);
    assert!(cfg.file_logging_enabled());
}

#[test]
fn load_from_reports_missing_file() {
    let path = temp_path();
    let err = Config::load_from(&path).unwrap_err();
    match err {
        Error::Config(msg) => {
            let expected = format!("Configuration file '{}' not found.", path.display());
            assert_eq!(msg, expected);
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn load_from_reports_invalid_json() {
    let path = temp_path();
    fs::write(&path, "{").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    match err {
        Error::Config(msg) => {
            let prefix = format!("Invalid JSON in '{}':", path.display());
            assert!(msg.starts_with(&prefix));
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn set_persists_and_records_last_change() {
    let path = temp_path();
    sample_config_file(&path);
    let mut cfg = Config::load_from(&path).unwrap();

    cfg.set("cascade_mode", "chain").unwrap();
    assert_eq!(cfg.cascade_mode(), CascadeMode::Chain);
    assert_eq!(
        cfg.take_last_change(),
        Some((
            "CASCADE_MODE".to_string(),
            "supplier".to_string(),
            "chain".to_string()
        ))
    );
    assert!(cfg.take_last_change().is_none());

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.cascade_mode(), CascadeMode::Chain);
}

#[test]
fn invalid_value_leaves_config_untouched() {
    let path = temp_path();
    sample_config_file(&path);
    let mut cfg = Config::load_from(&path).unwrap();

    assert!(cfg.set_key(ConfigKey::DayWidth, "0").is_err());
    assert!(cfg.set_key(ConfigKey::ApplyMode, "eventually").is_err());
    assert_eq!(cfg.day_width(), 28);
    assert_eq!(cfg.apply_mode(), ApplyMode::Sequential);
    assert!(cfg.take_last_change().is_none());
}

#[test]
fn unknown_key_lists_valid_keys() {
    let mut cfg = Config::with_defaults(temp_path());
    let err = cfg.set("colour", "blue").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Unknown configuration key 'colour'"));
    assert!(msg.contains("CASCADE_MODE"));
}

#[test]
fn today_can_be_cleared() {
    let path = temp_path();
    sample_config_file(&path);
    let mut cfg = Config::load_from(&path).unwrap();
    cfg.set_key(ConfigKey::Today, "-").unwrap();
    assert!(cfg.view().today.value.is_none());
}
