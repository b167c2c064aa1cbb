use stitchplan::config::Config;
use stitchplan::core::types::{ApplyMode, CascadeMode};

use crate::common::{
    make_temp_dir, normalized_lines, read_log_contents, run_cli, shop_dir, write_config,
};
use std::fs;

#[test]
fn config_lists_every_key() {
    let dir = shop_dir("config");
    let output = run_cli(&dir, &["config"]);
    assert!(output.status.success());

    let lines = normalized_lines(&output.stdout);
    let keys = [
        "DAY_WIDTH",
        "PADDING_BEFORE",
        "PADDING_AFTER",
        "CASCADE_MODE",
        "APPLY_MODE",
        "TODAY",
        "FILE_LOGGING_ENABLED",
    ];
    for key in keys {
        assert!(lines.iter().any(|l| l.starts_with(key)), "missing {key}");
    }
}

#[test]
fn config_set_is_saved_and_logged() {
    let dir = shop_dir("config");
    let output = run_cli(&dir, &["config", "apply_mode", "sequential"]);
    assert!(output.status.success());
    assert!(
        normalized_lines(&output.stdout)
            .iter()
            .any(|l| l == "Changed APPLY_MODE from 'atomic' to 'sequential'.")
    );

    let cfg = Config::load_from(dir.join("config.json")).unwrap();
    assert_eq!(cfg.apply_mode(), ApplyMode::Sequential);
    assert_eq!(cfg.cascade_mode(), CascadeMode::Chain);

    let log = read_log_contents(&dir).expect("log file should exist");
    assert!(log.contains("Changed APPLY_MODE from 'atomic' to 'sequential'."));
}

#[test]
fn invalid_value_leaves_file_alone() {
    let dir = shop_dir("config");
    let before = fs::read_to_string(dir.join("config.json")).unwrap();

    let output = run_cli(&dir, &["config", "DAY_WIDTH", "wide"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid day width: 'wide'."));
    assert_eq!(fs::read_to_string(dir.join("config.json")).unwrap(), before);
}

#[test]
fn disabling_file_logging_stops_log_files() {
    let dir = make_temp_dir("config");
    write_config(&dir, "chain", "atomic");
    let off = run_cli(&dir, &["config", "FILE_LOGGING_ENABLED", "no"]);
    assert!(off.status.success());
    let _ = fs::remove_dir_all(dir.join("logs"));

    let listed = run_cli(&dir, &["list"]);
    assert!(listed.status.success());
    assert!(read_log_contents(&dir).is_none());
}

#[test]
fn invalid_json_is_reported() {
    let dir = make_temp_dir("config");
    fs::write(dir.join("config.json"), "{ not json").unwrap();
    let output = run_cli(&dir, &["list"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid JSON in 'config.json'"));
}
