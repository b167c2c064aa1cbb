use stitchplan::core::persist::{DataFile, build_data_file, load_data, save_data};

use crate::common::{build_context, make_temp_dir, range, run_cli, shop_dir, write_valid_config};
use std::fs;

#[test]
fn missing_data_file_starts_empty() {
    let dir = make_temp_dir("persist");
    write_valid_config(&dir);

    let output = run_cli(&dir, &["list"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No schedules booked."));
    assert!(!dir.join("data.json").exists());
}

#[test]
fn corrupt_data_file_is_reported() {
    let dir = make_temp_dir("persist");
    write_valid_config(&dir);
    fs::write(dir.join("data.json"), r#"{"schedules": [{"id": "one"}]}"#).unwrap();

    let output = run_cli(&dir, &["list"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load working data from data.json"));
}

#[test]
fn ids_survive_delete_and_reload() {
    let dir = shop_dir("persist");
    let output = run_cli(&dir, &["--as", "admin", "cancel", "2", "--delete"]);
    assert!(output.status.success());

    let mut ctx = build_context(&dir);
    assert!(ctx.schedule(2).is_err());
    assert_eq!(ctx.schedule(4).unwrap().range, range(14, 15));
    let copy = ctx.schedule(4).unwrap().clone();
    assert_eq!(ctx.schedules.insert(copy).id, 5);
}

#[test]
fn data_file_keeps_every_repository() {
    let dir = shop_dir("persist");
    let ctx = build_context(&dir);
    let copy = dir.join("backup").join("copy.json");
    save_data(&ctx, &copy).unwrap();

    let data: DataFile = serde_json::from_str(&fs::read_to_string(&copy).unwrap()).unwrap();
    assert_eq!(data.users.len(), 3);
    assert_eq!(data.suppliers.len(), 4);
    assert_eq!(data.articles.len(), 1);
    assert_eq!(data.schedules.len(), 4);

    let mut fresh = build_context(&make_temp_dir_with_config());
    load_data(&mut fresh, &copy).unwrap();
    assert_eq!(build_data_file(&fresh).schedules, data.schedules);
}

fn make_temp_dir_with_config() -> std::path::PathBuf {
    let dir = make_temp_dir("persist");
    write_valid_config(&dir);
    dir
}
