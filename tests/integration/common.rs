use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};

use stitchplan::core::context::AppContext;
use stitchplan::core::models::{Article, Schedule, Supplier, User};
use stitchplan::core::persist::{DataFile, load_data};
use stitchplan::core::types::{DateRange, Role, Stage};
use chrono::NaiveDate;

pub fn binary_path() -> String {
    let raw = PathBuf::from(env!("CARGO_BIN_EXE_stitchplan"));
    if raw.is_absolute() {
        return raw.to_string_lossy().to_string();
    }
    let from_manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&raw);
    if from_manifest.exists() {
        return from_manifest.to_string_lossy().to_string();
    }
    raw.to_string_lossy().to_string()
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "stitchplan-{prefix}-{}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = fs::create_dir_all(&dir);
    dir
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
}

pub fn range(start: u32, end: u32) -> DateRange {
    DateRange::new(day(start), day(end)).unwrap()
}

pub fn write_config(dir: &Path, cascade_mode: &str, apply_mode: &str) {
    let cfg = format!(
        r#"{{
      "day_width": {{ "value": 40, "description": "px per day" }},
      "padding_before": {{ "value": 7, "description": "before" }},
      "padding_after": {{ "value": 14, "description": "after" }},
      "cascade_mode": {{ "value": "{cascade_mode}", "description": "mode" }},
      "apply_mode": {{ "value": "{apply_mode}", "description": "apply" }},
      "today": {{ "value": "2025-01-01", "description": "today" }},
      "file_logging_enabled": {{ "value": "True", "description": "file logging" }}
    }}"#
    );
    fs::write(dir.join("config.json"), cfg).unwrap();
}

pub fn write_valid_config(dir: &Path) {
    write_config(dir, "chain", "atomic");
}

fn booking(id: i32, stage: Stage, supplier: (i32, &str), start: u32, end: u32) -> Schedule {
    let mut s = Schedule::new(stage, supplier.0, range(start, end))
        .assigned_to(2)
        .with_quantity(200)
        .with_supplier_name(supplier.1);
    s.id = id;
    s
}

/// Users admin/rina/budi, one supplier per stage, and the Kaos Polos W02 order:
/// 1 cutting 6-8, 2 sewing 10-13, 3 printing 15-16, plus 4 unchained sewing 14-15.
pub fn write_shop_data(dir: &Path) {
    let users = [("admin", Role::Admin), ("rina", Role::Staff), ("budi", Role::Staff)]
        .into_iter()
        .enumerate()
        .map(|(i, (name, role))| {
            let mut u = User::new(name, role);
            u.id = i as i32 + 1;
            u
        })
        .collect();
    let suppliers = [
        ("Potong Jaya", Stage::Cutting),
        ("Jahit Maju", Stage::Sewing),
        ("Sablon Prima", Stage::Printing),
        ("Bordir Indah", Stage::Embroidery),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, stage))| {
        let mut s = Supplier::new(name, stage);
        s.id = i as i32 + 1;
        s
    })
    .collect();

    let order = |s: Schedule| s.for_order(1, "Kaos Polos", "W02-2025");
    let data = DataFile {
        suppliers,
        articles: vec![Article::new("Kaos Polos")],
        users,
        schedules: vec![
            order(booking(1, Stage::Cutting, (1, "Potong Jaya"), 6, 8)),
            order(booking(2, Stage::Sewing, (2, "Jahit Maju"), 10, 13)),
            order(booking(3, Stage::Printing, (3, "Sablon Prima"), 15, 16)),
            booking(4, Stage::Sewing, (2, "Jahit Maju"), 14, 15),
        ],
    };
    fs::write(
        dir.join("data.json"),
        serde_json::to_string_pretty(&data).unwrap(),
    )
    .unwrap();
}

/// A directory with a chain-mode config and the shop data.
pub fn shop_dir(prefix: &str) -> PathBuf {
    let dir = make_temp_dir(prefix);
    write_valid_config(&dir);
    write_shop_data(&dir);
    dir
}

pub fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(binary_path())
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run binary")
}

fn strip_ansi_and_control(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\u{1b}' && matches!(chars.peek(), Some('[')) {
            let _ = chars.next();
            for nc in chars.by_ref() {
                if nc.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        if c.is_control() {
            continue;
        }
        out.push(c);
    }

    out
}

pub fn normalized_lines(buf: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(buf)
        .lines()
        .map(|l| strip_ansi_and_control(l).trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn build_context(dir: &Path) -> AppContext {
    let mut ctx = AppContext::new_with_paths(
        dir.join("config.json"),
        dir.join("data.json"),
        dir.join("logs"),
    )
    .expect("config should load");
    let data_path = ctx.data_path.clone();
    if data_path.exists() {
        load_data(&mut ctx, &data_path).expect("data should load");
    }
    ctx
}

/// Every session log under `dir/logs`, concatenated.
pub fn read_log_contents(dir: &Path) -> Option<String> {
    let entries = fs::read_dir(dir.join("logs")).ok()?;
    let contents: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter_map(|e| fs::read_to_string(e.path()).ok())
        .collect();
    if contents.is_empty() {
        None
    } else {
        Some(contents.join("\n"))
    }
}
