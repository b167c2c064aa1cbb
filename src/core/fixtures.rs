//! Shared data for unit tests: a small garment shop in January 2025.

use crate::config::{Config, ConfigKey};
use crate::core::aliases::{ArticleId, ScheduleId, SupplierId, UserId};
use crate::core::context::AppContext;
use crate::core::models::{Article, Schedule, Supplier, User};
use crate::core::types::{DateRange, Role, Stage};
use crate::logging::Logger;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const ADMIN: UserId = 1;
pub const RINA: UserId = 2;
pub const BUDI: UserId = 3;

pub const CUTTER: SupplierId = 1;
pub const SEWER: SupplierId = 2;
pub const PRINTER: SupplierId = 3;
pub const EMBROIDERER: SupplierId = 4;

pub const KAOS: ArticleId = 1;
pub const KEMEJA: ArticleId = 2;

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn temp_path(tag: &str, ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let uniq = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("stitchplan-{tag}-{nanos}-{uniq}.{ext}"))
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
}

pub fn range(start: u32, end: u32) -> DateRange {
    DateRange::new(day(start), day(end)).unwrap()
}

/// Context with today fixed to 2025-01-01, a capturing logger and no schedules.
pub fn make_ctx() -> AppContext {
    let mut config = Config::with_defaults(temp_path("config", "json"));
    config.set_key(ConfigKey::Today, "2025-01-01").unwrap();
    let mut ctx = AppContext::with_parts(
        config,
        Logger::capturing(),
        temp_path("data", "json"),
        std::env::temp_dir().join("stitchplan-test-logs"),
    );

    for (name, role) in [("admin", Role::Admin), ("rina", Role::Staff), ("budi", Role::Staff)] {
        ctx.users.insert(User::new(name, role));
    }
    for (name, stage) in [
        ("Potong Jaya", Stage::Cutting),
        ("Jahit Maju", Stage::Sewing),
        ("Sablon Prima", Stage::Printing),
        ("Bordir Indah", Stage::Embroidery),
    ] {
        ctx.suppliers.insert(Supplier::new(name, stage));
    }
    ctx.articles.insert(Article::new("Kaos Polos"));
    ctx.articles.insert(Article::new("Kemeja Batik"));
    ctx
}

fn supplier_for(stage: Stage) -> SupplierId {
    match stage {
        Stage::Cutting => CUTTER,
        Stage::Sewing => SEWER,
        Stage::Printing => PRINTER,
        Stage::Embroidery => EMBROIDERER,
    }
}

/// Unsaved schedule for `stage` at its default supplier, assigned to Rina.
pub fn schedule(stage: Stage, start: u32, end: u32) -> Schedule {
    Schedule::new(stage, supplier_for(stage), range(start, end)).assigned_to(RINA)
}

/// Schedule belonging to the Kaos Polos order for week W02.
pub fn chained(stage: Stage, start: u32, end: u32) -> Schedule {
    schedule(stage, start, end).for_order(KAOS, "Kaos Polos", "W02-2025")
}

pub fn add(ctx: &mut AppContext, schedule: Schedule) -> ScheduleId {
    ctx.schedules.insert(schedule).id
}

pub fn user(ctx: &AppContext, id: UserId) -> User {
    ctx.user(id).unwrap().clone()
}
