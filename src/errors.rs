use thiserror::Error;

// Re-export a simple Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

use crate::core::aliases::{ScheduleId, SupplierId, UserId};
use crate::core::types::Stage;

/// Everything the planner, the booking desk and the ambient layers can fail with.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Parsing & Routing --------------------------------------------------
    /// Malformed CLI tokens, dates, enum names.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No matching global command.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    // ---- Scheduling / Domain -----------------------------------------------
    /// Rejected before any availability check or cascade runs.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The supplier already has a non-terminal booking in the requested interval.
    #[error(
        "Supplier {supplier_id} is not available for {stage} in the requested range (conflicts with {conflicting:?})."
    )]
    Conflict {
        supplier_id: SupplierId,
        stage: Stage,
        conflicting: Vec<ScheduleId>,
    },

    /// The actor is neither an admin nor the assignee.
    #[error("User {actor} may not modify schedule {schedule_id}.")]
    Forbidden {
        actor: UserId,
        schedule_id: ScheduleId,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    /// The stored dates no longer match the snapshot the change was computed from.
    #[error("Schedule {schedule_id} changed since the cascade was computed.")]
    StaleSnapshot { schedule_id: ScheduleId },

    /// Sequential apply stopped part way; earlier writes stay applied.
    #[error("Applied {applied} of {total} schedule change(s) before failing: {reason}")]
    PartialApply {
        applied: usize,
        total: usize,
        reason: String,
    },

    /// Atomic apply rolled back; nothing was written.
    #[error("Rejected all {total} schedule change(s): {reason}")]
    CascadeRejected { total: usize, reason: String },

    // ---- Config -------------------------------------------------------------
    /// Any issue initializing/reading config (file missing, invalid JSON, etc.)
    #[error("Config error: {0}")]
    Config(String),

    /// Specific missing config item.
    #[error("Missing configuration item: {item}")]
    ConfigItemMissing { item: &'static str },

    // ---- Plumbing / Wrappers ------------------------------------------------
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ----------------------- Convenience constructors ----------------------------

impl Error {
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
    pub fn unknown<S: Into<String>>(cmd: S) -> Self {
        Error::UnknownCommand(cmd.into())
    }
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::Validation(msg.into())
    }
    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Error::NotFound(what.into())
    }
}

// ----------------------- Small result helpers --------------------------------

/// Map an `Option<T>` into `Result<T, Error::Parse>` with a custom message.
pub fn require_parse<T, S: Into<String>>(opt: Option<T>, msg: S) -> Result<T> {
    opt.ok_or_else(|| Error::Parse(msg.into()))
}

/// Map an `Option<T>` into `Result<T, Error::Validation>`; used for required booking fields.
pub fn require_field<T>(opt: Option<T>, field: &str) -> Result<T> {
    opt.ok_or_else(|| Error::Validation(format!("Field '{field}' is required.")))
}

/// Map an `Option<T>` into `Result<T, Error::ConfigItemMissing>` with a static key.
pub fn require_config_item<T>(opt: Option<T>, item: &'static str) -> Result<T> {
    opt.ok_or_else(|| Error::ConfigItemMissing { item })
}
