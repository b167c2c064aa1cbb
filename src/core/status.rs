use crate::core::models::Schedule;
use crate::core::types::{DateRange, Status};
use chrono::NaiveDate;

/// Status as of `today`. Only `cancelled` survives from the stored value; every
/// other status follows from where `today` sits relative to the range.
pub fn derive_status(range: &DateRange, persisted: Status, today: NaiveDate) -> Status {
    if persisted == Status::Cancelled {
        return Status::Cancelled;
    }
    if today < range.start() {
        Status::Scheduled
    } else if today > range.end() {
        Status::Completed
    } else {
        Status::InProgress
    }
}

pub fn effective_status(schedule: &Schedule, today: NaiveDate) -> Status {
    derive_status(&schedule.range, schedule.status, today)
}
