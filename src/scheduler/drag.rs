use crate::errors::Result;
use crate::scheduler::calendar;
use chrono::NaiveDate;

/// Where a bar was released on a day-indexed timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropPoint {
    /// Date drawn at x = 0.
    pub origin: NaiveDate,
    /// Pixels per day.
    pub day_width: f64,
    /// Pointer x at release, relative to the timeline's first day column.
    pub drop_x: f64,
    /// Pointer x inside the bar when the drag started.
    pub grab_offset: f64,
}

impl DropPoint {
    pub fn new(origin: NaiveDate, day_width: f64, drop_x: f64, grab_offset: f64) -> Self {
        Self {
            origin,
            day_width,
            drop_x,
            grab_offset,
        }
    }

    /// Day column the bar's left edge landed in; may be negative or past the end.
    pub fn day_index(&self) -> i64 {
        round_half_up((self.drop_x - self.grab_offset) / self.day_width)
    }

    /// New start date for the dropped bar. No clamping to the visible range;
    /// a drop beyond the representable calendar is a validation error.
    pub fn date(&self) -> Result<NaiveDate> {
        calendar::checked_add_days(self.origin, self.day_index())
    }
}

/// Halves round toward positive infinity, matching browser `Math.round`.
fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Day delta the cascade should apply when a bar starting at `original` now starts at `new`.
pub fn delta_days(original: NaiveDate, new: NaiveDate) -> i64 {
    calendar::day_diff(original, new)
}
