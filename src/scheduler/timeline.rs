use crate::core::aliases::SupplierId;
use crate::core::models::Schedule;
use crate::core::types::DateRange;
use crate::extensions::chrono::NaiveDateExt;
use crate::scheduler::calendar;
use chrono::NaiveDate;

/// Days shown around today when there is nothing to draw.
const EMPTY_BEFORE: i64 = 7;
const EMPTY_AFTER: i64 = 28;

/// Visible window: earliest start minus `before` through latest end plus `after`.
pub fn visible_range(
    schedules: &[Schedule],
    before: u32,
    after: u32,
    today: NaiveDate,
) -> DateRange {
    let span = schedules
        .iter()
        .fold(None, |acc: Option<(NaiveDate, NaiveDate)>, s| match acc {
            None => Some((s.start(), s.end())),
            Some((lo, hi)) => Some((lo.min(s.start()), hi.max(s.end()))),
        });

    let (start, end) = match span {
        Some((lo, hi)) => (
            calendar::add_days(lo, -i64::from(before)),
            calendar::add_days(hi, i64::from(after)),
        ),
        None => (
            calendar::add_days(today, -EMPTY_BEFORE),
            calendar::add_days(today, EMPTY_AFTER),
        ),
    };
    DateRange::covering(start, end)
}

/// Every day of `range`, in order.
pub fn days(range: &DateRange) -> Vec<NaiveDate> {
    range.start().iter_days().take(range.duration() as usize).collect()
}

/// Run of consecutive days in one calendar month, for the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSpan {
    pub year: i32,
    pub month: u32,
    pub days: usize,
}

impl MonthSpan {
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_default()
    }
}

pub fn month_spans(days: &[NaiveDate]) -> Vec<MonthSpan> {
    let mut spans: Vec<MonthSpan> = Vec::new();
    for day in days {
        let (year, month) = day.month_key();
        match spans.last_mut() {
            Some(span) if span.year == year && span.month == month => span.days += 1,
            _ => spans.push(MonthSpan {
                year,
                month,
                days: 1,
            }),
        }
    }
    spans
}

/// One timeline row: a supplier and its bookings sorted by start.
#[derive(Debug, Clone)]
pub struct SupplierRow<'a> {
    pub supplier_id: SupplierId,
    pub supplier_name: String,
    pub schedules: Vec<&'a Schedule>,
}

/// Rows in first-seen supplier order.
pub fn group_by_supplier(schedules: &[Schedule]) -> Vec<SupplierRow<'_>> {
    let mut rows: Vec<SupplierRow<'_>> = Vec::new();
    for s in schedules {
        match rows.iter_mut().find(|r| r.supplier_id == s.supplier_id) {
            Some(row) => row.schedules.push(s),
            None => rows.push(SupplierRow {
                supplier_id: s.supplier_id,
                supplier_name: if s.supplier_name.trim().is_empty() {
                    format!("Supplier {}", s.supplier_id)
                } else {
                    s.supplier_name.clone()
                },
                schedules: vec![s],
            }),
        }
    }
    for row in &mut rows {
        row.schedules.sort_by_key(|s| s.start());
    }
    rows
}

/// Horizontal placement of a bar in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub left: f64,
    pub width: f64,
}

/// Bars are drawn 2px narrower than their days so neighbours stay distinct.
pub fn bar_geometry(origin: NaiveDate, range: &DateRange, day_width: f64) -> BarGeometry {
    let offset = calendar::day_diff(origin, range.start()) as f64;
    BarGeometry {
        left: offset * day_width,
        width: range.duration() as f64 * day_width - 2.0,
    }
}
