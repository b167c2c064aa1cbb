use chrono::{Datelike, NaiveDate, Weekday};

pub trait NaiveDateExt {
    fn is_weekend(&self) -> bool;
    /// `(year, month)` pair used to bucket timeline days into month headers.
    fn month_key(&self) -> (i32, u32);
}

impl NaiveDateExt for NaiveDate {
    fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    fn month_key(&self) -> (i32, u32) {
        (self.year(), self.month())
    }
}
