use crate::core::models::Schedule;
use crate::core::status::effective_status;
use crate::core::types::{Stage, Status};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Dashboard counters over schedules that are still ahead or running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub per_stage: BTreeMap<Stage, usize>,
    pub scheduled: usize,
    pub in_progress: usize,
}

impl Summary {
    pub fn of(schedules: &[Schedule], today: NaiveDate) -> Self {
        let mut summary = Summary::default();
        for s in schedules {
            let status = effective_status(s, today);
            match status {
                Status::Scheduled => summary.scheduled += 1,
                Status::InProgress => summary.in_progress += 1,
                Status::Completed | Status::Cancelled => continue,
            }
            summary.total += 1;
            *summary.per_stage.entry(s.stage).or_default() += 1;
        }
        summary
    }

    pub fn for_stage(&self, stage: Stage) -> usize {
        self.per_stage.get(&stage).copied().unwrap_or(0)
    }
}
