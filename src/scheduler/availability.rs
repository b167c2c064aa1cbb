use crate::core::aliases::{ScheduleId, SupplierId};
use crate::core::models::Schedule;
use crate::core::types::{DateRange, Stage};

/// A request to book `range` at a supplier for one stage.
#[derive(Debug, Clone, Copy)]
pub struct SlotQuery {
    pub supplier_id: SupplierId,
    pub stage: Stage,
    pub range: DateRange,
    /// The schedule being edited, which must not conflict with itself.
    pub exclude: Option<ScheduleId>,
}

impl SlotQuery {
    pub fn new(supplier_id: SupplierId, stage: Stage, range: DateRange) -> Self {
        Self {
            supplier_id,
            stage,
            range,
            exclude: None,
        }
    }

    pub fn excluding(mut self, id: ScheduleId) -> Self {
        self.exclude = Some(id);
        self
    }

    fn blocks(&self, s: &Schedule) -> bool {
        s.supplier_id == self.supplier_id
            && s.stage == self.stage
            && !s.is_terminal()
            && Some(s.id) != self.exclude
            && self.range.overlaps(&s.range)
    }
}

/// Non-terminal bookings that overlap the queried slot, in input order.
pub fn conflicts<'a, I>(schedules: I, query: &SlotQuery) -> Vec<&'a Schedule>
where
    I: IntoIterator<Item = &'a Schedule>,
{
    schedules.into_iter().filter(|s| query.blocks(s)).collect()
}

pub fn is_available<'a, I>(schedules: I, query: &SlotQuery) -> bool
where
    I: IntoIterator<Item = &'a Schedule>,
{
    !schedules.into_iter().any(|s| query.blocks(s))
}
