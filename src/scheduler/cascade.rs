use crate::core::models::{ChangeSet, Schedule, ScheduleChange};
use crate::core::types::{CascadeMode, DateRange};
use crate::scheduler::calendar;
use chrono::NaiveDate;

/// Why a schedule ended up where it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The dragged schedule itself.
    Moved,
    /// Pushed to the day after the previous schedule's new end.
    Pushed,
    /// Shifted by the drag delta, keeping its spacing to the previous stage.
    Shifted,
}

/// Observer to capture cascade placements (e.g., for logging).
pub trait CascadeObserver {
    fn placed(&self, change: &ScheduleChange, placement: Placement);
}

/// Observer that ignores everything.
pub struct Silent;

impl CascadeObserver for Silent {
    fn placed(&self, _change: &ScheduleChange, _placement: Placement) {}
}

pub trait CascadePolicy {
    /// Compute the change set for dragging `moved` by `delta_days` against `snapshot`.
    ///
    /// Never mutates the snapshot; `snapshot` may include `moved` itself.
    fn cascade(
        &self,
        moved: &Schedule,
        delta_days: i64,
        snapshot: &[Schedule],
        observer: &dyn CascadeObserver,
    ) -> ChangeSet;
}

fn push_after(last_end: NaiveDate, range: &DateRange) -> DateRange {
    range.starting_at(calendar::add_days(last_end, 1))
}

fn emit(
    out: &mut ChangeSet,
    observer: &dyn CascadeObserver,
    schedule: &Schedule,
    new: DateRange,
    placement: Placement,
) -> NaiveDate {
    let change = ScheduleChange::new(schedule, new);
    observer.placed(&change, placement);
    out.push(change);
    new.end()
}

/// Collision-driven reflow inside one supplier's queue.
///
/// Dragging earlier (or not at all) only moves the dragged bar. Dragging later
/// pushes each following bar that now collides, stopping at the first gap.
pub struct SupplierRipple;

impl CascadePolicy for SupplierRipple {
    fn cascade(
        &self,
        moved: &Schedule,
        delta_days: i64,
        snapshot: &[Schedule],
        observer: &dyn CascadeObserver,
    ) -> ChangeSet {
        let mut out = ChangeSet::new(delta_days);
        let mut last_end = emit(
            &mut out,
            observer,
            moved,
            moved.range.shifted(delta_days),
            Placement::Moved,
        );

        if delta_days <= 0 {
            return out;
        }

        let mut subsequent: Vec<&Schedule> = snapshot
            .iter()
            .filter(|s| {
                s.id != moved.id
                    && s.supplier_id == moved.supplier_id
                    && s.start() >= moved.start()
                    && !s.is_terminal()
            })
            .collect();
        subsequent.sort_by_key(|s| s.start());

        for s in subsequent {
            if s.start() > last_end {
                break;
            }
            last_end = emit(
                &mut out,
                observer,
                s,
                push_after(last_end, &s.range),
                Placement::Pushed,
            );
        }
        out
    }
}

/// Stage-driven reflow across one manufacturing order.
///
/// Downstream stages (strictly later in the pipeline) of the same article and
/// delivery week follow the dragged stage. Each takes the uniform shift when
/// that lands strictly after the previous stage's new end, and is pushed to the
/// day after it otherwise. Every downstream member is visited.
pub struct ChainRipple;

impl CascadePolicy for ChainRipple {
    fn cascade(
        &self,
        moved: &Schedule,
        delta_days: i64,
        snapshot: &[Schedule],
        observer: &dyn CascadeObserver,
    ) -> ChangeSet {
        let mut out = ChangeSet::new(delta_days);
        let mut last_end = emit(
            &mut out,
            observer,
            moved,
            moved.range.shifted(delta_days),
            Placement::Moved,
        );

        let Some(key) = moved.chain_key() else {
            return out;
        };

        let mut downstream: Vec<&Schedule> = snapshot
            .iter()
            .filter(|s| {
                s.id != moved.id
                    && !s.is_terminal()
                    && s.chain_key().as_ref() == Some(&key)
                    && s.stage.is_downstream_of(moved.stage)
            })
            .collect();
        downstream.sort_by_key(|s| s.stage.rank());

        for s in downstream {
            if s.start() <= last_end {
                last_end = emit(
                    &mut out,
                    observer,
                    s,
                    push_after(last_end, &s.range),
                    Placement::Pushed,
                );
                continue;
            }

            let shifted = s.range.shifted(delta_days);
            last_end = if shifted.start() > last_end {
                emit(&mut out, observer, s, shifted, Placement::Shifted)
            } else {
                emit(
                    &mut out,
                    observer,
                    s,
                    push_after(last_end, &s.range),
                    Placement::Pushed,
                )
            };
        }
        out
    }
}

pub fn make_cascade_policy(mode: CascadeMode) -> Box<dyn CascadePolicy> {
    match mode {
        CascadeMode::Chain => Box::new(ChainRipple),
        CascadeMode::Supplier => Box::new(SupplierRipple),
    }
}
