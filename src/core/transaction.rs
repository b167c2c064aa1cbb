use crate::core::models::{ChangeSet, Schedule, ScheduleChange};
use crate::core::repository::Repository;
use crate::core::types::ApplyMode;
use crate::errors::{Error, Result};

/// Write seam for confirmed schedule changes.
pub trait ScheduleWriter {
    /// Move one schedule to `change.new`; fails if it vanished or drifted from `change.original`.
    fn apply_change(&mut self, change: &ScheduleChange) -> Result<()>;
}

fn ensure_fresh(current: &Schedule, change: &ScheduleChange) -> Result<()> {
    if current.range != change.original {
        return Err(Error::StaleSnapshot {
            schedule_id: change.schedule_id,
        });
    }
    Ok(())
}

fn missing(change: &ScheduleChange) -> Error {
    Error::not_found(format!("schedule {}", change.schedule_id))
}

impl ScheduleWriter for Repository<Schedule> {
    fn apply_change(&mut self, change: &ScheduleChange) -> Result<()> {
        let current = self
            .get_mut(change.schedule_id)
            .map_err(|_| missing(change))?;
        ensure_fresh(current, change)?;
        current.range = change.new;
        Ok(())
    }
}

/// All or nothing: every change is staged and checked before anything is committed.
pub fn apply_atomic(repo: &mut Repository<Schedule>, changes: &ChangeSet) -> Result<usize> {
    repo.begin_stage()?;

    let staged = changes.iter().try_for_each(|change| {
        if !repo.contains(change.schedule_id) {
            return Err(missing(change));
        }
        repo.stage_update(change.schedule_id, |s| {
            ensure_fresh(s, change)?;
            s.range = change.new;
            Ok(())
        })
    });

    match staged.and_then(|_| repo.commit_stage()) {
        Ok(written) => Ok(written),
        Err(err) => {
            repo.discard_stage();
            Err(Error::CascadeRejected {
                total: changes.len(),
                reason: err.to_string(),
            })
        }
    }
}

/// Write in order; stops at the first failure, leaving earlier writes in place.
pub fn apply_sequential<W>(writer: &mut W, changes: &ChangeSet) -> Result<usize>
where
    W: ScheduleWriter + ?Sized,
{
    for (applied, change) in changes.iter().enumerate() {
        if let Err(err) = writer.apply_change(change) {
            return Err(Error::PartialApply {
                applied,
                total: changes.len(),
                reason: err.to_string(),
            });
        }
    }
    Ok(changes.len())
}

pub fn apply(
    mode: ApplyMode,
    repo: &mut Repository<Schedule>,
    changes: &ChangeSet,
) -> Result<usize> {
    match mode {
        ApplyMode::Atomic => apply_atomic(repo, changes),
        ApplyMode::Sequential => apply_sequential(repo, changes),
    }
}
