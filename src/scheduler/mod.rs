use crate::core::access::ensure_can_mutate;
use crate::core::aliases::ScheduleId;
use crate::core::context::AppContext;
use crate::core::models::{ChangeSet, ScheduleChange, User};
use crate::core::transaction;
use crate::errors::{Error, Result};
use crate::logging::{LogTarget, Logger};
use crate::scheduler::cascade::{CascadeObserver, CascadePolicy, Placement, make_cascade_policy};
use crate::scheduler::drag::DropPoint;
use chrono::NaiveDate;

pub mod availability;
pub mod calendar;
pub mod cascade;
pub mod drag;
pub mod lanes;
pub mod summary;
pub mod timeline;

struct LoggerObserver {
    logger: Logger,
}

impl CascadeObserver for LoggerObserver {
    fn placed(&self, change: &ScheduleChange, placement: Placement) {
        let how = match placement {
            Placement::Moved => "moved",
            Placement::Pushed => "pushed",
            Placement::Shifted => "shifted",
        };
        self.logger.debug(format!(
            "{} schedule {} ({}) {} -> {}",
            how, change.schedule_id, change.stage, change.original, change.new
        ));
    }
}

/// Drag-and-drop rescheduling: snapshot, cascade, preview, commit.
///
/// Planning never writes; only `commit` touches the repository, using the
/// configured apply mode.
pub struct Planner<'a> {
    ctx: &'a mut AppContext,
    policy: Box<dyn CascadePolicy>,
    observer: LoggerObserver,
}

impl<'a> Planner<'a> {
    pub fn new(ctx: &'a mut AppContext) -> Self {
        let policy = make_cascade_policy(ctx.config.cascade_mode());
        Self::with_policy(ctx, policy)
    }

    pub fn with_policy(ctx: &'a mut AppContext, policy: Box<dyn CascadePolicy>) -> Self {
        let observer = LoggerObserver {
            logger: ctx.logger.clone(),
        };
        Self {
            ctx,
            policy,
            observer,
        }
    }

    /// Changes needed to start `schedule_id` on `new_start`. Empty when the date is unchanged.
    pub fn plan_move(
        &self,
        actor: &User,
        schedule_id: ScheduleId,
        new_start: NaiveDate,
    ) -> Result<ChangeSet> {
        let moved = self.ctx.schedule(schedule_id)?.clone();
        ensure_can_mutate(&moved, actor)?;

        let delta = drag::delta_days(moved.start(), new_start);
        if delta == 0 {
            return Ok(ChangeSet::new(0));
        }
        calendar::checked_add_days(moved.end(), delta)?;

        let snapshot = self.ctx.snapshot();
        let changes = self
            .policy
            .cascade(&moved, delta, &snapshot, &self.observer);
        self.ctx.logger.debug(format!(
            "planned {} change(s) for schedule {} by {} day(s)",
            changes.len(),
            schedule_id,
            delta
        ));
        Ok(changes)
    }

    pub fn plan_drop(
        &self,
        actor: &User,
        schedule_id: ScheduleId,
        drop: &DropPoint,
    ) -> Result<ChangeSet> {
        self.plan_move(actor, schedule_id, drop.date()?)
    }

    /// Write a confirmed change set. Returns how many schedules were written.
    pub fn commit(&mut self, actor: &User, changes: &ChangeSet) -> Result<usize> {
        let Some(moved) = changes.moved() else {
            return Ok(0);
        };
        let current = self
            .ctx
            .schedules
            .get(moved.schedule_id)
            .map_err(|_| Error::not_found(format!("schedule {}", moved.schedule_id)))?;
        ensure_can_mutate(current, actor)?;

        let mode = self.ctx.config.apply_mode();
        match transaction::apply(mode, &mut self.ctx.schedules, changes) {
            Ok(written) => {
                self.ctx.logger.info(
                    format!(
                        "{} rescheduled {} schedule(s) starting with {} ({} mode).",
                        actor.username, written, moved.schedule_id, mode
                    ),
                    LogTarget::FileOnly,
                );
                Ok(written)
            }
            Err(err) => {
                self.ctx
                    .logger
                    .error(format!("Reschedule failed: {err}"), LogTarget::FileOnly);
                Err(err)
            }
        }
    }
}
