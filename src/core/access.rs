use crate::core::models::{Schedule, User};
use crate::errors::{Error, Result};

/// Admins may touch anything; everyone else only what they are assigned to.
pub fn can_mutate(schedule: &Schedule, actor: &User) -> bool {
    actor.is_admin() || schedule.assignee_id == actor.id
}

pub fn ensure_can_mutate(schedule: &Schedule, actor: &User) -> Result<()> {
    if can_mutate(schedule, actor) {
        Ok(())
    } else {
        Err(Error::Forbidden {
            actor: actor.id,
            schedule_id: schedule.id,
        })
    }
}
