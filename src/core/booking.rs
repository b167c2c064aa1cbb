use crate::core::access::ensure_can_mutate;
use crate::core::aliases::{ArticleId, ScheduleId, SupplierId, UserId};
use crate::core::context::AppContext;
use crate::core::models::{Schedule, User};
use crate::core::repository::Sort;
use crate::core::types::{DateRange, Stage, Status};
use crate::errors::{Error, Result, require_field};
use crate::extensions::string::NonBlank;
use crate::logging::LogTarget;
use crate::scheduler::availability::{SlotQuery, conflicts};
use chrono::NaiveDate;

/// Fields of a create or full update. `None` means the field was not supplied.
#[derive(Debug, Clone, Default)]
pub struct BookingRequest {
    pub article_id: Option<ArticleId>,
    pub quantity: Option<u32>,
    pub assignee_id: Option<UserId>,
    pub delivery_week: Option<String>,
    pub supplier_id: Option<SupplierId>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub description: Option<String>,
    pub notes: Option<String>,
    /// Only honoured by updates.
    pub status: Option<Status>,
}

/// A request that passed validation, with display names resolved.
struct Resolved {
    article_id: ArticleId,
    article_name: String,
    quantity: u32,
    assignee_id: UserId,
    delivery_week: String,
    supplier_id: SupplierId,
    supplier_name: String,
    range: DateRange,
}

/// Stage-specific create, update, cancel and delete over the context's repositories.
pub struct BookingDesk<'a> {
    ctx: &'a mut AppContext,
}

impl<'a> BookingDesk<'a> {
    pub fn new(ctx: &'a mut AppContext) -> Self {
        Self { ctx }
    }

    fn resolve(&self, stage: Stage, req: &BookingRequest) -> Result<Resolved> {
        let article_id = require_field(req.article_id, "article_id")?;
        let quantity = require_field(req.quantity, "quantity")?;
        let assignee_id = require_field(req.assignee_id, "assignee_id")?;
        let delivery_week = require_field(
            req.delivery_week.non_blank(),
            "delivery_week",
        )?;
        let supplier_id = require_field(req.supplier_id, "supplier_id")?;
        let start = require_field(req.start, "start")?;
        let end = require_field(req.end, "end")?;

        if quantity == 0 {
            return Err(Error::validation("Quantity must be positive."));
        }
        let range = DateRange::new(start, end)?;

        let article = self
            .ctx
            .articles
            .get(article_id)
            .map_err(|_| Error::validation(format!("Unknown article {article_id}.")))?;
        let supplier = self
            .ctx
            .suppliers
            .get(supplier_id)
            .map_err(|_| Error::validation(format!("Unknown supplier {supplier_id}.")))?;
        if supplier.stage != stage {
            return Err(Error::validation(format!(
                "Supplier '{}' handles {}, not {}.",
                supplier.name, supplier.stage, stage
            )));
        }
        if !self.ctx.users.contains(assignee_id) {
            return Err(Error::validation(format!("Unknown assignee {assignee_id}.")));
        }

        Ok(Resolved {
            article_id,
            article_name: article.name.clone(),
            quantity,
            assignee_id,
            delivery_week: delivery_week.trim().to_string(),
            supplier_id,
            supplier_name: supplier.name.clone(),
            range,
        })
    }

    fn ensure_available(
        &self,
        stage: Stage,
        r: &Resolved,
        exclude: Option<ScheduleId>,
    ) -> Result<()> {
        let mut query = SlotQuery::new(r.supplier_id, stage, r.range);
        if let Some(id) = exclude {
            query = query.excluding(id);
        }
        let supplier_id = r.supplier_id;
        let booked = self
            .ctx
            .schedules
            .query()
            .r#where(move |s| s.supplier_id == supplier_id && s.stage == stage)
            .order(Sort::IdAsc)
            .collect();
        let clashing: Vec<ScheduleId> = conflicts(booked, &query).iter().map(|s| s.id).collect();
        if clashing.is_empty() {
            return Ok(());
        }
        Err(Error::Conflict {
            supplier_id: r.supplier_id,
            stage,
            conflicting: clashing,
        })
    }

    pub fn book(&mut self, actor: &User, stage: Stage, req: &BookingRequest) -> Result<ScheduleId> {
        let r = self.resolve(stage, req)?;
        self.ensure_available(stage, &r, None)?;

        let mut schedule = Schedule::new(stage, r.supplier_id, r.range)
            .for_order(r.article_id, r.article_name, r.delivery_week)
            .assigned_to(r.assignee_id)
            .with_quantity(r.quantity)
            .with_supplier_name(r.supplier_name);
        schedule.description = req.description.non_blank();
        schedule.notes = req.notes.non_blank();

        let id = self.ctx.schedules.insert(schedule).id;
        self.ctx.logger.info(
            format!("{} booked {} schedule {} ({}).", actor.username, stage, id, r.range),
            LogTarget::FileOnly,
        );
        Ok(id)
    }

    /// Replaces every editable field; the stage never changes.
    pub fn update(&mut self, actor: &User, id: ScheduleId, req: &BookingRequest) -> Result<()> {
        let stage = {
            let existing = self.ctx.schedule(id)?;
            ensure_can_mutate(existing, actor)?;
            existing.stage
        };
        let r = self.resolve(stage, req)?;
        self.ensure_available(stage, &r, Some(id))?;

        let schedule = self.ctx.schedules.get_mut(id)?;
        schedule.article_id = r.article_id;
        schedule.article_name = r.article_name;
        schedule.quantity = r.quantity;
        schedule.assignee_id = r.assignee_id;
        schedule.delivery_week = r.delivery_week;
        schedule.supplier_id = r.supplier_id;
        schedule.supplier_name = r.supplier_name;
        schedule.range = r.range;
        schedule.description = req.description.non_blank();
        schedule.notes = req.notes.non_blank();
        if let Some(status) = req.status {
            schedule.status = status;
        }

        self.ctx.logger.info(
            format!("{} updated schedule {}.", actor.username, id),
            LogTarget::FileOnly,
        );
        Ok(())
    }

    pub fn cancel(&mut self, actor: &User, id: ScheduleId) -> Result<()> {
        ensure_can_mutate(self.ctx.schedule(id)?, actor)?;
        self.ctx.schedules.get_mut(id)?.status = Status::Cancelled;
        self.ctx.logger.info(
            format!("{} cancelled schedule {}.", actor.username, id),
            LogTarget::FileOnly,
        );
        Ok(())
    }

    pub fn delete(&mut self, actor: &User, id: ScheduleId) -> Result<Schedule> {
        ensure_can_mutate(self.ctx.schedule(id)?, actor)?;
        let removed = self.ctx.schedules.delete(id)?;
        self.ctx.logger.warn(
            format!("{} deleted schedule {}.", actor.username, id),
            LogTarget::FileOnly,
        );
        Ok(removed)
    }
}
