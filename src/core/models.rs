use crate::core::aliases::{ArticleId, ScheduleId, SupplierId, UserId};
use crate::core::types::{DateRange, Role, Stage, Status};
use crate::scheduler::calendar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub trait BaseEntity {
    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
}

macro_rules! impl_base_entity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl BaseEntity for $ty {
                fn id(&self) -> i32 {
                    self.id
                }
                fn set_id(&mut self, id: i32) {
                    self.id = id;
                }
            }
        )+
    };
}

// =========
// Schedule
// =========

/// One production booking for one stage at one supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub stage: Stage,
    pub article_id: ArticleId,
    #[serde(default)]
    pub article_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: u32,
    pub assignee_id: UserId,
    #[serde(default)]
    pub delivery_week: String,
    pub supplier_id: SupplierId,
    #[serde(default)]
    pub supplier_name: String,
    pub range: DateRange,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Identifies one manufacturing order across all of its stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainKey {
    pub article_id: ArticleId,
    pub delivery_week: String,
}

impl Schedule {
    pub fn new(stage: Stage, supplier_id: SupplierId, range: DateRange) -> Self {
        Self {
            id: 1,
            stage,
            article_id: 0,
            article_name: String::new(),
            description: None,
            quantity: 1,
            assignee_id: 0,
            delivery_week: String::new(),
            supplier_id,
            supplier_name: String::new(),
            range,
            status: Status::Scheduled,
            notes: None,
        }
    }

    pub fn for_order(
        mut self,
        article_id: ArticleId,
        article_name: impl Into<String>,
        delivery_week: impl Into<String>,
    ) -> Self {
        self.article_id = article_id;
        self.article_name = article_name.into();
        self.delivery_week = delivery_week.into();
        self
    }

    pub fn assigned_to(mut self, user_id: UserId) -> Self {
        self.assignee_id = user_id;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_supplier_name(mut self, name: impl Into<String>) -> Self {
        self.supplier_name = name.into();
        self
    }

    pub fn start(&self) -> NaiveDate {
        self.range.start()
    }

    pub fn end(&self) -> NaiveDate {
        self.range.end()
    }

    pub fn duration(&self) -> i64 {
        self.range.duration()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// `None` when the booking is not tied to an order (no article or blank week).
    pub fn chain_key(&self) -> Option<ChainKey> {
        let week = self.delivery_week.trim();
        if self.article_id <= 0 || week.is_empty() {
            return None;
        }
        Some(ChainKey {
            article_id: self.article_id,
            delivery_week: week.to_string(),
        })
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Schedule(id={}, stage={}, article='{}', week='{}', supplier={}, range={}, status={})",
            self.id,
            self.stage,
            self.article_name,
            self.delivery_week,
            self.supplier_id,
            self.range,
            self.status
        )
    }
}

// =========
// Supplier
// =========

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    /// Only schedules of this stage may be booked here.
    pub stage: Stage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Supplier {
    pub fn new(name: impl Into<String>, stage: Stage) -> Self {
        Self {
            id: 1,
            name: name.into(),
            stage,
            contact_person: None,
            phone: None,
            address: None,
            active: true,
        }
    }
}

// ========
// Article
// ========

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Article {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 1,
            name: name.into(),
            description: None,
            category: None,
            active: true,
        }
    }
}

// =====
// User
// =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            id: 1,
            username: username.into(),
            full_name: String::new(),
            email: String::new(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

fn default_active() -> bool {
    true
}

impl_base_entity!(Schedule, Supplier, Article, User);

// ================
// Cascade results
// ================

/// New placement for one schedule; every field other than the dates stays as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleChange {
    pub schedule_id: ScheduleId,
    pub stage: Stage,
    pub supplier_id: SupplierId,
    pub original: DateRange,
    pub new: DateRange,
}

impl ScheduleChange {
    pub fn new(schedule: &Schedule, new: DateRange) -> Self {
        Self {
            schedule_id: schedule.id,
            stage: schedule.stage,
            supplier_id: schedule.supplier_id,
            original: schedule.range,
            new,
        }
    }

    pub fn delta_days(&self) -> i64 {
        calendar::day_diff(self.original.start(), self.new.start())
    }

    pub fn is_noop(&self) -> bool {
        self.original == self.new
    }
}

impl fmt::Display for ScheduleChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} @ supplier {}: {} -> {}",
            self.schedule_id, self.stage, self.supplier_id, self.original, self.new
        )
    }
}

/// Ordered output of one cascade: the moved schedule first, then ripple order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    delta_days: i64,
    changes: Vec<ScheduleChange>,
}

impl ChangeSet {
    pub fn new(delta_days: i64) -> Self {
        Self {
            delta_days,
            changes: Vec::new(),
        }
    }

    pub fn push(&mut self, change: ScheduleChange) {
        debug_assert!(
            !self.contains(change.schedule_id),
            "schedule {} emitted twice in one cascade",
            change.schedule_id
        );
        self.changes.push(change);
    }

    pub fn delta_days(&self) -> i64 {
        self.delta_days
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn contains(&self, id: ScheduleId) -> bool {
        self.changes.iter().any(|c| c.schedule_id == id)
    }

    pub fn get(&self, id: ScheduleId) -> Option<&ScheduleChange> {
        self.changes.iter().find(|c| c.schedule_id == id)
    }

    pub fn moved(&self) -> Option<&ScheduleChange> {
        self.changes.first()
    }

    /// Every change after the moved schedule's own.
    pub fn displaced(&self) -> &[ScheduleChange] {
        self.changes.get(1..).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduleChange> {
        self.changes.iter()
    }

    pub fn ids(&self) -> Vec<ScheduleId> {
        self.changes.iter().map(|c| c.schedule_id).collect()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a ScheduleChange;
    type IntoIter = std::slice::Iter<'a, ScheduleChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}
