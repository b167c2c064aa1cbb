use std::cmp::Ordering;
use std::collections::HashMap;

use crate::core::models::BaseEntity;
use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Unordered,
    IdAsc,
}

/// Replacement copies of existing entities, visible only after `commit_stage`.
#[derive(Debug)]
struct Staged<T: BaseEntity> {
    pending: HashMap<i32, T>,
    order: Vec<i32>,
}

struct FilterSorter<'a, T: BaseEntity> {
    filters: Vec<Box<dyn Fn(&T) -> bool + 'a>>,
    sort: Sort,
    cmp: Option<Box<dyn Fn(&T, &T) -> Ordering + 'a>>,
}

impl<'a, T: BaseEntity> FilterSorter<'a, T> {
    fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort: Sort::Unordered,
            cmp: None,
        }
    }

    fn matches(&self, e: &T) -> bool {
        self.filters.iter().all(|f| f(e))
    }

    fn apply<'r>(&self, items: &'r HashMap<i32, T>) -> Vec<&'r T> {
        let mut out: Vec<&T> = items.values().filter(|e| self.matches(e)).collect();
        if let Some(cmp) = &self.cmp {
            // Id first so equal keys come out in a stable, repeatable order.
            out.sort_by_key(|e| e.id());
            out.sort_by(|a, b| cmp(a, b));
        } else {
            match self.sort {
                Sort::Unordered => {}
                Sort::IdAsc => out.sort_by_key(|e| e.id()),
            }
        }
        out
    }
}

/// In-memory keyed store standing in for the persistence collaborator.
#[derive(Debug)]
pub struct Repository<T: BaseEntity> {
    items: HashMap<i32, T>,
    next_id: i32,
    staged: Option<Staged<T>>,
}

impl<T: BaseEntity> Default for Repository<T> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            next_id: 1,
            staged: None,
        }
    }
}

impl<T: BaseEntity> Repository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.items.contains_key(&id)
    }

    /// Assigns the next free id and stores the entity.
    pub fn insert(&mut self, mut entity: T) -> &T {
        let id = self.next_id;
        self.next_id += 1;
        entity.set_id(id);
        self.items.entry(id).or_insert(entity)
    }

    /// Stores an entity under its own id (used when loading a snapshot).
    pub fn insert_with_id(&mut self, entity: T) -> Result<()> {
        let id = entity.id();
        if id <= 0 {
            return Err(Error::Parse("ID must be positive.".into()));
        }
        if self.items.contains_key(&id) {
            return Err(Error::Parse(format!(
                "Entity with id {} already exists.",
                id
            )));
        }
        self.next_id = self.next_id.max(id + 1);
        self.items.insert(id, entity);
        Ok(())
    }

    pub fn get(&self, id: i32) -> Result<&T> {
        self.items
            .get(&id)
            .ok_or_else(|| Error::NotFound(format!("entity with id {}", id)))
    }

    pub fn get_mut(&mut self, id: i32) -> Result<&mut T> {
        self.items
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("entity with id {}", id)))
    }

    pub fn delete(&mut self, id: i32) -> Result<T> {
        self.items
            .remove(&id)
            .ok_or_else(|| Error::NotFound(format!("entity with id {}", id)))
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.next_id = 1;
        self.staged = None;
    }

    pub fn values(&self, sort: Sort) -> Vec<&T> {
        FilterSorter {
            filters: Vec::new(),
            sort,
            cmp: None,
        }
        .apply(&self.items)
    }

    pub fn query(&self) -> Query<'_, T> {
        Query::new(self)
    }

    // ---- staging ------------------------------------------------------------

    pub fn begin_stage(&mut self) -> Result<()> {
        if self.staged.is_some() {
            return Err(Error::Parse("Transaction already in progress.".into()));
        }
        self.staged = Some(Staged {
            pending: HashMap::new(),
            order: Vec::new(),
        });
        Ok(())
    }

    /// Latest view of `id`: the staged copy if one exists, else the committed one.
    pub fn staged_get(&self, id: i32) -> Result<&T> {
        if let Some(staged) = &self.staged {
            if let Some(e) = staged.pending.get(&id) {
                return Ok(e);
            }
        }
        self.get(id)
    }

    /// Stage an edit of an existing entity; committed items stay untouched until commit.
    pub fn stage_update<F>(&mut self, id: i32, f: F) -> Result<()>
    where
        T: Clone,
        F: FnOnce(&mut T) -> Result<()>,
    {
        let current = self.staged_get(id)?.clone();
        let staged = self
            .staged
            .as_mut()
            .ok_or_else(|| Error::Parse("No active transaction to stage into.".into()))?;

        let mut copy = current;
        f(&mut copy)?;
        if staged.pending.insert(id, copy).is_none() {
            staged.order.push(id);
        }
        Ok(())
    }

    pub fn discard_stage(&mut self) {
        self.staged = None;
    }

    /// Replace committed entities with their staged copies; returns how many were written.
    pub fn commit_stage(&mut self) -> Result<usize> {
        let staged = self
            .staged
            .take()
            .ok_or_else(|| Error::Parse("No active transaction to commit.".into()))?;

        if let Some(missing) = staged.order.iter().find(|id| !self.items.contains_key(id)) {
            return Err(Error::NotFound(format!("entity with id {}", missing)));
        }

        let count = staged.order.len();
        for (id, entity) in staged.pending {
            self.items.insert(id, entity);
        }
        Ok(count)
    }
}

pub struct Query<'a, T: BaseEntity> {
    store: &'a Repository<T>,
    fs: FilterSorter<'a, T>,
}

impl<'a, T: BaseEntity> Query<'a, T> {
    fn new(store: &'a Repository<T>) -> Self {
        Self {
            store,
            fs: FilterSorter::new(),
        }
    }

    pub fn r#where(mut self, pred: impl Fn(&T) -> bool + 'a) -> Self {
        self.fs.filters.push(Box::new(pred));
        self
    }

    pub fn order(mut self, sort: Sort) -> Self {
        self.fs.sort = sort;
        self
    }

    pub fn order_with(mut self, cmp: impl Fn(&T, &T) -> Ordering + 'a) -> Self {
        self.fs.cmp = Some(Box::new(cmp));
        self
    }

    pub fn collect(self) -> Vec<&'a T> {
        self.fs.apply(&self.store.items)
    }
}
