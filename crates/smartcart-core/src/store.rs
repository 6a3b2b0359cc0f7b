//! Entity Store
//!
//! Abstract CRUD interface to the collection that owns grocery items, plus an
//! in-memory implementation.
//! The real store is remote; implementations may fail with [`StoreError`] and
//! are awaited without timeouts.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::error::{ConfigError, StoreError, StoreResult};
use crate::item::{Item, ItemId, ItemPatch, NewItem};

// ========================
// Sort spec
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Field name, optionally prefixed with `-` for descending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// `-created_date`, the list page's ordering
    pub fn newest_first() -> Self {
        Self {
            field: "created_date".to_string(),
            direction: SortDirection::Descending,
        }
    }

    /// Sort a slice in place. Unknown fields leave the order untouched.
    pub fn sort(&self, items: &mut [Item]) {
        match self.field.as_str() {
            "created_date" => items.sort_by(|a, b| a.created_date.cmp(&b.created_date)),
            "name" => items.sort_by(|a, b| a.name.cmp(&b.name)),
            "quantity" => items.sort_by_key(|i| i.quantity),
            "id" => items.sort_by(|a, b| a.id.cmp(&b.id)),
            other => {
                log::debug!("store: unknown sort field {:?}, keeping store order", other);
                return;
            }
        }
        if self.direction == SortDirection::Descending {
            items.reverse();
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::newest_first()
    }
}

impl FromStr for SortSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (direction, field) = match s.strip_prefix('-') {
            Some(rest) => (SortDirection::Descending, rest),
            None => (SortDirection::Ascending, s),
        };
        let valid = !field.is_empty()
            && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(ConfigError::Sort(s.to_string()));
        }
        Ok(Self { field: field.to_string(), direction })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Ascending => write!(f, "{}", self.field),
            SortDirection::Descending => write!(f, "-{}", self.field),
        }
    }
}

// ========================
// Store trait
// ========================

/// CRUD access to the item collection
#[async_trait(?Send)]
pub trait EntityStore {
    async fn list(&self, sort: &SortSpec) -> StoreResult<Vec<Item>>;

    async fn create(&self, item: &NewItem) -> StoreResult<Item>;

    async fn update(&self, id: &str, patch: &ItemPatch) -> StoreResult<Item>;

    async fn delete(&self, id: &str) -> StoreResult<()>;
}

// ========================
// In-memory store
// ========================

/// Process-local store. Ids are sequential, timestamps strictly increase.
pub struct MemoryStore {
    items: RefCell<Vec<Item>>,
    next_id: Cell<u64>,
    epoch: DateTime<Utc>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Timestamps are `epoch + n ms` for the n-th created item
    pub fn starting_at(epoch: DateTime<Utc>) -> Self {
        Self {
            items: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            epoch,
        }
    }

    /// Insert a stored record as-is (for seeding legacy data)
    pub fn insert_raw(&self, item: Item) {
        self.items.borrow_mut().push(item);
    }

    fn allocate(&self) -> (ItemId, DateTime<Utc>) {
        let n = self.next_id.get();
        self.next_id.set(n + 1);
        let offset = i64::try_from(n).unwrap_or(i64::MAX);
        (format!("mem-{}", n), self.epoch + Duration::milliseconds(offset))
    }
}

#[async_trait(?Send)]
impl EntityStore for MemoryStore {
    async fn list(&self, sort: &SortSpec) -> StoreResult<Vec<Item>> {
        let mut items = self.items.borrow().clone();
        sort.sort(&mut items);
        Ok(items)
    }

    async fn create(&self, item: &NewItem) -> StoreResult<Item> {
        if item.name.trim().is_empty() {
            return Err(StoreError::Rejected("name is required".to_string()));
        }
        let (id, created_date) = self.allocate();
        let stored = Item {
            id,
            name: item.name.clone(),
            category: Some(item.category.as_str().to_string()),
            quantity: item.quantity.max(1),
            unit: Some(item.unit.clone()),
            created_date,
        };
        self.items.borrow_mut().push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &str, patch: &ItemPatch) -> StoreResult<Item> {
        let mut items = self.items.borrow_mut();
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        patch.apply_to(item);
        Ok(item.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut items = self.items.borrow_mut();
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
