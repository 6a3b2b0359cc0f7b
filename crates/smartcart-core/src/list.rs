//! Item List Orchestration
//!
//! The list page's single source of truth. Every mutation awaits the store
//! and then re-fetches the whole collection with `list(sort)`; the cached
//! snapshot is only ever replaced wholesale, never patched locally.
//!
//! Store failures are returned to the caller and remembered as `last_error`;
//! the previous snapshot stays in place. Overlapping re-fetches are tagged
//! with a generation; a response (success or failure) no newer than the last
//! applied one is dropped.

use std::cell::{Cell, RefCell};

use crate::card::CardIntent;
use crate::error::{StoreError, StoreResult};
use crate::item::{Item, ItemPatch, NewItem};
use crate::store::{EntityStore, SortSpec};

/// What the page renders
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListSnapshot {
    pub items: Vec<Item>,
    /// First `recent_count` items in list order
    pub recent: Vec<Item>,
    pub total: usize,
}

impl ListSnapshot {
    pub fn from_items(items: Vec<Item>, recent_count: usize) -> Self {
        let recent = items.iter().take(recent_count).cloned().collect();
        let total = items.len();
        Self { items, recent, total }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

pub struct ItemList<S: EntityStore> {
    store: S,
    sort: SortSpec,
    recent_count: usize,
    snapshot: RefCell<ListSnapshot>,
    last_error: RefCell<Option<StoreError>>,
    failures: Cell<u64>,
    issued: Cell<u64>,
    applied: Cell<u64>,
}

impl<S: EntityStore> ItemList<S> {
    pub fn new(store: S, sort: SortSpec, recent_count: usize) -> Self {
        Self {
            store,
            sort,
            recent_count,
            snapshot: RefCell::new(ListSnapshot::default()),
            last_error: RefCell::new(None),
            failures: Cell::new(0),
            issued: Cell::new(0),
            applied: Cell::new(0),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> ListSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn last_error(&self) -> Option<StoreError> {
        self.last_error.borrow().clone()
    }

    /// Bumped on every recorded failure, so two identical errors in a row
    /// are still told apart.
    pub fn error_seq(&self) -> u64 {
        self.failures.get()
    }

    pub fn clear_error(&self) {
        self.last_error.replace(None);
    }

    /// Initial load; same as a re-fetch.
    pub async fn load(&self) -> StoreResult<ListSnapshot> {
        self.reload().await
    }

    /// Fetch the full list and replace the snapshot.
    pub async fn reload(&self) -> StoreResult<ListSnapshot> {
        let generation = self.issued.get() + 1;
        self.issued.set(generation);

        let items = match self.store.list(&self.sort).await {
            Ok(items) => items,
            Err(err) if generation > self.applied.get() => return Err(self.record(err)),
            Err(err) => {
                log::debug!(
                    "list: ignoring failure of fetch {} ({}), fetch {} already applied",
                    generation,
                    err,
                    self.applied.get()
                );
                return Ok(self.snapshot());
            }
        };

        if generation > self.applied.get() {
            log::debug!("list: applying fetch {} ({} items)", generation, items.len());
            self.applied.set(generation);
            self.snapshot.replace(ListSnapshot::from_items(items, self.recent_count));
            self.last_error.replace(None);
        } else {
            log::debug!(
                "list: dropping fetch {}, fetch {} already applied",
                generation,
                self.applied.get()
            );
        }
        Ok(self.snapshot())
    }

    pub async fn add(&self, item: &NewItem) -> StoreResult<ListSnapshot> {
        let created = self.store.create(item).await.map_err(|e| self.record(e))?;
        log::info!("list: created {} ({})", created.id, created.name);
        self.reload().await
    }

    pub async fn update(&self, id: &str, patch: &ItemPatch) -> StoreResult<ListSnapshot> {
        self.store.update(id, patch).await.map_err(|e| self.record(e))?;
        log::info!("list: updated {}", id);
        self.reload().await
    }

    pub async fn remove(&self, id: &str) -> StoreResult<ListSnapshot> {
        self.store.delete(id).await.map_err(|e| self.record(e))?;
        log::info!("list: deleted {}", id);
        self.reload().await
    }

    /// Carry out an item card's request
    pub async fn apply(&self, intent: &CardIntent) -> StoreResult<ListSnapshot> {
        match intent {
            CardIntent::Update { id, patch } => self.update(id, patch).await,
            CardIntent::Delete { id } => self.remove(id).await,
        }
    }

    fn record(&self, err: StoreError) -> StoreError {
        log::warn!("list: store call failed: {}", err);
        self.failures.set(self.failures.get() + 1);
        self.last_error.replace(Some(err.clone()));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Category;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    fn grocery(name: &str, quantity: u32) -> NewItem {
        NewItem {
            name: name.to_string(),
            category: Category::Produce,
            quantity,
            unit: "item".to_string(),
        }
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    fn list_over(store: MemoryStore) -> ItemList<MemoryStore> {
        ItemList::new(store, SortSpec::newest_first(), 3)
    }

    /// Wraps a store, counting list calls and failing chosen operations.
    struct ScriptedStore {
        inner: MemoryStore,
        list_calls: Cell<u32>,
        fail_create: Cell<bool>,
        fail_list: Cell<bool>,
    }

    impl ScriptedStore {
        fn new() -> Self {
            Self {
                inner: MemoryStore::new(),
                list_calls: Cell::new(0),
                fail_create: Cell::new(false),
                fail_list: Cell::new(false),
            }
        }
    }

    #[async_trait(?Send)]
    impl EntityStore for ScriptedStore {
        async fn list(&self, sort: &SortSpec) -> StoreResult<Vec<Item>> {
            self.list_calls.set(self.list_calls.get() + 1);
            if self.fail_list.get() {
                return Err(StoreError::Transport("offline".into()));
            }
            self.inner.list(sort).await
        }

        async fn create(&self, item: &NewItem) -> StoreResult<Item> {
            if self.fail_create.get() {
                return Err(StoreError::Transport("offline".into()));
            }
            self.inner.create(item).await
        }

        async fn update(&self, id: &str, patch: &ItemPatch) -> StoreResult<Item> {
            self.inner.update(id, patch).await
        }

        async fn delete(&self, id: &str) -> StoreResult<()> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn test_load_empty_store() {
        let list = list_over(MemoryStore::new());
        let snapshot = list.load().await.unwrap();
        assert!(snapshot.is_empty());
        assert!(snapshot.recent.is_empty());
    }

    #[tokio::test]
    async fn test_recent_is_first_three_of_fresh_list() {
        let list = list_over(MemoryStore::new());
        for (name, qty) in [("Kale", 1), ("Leeks", 2), ("Figs", 6), ("Pears", 4)] {
            list.add(&grocery(name, qty)).await.unwrap();
        }
        let snapshot = list.snapshot();
        assert_eq!(snapshot.total, 4);
        assert_eq!(names(&snapshot.recent), ["Pears", "Figs", "Leeks"]);

        let fresh = list.store().list(&SortSpec::newest_first()).await.unwrap();
        assert_eq!(snapshot.recent, fresh[..3].to_vec());
    }

    #[tokio::test]
    async fn test_add_refetches_instead_of_appending() {
        let list = list_over(MemoryStore::new());
        list.load().await.unwrap();

        // Written by someone else since the last fetch
        list.store().insert_raw(Item {
            id: "other-client".into(),
            name: "Basil".into(),
            category: Some("produce".into()),
            quantity: 1,
            unit: None,
            created_date: Utc::now() - chrono::Duration::days(1),
        });

        let snapshot = list.add(&grocery("Mint", 1)).await.unwrap();
        assert_eq!(names(&snapshot.items), ["Mint", "Basil"]);
        assert_eq!(snapshot.total, 2);
    }

    #[tokio::test]
    async fn test_card_intents_round_trip_through_store() {
        let list = list_over(MemoryStore::new());
        let snapshot = list.add(&grocery("Eggs", 1)).await.unwrap();
        let id = snapshot.items[0].id.clone();

        let intent = CardIntent::Update {
            id: id.clone(),
            patch: ItemPatch { name: Some("Bread".into()), quantity: Some(2) },
        };
        let snapshot = list.apply(&intent).await.unwrap();
        assert_eq!(snapshot.items[0].name, "Bread");
        assert_eq!(snapshot.items[0].quantity, 2);

        let snapshot = list.apply(&CardIntent::Delete { id }).await.unwrap();
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn test_every_mutation_issues_one_list() {
        let list = ItemList::new(ScriptedStore::new(), SortSpec::newest_first(), 3);
        list.load().await.unwrap();
        let snapshot = list.add(&grocery("Plums", 3)).await.unwrap();
        let id = snapshot.items[0].id.clone();
        list.update(&id, &ItemPatch { name: None, quantity: Some(4) }).await.unwrap();
        list.remove(&id).await.unwrap();
        assert_eq!(list.store().list_calls.get(), 4);
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_snapshot_and_skips_refetch() {
        let list = ItemList::new(ScriptedStore::new(), SortSpec::newest_first(), 3);
        list.add(&grocery("Apples", 2)).await.unwrap();
        let before = list.snapshot();
        let calls = list.store().list_calls.get();

        list.store().fail_create.set(true);
        let err = list.add(&grocery("Grapes", 1)).await.unwrap_err();

        assert_eq!(err, StoreError::Transport("offline".into()));
        assert_eq!(list.snapshot(), before);
        assert_eq!(list.last_error(), Some(err));
        assert_eq!(list.store().list_calls.get(), calls);
    }

    #[tokio::test]
    async fn test_repeated_failure_gets_new_sequence() {
        let list = ItemList::new(ScriptedStore::new(), SortSpec::newest_first(), 3);
        assert_eq!(list.error_seq(), 0);

        list.store().fail_create.set(true);
        let first = list.add(&grocery("Grapes", 1)).await.unwrap_err();
        let seq = list.error_seq();
        let second = list.add(&grocery("Grapes", 1)).await.unwrap_err();

        assert_eq!(first, second);
        assert!(list.error_seq() > seq);

        list.store().fail_create.set(false);
        list.add(&grocery("Grapes", 1)).await.unwrap();
        assert_eq!(list.last_error(), None);
        assert_eq!(list.error_seq(), seq + 1);
    }

    #[tokio::test]
    async fn test_failed_refetch_keeps_stale_snapshot_until_next_success() {
        let list = ItemList::new(ScriptedStore::new(), SortSpec::newest_first(), 3);
        list.add(&grocery("Apples", 2)).await.unwrap();
        let before = list.snapshot();

        list.store().fail_list.set(true);
        assert!(list.add(&grocery("Grapes", 1)).await.is_err());
        assert_eq!(list.snapshot(), before);
        assert!(list.last_error().is_some());

        list.store().fail_list.set(false);
        let snapshot = list.reload().await.unwrap();
        assert_eq!(snapshot.total, 2);
        assert_eq!(list.last_error(), None);
    }

    /// Hands out list responses only when the test releases them.
    struct GatedStore {
        gates: RefCell<VecDeque<oneshot::Receiver<StoreResult<Vec<Item>>>>>,
    }

    #[async_trait(?Send)]
    impl EntityStore for GatedStore {
        async fn list(&self, _sort: &SortSpec) -> StoreResult<Vec<Item>> {
            let gate = self.gates.borrow_mut().pop_front();
            let gate = gate.ok_or_else(|| StoreError::Transport("no gate".into()))?;
            gate.await.map_err(|e| StoreError::Transport(e.to_string()))?
        }

        async fn create(&self, _item: &NewItem) -> StoreResult<Item> {
            Err(StoreError::Rejected("read only".into()))
        }

        async fn update(&self, id: &str, _patch: &ItemPatch) -> StoreResult<Item> {
            Err(StoreError::NotFound(id.to_string()))
        }

        async fn delete(&self, id: &str) -> StoreResult<()> {
            Err(StoreError::NotFound(id.to_string()))
        }
    }

    fn stored(name: &str) -> Item {
        Item {
            id: name.to_lowercase(),
            name: name.to_string(),
            category: None,
            quantity: 1,
            unit: None,
            created_date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_superseded_fetch_is_dropped() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let store = GatedStore { gates: RefCell::new(VecDeque::from([first_rx, second_rx])) };
        let list = ItemList::new(store, SortSpec::newest_first(), 3);

        let release = async {
            tokio::task::yield_now().await;
            second_tx.send(Ok(vec![stored("Newer")])).unwrap();
            tokio::task::yield_now().await;
            first_tx.send(Ok(vec![stored("Older")])).unwrap();
        };

        let (first, second, ()) = tokio::join!(list.reload(), list.reload(), release);

        assert_eq!(names(&second.unwrap().items), ["Newer"]);
        // The older response resolved last but did not overwrite
        assert_eq!(names(&first.unwrap().items), ["Newer"]);
        assert_eq!(names(&list.snapshot().items), ["Newer"]);
    }

    #[tokio::test]
    async fn test_superseded_failure_does_not_raise_error() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let store = GatedStore { gates: RefCell::new(VecDeque::from([first_rx, second_rx])) };
        let list = ItemList::new(store, SortSpec::newest_first(), 3);

        let release = async {
            tokio::task::yield_now().await;
            second_tx.send(Ok(vec![stored("Fresh")])).unwrap();
            tokio::task::yield_now().await;
            first_tx.send(Err(StoreError::Transport("old".into()))).unwrap();
        };

        let (first, second, ()) = tokio::join!(list.reload(), list.reload(), release);

        assert_eq!(names(&second.unwrap().items), ["Fresh"]);
        assert_eq!(names(&first.unwrap().items), ["Fresh"]);
        assert_eq!(list.last_error(), None);
    }

    #[tokio::test]
    async fn test_latest_failure_is_still_recorded() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let store = GatedStore { gates: RefCell::new(VecDeque::from([first_rx, second_rx])) };
        let list = ItemList::new(store, SortSpec::newest_first(), 3);

        let release = async {
            tokio::task::yield_now().await;
            first_tx.send(Ok(vec![stored("Earlier")])).unwrap();
            tokio::task::yield_now().await;
            second_tx.send(Err(StoreError::Transport("down".into()))).unwrap();
        };

        let (first, second, ()) = tokio::join!(list.reload(), list.reload(), release);

        assert!(first.is_ok());
        assert_eq!(second.unwrap_err(), StoreError::Transport("down".into()));
        assert_eq!(list.last_error(), Some(StoreError::Transport("down".into())));
        assert_eq!(names(&list.snapshot().items), ["Earlier"]);
    }
}
