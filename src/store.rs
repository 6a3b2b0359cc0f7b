//! Page State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store mirrors
//! the list orchestrator's latest snapshot; it is never patched directly.

use leptos::prelude::*;
use reactive_stores::Store;
use smartcart_core::{Item, ListSnapshot, StoreError};

/// What the scan page renders
#[derive(Clone, Debug, Default, Store)]
pub struct PageState {
    /// "Recently Added" slice
    pub recent: Vec<Item>,
    /// Total item count
    pub total: usize,
    /// Message of the last failed store call, if not yet dismissed
    pub last_error: Option<String>,
    /// Failure count at the time `last_error` was set
    pub error_seq: u64,
}

/// Type alias for the store
pub type PageStore = Store<PageState>;

/// Get the page store from context
pub fn use_page_store() -> PageStore {
    expect_context::<PageStore>()
}

/// Replace everything from a snapshot
pub fn store_publish(
    store: &PageStore,
    snapshot: ListSnapshot,
    error: Option<StoreError>,
    error_seq: u64,
) {
    *store.recent().write() = snapshot.recent;
    *store.total().write() = snapshot.total;
    *store.last_error().write() = error.map(|e| e.to_string());
    if store.error_seq().get_untracked() != error_seq {
        *store.error_seq().write() = error_seq;
    }
}

/// Clear the error banner, but only if it still shows failure `seq`.
/// Returns whether it was cleared.
pub fn store_dismiss_error(store: &PageStore, seq: Option<u64>) -> bool {
    let shown = store.last_error().with_untracked(|e| e.is_some());
    if shown && (seq.is_none() || Some(store.error_seq().get_untracked()) == seq) {
        *store.last_error().write() = None;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline() -> Option<StoreError> {
        Some(StoreError::Transport("offline".to_string()))
    }

    #[test]
    fn test_stale_dismiss_keeps_repeated_error() {
        let store = Store::new(PageState::default());
        store_publish(&store, ListSnapshot::default(), offline(), 1);
        store_publish(&store, ListSnapshot::default(), offline(), 2);

        // Timer started for the first failure fires after the repeat
        assert!(!store_dismiss_error(&store, Some(1)));
        assert!(store.last_error().get_untracked().is_some());

        assert!(store_dismiss_error(&store, Some(2)));
        assert_eq!(store.last_error().get_untracked(), None);
    }

    #[test]
    fn test_manual_dismiss_clears_any_error() {
        let store = Store::new(PageState::default());
        assert!(!store_dismiss_error(&store, None));
        store_publish(&store, ListSnapshot::default(), offline(), 4);
        assert!(store_dismiss_error(&store, None));
    }
}
