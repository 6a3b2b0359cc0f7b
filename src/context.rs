//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use smartcart_core::{AppConfig, CardIntent, ItemList, ListSnapshot, NewItem, StoreResult};

use crate::client_store::ClientStore;
use crate::store::{store_dismiss_error, store_publish, PageStore};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Settings loaded at start-up
    pub config: StoredValue<AppConfig>,
    /// List orchestrator (not Send, so kept in local storage)
    list: StoredValue<Rc<ItemList<ClientStore>>, LocalStorage>,
    /// Reactive mirror of the list
    page: PageStore,
}

impl AppContext {
    pub fn new(config: AppConfig, list: ItemList<ClientStore>, page: PageStore) -> Self {
        Self {
            config: StoredValue::new(config),
            list: StoredValue::new_local(Rc::new(list)),
            page,
        }
    }

    /// Run one list operation in the background and publish the outcome.
    /// Whatever the result, the page shows the list's newest snapshot.
    fn run<F, Fut>(&self, op: F)
    where
        F: FnOnce(Rc<ItemList<ClientStore>>) -> Fut + 'static,
        Fut: std::future::Future<Output = StoreResult<ListSnapshot>> + 'static,
    {
        let Some(list) = self.list.try_get_value() else {
            return;
        };
        let page = self.page;
        spawn_local(async move {
            // Failure is already logged and kept as last_error by the list
            let _ = op(list.clone()).await;
            store_publish(&page, list.snapshot(), list.last_error(), list.error_seq());
        });
    }

    /// Trigger a full re-fetch
    pub fn reload(&self) {
        self.run(|list| async move { list.reload().await });
    }

    pub fn add_item(&self, item: NewItem) {
        self.run(move |list| async move { list.add(&item).await });
    }

    /// Carry out an update/delete requested by a card
    pub fn apply_intent(&self, intent: CardIntent) {
        self.run(move |list| async move { list.apply(&intent).await });
    }

    /// Hide the error banner; `seq` guards against hiding a newer error
    pub fn dismiss_error(&self, seq: Option<u64>) {
        if store_dismiss_error(&self.page, seq) {
            if let Some(list) = self.list.try_get_value() {
                list.clear_error();
            }
        }
    }
}
