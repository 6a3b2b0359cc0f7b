//! Client Store Selection
//!
//! Picks the host-backed store when a Tauri bridge is present, otherwise an
//! in-memory one so the page still works in a plain browser.

use async_trait::async_trait;
use smartcart_core::{AppConfig, EntityStore, Item, ItemPatch, MemoryStore, NewItem, SortSpec, StoreResult};

use crate::commands::{self, TauriItemStore};

pub enum ClientStore {
    Host(TauriItemStore),
    Offline(MemoryStore),
}

impl ClientStore {
    pub fn from_config(config: &AppConfig) -> Self {
        if config.offline_store {
            log::info!("using in-memory store (offline_store = true)");
            ClientStore::Offline(MemoryStore::new())
        } else if commands::host_available() {
            ClientStore::Host(TauriItemStore)
        } else {
            log::warn!("no Tauri host found, items will not persist");
            ClientStore::Offline(MemoryStore::new())
        }
    }
}

#[async_trait(?Send)]
impl EntityStore for ClientStore {
    async fn list(&self, sort: &SortSpec) -> StoreResult<Vec<Item>> {
        match self {
            ClientStore::Host(store) => store.list(sort).await,
            ClientStore::Offline(store) => store.list(sort).await,
        }
    }

    async fn create(&self, item: &NewItem) -> StoreResult<Item> {
        match self {
            ClientStore::Host(store) => store.create(item).await,
            ClientStore::Offline(store) => store.create(item).await,
        }
    }

    async fn update(&self, id: &str, patch: &ItemPatch) -> StoreResult<Item> {
        match self {
            ClientStore::Host(store) => store.update(id, patch).await,
            ClientStore::Offline(store) => store.update(id, patch).await,
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        match self {
            ClientStore::Host(store) => store.delete(id).await,
            ClientStore::Offline(store) => store.delete(id).await,
        }
    }
}
