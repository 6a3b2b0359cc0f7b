//! Scanned Item Commands
//!
//! Frontend bindings for the host's `ScannedItem` collection.

use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use smartcart_core::{EntityStore, Item, ItemPatch, NewItem, SortSpec, StoreResult};

use super::{decode_error, encode_error, invoke, transport_error};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct ListArgs {
    sort: String,
}

#[derive(Serialize)]
struct CreateArgs<'a> {
    item: &'a NewItem,
}

#[derive(Serialize)]
struct UpdateArgs<'a> {
    id: &'a str,
    patch: &'a ItemPatch,
}

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

// ========================
// Commands
// ========================

async fn call(cmd: &str, args: &impl Serialize) -> StoreResult<JsValue> {
    let js_args = serde_wasm_bindgen::to_value(args).map_err(encode_error)?;
    invoke(cmd, js_args).await.map_err(transport_error)
}

pub async fn list_scanned_items(sort: &SortSpec) -> StoreResult<Vec<Item>> {
    let result = call("list_scanned_items", &ListArgs { sort: sort.to_string() }).await?;
    serde_wasm_bindgen::from_value(result).map_err(decode_error)
}

pub async fn create_scanned_item(item: &NewItem) -> StoreResult<Item> {
    let result = call("create_scanned_item", &CreateArgs { item }).await?;
    serde_wasm_bindgen::from_value(result).map_err(decode_error)
}

pub async fn update_scanned_item(id: &str, patch: &ItemPatch) -> StoreResult<Item> {
    let result = call("update_scanned_item", &UpdateArgs { id, patch }).await?;
    serde_wasm_bindgen::from_value(result).map_err(decode_error)
}

pub async fn delete_scanned_item(id: &str) -> StoreResult<()> {
    call("delete_scanned_item", &IdArgs { id }).await?;
    Ok(())
}

/// Entity store backed by the Tauri host
#[derive(Clone, Copy, Default)]
pub struct TauriItemStore;

#[async_trait(?Send)]
impl EntityStore for TauriItemStore {
    async fn list(&self, sort: &SortSpec) -> StoreResult<Vec<Item>> {
        list_scanned_items(sort).await
    }

    async fn create(&self, item: &NewItem) -> StoreResult<Item> {
        create_scanned_item(item).await
    }

    async fn update(&self, id: &str, patch: &ItemPatch) -> StoreResult<Item> {
        update_scanned_item(id, patch).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        delete_scanned_item(id).await
    }
}
