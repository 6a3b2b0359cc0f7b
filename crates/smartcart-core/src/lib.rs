//! SmartCart Core
//!
//! Platform-independent logic for the grocery scanner client:
//! - item: data model and category presentation
//! - input: quantity/name coercion at the input boundary
//! - camera: capture device acquisition controller
//! - scanner: scan surface and manual entry form
//! - card: per-item view/edit state machine
//! - store: entity store abstraction and in-memory store
//! - list: list page orchestration (mutate, then re-fetch)
//! - config: application settings

pub mod camera;
pub mod card;
pub mod config;
pub mod error;
pub mod input;
pub mod item;
pub mod list;
pub mod scanner;
pub mod store;

pub use camera::{
    acquire, AcquireTicket, ActiveStream, CameraController, CameraStatus, CaptureConstraints,
    CaptureDevice, MediaStreamHandle,
};
pub use card::{CardIntent, EditBuffer, ItemCard};
pub use config::AppConfig;
pub use error::{CaptureError, ConfigError, StoreError, StoreResult};
pub use input::{coerce_quantity, normalize_name};
pub use item::{Category, Item, ItemId, ItemPatch, NewItem};
pub use list::{ItemList, ListSnapshot};
pub use scanner::{submit_manual_item, CameraDirective, ManualEntryForm, ScanSurface};
pub use store::{EntityStore, MemoryStore, SortDirection, SortSpec};
