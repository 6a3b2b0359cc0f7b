//! UI Components
//!
//! Leptos components for the scan page.

mod camera_dialog;
mod category_selector;
mod error_banner;
mod item_card;
mod manual_entry_dialog;
mod scanner_interface;
mod stats_card;

pub use camera_dialog::{CameraDialog, CameraHandle};
pub use category_selector::CategorySelector;
pub use error_banner::ErrorBanner;
pub use item_card::ItemCardView;
pub use manual_entry_dialog::ManualEntryDialog;
pub use scanner_interface::ScannerInterface;
pub use stats_card::StatsCard;
