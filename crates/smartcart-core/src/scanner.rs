//! Scanner Interface
//!
//! The "add item" affordance: a modal surface showing either the camera
//! preview or the manual entry form, and the form itself.

use crate::input::{coerce_quantity, normalize_name};
use crate::item::{Category, NewItem};

/// Which modal surface is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanSurface {
    #[default]
    Closed,
    Camera,
    Manual,
}

/// What the camera controller must do for a surface transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraDirective {
    Acquire,
    Release,
    None,
}

impl ScanSurface {
    pub fn open_camera(&mut self) -> CameraDirective {
        self.go(ScanSurface::Camera)
    }

    pub fn open_manual(&mut self) -> CameraDirective {
        self.go(ScanSurface::Manual)
    }

    pub fn close(&mut self) -> CameraDirective {
        self.go(ScanSurface::Closed)
    }

    /// Camera -> manual in one step; the camera is released by the same
    /// transition that shows the form.
    pub fn switch_to_manual(&mut self) -> CameraDirective {
        self.go(ScanSurface::Manual)
    }

    fn go(&mut self, next: ScanSurface) -> CameraDirective {
        let prev = std::mem::replace(self, next);
        match (prev == ScanSurface::Camera, next == ScanSurface::Camera) {
            (false, true) => CameraDirective::Acquire,
            (true, false) => CameraDirective::Release,
            _ => CameraDirective::None,
        }
    }
}

/// Manual entry form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEntryForm {
    pub name: String,
    pub category: Category,
    pub quantity: u32,
}

impl Default for ManualEntryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: Category::Other,
            quantity: 1,
        }
    }
}

impl ManualEntryForm {
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Raw text from the quantity input, coerced immediately
    pub fn set_quantity_input(&mut self, raw: &str) {
        self.quantity = coerce_quantity(raw);
    }

    /// Build the payload with `unit`. On success name and quantity reset to
    /// defaults; an empty name leaves the form as it was and emits nothing.
    pub fn submit(&mut self, unit: &str) -> Option<NewItem> {
        let item = submit_manual_item(&self.name, self.category, &self.quantity.to_string(), unit)?;
        self.name.clear();
        self.quantity = 1;
        Some(item)
    }
}

/// Normalize one manual entry into a create payload.
pub fn submit_manual_item(
    name: &str,
    category: Category,
    quantity: &str,
    unit: &str,
) -> Option<NewItem> {
    let name = normalize_name(name)?;
    Some(NewItem {
        name,
        category,
        quantity: coerce_quantity(quantity),
        unit: unit.to_string(),
    })
}
