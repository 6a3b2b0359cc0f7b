//! Item Card State
//!
//! Viewing <-> Editing toggle for one item. The card never writes to the
//! store itself; it emits [`CardIntent`]s for the list page to carry out.

use crate::input::{coerce_quantity, normalize_name};
use crate::item::{Item, ItemId, ItemPatch};

/// What the card asks the list page to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardIntent {
    Update { id: ItemId, patch: ItemPatch },
    Delete { id: ItemId },
}

/// In-progress edit values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCard {
    id: ItemId,
    name: String,
    quantity: u32,
    editing: Option<EditBuffer>,
}

impl ItemCard {
    pub fn new(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            editing: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn buffer(&self) -> Option<&EditBuffer> {
        self.editing.as_ref()
    }

    /// Viewing -> Editing, seeding the buffer from the current values
    pub fn begin_edit(&mut self) {
        if self.editing.is_none() {
            self.editing = Some(EditBuffer {
                name: self.name.clone(),
                quantity: self.quantity,
            });
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if let Some(buffer) = self.editing.as_mut() {
            buffer.name = name.into();
        }
    }

    /// Quantity is coerced as typed, not at commit
    pub fn set_quantity_input(&mut self, raw: &str) {
        if let Some(buffer) = self.editing.as_mut() {
            buffer.quantity = coerce_quantity(raw);
        }
    }

    /// Commit the buffer. A blank name keeps the card in Editing and emits
    /// nothing.
    pub fn save(&mut self) -> Option<CardIntent> {
        let buffer = self.editing.as_ref()?;
        let name = normalize_name(&buffer.name)?;
        let patch = ItemPatch {
            name: Some(name),
            quantity: Some(buffer.quantity.max(1)),
        };
        self.editing = None;
        Some(CardIntent::Update { id: self.id.clone(), patch })
    }

    /// Editing -> Viewing, discarding the buffer
    pub fn cancel(&mut self) {
        self.editing = None;
    }

    /// Delete is offered only while viewing; there is no confirmation step.
    pub fn delete(&self) -> Option<CardIntent> {
        if self.editing.is_some() {
            return None;
        }
        Some(CardIntent::Delete { id: self.id.clone() })
    }
}
