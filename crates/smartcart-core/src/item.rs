//! Item Model
//!
//! Grocery entries as held by the entity store, plus the payloads sent to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque store-assigned identifier
pub type ItemId = String;

/// Unit shown when an item has none
pub const DEFAULT_UNIT: &str = "item";

/// Fixed grocery classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Produce,
    Dairy,
    Meat,
    Pantry,
    Bakery,
    Frozen,
    Beverages,
    #[default]
    Other,
}

impl Category {
    /// All categories in form order
    pub const ALL: [Category; 8] = [
        Category::Produce,
        Category::Dairy,
        Category::Meat,
        Category::Pantry,
        Category::Bakery,
        Category::Frozen,
        Category::Beverages,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Produce => "produce",
            Category::Dairy => "dairy",
            Category::Meat => "meat",
            Category::Pantry => "pantry",
            Category::Bakery => "bakery",
            Category::Frozen => "frozen",
            Category::Beverages => "beverages",
            Category::Other => "other",
        }
    }

    /// Exact match only; callers decide how to treat unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Produce => "Produce",
            Category::Dairy => "Dairy",
            Category::Meat => "Meat",
            Category::Pantry => "Pantry",
            Category::Bakery => "Bakery",
            Category::Frozen => "Frozen",
            Category::Beverages => "Beverages",
            Category::Other => "Other",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Produce => "🥬",
            Category::Dairy => "🥛",
            Category::Meat => "🥩",
            Category::Pantry => "🥫",
            Category::Bakery => "🍞",
            Category::Frozen => "🧊",
            Category::Beverages => "🥤",
            Category::Other => "🛒",
        }
    }

    /// CSS modifier class for the card colour scheme
    pub fn css_class(&self) -> &'static str {
        match self {
            Category::Produce => "category-produce",
            Category::Dairy => "category-dairy",
            Category::Meat => "category-meat",
            Category::Pantry => "category-pantry",
            Category::Bakery => "category-bakery",
            Category::Frozen => "category-frozen",
            Category::Beverages => "category-beverages",
            Category::Other => "category-other",
        }
    }
}

/// A grocery entry as returned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Raw stored value; nonstandard values are preserved
    #[serde(default)]
    pub category: Option<String>,
    /// Stored records may carry 0, negative or fractional values; those read
    /// as 1 (fractions truncate)
    #[serde(default = "min_quantity", deserialize_with = "lenient_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub unit: Option<String>,
    pub created_date: DateTime<Utc>,
}

fn min_quantity() -> u32 {
    1
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(match raw {
        Some(q) if q.is_finite() && q >= 1.0 => q.trunc().min(f64::from(u32::MAX)) as u32,
        other => {
            log::debug!("item: stored quantity {:?} read as 1", other);
            1
        }
    })
}

impl Item {
    /// Category used for icon and colour. Unknown or missing values show as
    /// `Other` without touching `self.category`.
    pub fn display_category(&self) -> Category {
        self.category
            .as_deref()
            .and_then(Category::parse)
            .unwrap_or(Category::Other)
    }

    pub fn display_unit(&self) -> &str {
        self.unit
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_UNIT)
    }

    /// e.g. "Qty: 2 items", "Qty: 1 item"
    pub fn quantity_label(&self) -> String {
        let plural = if self.quantity > 1 { "s" } else { "" };
        format!("Qty: {} {}{}", self.quantity, self.display_unit(), plural)
    }
}

/// Create payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub category: Category,
    pub quantity: u32,
    pub unit: String,
}

/// Partial update payload; absent fields are left as stored
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl ItemPatch {
    /// Apply to a stored item (used by the in-memory store)
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_item(category: Option<&str>, quantity: u32, unit: Option<&str>) -> Item {
        Item {
            id: "a1".to_string(),
            name: "Milk".to_string(),
            category: category.map(str::to_string),
            quantity,
            unit: unit.map(str::to_string),
            created_date: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_category_round_trip_names() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse("Dairy"), None);
    }

    #[test]
    fn test_unknown_category_displays_as_other() {
        let item = make_item(Some("snacks"), 1, None);
        assert_eq!(item.display_category(), Category::Other);
        // stored value untouched
        assert_eq!(item.category.as_deref(), Some("snacks"));

        let item = make_item(None, 1, None);
        assert_eq!(item.display_category(), Category::Other);

        let item = make_item(Some("frozen"), 1, None);
        assert_eq!(item.display_category(), Category::Frozen);
    }

    #[test]
    fn test_quantity_label() {
        assert_eq!(make_item(None, 1, None).quantity_label(), "Qty: 1 item");
        assert_eq!(make_item(None, 3, None).quantity_label(), "Qty: 3 items");
        assert_eq!(make_item(None, 2, Some("bottle")).quantity_label(), "Qty: 2 bottles");
        assert_eq!(make_item(None, 2, Some("")).quantity_label(), "Qty: 2 items");
    }

    #[test]
    fn test_item_deserializes_store_payload() {
        let json = r#"{
            "id": "66f1",
            "name": "Eggs",
            "category": "dairy",
            "quantity": 12,
            "created_date": "2024-05-01T09:00:00Z"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.name, "Eggs");
        assert_eq!(item.unit, None);
        assert_eq!(item.display_category(), Category::Dairy);
    }

    #[test]
    fn test_legacy_quantities_do_not_fail_the_list() {
        let json = r#"[
            {"id": "a", "name": "Rice", "quantity": 2, "created_date": "2024-05-01T09:00:00Z"},
            {"id": "b", "name": "Beans", "quantity": -3, "created_date": "2024-05-01T09:00:00Z"},
            {"id": "c", "name": "Oats", "quantity": 0, "created_date": "2024-05-01T09:00:00Z"},
            {"id": "d", "name": "Salt", "quantity": 2.7, "created_date": "2024-05-01T09:00:00Z"},
            {"id": "e", "name": "Flour", "quantity": null, "created_date": "2024-05-01T09:00:00Z"},
            {"id": "f", "name": "Sugar", "created_date": "2024-05-01T09:00:00Z"}
        ]"#;
        let items: Vec<Item> = serde_json::from_str(json).unwrap();
        let quantities: Vec<u32> = items.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, [2, 1, 1, 2, 1, 1]);
        assert_eq!(items[1].quantity_label(), "Qty: 1 item");
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = ItemPatch { name: Some("Bread".into()), quantity: None };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"name":"Bread"}"#);
    }
}
