//! Store catalog: avatar outfits and premium items.
//!
//! Content is immutable data. The built-in catalog lives here as
//! constructor functions; hosts may supply their own catalog instead, which
//! is validated once at engine construction.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Glyph shown when no outfit is equipped.
pub const DEFAULT_AVATAR_GLYPH: &str = "🧍";

/// Which store section an item belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemSlot {
    /// Wearable; at most one equipped at a time.
    Outfit,
    /// Ownership-only status items with no equip action.
    Premium,
}

/// A purchasable item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreItem {
    /// Catalog-unique display name, also used as the item's identifier.
    pub name: String,
    /// Price in capital.
    pub price: i64,
    /// Display glyph for the avatar and store pages.
    pub glyph: String,
    /// Store section.
    pub slot: ItemSlot,
}

impl StoreItem {
    /// Create an outfit-slot item.
    pub fn outfit(name: &str, price: i64, glyph: &str) -> Self {
        Self {
            name: name.to_string(),
            price,
            glyph: glyph.to_string(),
            slot: ItemSlot::Outfit,
        }
    }

    /// Create a premium-slot item.
    pub fn premium(name: &str, price: i64, glyph: &str) -> Self {
        Self {
            name: name.to_string(),
            price,
            glyph: glyph.to_string(),
            slot: ItemSlot::Premium,
        }
    }

    /// Whether this item can be equipped.
    pub fn is_equippable(&self) -> bool {
        self.slot == ItemSlot::Outfit
    }
}

/// The built-in store catalog.
pub fn default_catalog() -> Vec<StoreItem> {
    vec![
        StoreItem::outfit("Classic Suit", 800, "🤵"),
        StoreItem::outfit("Blue Business Suit", 1200, "🕴️"),
        StoreItem::outfit("Fancy Investor", 2000, "💼"),
        StoreItem::outfit("Silicon Valley Hoodie", 500, "🧑‍💻"),
        StoreItem::premium("LinkedIn Premium Badge", 5000, "🔗"),
        StoreItem::premium("Premium Investor Access", 10000, "🏛️"),
    ]
}

/// Validate a catalog once at load time.
pub fn validate_catalog(items: &[StoreItem]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for item in items {
        if item.name.trim().is_empty() {
            return Err(CatalogError::EmptyItemName);
        }
        if item.price <= 0 {
            return Err(CatalogError::NonPositivePrice {
                item: item.name.clone(),
            });
        }
        if !seen.insert(item.name.as_str()) {
            return Err(CatalogError::DuplicateItem {
                item: item.name.clone(),
            });
        }
    }
    Ok(())
}

/// Errors from invalid catalog data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogError {
    EmptyItemName,
    NonPositivePrice { item: String },
    DuplicateItem { item: String },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::EmptyItemName => write!(f, "Store item name cannot be empty"),
            CatalogError::NonPositivePrice { item } => {
                write!(f, "Store item '{}' must have a positive price", item)
            }
            CatalogError::DuplicateItem { item } => {
                write!(f, "Store item '{}' appears more than once", item)
            }
        }
    }
}

impl std::error::Error for CatalogError {}
