//! Player state: identity, capital, and the avatar inventory.

use crate::store::{ItemSlot, StoreItem};
use crate::types::{Capital, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A logged-in player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Leaderboard-unique display name.
    pub name: String,
    /// Running balance. Starts at zero and has no floor: answer rewards and
    /// penalties apply unconditionally, so it may go negative.
    pub capital: Capital,
    /// Names of purchased items.
    pub inventory: HashSet<ItemId>,
    /// Currently equipped outfit, if any.
    pub equipped: Option<ItemId>,
}

impl Player {
    /// Create a new player with an empty wallet and inventory.
    pub fn new(name: String) -> Self {
        Self {
            name,
            capital: 0,
            inventory: HashSet::new(),
            equipped: None,
        }
    }

    /// Apply a signed answer reward or penalty.
    pub fn apply_delta(&mut self, delta: Capital) {
        self.capital += delta;
    }

    /// Check whether the player can pay a price.
    pub fn can_afford(&self, price: Capital) -> bool {
        self.capital >= price
    }

    /// Check whether an item has been purchased.
    pub fn owns(&self, item: &str) -> bool {
        self.inventory.contains(item)
    }

    /// Buy an item: deduct its price and add it to the inventory, together
    /// or not at all.
    pub fn purchase(&mut self, item: &StoreItem) -> Result<(), EconomyError> {
        if self.owns(&item.name) {
            return Err(EconomyError::AlreadyOwned(item.name.clone()));
        }
        if !self.can_afford(item.price) {
            return Err(EconomyError::InsufficientFunds {
                item: item.name.clone(),
                price: item.price,
                capital: self.capital,
            });
        }
        self.capital -= item.price;
        self.inventory.insert(item.name.clone());
        Ok(())
    }

    /// Equip an owned outfit, replacing any prior one.
    pub fn equip(&mut self, item: &StoreItem) -> Result<(), EconomyError> {
        if !self.owns(&item.name) {
            return Err(EconomyError::NotOwned(item.name.clone()));
        }
        if item.slot != ItemSlot::Outfit {
            return Err(EconomyError::WrongSlot(item.name.clone()));
        }
        self.equipped = Some(item.name.clone());
        Ok(())
    }

    /// Whether the player owns any premium-slot item from the catalog.
    pub fn has_premium(&self, catalog: &[StoreItem]) -> bool {
        catalog
            .iter()
            .any(|item| item.slot == ItemSlot::Premium && self.owns(&item.name))
    }
}

/// Errors from wallet and inventory operations.
///
/// All recoverable; the failing operation leaves the player unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EconomyError {
    /// The price exceeds the player's current capital.
    InsufficientFunds {
        item: ItemId,
        price: Capital,
        capital: Capital,
    },
    /// The item is already in the inventory.
    AlreadyOwned(ItemId),
    /// The item was never purchased.
    NotOwned(ItemId),
    /// The item is not an outfit and cannot be equipped.
    WrongSlot(ItemId),
}

impl std::fmt::Display for EconomyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EconomyError::InsufficientFunds {
                item,
                price,
                capital,
            } => write!(
                f,
                "Not enough capital to buy '{}': costs {}, have {}",
                item, price, capital
            ),
            EconomyError::AlreadyOwned(item) => write!(f, "'{}' is already owned", item),
            EconomyError::NotOwned(item) => write!(f, "'{}' has not been purchased", item),
            EconomyError::WrongSlot(item) => write!(f, "'{}' cannot be equipped", item),
        }
    }
}

impl std::error::Error for EconomyError {}
