//! Coins and consumable items
//!
//! The ledger outlives individual game sessions: it is loaded from the save,
//! credited by correct answers, and spent in the shop.

use serde::{Deserialize, Serialize};

/// Consumable shop items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Item {
    /// Discards the active tile without penalty
    Skip,
    /// Absorbs one miss without losing a life
    Shield,
}

impl Item {
    pub const ALL: [Item; 2] = [Item::Skip, Item::Shield];

    pub fn as_str(&self) -> &'static str {
        match self {
            Item::Skip => "skip",
            Item::Shield => "shield",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Item::Skip => "Skip",
            Item::Shield => "Shield",
        }
    }
}

/// Owned item counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub skip: u32,
    pub shield: u32,
}

impl Inventory {
    pub fn count(&self, item: Item) -> u32 {
        match item {
            Item::Skip => self.skip,
            Item::Shield => self.shield,
        }
    }

    fn count_mut(&mut self, item: Item) -> &mut u32 {
        match item {
            Item::Skip => &mut self.skip,
            Item::Shield => &mut self.shield,
        }
    }
}

/// Coin balance plus inventory. Counts are unsigned and every debit is
/// checked, so nothing here can go negative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    coins: u32,
    items: Inventory,
}

impl Ledger {
    pub fn new(coins: u32, items: Inventory) -> Self {
        Self { coins, items }
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn items(&self) -> Inventory {
        self.items
    }

    pub fn count(&self, item: Item) -> u32 {
        self.items.count(item)
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.coins >= cost
    }

    pub fn credit_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Buy one `item` for `cost` coins. Returns false (and changes nothing)
    /// when the balance is too low.
    pub fn purchase(&mut self, item: Item, cost: u32) -> bool {
        if !self.can_afford(cost) {
            log::debug!(
                "Cannot afford {} ({} coins, cost {})",
                item.as_str(),
                self.coins,
                cost
            );
            return false;
        }
        self.coins -= cost;
        let count = self.items.count_mut(item);
        *count = count.saturating_add(1);
        true
    }

    /// Use up one `item`. Returns false when none are owned.
    pub fn consume(&mut self, item: Item) -> bool {
        let count = self.items.count_mut(item);
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }
}
