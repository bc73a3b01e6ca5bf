use std::collections::BTreeMap;

use crop_core::ItemCode;

/// The actor's item counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: BTreeMap<ItemCode, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: ItemCode, quantity: u32) {
        if quantity == 0 {
            return;
        }
        *self.items.entry(item).or_insert(0) += quantity;
    }

    pub fn quantity(&self, item: ItemCode) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemCode, u32)> + '_ {
        self.items.iter().map(|(item, quantity)| (*item, *quantity))
    }
}
