//! Inventory catalogue - where every item in the warehouse currently sits

use ahash::AHashMap;

use crate::core::types::TileCoord;
use crate::inventory::item::{Item, ItemId};

#[derive(Debug, Clone, Default)]
pub struct InventoryCatalogue {
    entries: AHashMap<ItemId, (Item, TileCoord)>,
}

impl InventoryCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an item as held at `location`, replacing any previous record
    pub fn record(&mut self, item: Item, location: TileCoord) {
        self.entries.insert(item.id(), (item, location));
    }

    /// Move an existing record. Returns false if the item is unknown.
    pub fn relocate(&mut self, id: ItemId, location: TileCoord) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.1 = location;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        self.entries.remove(&id).map(|(item, _)| item)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.entries.get(&id).map(|(item, _)| item)
    }

    pub fn location(&self, id: ItemId) -> Option<TileCoord> {
        self.entries.get(&id).map(|(_, loc)| *loc)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All items with their locations, sorted by location then id
    pub fn items(&self) -> Vec<(&Item, TileCoord)> {
        let mut items: Vec<(&Item, TileCoord)> =
            self.entries.values().map(|(item, loc)| (item, *loc)).collect();
        items.sort_by_key(|(item, loc)| ((loc.y, loc.x), item.id()));
        items
    }
}
