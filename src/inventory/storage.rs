//! Storage unit - capacity-bounded item container owned by a tile

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{Result, WarehouseError};
use crate::inventory::item::{Item, ItemId};

/// A bounded container of items
///
/// Invariant: `total() <= capacity()` at all times. Deserialization goes
/// through the same checks as `insert`, so a serialized unit holding more
/// than its capacity is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "StorageUnitRecord", into = "StorageUnitRecord")]
pub struct StorageUnit {
    capacity: u32,
    /// Items stored: id -> (item, quantity)
    contents: AHashMap<ItemId, (Item, u32)>,
}

/// Serialized form of a storage unit
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageUnitRecord {
    capacity: u32,
    #[serde(default)]
    contents: Vec<StoredItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredItem {
    item: Item,
    quantity: u32,
}

impl TryFrom<StorageUnitRecord> for StorageUnit {
    type Error = WarehouseError;

    fn try_from(record: StorageUnitRecord) -> Result<Self> {
        let mut unit = StorageUnit::new(record.capacity);
        for stored in record.contents.into_iter().filter(|s| s.quantity > 0) {
            unit.insert(stored.item, stored.quantity)?;
        }
        Ok(unit)
    }
}

impl From<StorageUnit> for StorageUnitRecord {
    fn from(unit: StorageUnit) -> Self {
        let contents = unit
            .items()
            .into_iter()
            .map(|(item, quantity)| StoredItem {
                item: item.clone(),
                quantity,
            })
            .collect();
        Self {
            capacity: unit.capacity,
            contents,
        }
    }
}

impl StorageUnit {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            contents: AHashMap::new(),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Total quantity across all items
    pub fn total(&self) -> u32 {
        self.contents.values().map(|(_, q)| *q).sum()
    }

    pub fn free_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.total())
    }

    pub fn can_accept(&self, quantity: u32) -> bool {
        quantity <= self.free_capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.contents.contains_key(&id)
    }

    /// Quantity stored for an item, 0 if absent
    pub fn quantity(&self, id: ItemId) -> u32 {
        self.contents.get(&id).map(|(_, q)| *q).unwrap_or(0)
    }

    /// Store `quantity` units of an item. All or nothing.
    pub fn insert(&mut self, item: Item, quantity: u32) -> Result<()> {
        if !self.can_accept(quantity) {
            return Err(WarehouseError::StorageFull {
                requested: quantity,
                free: self.free_capacity(),
            });
        }
        let entry = self.contents.entry(item.id()).or_insert((item, 0));
        entry.1 += quantity;
        Ok(())
    }

    /// Take `quantity` units of an item out, returning the item
    ///
    /// The entry disappears once its quantity reaches zero.
    pub fn remove(&mut self, id: ItemId, quantity: u32) -> Result<Item> {
        let Some(entry) = self.contents.get_mut(&id) else {
            return Err(WarehouseError::ItemNotFound(id));
        };
        if entry.1 < quantity {
            return Err(WarehouseError::InsufficientQuantity {
                item: id,
                requested: quantity,
                available: entry.1,
            });
        }
        entry.1 -= quantity;

        if entry.1 == 0 {
            // Entry exists, checked above
            let (item, _) = self.contents.remove(&id).ok_or(WarehouseError::ItemNotFound(id))?;
            Ok(item)
        } else {
            Ok(entry.0.clone())
        }
    }

    /// Stored items with quantities, sorted by item id
    pub fn items(&self) -> Vec<(&Item, u32)> {
        let mut items: Vec<(&Item, u32)> = self.contents.values().map(|(i, q)| (i, *q)).collect();
        items.sort_by_key(|(item, _)| item.id());
        items
    }
}

impl fmt::Display for StorageUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StorageUnit {}/{}", self.total(), self.capacity)?;
        for (item, quantity) in self.items() {
            write!(f, "\n- {} x{}", item, quantity)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(n: u128) -> Item {
        Item::new("widget").with_id(ItemId::from_u128(n))
    }

    #[test]
    fn test_insert_remove() {
        let mut unit = StorageUnit::new(5);
        unit.insert(item(1), 3).unwrap();
        assert_eq!(unit.total(), 3);
        assert_eq!(unit.free_capacity(), 2);
        assert_eq!(unit.quantity(ItemId::from_u128(1)), 3);

        let taken = unit.remove(ItemId::from_u128(1), 2).unwrap();
        assert_eq!(taken.id(), ItemId::from_u128(1));
        assert_eq!(unit.quantity(ItemId::from_u128(1)), 1);

        unit.remove(ItemId::from_u128(1), 1).unwrap();
        assert!(unit.is_empty());
        assert!(!unit.contains(ItemId::from_u128(1)));
    }

    #[test]
    fn test_cannot_exceed_capacity() {
        let mut unit = StorageUnit::new(2);
        unit.insert(item(1), 1).unwrap();
        unit.insert(item(2), 1).unwrap();

        let err = unit.insert(item(3), 1).unwrap_err();
        assert!(matches!(err, WarehouseError::StorageFull { requested: 1, free: 0 }));
        // Nothing stored on failure
        assert_eq!(unit.total(), 2);
        assert!(!unit.contains(ItemId::from_u128(3)));
    }

    #[test]
    fn test_remove_errors() {
        let mut unit = StorageUnit::new(4);
        assert!(matches!(
            unit.remove(ItemId::from_u128(9), 1),
            Err(WarehouseError::ItemNotFound(_))
        ));

        unit.insert(item(1), 1).unwrap();
        assert!(matches!(
            unit.remove(ItemId::from_u128(1), 2),
            Err(WarehouseError::InsufficientQuantity { requested: 2, available: 1, .. })
        ));
        assert_eq!(unit.total(), 1);
    }

    #[test]
    fn test_zero_capacity_accepts_nothing() {
        let unit = StorageUnit::new(0);
        assert!(!unit.can_accept(1));
        assert!(unit.can_accept(0));
    }

    #[test]
    fn test_deserialize_rejects_overfull_unit() {
        let overfull = r#"
            capacity = 1

            [[contents]]
            quantity = 3

            [contents.item]
            id = "00000000-0000-0000-0000-000000000001"
            part = "widget"
            metadata = {}
        "#;
        assert!(toml::from_str::<StorageUnit>(overfull).is_err());

        let fits = overfull.replace("capacity = 1", "capacity = 4");
        let unit: StorageUnit = toml::from_str(&fits).unwrap();
        assert_eq!(unit.total(), 3);
        assert_eq!(unit.free_capacity(), 1);
        assert_eq!(unit.quantity(ItemId::from_u128(1)), 3);
    }

    #[test]
    fn test_serialized_unit_reloads() {
        let mut unit = StorageUnit::new(4);
        unit.insert(item(1), 2).unwrap();
        unit.insert(item(2), 1).unwrap();

        let text = toml::to_string(&unit).unwrap();
        let reloaded: StorageUnit = toml::from_str(&text).unwrap();
        assert_eq!(reloaded.capacity(), 4);
        assert_eq!(reloaded.total(), 3);
        assert_eq!(reloaded.quantity(ItemId::from_u128(2)), 1);
    }

    #[test]
    fn test_display_lists_items() {
        let mut unit = StorageUnit::new(3);
        unit.insert(item(1), 2).unwrap();
        let text = unit.to_string();
        assert!(text.starts_with("StorageUnit 2/3"));
        assert!(text.contains("x2"));
    }
}
