//! Inventory - parts, items and the containers that hold them

pub mod catalogue;
pub mod item;
pub mod part;
pub mod storage;

pub use catalogue::InventoryCatalogue;
pub use item::{Item, ItemId};
pub use part::{Part, PartCatalogue, PartId};
pub use storage::StorageUnit;
