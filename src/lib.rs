//! Warehouse Logistics - tile-grid warehouse with storage assignment,
//! order queuing and routing graphs

pub mod core;
pub mod inventory;
pub mod logistics;
pub mod pathfinding;
pub mod warehouse;
