//! Warehouse floor and the controller that runs it

pub mod controller;
pub mod grid;
pub mod tile;

pub use controller::WarehouseController;
pub use grid::Warehouse;
pub use tile::{Tile, TileKind, TileType};
