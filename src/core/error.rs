use thiserror::Error;

use crate::core::types::TileCoord;
use crate::inventory::{ItemId, PartId};
use crate::logistics::OrderId;
use crate::pathfinding::NodeId;

#[derive(Error, Debug)]
pub enum WarehouseError {
    #[error("Tile ({x}, {y}) is out of bounds for a {width}x{height} warehouse")]
    TileOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("Invalid warehouse dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Tile at {0} has no storage unit")]
    NotAStorageTile(TileCoord),

    #[error("Storage unit cannot accept {requested} more (free capacity {free})")]
    StorageFull { requested: u32, free: u32 },

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Item {item} has {available} stored, {requested} requested")]
    InsufficientQuantity {
        item: ItemId,
        requested: u32,
        available: u32,
    },

    #[error("Part already registered: {0}")]
    DuplicatePart(PartId),

    #[error("Unknown part: {0}")]
    UnknownPart(PartId),

    #[error("No order available: the order queue is empty")]
    EmptyOrderQueue,

    #[error("Item {0} already has a pending ship order")]
    ShipmentPending(ItemId),

    #[error("Tile at {coord} is referenced by pending order {order}")]
    TileInUse { coord: TileCoord, order: OrderId },

    #[error("No node found with id {0}")]
    NodeNotFound(NodeId),

    #[error("Duplicate node id {0}")]
    DuplicateNode(NodeId),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WarehouseError>;
