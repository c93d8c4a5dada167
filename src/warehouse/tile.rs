//! Tile variants that make up the warehouse floor

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::TileCoord;
use crate::inventory::StorageUnit;

/// Fieldless tag for the kind of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Empty,
    Rack,
    ReceiveDepot,
    ShipDepot,
}

impl TileType {
    pub const ALL: [TileType; 4] = [
        TileType::Empty,
        TileType::Rack,
        TileType::ReceiveDepot,
        TileType::ShipDepot,
    ];

    /// Movers may only walk across empty floor
    pub fn is_traversable(&self) -> bool {
        matches!(self, TileType::Empty)
    }

    pub fn holds_storage(&self) -> bool {
        !matches!(self, TileType::Empty)
    }

    /// Single-character form used by ASCII layouts
    pub fn glyph(&self) -> char {
        match self {
            TileType::Empty => '.',
            TileType::Rack => 'R',
            TileType::ReceiveDepot => 'D',
            TileType::ShipDepot => 'S',
        }
    }

    pub fn from_glyph(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.glyph() == c)
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TileType::Empty => "Empty",
            TileType::Rack => "Rack",
            TileType::ReceiveDepot => "ReceiveDepot",
            TileType::ShipDepot => "ShipDepot",
        };
        f.write_str(name)
    }
}

/// What occupies a tile. Only storage variants carry a storage unit.
#[derive(Debug, Clone)]
pub enum TileKind {
    Empty,
    Rack(Option<StorageUnit>),
    ReceiveDepot(Option<StorageUnit>),
    ShipDepot(Option<StorageUnit>),
}

impl TileKind {
    pub fn tile_type(&self) -> TileType {
        match self {
            TileKind::Empty => TileType::Empty,
            TileKind::Rack(_) => TileType::Rack,
            TileKind::ReceiveDepot(_) => TileType::ReceiveDepot,
            TileKind::ShipDepot(_) => TileType::ShipDepot,
        }
    }

    /// Build a kind from its tag, attaching a storage unit of `capacity`
    /// when the kind can hold one
    pub fn from_type(tile_type: TileType, capacity: Option<u32>) -> Self {
        let storage = capacity.map(StorageUnit::new);
        match tile_type {
            TileType::Empty => TileKind::Empty,
            TileType::Rack => TileKind::Rack(storage),
            TileType::ReceiveDepot => TileKind::ReceiveDepot(storage),
            TileType::ShipDepot => TileKind::ShipDepot(storage),
        }
    }
}

/// One cell of the warehouse grid
///
/// Coordinates and kind are fixed for the life of the tile. Changing what
/// sits at a coordinate means replacing the tile via `Warehouse::set_tile`.
/// Only the contents of the storage unit are mutable.
#[derive(Debug, Clone)]
pub struct Tile {
    coord: TileCoord,
    kind: TileKind,
}

impl Tile {
    pub fn new(coord: TileCoord, kind: TileKind) -> Self {
        Self { coord, kind }
    }

    pub fn empty(x: i32, y: i32) -> Self {
        Self::new(TileCoord::new(x, y), TileKind::Empty)
    }

    pub fn rack(x: i32, y: i32, capacity: u32) -> Self {
        Self::new(TileCoord::new(x, y), TileKind::Rack(Some(StorageUnit::new(capacity))))
    }

    pub fn receive_depot(x: i32, y: i32, capacity: u32) -> Self {
        Self::new(
            TileCoord::new(x, y),
            TileKind::ReceiveDepot(Some(StorageUnit::new(capacity))),
        )
    }

    pub fn ship_depot(x: i32, y: i32, capacity: u32) -> Self {
        Self::new(
            TileCoord::new(x, y),
            TileKind::ShipDepot(Some(StorageUnit::new(capacity))),
        )
    }

    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    pub fn x(&self) -> i32 {
        self.coord.x
    }

    pub fn y(&self) -> i32 {
        self.coord.y
    }

    pub fn kind(&self) -> &TileKind {
        &self.kind
    }

    pub fn tile_type(&self) -> TileType {
        self.kind.tile_type()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.kind, TileKind::Empty)
    }

    pub fn storage(&self) -> Option<&StorageUnit> {
        match &self.kind {
            TileKind::Empty => None,
            TileKind::Rack(s) | TileKind::ReceiveDepot(s) | TileKind::ShipDepot(s) => s.as_ref(),
        }
    }

    pub fn storage_mut(&mut self) -> Option<&mut StorageUnit> {
        match &mut self.kind {
            TileKind::Empty => None,
            TileKind::Rack(s) | TileKind::ReceiveDepot(s) | TileKind::ShipDepot(s) => s.as_mut(),
        }
    }

    pub(crate) fn into_storage(self) -> Option<StorageUnit> {
        match self.kind {
            TileKind::Empty => None,
            TileKind::Rack(s) | TileKind::ReceiveDepot(s) | TileKind::ShipDepot(s) => s,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.tile_type(), self.coord)?;
        if let Some(storage) = self.storage() {
            write!(f, " [{}/{}]", storage.total(), storage.capacity())?;
        }
        Ok(())
    }
}
