//! Storage assignment policies
//!
//! A policy picks the tile an item should go to. Each controller holds one
//! policy per tile family (receive depots, ship depots, racks). Returning
//! `None` means every tile of the family is full; that is a normal outcome
//! the caller branches on, not an error.
//!
//! All policies scan candidates in row-major order (increasing y, then x)
//! and break ties by that order, so results are deterministic.

use serde::Deserialize;

use crate::core::types::TileCoord;
use crate::inventory::Item;
use crate::warehouse::{Tile, TileType, Warehouse};

/// Chooses a destination tile for an item
pub trait AssignmentPolicy: Send + Sync {
    fn assign(&self, item: &Item, warehouse: &Warehouse) -> Option<TileCoord>;
}

impl<F> AssignmentPolicy for F
where
    F: Fn(&Item, &Warehouse) -> Option<TileCoord> + Send + Sync,
{
    fn assign(&self, item: &Item, warehouse: &Warehouse) -> Option<TileCoord> {
        self(item, warehouse)
    }
}

/// Tiles of `tile_type` whose storage unit has room for one more unit
pub fn available_tiles<'a>(
    tile_type: TileType,
    warehouse: &'a Warehouse,
) -> impl Iterator<Item = &'a Tile> + 'a {
    warehouse
        .tiles_of_type(tile_type)
        .filter(|tile| tile.storage().is_some_and(|s| s.can_accept(1)))
}

/// First tile with free capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicAssignmentPolicy {
    tile_type: TileType,
}

impl BasicAssignmentPolicy {
    pub fn new(tile_type: TileType) -> Self {
        Self { tile_type }
    }

    pub fn receive_depot() -> Self {
        Self::new(TileType::ReceiveDepot)
    }

    pub fn ship_depot() -> Self {
        Self::new(TileType::ShipDepot)
    }

    pub fn rack() -> Self {
        Self::new(TileType::Rack)
    }

    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }
}

impl AssignmentPolicy for BasicAssignmentPolicy {
    fn assign(&self, _item: &Item, warehouse: &Warehouse) -> Option<TileCoord> {
        available_tiles(self.tile_type, warehouse)
            .next()
            .map(Tile::coord)
    }
}

/// Free tile closest to a fixed anchor, by Manhattan distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NearestAssignmentPolicy {
    tile_type: TileType,
    anchor: TileCoord,
}

impl NearestAssignmentPolicy {
    pub fn new(tile_type: TileType, anchor: TileCoord) -> Self {
        Self { tile_type, anchor }
    }
}

impl AssignmentPolicy for NearestAssignmentPolicy {
    fn assign(&self, _item: &Item, warehouse: &Warehouse) -> Option<TileCoord> {
        let mut best: Option<(TileCoord, u32)> = None;
        for tile in available_tiles(self.tile_type, warehouse) {
            let distance = tile.coord().manhattan_distance(&self.anchor);
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((tile.coord(), distance));
            }
        }
        best.map(|(coord, _)| coord)
    }
}

/// Tile with the most free capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadBalancedAssignmentPolicy {
    tile_type: TileType,
}

impl LoadBalancedAssignmentPolicy {
    pub fn new(tile_type: TileType) -> Self {
        Self { tile_type }
    }
}

impl AssignmentPolicy for LoadBalancedAssignmentPolicy {
    fn assign(&self, _item: &Item, warehouse: &Warehouse) -> Option<TileCoord> {
        let mut best: Option<(TileCoord, u32)> = None;
        for tile in available_tiles(self.tile_type, warehouse) {
            let free = tile.storage().map_or(0, |s| s.free_capacity());
            if best.map_or(true, |(_, f)| free > f) {
                best = Some((tile.coord(), free));
            }
        }
        best.map(|(coord, _)| coord)
    }
}

/// Policy selector used by configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Basic,
    Nearest,
    LoadBalanced,
}

impl PolicyKind {
    /// Instantiate the policy for one tile family. `anchor` only matters for `Nearest`.
    pub fn build(self, tile_type: TileType, anchor: TileCoord) -> Box<dyn AssignmentPolicy> {
        match self {
            PolicyKind::Basic => Box::new(BasicAssignmentPolicy::new(tile_type)),
            PolicyKind::Nearest => Box::new(NearestAssignmentPolicy::new(tile_type, anchor)),
            PolicyKind::LoadBalanced => Box::new(LoadBalancedAssignmentPolicy::new(tile_type)),
        }
    }
}
