//! Routing graph construction from the warehouse floor
//!
//! The graph is a snapshot. It does not observe the grid, so it has to be
//! rebuilt after every `Warehouse::set_tile`; `Graph::is_stale` tells you
//! when that has happened.

use ahash::AHashMap;
use std::hash::{Hash, Hasher};

use crate::core::error::Result;
use crate::core::types::TileCoord;
use crate::pathfinding::graph::{Graph, GraphNode, NodeId};
use crate::warehouse::{Tile, TileType, Warehouse};

/// Read-only copy of a traversable tile
///
/// Owns its data, so a built graph can be shared across threads while the
/// warehouse is mutated elsewhere. Equality is by coordinate.
#[derive(Debug, Clone)]
pub struct TileNode {
    id: NodeId,
    coord: TileCoord,
    tile_type: TileType,
}

impl TileNode {
    pub fn new(tile: &Tile) -> Self {
        Self {
            id: NodeId::from_coord(tile.coord()),
            coord: tile.coord(),
            tile_type: tile.tile_type(),
        }
    }

    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }
}

impl GraphNode for TileNode {
    fn id(&self) -> &NodeId {
        &self.id
    }
}

impl PartialEq for TileNode {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for TileNode {}

impl Hash for TileNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coord.hash(state);
    }
}

/// Derives routing graphs from a warehouse
#[derive(Clone, Copy)]
pub struct GraphBuilder {
    traversable: fn(&Tile) -> bool,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self {
            traversable: |tile| tile.tile_type().is_traversable(),
        }
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom rule for which tiles movers may cross
    pub fn with_traversable(traversable: fn(&Tile) -> bool) -> Self {
        Self { traversable }
    }

    pub fn is_traversable(&self, tile: &Tile) -> bool {
        (self.traversable)(tile)
    }

    /// Every traversable tile becomes a node; each node links to its
    /// in-bounds, traversable axis-aligned neighbors.
    pub fn build(&self, warehouse: &Warehouse) -> Graph<TileNode> {
        let nodes: Vec<TileNode> = warehouse
            .tiles()
            .filter(|tile| self.is_traversable(tile))
            .map(TileNode::new)
            .collect();

        let mut connections = AHashMap::with_capacity(nodes.len());
        for node in &nodes {
            connections.insert(node.id().clone(), self.traversable_neighbors(warehouse, node.coord()));
        }

        let graph = Graph::from_parts(nodes, connections, warehouse.revision());
        tracing::debug!(
            "Built routing graph: {} nodes, {} edges (revision {})",
            graph.len(),
            graph.adjacency_count() / 2,
            warehouse.revision()
        );
        graph
    }

    /// Graph nodes adjacent to any tile, traversable or not
    ///
    /// Racks and depots are never nodes themselves; movers reach them by
    /// standing on one of these.
    pub fn access_points(&self, warehouse: &Warehouse, coord: TileCoord) -> Result<Vec<NodeId>> {
        warehouse.tile(coord)?;
        Ok(self.traversable_neighbors(warehouse, coord))
    }

    fn traversable_neighbors(&self, warehouse: &Warehouse, coord: TileCoord) -> Vec<NodeId> {
        coord
            .neighbors()
            .into_iter()
            .filter(|n| {
                warehouse
                    .tile(*n)
                    .is_ok_and(|tile| self.is_traversable(tile))
            })
            .map(NodeId::from_coord)
            .collect()
    }
}

/// Build a routing graph with the default rule: only empty tiles are traversable
pub fn build_graph(warehouse: &Warehouse) -> Graph<TileNode> {
    GraphBuilder::default().build(warehouse)
}

/// Traversable neighbors of the tile at `coord`, under the default rule
pub fn access_points(warehouse: &Warehouse, coord: TileCoord) -> Result<Vec<NodeId>> {
    GraphBuilder::default().access_points(warehouse, coord)
}
