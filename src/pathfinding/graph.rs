//! Generic node/edge container consumed by route searches

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{Result, WarehouseError};
use crate::core::types::TileCoord;
use crate::warehouse::Warehouse;

/// Node identifier
///
/// Tile nodes derive their id from coordinates as `"{x},{y}"`, which is
/// injective over integer pairs and stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_coord(coord: TileCoord) -> Self {
        Self(format!("{},{}", coord.x, coord.y))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TileCoord> for NodeId {
    fn from(coord: TileCoord) -> Self {
        Self::from_coord(coord)
    }
}

/// Anything that can sit in a `Graph`
pub trait GraphNode {
    fn id(&self) -> &NodeId;
}

/// Immutable snapshot of nodes and their adjacency
#[derive(Debug, Clone)]
pub struct Graph<N: GraphNode> {
    nodes: Vec<N>,
    index: AHashMap<NodeId, usize>,
    connections: AHashMap<NodeId, Vec<NodeId>>,
    source_revision: Option<u64>,
}

impl<N: GraphNode> Graph<N> {
    /// Build a graph from nodes and an adjacency map
    ///
    /// Fails if two nodes share an id. Repeated neighbor ids are collapsed.
    pub fn new(nodes: Vec<N>, connections: AHashMap<NodeId, Vec<NodeId>>) -> Result<Self> {
        let mut index = AHashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id().clone(), i).is_some() {
                return Err(WarehouseError::DuplicateNode(node.id().clone()));
            }
        }
        let connections = connections
            .into_iter()
            .map(|(id, mut neighbors)| {
                let mut seen = Vec::with_capacity(neighbors.len());
                neighbors.retain(|n| {
                    if seen.contains(n) {
                        false
                    } else {
                        seen.push(n.clone());
                        true
                    }
                });
                (id, neighbors)
            })
            .collect();
        Ok(Self {
            nodes,
            index,
            connections,
            source_revision: None,
        })
    }

    /// Assemble a graph whose node ids are unique by construction
    pub(crate) fn from_parts(
        nodes: Vec<N>,
        connections: AHashMap<NodeId, Vec<NodeId>>,
        revision: u64,
    ) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id().clone(), i))
            .collect();
        Self {
            nodes,
            index,
            connections,
            source_revision: Some(revision),
        }
    }

    /// Record the warehouse revision this graph was derived from
    pub fn with_source_revision(mut self, revision: u64) -> Self {
        self.source_revision = Some(revision);
        self
    }

    pub fn source_revision(&self) -> Option<u64> {
        self.source_revision
    }

    /// True when the warehouse has changed since this graph was built
    pub fn is_stale(&self, warehouse: &Warehouse) -> bool {
        self.source_revision
            .is_some_and(|revision| revision != warehouse.revision())
    }

    /// Look up a node. A missing id means the graph is out of sync with
    /// whoever produced the id; rebuild instead of retrying.
    pub fn get_node(&self, id: &NodeId) -> Result<&N> {
        self.index
            .get(id)
            .map(|&i| &self.nodes[i])
            .ok_or_else(|| WarehouseError::NodeNotFound(id.clone()))
    }

    /// Resolve a node's neighbors
    pub fn get_connections(&self, node: &N) -> Result<Vec<&N>> {
        let id = node.id();
        if !self.index.contains_key(id) {
            return Err(WarehouseError::NodeNotFound(id.clone()));
        }
        self.neighbor_ids(id)
            .iter()
            .map(|neighbor| self.get_node(neighbor))
            .collect()
    }

    /// Neighbor ids of a node, empty for unknown or isolated nodes
    pub fn neighbor_ids(&self, id: &NodeId) -> &[NodeId] {
        self.connections.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Nodes in construction order
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of directed adjacency entries (twice the undirected edges)
    pub fn adjacency_count(&self) -> usize {
        self.connections.values().map(Vec::len).sum()
    }
}
