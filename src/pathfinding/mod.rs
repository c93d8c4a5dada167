//! Routing graphs over the warehouse floor and searches across them

pub mod builder;
pub mod graph;
pub mod scorer;
pub mod search;

pub use builder::{access_points, build_graph, GraphBuilder, TileNode};
pub use graph::{Graph, GraphNode, NodeId};
pub use scorer::{EuclideanScorer, ManhattanScorer, Scorer};
pub use search::RouteFinder;
