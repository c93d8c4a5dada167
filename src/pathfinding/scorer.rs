//! Edge cost functions for route searches

use crate::pathfinding::builder::TileNode;

/// Cost of moving between two nodes. Must be pure.
pub trait Scorer<N> {
    fn compute_cost(&self, from: &N, to: &N) -> f64;
}

impl<N, F> Scorer<N> for F
where
    F: Fn(&N, &N) -> f64,
{
    fn compute_cost(&self, from: &N, to: &N) -> f64 {
        self(from, to)
    }
}

/// Grid distance; admissible heuristic for 4-directional movement
#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanScorer;

impl Scorer<TileNode> for ManhattanScorer {
    fn compute_cost(&self, from: &TileNode, to: &TileNode) -> f64 {
        f64::from(from.coord().manhattan_distance(&to.coord()))
    }
}

/// Straight-line distance
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanScorer;

impl Scorer<TileNode> for EuclideanScorer {
    fn compute_cost(&self, from: &TileNode, to: &TileNode) -> f64 {
        from.coord().euclidean_distance(&to.coord())
    }
}
