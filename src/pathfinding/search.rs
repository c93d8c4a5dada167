//! A* route search over a routing graph
//!
//! One possible consumer of `Graph` + `Scorer`. The rest of the crate never
//! depends on it, so callers can bring their own search instead.

use ahash::{AHashMap, AHashSet};
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::core::error::Result;
use crate::pathfinding::builder::TileNode;
use crate::pathfinding::graph::{Graph, GraphNode, NodeId};
use crate::pathfinding::scorer::{ManhattanScorer, Scorer};

/// Entry in the A* open set
#[derive(Debug)]
struct OpenEntry {
    id: NodeId,
    f_cost: OrderedFloat<f64>, // g_cost + heuristic
    /// Discovery order, so equal-cost ties resolve the same way every run
    seq: u64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.seq == other.seq
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* search driven by two scorers
///
/// `next_node_scorer` prices a single step between neighbors;
/// `target_scorer` estimates the remaining cost to the goal and should not
/// overestimate it if shortest routes are required.
pub struct RouteFinder<'g, N: GraphNode, S, H> {
    graph: &'g Graph<N>,
    next_node_scorer: S,
    target_scorer: H,
}

impl<'g> RouteFinder<'g, TileNode, ManhattanScorer, ManhattanScorer> {
    /// Unit steps with a Manhattan heuristic, the usual choice for tile grids
    pub fn manhattan(graph: &'g Graph<TileNode>) -> Self {
        Self::new(graph, ManhattanScorer, ManhattanScorer)
    }
}

impl<'g, N, S, H> RouteFinder<'g, N, S, H>
where
    N: GraphNode,
    S: Scorer<N>,
    H: Scorer<N>,
{
    pub fn new(graph: &'g Graph<N>, next_node_scorer: S, target_scorer: H) -> Self {
        Self {
            graph,
            next_node_scorer,
            target_scorer,
        }
    }

    /// Cheapest route from `from` to `to`, both ends included
    ///
    /// Returns `Ok(None)` when the goal is unreachable and `NodeNotFound`
    /// when either id (or any neighbor id met on the way) is not in the graph.
    pub fn find_route(&self, from: &NodeId, to: &NodeId) -> Result<Option<Vec<&'g N>>> {
        let graph = self.graph;
        let start = graph.get_node(from)?;
        let goal = graph.get_node(to)?;

        if from == to {
            return Ok(Some(vec![start]));
        }

        let mut open_set = BinaryHeap::new();
        let mut came_from: AHashMap<NodeId, NodeId> = AHashMap::new();
        let mut g_scores: AHashMap<NodeId, f64> = AHashMap::new();
        let mut closed_set: AHashSet<NodeId> = AHashSet::new();
        let mut seq = 0u64;

        g_scores.insert(from.clone(), 0.0);
        open_set.push(OpenEntry {
            id: from.clone(),
            f_cost: OrderedFloat(self.target_scorer.compute_cost(start, goal)),
            seq,
        });

        while let Some(current) = open_set.pop() {
            if current.id == *to {
                let route = self.reconstruct_route(&came_from, current.id)?;
                tracing::debug!(
                    "Route {} -> {}: {} steps, cost {:.2}",
                    from,
                    to,
                    route.len() - 1,
                    self.route_cost(&route)
                );
                return Ok(Some(route));
            }

            // Stale heap entries for already-expanded nodes
            if !closed_set.insert(current.id.clone()) {
                continue;
            }

            let current_node = graph.get_node(&current.id)?;
            let current_g = g_scores.get(&current.id).copied().unwrap_or(f64::INFINITY);

            for neighbor_id in graph.neighbor_ids(&current.id) {
                if closed_set.contains(neighbor_id) {
                    continue;
                }
                let neighbor = graph.get_node(neighbor_id)?;

                let tentative_g = current_g + self.next_node_scorer.compute_cost(current_node, neighbor);
                let neighbor_g = g_scores.get(neighbor_id).copied().unwrap_or(f64::INFINITY);

                if tentative_g < neighbor_g {
                    came_from.insert(neighbor_id.clone(), current.id.clone());
                    g_scores.insert(neighbor_id.clone(), tentative_g);

                    seq += 1;
                    let f_cost = tentative_g + self.target_scorer.compute_cost(neighbor, goal);
                    open_set.push(OpenEntry {
                        id: neighbor_id.clone(),
                        f_cost: OrderedFloat(f_cost),
                        seq,
                    });
                }
            }
        }

        Ok(None) // No route found
    }

    /// Sum of step costs along a route
    pub fn route_cost(&self, route: &[&N]) -> f64 {
        route
            .windows(2)
            .map(|step| self.next_node_scorer.compute_cost(step[0], step[1]))
            .sum()
    }

    fn reconstruct_route(
        &self,
        came_from: &AHashMap<NodeId, NodeId>,
        goal: NodeId,
    ) -> Result<Vec<&'g N>> {
        let mut ids = vec![goal];
        while let Some(prev) = ids.last().and_then(|id| came_from.get(id)) {
            ids.push(prev.clone());
        }
        ids.reverse();
        ids.iter().map(|id| self.graph.get_node(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StorageCapacities;
    use crate::core::error::WarehouseError;
    use crate::core::types::TileCoord;
    use crate::pathfinding::builder::build_graph;
    use crate::warehouse::Warehouse;

    fn id(x: i32, y: i32) -> NodeId {
        NodeId::from_coord(TileCoord::new(x, y))
    }

    fn layout(rows: &[&str]) -> Warehouse {
        Warehouse::from_rows(rows, &StorageCapacities::default()).unwrap()
    }

    fn coords(route: &[&TileNode]) -> Vec<(i32, i32)> {
        route.iter().map(|n| (n.coord().x, n.coord().y)).collect()
    }

    #[test]
    fn test_straight_line() {
        let warehouse = Warehouse::new(5, 1).unwrap();
        let graph = build_graph(&warehouse);
        let finder = RouteFinder::manhattan(&graph);

        let route = finder.find_route(&id(0, 0), &id(4, 0)).unwrap().unwrap();
        assert_eq!(coords(&route), vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        assert_eq!(finder.route_cost(&route), 4.0);
    }

    #[test]
    fn test_routes_around_racks() {
        let warehouse = layout(&[
            ".....",
            ".RRR.",
            ".....",
        ]);
        let graph = build_graph(&warehouse);
        let finder = RouteFinder::manhattan(&graph);

        let route = finder.find_route(&id(2, 0), &id(2, 2)).unwrap().unwrap();
        assert_eq!(route.len(), 7);
        assert!(route.iter().all(|n| n.coord().y != 1 || n.coord().x == 0 || n.coord().x == 4));
        assert_eq!(route.first().unwrap().coord(), TileCoord::new(2, 0));
        assert_eq!(route.last().unwrap().coord(), TileCoord::new(2, 2));
    }

    #[test]
    fn test_unreachable_goal() {
        let warehouse = layout(&[".R."]);
        let graph = build_graph(&warehouse);
        let finder = RouteFinder::manhattan(&graph);
        assert!(finder.find_route(&id(0, 0), &id(2, 0)).unwrap().is_none());
    }

    #[test]
    fn test_same_start_and_goal() {
        let warehouse = Warehouse::new(2, 2).unwrap();
        let graph = build_graph(&warehouse);
        let route = RouteFinder::manhattan(&graph)
            .find_route(&id(1, 1), &id(1, 1))
            .unwrap()
            .unwrap();
        assert_eq!(coords(&route), vec![(1, 1)]);
    }

    #[test]
    fn test_unknown_endpoint_is_node_not_found() {
        let warehouse = layout(&["R."]);
        let graph = build_graph(&warehouse);
        let finder = RouteFinder::manhattan(&graph);

        // (0,0) is a rack, never a node
        assert!(matches!(
            finder.find_route(&id(0, 0), &id(1, 0)),
            Err(WarehouseError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_custom_step_cost_changes_route() {
        // Two routes of equal length; make the top row expensive
        let warehouse = layout(&[
            "...",
            ".R.",
            "...",
        ]);
        let graph = build_graph(&warehouse);
        let step = |a: &TileNode, b: &TileNode| {
            if a.coord().y == 0 || b.coord().y == 0 {
                10.0
            } else {
                1.0
            }
        };
        let no_heuristic = |_: &TileNode, _: &TileNode| 0.0;
        let finder = RouteFinder::new(&graph, step, no_heuristic);

        let route = finder.find_route(&id(0, 1), &id(2, 1)).unwrap().unwrap();
        assert_eq!(coords(&route), vec![(0, 1), (0, 2), (1, 2), (2, 2), (2, 1)]);
        assert_eq!(finder.route_cost(&route), 4.0);
    }

    #[test]
    fn test_deterministic_tie_breaking() {
        let warehouse = Warehouse::new(4, 4).unwrap();
        let graph = build_graph(&warehouse);
        let finder = RouteFinder::manhattan(&graph);

        let first = coords(&finder.find_route(&id(0, 0), &id(3, 3)).unwrap().unwrap());
        for _ in 0..5 {
            let again = coords(&finder.find_route(&id(0, 0), &id(3, 3)).unwrap().unwrap());
            assert_eq!(first, again);
        }
        assert_eq!(first.len(), 7);
    }
}
