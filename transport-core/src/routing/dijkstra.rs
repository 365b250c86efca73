use std::{cmp::Ordering, collections::BinaryHeap};

use fixedbitset::FixedBitSet;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::graph::RoutingGraph;
use crate::{EdgeId, Minutes, VertexId};

/// Best known way to reach a vertex from a fixed source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Accumulated weight from the source
    pub weight: Minutes,
    /// Last edge of the path, `None` for the source itself
    pub prev_edge: Option<EdgeId>,
}

/// Shortest path found by [`ShortestPathTable::build_route`]
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePath {
    pub weight: Minutes,
    pub edges: Vec<EdgeId>,
}

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: Minutes,
    vertex: VertexId,
}

impl Eq for State {}

// Min-heap by cost (reversed from standard Rust BinaryHeap)
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Precomputed all-pairs shortest paths: one row per source vertex, one
/// entry per destination, `None` where the destination is unreachable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortestPathTable {
    rows: Vec<Vec<Option<RouteEntry>>>,
}

impl ShortestPathTable {
    /// Runs a traced Dijkstra from every vertex of the graph
    pub fn build(graph: &RoutingGraph) -> Self {
        let vertex_count = graph.vertex_count();
        debug!("Computing shortest path rows for {vertex_count} vertices");

        let rows = (0..vertex_count)
            .into_par_iter()
            .map(|source| shortest_path_row(graph, source))
            .collect();

        Self { rows }
    }

    /// Wraps rows loaded from a persisted index
    pub fn from_rows(rows: Vec<Vec<Option<RouteEntry>>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Option<RouteEntry>>] {
        &self.rows
    }

    pub fn entry(&self, from: VertexId, to: VertexId) -> Option<&RouteEntry> {
        self.rows.get(from)?.get(to)?.as_ref()
    }

    /// Follows `prev_edge` links back from `to` and returns the edge sequence
    /// in travel order, or `None` if `to` is unreachable from `from`.
    pub fn build_route(&self, graph: &RoutingGraph, from: VertexId, to: VertexId) -> Option<RoutePath> {
        let target = self.entry(from, to)?;

        let mut edges = Vec::new();
        let mut prev_edge = target.prev_edge;
        while let Some(edge_id) = prev_edge {
            // A path never repeats a vertex, so a longer chain means broken links
            if edges.len() >= graph.vertex_count() {
                return None;
            }
            edges.push(edge_id);
            let edge = graph.edge(edge_id)?;
            prev_edge = self.entry(from, edge.from)?.prev_edge;
        }
        edges.reverse();

        Some(RoutePath {
            weight: target.weight,
            edges,
        })
    }
}

/// Single-source Dijkstra keeping the last edge of every best path
fn shortest_path_row(graph: &RoutingGraph, source: VertexId) -> Vec<Option<RouteEntry>> {
    let vertex_count = graph.vertex_count();
    let mut row: Vec<Option<RouteEntry>> = vec![None; vertex_count];
    let mut settled = FixedBitSet::with_capacity(vertex_count);
    let mut heap = BinaryHeap::new();

    // Source has distance 0
    row[source] = Some(RouteEntry {
        weight: 0.0,
        prev_edge: None,
    });
    heap.push(State {
        cost: 0.0,
        vertex: source,
    });

    while let Some(State { cost, vertex }) = heap.pop() {
        if settled.put(vertex) {
            continue;
        }

        for (edge, target, weight) in graph.outgoing(vertex) {
            let next_cost = cost + weight;
            if row[target].is_none_or(|best| next_cost < best.weight) {
                row[target] = Some(RouteEntry {
                    weight: next_cost,
                    prev_edge: Some(edge),
                });
                heap.push(State {
                    cost: next_cost,
                    vertex: target,
                });
            }
        }
    }

    row
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn diamond() -> RoutingGraph {
        // 0 -> 1 -> 3 costs 3, 0 -> 2 -> 3 costs 5, 0 -> 3 direct costs 4
        let mut graph = RoutingGraph::with_vertices(5);
        graph.add_edge(0, 1, 1.0);
        graph.add_edge(1, 3, 2.0);
        graph.add_edge(0, 2, 2.0);
        graph.add_edge(2, 3, 3.0);
        graph.add_edge(0, 3, 4.0);
        graph
    }

    #[test]
    fn picks_the_cheapest_path() {
        let graph = diamond();
        let table = ShortestPathTable::build(&graph);

        let route = table.build_route(&graph, 0, 3).unwrap();
        assert_relative_eq!(route.weight, 3.0);
        assert_eq!(route.edges, vec![0, 1]);
    }

    #[test]
    fn route_to_self_is_empty() {
        let graph = diamond();
        let table = ShortestPathTable::build(&graph);

        let route = table.build_route(&graph, 2, 2).unwrap();
        assert_relative_eq!(route.weight, 0.0);
        assert!(route.edges.is_empty());
    }

    #[test]
    fn unreachable_vertex_has_no_route() {
        let graph = diamond();
        let table = ShortestPathTable::build(&graph);

        assert!(table.build_route(&graph, 3, 0).is_none());
        assert!(table.build_route(&graph, 0, 4).is_none());
        assert!(table.entry(0, 4).is_none());
    }

    #[test]
    fn adding_an_edge_never_makes_routes_longer() {
        let mut graph = diamond();
        let before = ShortestPathTable::build(&graph);
        graph.add_edge(2, 1, 0.5);
        graph.add_edge(1, 4, 7.0);
        let after = ShortestPathTable::build(&graph);

        for from in 0..graph.vertex_count() {
            for to in 0..graph.vertex_count() {
                if let Some(old) = before.entry(from, to) {
                    let new = after.entry(from, to).unwrap();
                    assert!(new.weight <= old.weight);
                }
            }
        }
    }

    #[test]
    fn broken_links_do_not_loop() {
        let graph = diamond();
        let mut rows = ShortestPathTable::build(&graph).rows().to_vec();
        // Make vertex 1 claim it is reached through edge 1 (1 -> 3), forming a cycle
        rows[0][1] = Some(RouteEntry {
            weight: 1.0,
            prev_edge: Some(1),
        });
        rows[0][3] = Some(RouteEntry {
            weight: 3.0,
            prev_edge: Some(1),
        });
        let table = ShortestPathTable::from_rows(rows);

        assert!(table.build_route(&graph, 0, 3).is_none());
    }
}
