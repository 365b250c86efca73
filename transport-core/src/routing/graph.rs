//! Directed weighted graph the router searches

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::{EdgeId, Minutes, VertexId};

/// Edge endpoints and weight as stored in the graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: Minutes,
}

/// Routing graph. Vertices carry no payload; edge ids are dense and follow
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct RoutingGraph {
    graph: DiGraph<(), Minutes>,
}

impl RoutingGraph {
    pub fn with_vertices(vertex_count: usize) -> Self {
        let mut graph = DiGraph::with_capacity(vertex_count, vertex_count);
        for _ in 0..vertex_count {
            graph.add_node(());
        }
        Self { graph }
    }

    /// Adds an edge and returns its id
    ///
    /// # Panics
    ///
    /// If either endpoint is not a vertex of the graph
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: Minutes) -> EdgeId {
        self.graph
            .add_edge(NodeIndex::new(from), NodeIndex::new(to), weight)
            .index()
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn edge(&self, id: EdgeId) -> Option<Edge> {
        let index = EdgeIndex::new(id);
        let (from, to) = self.graph.edge_endpoints(index)?;
        let weight = *self.graph.edge_weight(index)?;
        Some(Edge {
            from: from.index(),
            to: to.index(),
            weight,
        })
    }

    /// All edges in id order
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.raw_edges().iter().map(|edge| Edge {
            from: edge.source().index(),
            to: edge.target().index(),
            weight: edge.weight,
        })
    }

    /// Outgoing edges of a vertex as `(edge, target, weight)`
    pub fn outgoing(&self, vertex: VertexId) -> impl Iterator<Item = (EdgeId, VertexId, Minutes)> + '_ {
        self.graph
            .edges(NodeIndex::new(vertex))
            .map(|edge| (edge.id().index(), edge.target().index(), *edge.weight()))
    }

    /// Ids of the outgoing edges of a vertex in traversal order
    pub fn incidence_list(&self, vertex: VertexId) -> Vec<EdgeId> {
        self.outgoing(vertex).map(|(edge, _, _)| edge).collect()
    }
}
