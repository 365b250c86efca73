//! Time-optimal routing over the wait/ride graph

pub mod dijkstra;
pub mod graph;
pub mod itinerary;
pub mod router;
pub(crate) mod segments;

pub use dijkstra::{RouteEntry, ShortestPathTable};
pub use graph::{Edge, RoutingGraph};
pub use itinerary::{EdgeInfo, RouteInfo, StopPairVertexId};
pub use router::TransportRouter;
