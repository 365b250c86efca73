//! Transit catalogue core: stop/bus store, time-optimal router over a
//! wait/ride graph, binary index persistence and SVG map rendering.

pub mod error;
pub mod loading;
pub mod model;
pub mod persistence;
pub mod prelude;
pub mod render;
pub mod routing;

pub use error::Error;
pub use loading::{TransportModelConfig, create_transport_model};
pub use model::{TransportCatalogue, TransportModel};
pub use routing::TransportRouter;

/// Arena index of a stop inside [`TransportCatalogue`]
pub type StopId = usize;
/// Arena index of a bus inside [`TransportCatalogue`]
pub type BusId = usize;
/// Vertex of the routing graph
pub type VertexId = usize;
/// Edge of the routing graph
pub type EdgeId = usize;
/// Travel time in minutes
pub type Minutes = f64;
