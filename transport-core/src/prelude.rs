// Re-export key components
pub use crate::loading::{
    NetworkDescription, RoutingSettings, SerializationSettings, TransportModelConfig,
    create_transport_model,
};
pub use crate::model::{Bus, BusStats, Stop, TransportCatalogue, TransportModel};
pub use crate::render::{Color, MapRenderer, RenderSettings};
pub use crate::routing::{EdgeInfo, RouteInfo, StopPairVertexId, TransportRouter};

// Handles and units
pub use crate::BusId;
pub use crate::EdgeId;
pub use crate::Minutes;
pub use crate::StopId;
pub use crate::VertexId;

pub use crate::Error;
