//! This module is responsible for turning a network description into a
//! populated catalogue and a built router.

mod builder;
mod config;
mod description;

pub use builder::{create_transport_model, populate_catalogue};
pub use config::{RoutingSettings, SerializationSettings, TransportModelConfig};
pub use description::{BaseRequest, BusDescription, NetworkDescription, StopDescription};
