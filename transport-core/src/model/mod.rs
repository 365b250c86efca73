//! Data model of the transit network
//!
//! Contains the stop/bus store and the aggregate that ties it to the router.

pub mod catalogue;
pub mod transport_model;
pub mod types;

pub use catalogue::TransportCatalogue;
pub use transport_model::TransportModel;
pub use types::{Bus, BusStats, Stop};
