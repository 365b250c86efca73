//! Raw network description as supplied to the build phase

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Stop definition with the road distances to its neighbours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopDescription {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Neighbour name to distance in meters, in the direction from this stop
    #[serde(default)]
    pub road_distances: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusDescription {
    pub name: String,
    pub stops: Vec<String>,
    pub is_roundtrip: bool,
}

/// One entry of `base_requests`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(StopDescription),
    Bus(BusDescription),
}

/// Network description split by entity kind, input order preserved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkDescription {
    pub stops: Vec<StopDescription>,
    pub buses: Vec<BusDescription>,
}

impl FromIterator<BaseRequest> for NetworkDescription {
    fn from_iter<I: IntoIterator<Item = BaseRequest>>(requests: I) -> Self {
        let mut description = NetworkDescription::default();
        for request in requests {
            match request {
                BaseRequest::Stop(stop) => description.stops.push(stop),
                BaseRequest::Bus(bus) => description.buses.push(bus),
            }
        }
        description
    }
}
