use serde::{Deserialize, Serialize};

use crate::{Minutes, VertexId};

/// The two vertices representing one stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopPairVertexId {
    /// Rider has arrived at the stop and starts waiting
    pub bus_wait_begin: VertexId,
    /// Rider is ready to board
    pub bus_wait_end: VertexId,
}

/// Meaning of a graph edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EdgeInfo {
    /// Waiting for a bus at a stop
    Wait { stop_name: String, time: Minutes },
    /// Riding one bus over `span_count` stop-to-stop hops
    Bus {
        bus_name: String,
        span_count: usize,
        time: Minutes,
    },
}

impl EdgeInfo {
    pub fn time(&self) -> Minutes {
        match self {
            EdgeInfo::Wait { time, .. } | EdgeInfo::Bus { time, .. } => *time,
        }
    }
}

/// Itinerary answered for a route query
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo {
    pub total_time: Minutes,
    pub edges: Vec<EdgeInfo>,
}
