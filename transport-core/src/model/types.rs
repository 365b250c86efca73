use geo::Point;

use crate::StopId;

/// Named point riders board and alight at
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    /// x = longitude, y = latitude
    pub geometry: Point<f64>,
}

impl Stop {
    pub fn latitude(&self) -> f64 {
        self.geometry.y()
    }

    pub fn longitude(&self) -> f64 {
        self.geometry.x()
    }
}

/// Bus line over an ordered list of stops
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    pub name: String,
    /// Stops as listed in the network description
    pub stops: Vec<StopId>,
    /// Closed loop when `true`, out-and-back line otherwise
    pub is_roundtrip: bool,
}

impl Bus {
    /// Stops in riding order. An out-and-back line runs forward and then
    /// back, visiting the far terminal once.
    pub fn effective_path(&self) -> impl Iterator<Item = StopId> + '_ {
        let back = if self.is_roundtrip {
            &[][..]
        } else {
            &self.stops[..self.stops.len().saturating_sub(1)]
        };
        self.stops.iter().chain(back.iter().rev()).copied()
    }

    /// Number of stops on the effective path
    pub fn stop_count(&self) -> usize {
        if self.is_roundtrip {
            self.stops.len()
        } else {
            (self.stops.len() * 2).saturating_sub(1)
        }
    }
}

/// Summary answered for a bus-info query
#[derive(Debug, Clone, PartialEq)]
pub struct BusStats {
    pub stop_count: usize,
    pub unique_stop_count: usize,
    /// Road length in meters
    pub route_length: u64,
    /// Road length divided by great-circle length
    pub curvature: f64,
}
