//! Response records, one per stat request

use std::collections::BTreeSet;

use serde::Serialize;
use transport_core::prelude::*;

pub const NOT_FOUND: &str = "not found";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Bus {
        request_id: i64,
        curvature: f64,
        route_length: u64,
        stop_count: usize,
        unique_stop_count: usize,
    },
    Stop {
        request_id: i64,
        buses: Vec<String>,
    },
    Map {
        request_id: i64,
        map: String,
    },
    Route {
        request_id: i64,
        total_time: f64,
        items: Vec<RouteItem>,
    },
    NotFound {
        request_id: i64,
        error_message: String,
    },
}

impl Response {
    pub fn not_found(request_id: i64) -> Self {
        Response::NotFound {
            request_id,
            error_message: NOT_FOUND.to_string(),
        }
    }

    pub fn bus(request_id: i64, stats: &BusStats) -> Self {
        Response::Bus {
            request_id,
            curvature: stats.curvature,
            route_length: stats.route_length,
            stop_count: stats.stop_count,
            unique_stop_count: stats.unique_stop_count,
        }
    }

    pub fn stop(request_id: i64, buses: BTreeSet<&str>) -> Self {
        Response::Stop {
            request_id,
            buses: buses.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn route(request_id: i64, route: RouteInfo) -> Self {
        Response::Route {
            request_id,
            total_time: route.total_time,
            items: route.edges.into_iter().map(RouteItem::from).collect(),
        }
    }
}

/// Itinerary step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RouteItem {
    Wait {
        stop_name: String,
        time: f64,
    },
    Bus {
        bus: String,
        span_count: usize,
        time: f64,
    },
}

impl From<EdgeInfo> for RouteItem {
    fn from(edge: EdgeInfo) -> Self {
        match edge {
            EdgeInfo::Wait { stop_name, time } => RouteItem::Wait { stop_name, time },
            EdgeInfo::Bus {
                bus_name,
                span_count,
                time,
            } => RouteItem::Bus {
                bus: bus_name,
                span_count,
                time,
            },
        }
    }
}
