//! On-disk layout of the routing index
//!
//! The file holds two consecutive CBOR items: an [`IndexHeader`] and an
//! [`IndexSnapshot`]. Cross references between records use stop and bus
//! names, never in-memory handles.

use serde::{Deserialize, Serialize};

use crate::loading::RoutingSettings;
use crate::render::RenderSettings;
use crate::routing::{EdgeInfo, RouteEntry, StopPairVertexId};
use crate::{EdgeId, Minutes, VertexId};

pub const INDEX_MAGIC: &str = "transport-catalogue-index";
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexHeader {
    pub magic: String,
    pub version: u32,
}

impl IndexHeader {
    pub fn current() -> Self {
        Self {
            magic: INDEX_MAGIC.to_string(),
            version: SCHEMA_VERSION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub catalogue: CatalogueRecord,
    /// Stored verbatim, never interpreted by the index itself
    pub render_settings: RenderSettings,
    pub router: RouterRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueRecord {
    /// In handle order
    pub stops: Vec<StopRecord>,
    /// In handle order
    pub buses: Vec<BusRecord>,
    pub distances: Vec<DistanceRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusRecord {
    pub name: String,
    pub is_roundtrip: bool,
    pub stops: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRecord {
    pub from: String,
    pub to: String,
    pub meters: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterRecord {
    pub settings: RoutingSettings,
    pub graph: GraphRecord,
    /// Shortest path table, one row per source vertex
    pub routes: Vec<Vec<Option<RouteEntry>>>,
    pub stop_vertices: Vec<StopVertexRecord>,
    /// Indexed by edge id
    pub edge_info: Vec<EdgeInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    pub vertex_count: usize,
    /// Indexed by edge id
    pub edges: Vec<EdgeRecord>,
    /// Outgoing edge ids per vertex, in traversal order
    pub incidence_lists: Vec<Vec<EdgeId>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: Minutes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopVertexRecord {
    pub stop_name: String,
    pub vertices: StopPairVertexId,
}
