//! Input documents of both phases

use serde::Deserialize;
use transport_core::loading::BaseRequest;
use transport_core::prelude::*;

/// Build phase input
#[derive(Debug, Clone, Deserialize)]
pub struct BaseDocument {
    pub serialization_settings: SerializationSettings,
    pub routing_settings: RoutingSettings,
    #[serde(default)]
    pub render_settings: RenderSettings,
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,
}

impl BaseDocument {
    pub fn network(&self) -> NetworkDescription {
        self.base_requests.iter().cloned().collect()
    }

    pub fn config(&self) -> TransportModelConfig {
        TransportModelConfig {
            routing: self.routing_settings,
            render: self.render_settings.clone(),
            serialization: self.serialization_settings.clone(),
        }
    }
}

/// Serve phase input
#[derive(Debug, Clone, Deserialize)]
pub struct StatDocument {
    pub serialization_settings: SerializationSettings,
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Bus { id: i64, name: String },
    Stop { id: i64, name: String },
    Map { id: i64 },
    Route { id: i64, from: String, to: String },
}

impl StatRequest {
    pub fn id(&self) -> i64 {
        match self {
            StatRequest::Bus { id, .. }
            | StatRequest::Stop { id, .. }
            | StatRequest::Map { id }
            | StatRequest::Route { id, .. } => *id,
        }
    }
}
