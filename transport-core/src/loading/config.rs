use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::render::RenderSettings;
use crate::{Error, Minutes};

/// Boarding wait and bus speed shared by every bus of the network
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingSettings {
    /// Minutes spent waiting at a stop before boarding
    pub bus_wait_time: u32,
    /// Bus speed in km/h
    pub bus_velocity: f64,
}

impl RoutingSettings {
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] unless the velocity is finite and positive
    pub fn validate(&self) -> Result<(), Error> {
        if !self.bus_velocity.is_finite() || self.bus_velocity <= 0.0 {
            return Err(Error::InvalidData(format!(
                "bus_velocity must be a positive number, got {}",
                self.bus_velocity
            )));
        }
        Ok(())
    }

    pub fn wait_time(&self) -> Minutes {
        f64::from(self.bus_wait_time)
    }

    /// Minutes needed to cover `meters` of road
    #[allow(clippy::cast_precision_loss)]
    pub fn travel_time(&self, meters: u64) -> Minutes {
        meters as f64 / 1000.0 / self.bus_velocity * 60.0
    }
}

/// Location of the persisted index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializationSettings {
    pub file: PathBuf,
}

impl SerializationSettings {
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for an empty path
    pub fn validate(&self) -> Result<(), Error> {
        if self.file.as_os_str().is_empty() {
            return Err(Error::InvalidData(
                "serialization_settings.file must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything the build phase needs besides the network itself
#[derive(Debug, Clone, PartialEq)]
pub struct TransportModelConfig {
    pub routing: RoutingSettings,
    pub render: RenderSettings,
    pub serialization: SerializationSettings,
}

impl TransportModelConfig {
    /// # Errors
    ///
    /// Returns the first invalid setting found
    pub fn validate(&self) -> Result<(), Error> {
        self.routing.validate()?;
        self.render.validate()?;
        self.serialization.validate()
    }
}
