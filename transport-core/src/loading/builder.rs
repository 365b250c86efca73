use geo::Point;
use log::{debug, info, warn};

use super::config::TransportModelConfig;
use super::description::NetworkDescription;
use crate::{Error, StopId, TransportCatalogue, TransportModel, TransportRouter};

/// Creates a transport model from a network description
///
/// The catalogue is populated completely before the router is built from it.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the description refers
/// to unknown stops, or a bus route lacks road distances
pub fn create_transport_model(
    description: &NetworkDescription,
    config: &TransportModelConfig,
) -> Result<TransportModel, Error> {
    config.validate()?;

    info!(
        "Loading network: {} stops, {} buses",
        description.stops.len(),
        description.buses.len()
    );
    let catalogue = populate_catalogue(description)?;
    let router = TransportRouter::build(&catalogue, config.routing)?;

    info!("Transport model created successfully");
    Ok(TransportModel::new(catalogue, router, config.render.clone()))
}

/// Registers stops, then road distances, then buses
///
/// # Errors
///
/// Fails on duplicate names, non-finite coordinates, and distances or bus
/// routes naming a stop that was never defined
pub fn populate_catalogue(description: &NetworkDescription) -> Result<TransportCatalogue, Error> {
    let mut catalogue = TransportCatalogue::new();

    for stop in &description.stops {
        if !stop.latitude.is_finite() || !stop.longitude.is_finite() {
            return Err(Error::InvalidData(format!(
                "Stop '{}' has invalid coordinates",
                stop.name
            )));
        }
        if stop.latitude.abs() > 90.0 || stop.longitude.abs() > 180.0 {
            warn!(
                "Stop '{}' lies outside the valid coordinate range ({}, {})",
                stop.name, stop.latitude, stop.longitude
            );
        }
        catalogue.add_stop(stop.name.clone(), Point::new(stop.longitude, stop.latitude))?;
    }

    let mut distance_count = 0;
    for stop in &description.stops {
        let from = resolve_stop(&catalogue, &stop.name)?;
        for (neighbour, &meters) in &stop.road_distances {
            let to = resolve_stop(&catalogue, neighbour)?;
            catalogue.add_distance(from, to, meters);
            distance_count += 1;
        }
    }
    debug!("Recorded {distance_count} road distances");

    for bus in &description.buses {
        let stops = bus
            .stops
            .iter()
            .map(|name| resolve_stop(&catalogue, name))
            .collect::<Result<Vec<_>, _>>()?;
        if stops.is_empty() {
            warn!("Bus '{}' has an empty route", bus.name);
        }
        catalogue.add_bus(bus.name.clone(), stops, bus.is_roundtrip)?;
    }

    Ok(catalogue)
}

fn resolve_stop(catalogue: &TransportCatalogue, name: &str) -> Result<StopId, Error> {
    catalogue
        .find_stop(name)
        .ok_or_else(|| Error::UnknownStop(name.to_string()))
}
