//! Canonical store of stops, buses and road distances

use std::collections::BTreeSet;

use geo::{Distance, Haversine, Point};
use hashbrown::{HashMap, HashSet};
use itertools::Itertools;

use super::types::{Bus, BusStats, Stop};
use crate::{BusId, Error, StopId};

/// Append-only catalogue of the transit network.
///
/// Stops and buses live in arenas and are addressed by their insertion
/// index, so handles stay valid for the lifetime of the catalogue.
#[derive(Debug, Clone, Default)]
pub struct TransportCatalogue {
    stops: Vec<Stop>,
    stop_index: HashMap<String, StopId>,
    buses: Vec<Bus>,
    bus_index: HashMap<String, BusId>,
    /// Buses serving each stop, indexed by `StopId`
    stop_buses: Vec<Vec<BusId>>,
    /// Directed road distances in meters
    distances: HashMap<(StopId, StopId), u32>,
}

impl TransportCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a stop and returns its handle
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateStop`] if the name is taken
    pub fn add_stop(&mut self, name: impl Into<String>, geometry: Point<f64>) -> Result<StopId, Error> {
        let name = name.into();
        if self.stop_index.contains_key(&name) {
            return Err(Error::DuplicateStop(name));
        }

        let id = self.stops.len();
        self.stop_index.insert(name.clone(), id);
        self.stops.push(Stop { name, geometry });
        self.stop_buses.push(Vec::new());
        Ok(id)
    }

    /// Registers a bus and back-links every stop of its route
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or a stop handle is unknown
    pub fn add_bus(
        &mut self,
        name: impl Into<String>,
        stops: Vec<StopId>,
        is_roundtrip: bool,
    ) -> Result<BusId, Error> {
        let name = name.into();
        if self.bus_index.contains_key(&name) {
            return Err(Error::DuplicateBus(name));
        }
        if let Some(&bad) = stops.iter().find(|&&stop| stop >= self.stops.len()) {
            return Err(Error::UnknownStop(format!("#{bad} on bus '{name}'")));
        }

        let id = self.buses.len();
        for &stop in &stops {
            let serving = &mut self.stop_buses[stop];
            if !serving.contains(&id) {
                serving.push(id);
            }
        }
        self.bus_index.insert(name.clone(), id);
        self.buses.push(Bus {
            name,
            stops,
            is_roundtrip,
        });
        Ok(id)
    }

    /// Records the road distance `from -> to`. The reverse direction is left
    /// untouched.
    pub fn add_distance(&mut self, from: StopId, to: StopId, meters: u32) {
        self.distances.insert((from, to), meters);
    }

    pub fn find_stop(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    pub fn find_bus(&self, name: &str) -> Option<BusId> {
        self.bus_index.get(name).copied()
    }

    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(id)
    }

    pub fn bus(&self, id: BusId) -> Option<&Bus> {
        self.buses.get(id)
    }

    /// All stops in handle order
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// All buses in handle order
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    /// Every recorded directed distance, in no particular order
    pub fn distances(&self) -> impl Iterator<Item = (StopId, StopId, u32)> + '_ {
        self.distances
            .iter()
            .map(|(&(from, to), &meters)| (from, to, meters))
    }

    /// Road distance `from -> to`, falling back to `to -> from`
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingDistance`] if neither direction is recorded
    pub fn distance_between(&self, from: StopId, to: StopId) -> Result<u32, Error> {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
            .ok_or_else(|| Error::MissingDistance {
                from: self.stop_name(from),
                to: self.stop_name(to),
            })
    }

    /// Great-circle length of the bus path in meters
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBus`] for an unregistered name
    pub fn route_length(&self, bus_name: &str) -> Result<f64, Error> {
        let bus = self
            .find_bus(bus_name)
            .map(|id| &self.buses[id])
            .ok_or_else(|| Error::UnknownBus(bus_name.to_string()))?;
        Ok(self.geographic_length(bus))
    }

    /// Road length of the bus path in meters
    ///
    /// # Errors
    ///
    /// Fails if two adjacent stops have no distance in either direction
    pub fn road_length(&self, bus: &Bus) -> Result<u64, Error> {
        bus.effective_path()
            .tuple_windows()
            .map(|(from, to)| self.distance_between(from, to).map(u64::from))
            .sum()
    }

    /// Sorted names of the buses serving a stop, `None` for an unknown stop
    pub fn buses_for_stop(&self, stop_name: &str) -> Option<BTreeSet<&str>> {
        let stop = self.find_stop(stop_name)?;
        Some(
            self.stop_buses[stop]
                .iter()
                .map(|&bus| self.buses[bus].name.as_str())
                .collect(),
        )
    }

    /// Statistics for a bus-info query, `Ok(None)` for an unknown bus
    ///
    /// # Errors
    ///
    /// Fails if the road length cannot be computed
    #[allow(clippy::cast_precision_loss)]
    pub fn bus_stats(&self, bus_name: &str) -> Result<Option<BusStats>, Error> {
        let Some(bus) = self.find_bus(bus_name).map(|id| &self.buses[id]) else {
            return Ok(None);
        };

        let route_length = self.road_length(bus)?;
        let geographic = self.geographic_length(bus);
        let unique_stop_count = bus.stops.iter().collect::<HashSet<_>>().len();

        Ok(Some(BusStats {
            stop_count: bus.stop_count(),
            unique_stop_count,
            route_length,
            curvature: route_length as f64 / geographic,
        }))
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    fn geographic_length(&self, bus: &Bus) -> f64 {
        bus.effective_path()
            .tuple_windows()
            .map(|(from, to)| {
                Haversine.distance(self.stops[from].geometry, self.stops[to].geometry)
            })
            .sum()
    }

    fn stop_name(&self, id: StopId) -> String {
        self.stops
            .get(id)
            .map_or_else(|| format!("#{id}"), |stop| stop.name.clone())
    }
}
