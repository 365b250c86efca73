use std::path::Path;

use crate::render::{MapRenderer, RenderSettings};
use crate::routing::RouteInfo;
use crate::{Error, TransportCatalogue, TransportRouter, persistence};

use super::BusStats;

/// Catalogue, router and rendering settings: everything needed to answer
/// queries, as produced by the build phase and restored by the serve phase.
#[derive(Debug, Clone)]
pub struct TransportModel {
    pub catalogue: TransportCatalogue,
    pub router: TransportRouter,
    pub render_settings: RenderSettings,
}

impl TransportModel {
    pub fn new(
        catalogue: TransportCatalogue,
        router: TransportRouter,
        render_settings: RenderSettings,
    ) -> Self {
        Self {
            catalogue,
            router,
            render_settings,
        }
    }

    pub fn stop_count(&self) -> usize {
        self.catalogue.stop_count()
    }

    pub fn bus_count(&self) -> usize {
        self.catalogue.bus_count()
    }

    /// # Errors
    ///
    /// Fails if the bus route lacks road distances
    pub fn bus_stats(&self, bus_name: &str) -> Result<Option<BusStats>, Error> {
        self.catalogue.bus_stats(bus_name)
    }

    pub fn find_route(&self, from: &str, to: &str) -> Option<RouteInfo> {
        self.router.find_route(&self.catalogue, from, to)
    }

    /// SVG map of every bus line
    pub fn render_map(&self) -> String {
        MapRenderer::new(&self.render_settings).render(&self.catalogue)
    }

    /// Writes the binary index to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        persistence::save(self, path)
    }

    /// Restores a model from the binary index at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or corrupt
    pub fn load(path: &Path) -> Result<Self, Error> {
        persistence::load(path)
    }
}
