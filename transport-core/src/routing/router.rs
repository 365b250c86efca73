//! Router construction and shortest-time queries
//!
//! Every stop is split into a wait-begin and a wait-end vertex. A wait edge
//! joins the two with the boarding wait time; bus edges lead from the
//! wait-end vertex of the boarding stop to the wait-begin vertex of every
//! later stop of the same bus, so a ride over several hops is one edge and
//! costs one wait.

use log::{debug, info};

use super::dijkstra::ShortestPathTable;
use super::graph::RoutingGraph;
use super::itinerary::{EdgeInfo, RouteInfo, StopPairVertexId};
use super::segments::bus_segments;
use crate::loading::RoutingSettings;
use crate::{EdgeId, Error, StopId, TransportCatalogue, VertexId};

#[derive(Debug, Clone)]
pub struct TransportRouter {
    settings: RoutingSettings,
    graph: RoutingGraph,
    table: ShortestPathTable,
    /// Vertex pair of every stop, indexed by `StopId`
    stop_vertices: Vec<StopPairVertexId>,
    /// Meaning of every edge, indexed by `EdgeId`
    edge_info: Vec<EdgeInfo>,
}

impl TransportRouter {
    /// Builds the routing graph from a fully populated catalogue and
    /// precomputes shortest paths between all vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or two adjacent stops of
    /// a bus have no recorded road distance
    pub fn build(catalogue: &TransportCatalogue, settings: RoutingSettings) -> Result<Self, Error> {
        settings.validate()?;
        info!(
            "Building routing graph for {} stops and {} buses",
            catalogue.stop_count(),
            catalogue.bus_count()
        );

        // Vertex pairs follow stop handle order, so rebuilding from the same
        // input yields the same graph
        let stop_vertices: Vec<StopPairVertexId> = (0..catalogue.stop_count())
            .map(|stop| StopPairVertexId {
                bus_wait_begin: stop * 2,
                bus_wait_end: stop * 2 + 1,
            })
            .collect();

        let mut graph = RoutingGraph::with_vertices(stop_vertices.len() * 2);
        let mut edge_info = Vec::new();

        let wait_time = settings.wait_time();
        for (stop, pair) in catalogue.stops().iter().zip(&stop_vertices) {
            graph.add_edge(pair.bus_wait_begin, pair.bus_wait_end, wait_time);
            edge_info.push(EdgeInfo::Wait {
                stop_name: stop.name.clone(),
                time: wait_time,
            });
        }

        for bus in catalogue.buses() {
            let mut segments = bus_segments(catalogue, &bus.stops)?;
            if !bus.is_roundtrip {
                let reversed: Vec<StopId> = bus.stops.iter().rev().copied().collect();
                segments.extend(bus_segments(catalogue, &reversed)?);
            }
            debug!("Bus '{}' contributes {} edges", bus.name, segments.len());

            for segment in segments {
                let time = settings.travel_time(segment.meters);
                graph.add_edge(
                    stop_vertices[segment.from].bus_wait_end,
                    stop_vertices[segment.to].bus_wait_begin,
                    time,
                );
                edge_info.push(EdgeInfo::Bus {
                    bus_name: bus.name.clone(),
                    span_count: segment.span_count,
                    time,
                });
            }
        }

        info!(
            "Routing graph has {} vertices and {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        let table = ShortestPathTable::build(&graph);
        info!("Shortest path table computed");

        Ok(Self {
            settings,
            graph,
            table,
            stop_vertices,
            edge_info,
        })
    }

    /// Assembles a router from persisted parts without recomputing anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptIndex`] if the parts do not describe the same
    /// graph
    pub fn from_parts(
        settings: RoutingSettings,
        graph: RoutingGraph,
        table: ShortestPathTable,
        stop_vertices: Vec<StopPairVertexId>,
        edge_info: Vec<EdgeInfo>,
    ) -> Result<Self, Error> {
        let vertex_count = graph.vertex_count();
        let edge_count = graph.edge_count();

        if edge_info.len() != edge_count {
            return Err(Error::CorruptIndex(format!(
                "{} edge descriptions for {edge_count} edges",
                edge_info.len()
            )));
        }
        if stop_vertices
            .iter()
            .any(|pair| pair.bus_wait_begin >= vertex_count || pair.bus_wait_end >= vertex_count)
        {
            return Err(Error::CorruptIndex("stop vertex out of range".to_string()));
        }
        if table.rows().len() != vertex_count {
            return Err(Error::CorruptIndex(format!(
                "{} shortest path rows for {vertex_count} vertices",
                table.rows().len()
            )));
        }
        for row in table.rows() {
            if row.len() != vertex_count {
                return Err(Error::CorruptIndex("shortest path row has wrong length".to_string()));
            }
            for (destination, entry) in row.iter().enumerate() {
                let Some(edge_id) = entry.and_then(|entry| entry.prev_edge) else {
                    continue;
                };
                if graph.edge(edge_id).is_none_or(|edge| edge.to != destination) {
                    return Err(Error::CorruptIndex(format!(
                        "edge {edge_id} does not lead to vertex {destination}"
                    )));
                }
            }
        }

        Ok(Self {
            settings,
            graph,
            table,
            stop_vertices,
            edge_info,
        })
    }

    pub fn settings(&self) -> RoutingSettings {
        self.settings
    }

    pub fn graph(&self) -> &RoutingGraph {
        &self.graph
    }

    pub fn table(&self) -> &ShortestPathTable {
        &self.table
    }

    /// Vertex pairs indexed by `StopId`
    pub fn stop_vertices(&self) -> &[StopPairVertexId] {
        &self.stop_vertices
    }

    /// Edge descriptions indexed by `EdgeId`
    pub fn edge_infos(&self) -> &[EdgeInfo] {
        &self.edge_info
    }

    pub fn pair_vertex_id(&self, stop: StopId) -> Option<StopPairVertexId> {
        self.stop_vertices.get(stop).copied()
    }

    pub fn edge_info(&self, edge: EdgeId) -> Option<&EdgeInfo> {
        self.edge_info.get(edge)
    }

    /// Fastest itinerary between two vertices, `None` if there is no path
    pub fn route_info(&self, from: VertexId, to: VertexId) -> Option<RouteInfo> {
        let path = self.table.build_route(&self.graph, from, to)?;
        let edges = path
            .edges
            .iter()
            .map(|&edge| self.edge_info.get(edge).cloned())
            .collect::<Option<Vec<_>>>()?;

        Some(RouteInfo {
            total_time: path.weight,
            edges,
        })
    }

    /// Fastest itinerary between two stops by name. A rider starts waiting
    /// at the first stop and is done on arrival at the second, so both ends
    /// are wait-begin vertices. Unknown names yield `None`.
    pub fn find_route(&self, catalogue: &TransportCatalogue, from: &str, to: &str) -> Option<RouteInfo> {
        let from = self.pair_vertex_id(catalogue.find_stop(from)?)?;
        let to = self.pair_vertex_id(catalogue.find_stop(to)?)?;
        self.route_info(from.bus_wait_begin, to.bus_wait_begin)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::Point;

    use super::*;

    fn settings(bus_wait_time: u32, bus_velocity: f64) -> RoutingSettings {
        RoutingSettings {
            bus_wait_time,
            bus_velocity,
        }
    }

    fn two_stop_loop() -> TransportCatalogue {
        let mut catalogue = TransportCatalogue::new();
        let a = catalogue.add_stop("A", Point::new(0.0, 0.0)).unwrap();
        let b = catalogue.add_stop("B", Point::new(0.0, 0.0)).unwrap();
        catalogue.add_distance(a, b, 1000);
        catalogue.add_distance(b, a, 1000);
        catalogue.add_bus("1", vec![a, b, a], true).unwrap();
        catalogue
    }

    #[test]
    fn waits_then_rides_one_hop() {
        let catalogue = two_stop_loop();
        let router = TransportRouter::build(&catalogue, settings(5, 60.0)).unwrap();

        let route = router.find_route(&catalogue, "A", "B").unwrap();
        assert_relative_eq!(route.total_time, 6.0);
        assert_eq!(route.edges.len(), 2);
        assert_eq!(
            route.edges[0],
            EdgeInfo::Wait {
                stop_name: "A".to_string(),
                time: 5.0
            }
        );
        match &route.edges[1] {
            EdgeInfo::Bus {
                bus_name,
                span_count,
                time,
            } => {
                assert_eq!(bus_name, "1");
                assert_eq!(*span_count, 1);
                assert_relative_eq!(*time, 1.0);
            }
            other => panic!("expected a bus edge, got {other:?}"),
        }
    }

    #[test]
    fn one_wait_edge_per_stop() {
        let mut catalogue = two_stop_loop();
        let a = catalogue.find_stop("A").unwrap();
        let b = catalogue.find_stop("B").unwrap();
        catalogue.add_bus("2", vec![b, a], false).unwrap();
        catalogue.add_stop("Lonely", Point::new(1.0, 1.0)).unwrap();

        let router = TransportRouter::build(&catalogue, settings(7, 30.0)).unwrap();
        let waits: Vec<_> = router
            .edge_infos()
            .iter()
            .filter(|info| matches!(info, EdgeInfo::Wait { .. }))
            .collect();

        assert_eq!(waits.len(), 3);
        assert!(waits.iter().all(|info| info.time() == 7.0));
        assert_eq!(router.graph().vertex_count(), 6);
    }

    #[test]
    fn roundtrip_adds_an_edge_per_stop_pair() {
        let mut catalogue = TransportCatalogue::new();
        let ids: Vec<StopId> = (0..4)
            .map(|i| catalogue.add_stop(format!("S{i}"), Point::new(0.0, 0.0)).unwrap())
            .collect();
        for (from, to) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            catalogue.add_distance(ids[from], ids[to], 500);
        }
        // S0 S1 S2 S3 S0: five listed stops
        catalogue
            .add_bus("loop", vec![ids[0], ids[1], ids[2], ids[3], ids[0]], true)
            .unwrap();

        let router = TransportRouter::build(&catalogue, settings(1, 30.0)).unwrap();
        let bus_edges = router
            .edge_infos()
            .iter()
            .filter(|info| matches!(info, EdgeInfo::Bus { .. }))
            .count();
        assert_eq!(bus_edges, 5 * 4 / 2);
    }

    #[test]
    fn out_and_back_line_rides_both_ways() {
        let mut catalogue = TransportCatalogue::new();
        let a = catalogue.add_stop("A", Point::new(0.0, 0.0)).unwrap();
        let b = catalogue.add_stop("B", Point::new(0.0, 0.0)).unwrap();
        let c = catalogue.add_stop("C", Point::new(0.0, 0.0)).unwrap();
        catalogue.add_distance(a, b, 2000);
        catalogue.add_distance(b, c, 3000);
        catalogue.add_distance(c, b, 1000);
        catalogue.add_bus("297", vec![a, b, c], false).unwrap();

        let router = TransportRouter::build(&catalogue, settings(2, 60.0)).unwrap();

        // C -> A rides back in one go: 1000 + 2000 m at 1 km/min
        let route = router.find_route(&catalogue, "C", "A").unwrap();
        assert_relative_eq!(route.total_time, 2.0 + 3.0);
        assert_eq!(route.edges.len(), 2);
        assert!(matches!(route.edges[1], EdgeInfo::Bus { span_count: 2, .. }));
    }

    #[test]
    fn transfer_pays_a_second_wait() {
        let mut catalogue = TransportCatalogue::new();
        let a = catalogue.add_stop("A", Point::new(0.0, 0.0)).unwrap();
        let b = catalogue.add_stop("B", Point::new(0.0, 0.0)).unwrap();
        let c = catalogue.add_stop("C", Point::new(0.0, 0.0)).unwrap();
        catalogue.add_distance(a, b, 1000);
        catalogue.add_distance(b, c, 1000);
        catalogue.add_bus("x", vec![a, b], false).unwrap();
        catalogue.add_bus("y", vec![b, c], false).unwrap();

        let router = TransportRouter::build(&catalogue, settings(3, 60.0)).unwrap();
        let route = router.find_route(&catalogue, "A", "C").unwrap();

        assert_relative_eq!(route.total_time, 3.0 + 1.0 + 3.0 + 1.0);
        let kinds: Vec<bool> = route
            .edges
            .iter()
            .map(|info| matches!(info, EdgeInfo::Wait { .. }))
            .collect();
        assert_eq!(kinds, vec![true, false, true, false]);
    }

    #[test]
    fn unknown_or_unreachable_stops_have_no_route() {
        let mut catalogue = two_stop_loop();
        catalogue.add_stop("Island", Point::new(3.0, 3.0)).unwrap();
        let router = TransportRouter::build(&catalogue, settings(5, 60.0)).unwrap();

        assert!(router.find_route(&catalogue, "A", "Nowhere").is_none());
        assert!(router.find_route(&catalogue, "Nowhere", "A").is_none());
        assert!(router.find_route(&catalogue, "A", "Island").is_none());

        let same = router.find_route(&catalogue, "A", "A").unwrap();
        assert_relative_eq!(same.total_time, 0.0);
        assert!(same.edges.is_empty());
    }

    #[test]
    fn missing_distance_fails_the_build() {
        let mut catalogue = TransportCatalogue::new();
        let a = catalogue.add_stop("A", Point::new(0.0, 0.0)).unwrap();
        let b = catalogue.add_stop("B", Point::new(0.0, 0.0)).unwrap();
        catalogue.add_bus("1", vec![a, b], false).unwrap();

        assert!(matches!(
            TransportRouter::build(&catalogue, settings(5, 60.0)),
            Err(Error::MissingDistance { .. })
        ));
    }

    #[test]
    fn from_parts_rejects_mismatched_tables() {
        let catalogue = two_stop_loop();
        let router = TransportRouter::build(&catalogue, settings(5, 60.0)).unwrap();

        let mut edge_info = router.edge_infos().to_vec();
        edge_info.pop();
        let result = TransportRouter::from_parts(
            router.settings(),
            router.graph().clone(),
            router.table().clone(),
            router.stop_vertices().to_vec(),
            edge_info,
        );
        assert!(matches!(result, Err(Error::CorruptIndex(_))));

        let rebuilt = TransportRouter::from_parts(
            router.settings(),
            router.graph().clone(),
            router.table().clone(),
            router.stop_vertices().to_vec(),
            router.edge_infos().to_vec(),
        )
        .unwrap();
        assert_eq!(
            rebuilt.find_route(&catalogue, "B", "A"),
            router.find_route(&catalogue, "B", "A")
        );
    }
}
