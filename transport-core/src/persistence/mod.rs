//! Binary routing index: write once in the build phase, read back in the
//! serve phase without recomputing the graph or its shortest paths.

pub mod schema;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use geo::Point;
use log::{debug, info};
use serde::Deserialize;

use crate::routing::{RoutingGraph, ShortestPathTable, StopPairVertexId};
use crate::{Error, StopId, TransportCatalogue, TransportModel, TransportRouter};
use schema::{
    BusRecord, CatalogueRecord, DistanceRecord, EdgeRecord, GraphRecord, INDEX_MAGIC,
    IndexHeader, IndexSnapshot, RouterRecord, SCHEMA_VERSION, StopRecord, StopVertexRecord,
};

/// Writes the index for `model` to `path`, replacing any existing file
///
/// # Errors
///
/// Returns an error if the file cannot be created or written
pub fn save(model: &TransportModel, path: &Path) -> Result<(), Error> {
    let file = File::create(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to create index file '{}': {}", path.display(), e),
        )
    })?;
    let mut writer = BufWriter::new(file);
    write_index(model, &mut writer)?;
    writer.flush()?;
    info!("Index written to {}", path.display());
    Ok(())
}

/// Reads the index at `path` and restores the model
///
/// # Errors
///
/// Returns an error if the file is missing or its content is not a valid index
pub fn load(path: &Path) -> Result<TransportModel, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open index file '{}': {}", path.display(), e),
        )
    })?;
    let model = read_index(BufReader::new(file))?;
    info!(
        "Index loaded from {}: {} stops, {} buses",
        path.display(),
        model.stop_count(),
        model.bus_count()
    );
    Ok(model)
}

/// Encodes the header and the snapshot of `model` into `writer`
///
/// # Errors
///
/// Returns an error if encoding or writing fails
pub fn write_index<W: Write>(model: &TransportModel, mut writer: W) -> Result<(), Error> {
    serde_cbor::to_writer(&mut writer, &IndexHeader::current())?;
    serde_cbor::to_writer(&mut writer, &snapshot(model))?;
    Ok(())
}

/// Decodes an index produced by [`write_index`]
///
/// # Errors
///
/// Returns [`Error::SchemaMismatch`] for an index of another version and
/// [`Error::CorruptIndex`] for anything that does not decode into a
/// consistent model
pub fn read_index<R: Read>(reader: R) -> Result<TransportModel, Error> {
    let mut de = serde_cbor::Deserializer::from_reader(reader);

    let header = IndexHeader::deserialize(&mut de).map_err(corrupt)?;
    if header.magic != INDEX_MAGIC {
        return Err(Error::CorruptIndex("not a transport catalogue index".to_string()));
    }
    if header.version != SCHEMA_VERSION {
        return Err(Error::SchemaMismatch {
            expected: SCHEMA_VERSION,
            found: header.version,
        });
    }

    let snapshot = IndexSnapshot::deserialize(&mut de).map_err(corrupt)?;
    de.end().map_err(corrupt)?;
    restore(snapshot)
}

fn corrupt(e: serde_cbor::Error) -> Error {
    Error::CorruptIndex(e.to_string())
}

/// Flattens the model into name-keyed records
pub fn snapshot(model: &TransportModel) -> IndexSnapshot {
    IndexSnapshot {
        catalogue: catalogue_record(&model.catalogue),
        render_settings: model.render_settings.clone(),
        router: router_record(&model.catalogue, &model.router),
    }
}

fn catalogue_record(catalogue: &TransportCatalogue) -> CatalogueRecord {
    let stop_name = |id: StopId| catalogue.stops()[id].name.clone();

    let stops = catalogue
        .stops()
        .iter()
        .map(|stop| StopRecord {
            name: stop.name.clone(),
            latitude: stop.latitude(),
            longitude: stop.longitude(),
        })
        .collect();

    let buses = catalogue
        .buses()
        .iter()
        .map(|bus| BusRecord {
            name: bus.name.clone(),
            is_roundtrip: bus.is_roundtrip,
            stops: bus.stops.iter().map(|&id| stop_name(id)).collect(),
        })
        .collect();

    // Sorted so the same catalogue always encodes to the same bytes
    let mut distances: Vec<_> = catalogue.distances().collect();
    distances.sort_unstable();
    let distances = distances
        .into_iter()
        .map(|(from, to, meters)| DistanceRecord {
            from: stop_name(from),
            to: stop_name(to),
            meters,
        })
        .collect();

    CatalogueRecord {
        stops,
        buses,
        distances,
    }
}

fn router_record(catalogue: &TransportCatalogue, router: &TransportRouter) -> RouterRecord {
    let graph = router.graph();
    let graph_record = GraphRecord {
        vertex_count: graph.vertex_count(),
        edges: graph
            .edges()
            .map(|edge| EdgeRecord {
                from: edge.from,
                to: edge.to,
                weight: edge.weight,
            })
            .collect(),
        incidence_lists: (0..graph.vertex_count())
            .map(|vertex| graph.incidence_list(vertex))
            .collect(),
    };

    let stop_vertices = catalogue
        .stops()
        .iter()
        .zip(router.stop_vertices())
        .map(|(stop, &vertices)| StopVertexRecord {
            stop_name: stop.name.clone(),
            vertices,
        })
        .collect();

    RouterRecord {
        settings: router.settings(),
        graph: graph_record,
        routes: router.table().rows().to_vec(),
        stop_vertices,
        edge_info: router.edge_infos().to_vec(),
    }
}

/// Rebuilds the model from a decoded snapshot. The catalogue is replayed
/// through its public API; graph and shortest path table are installed as
/// stored.
///
/// # Errors
///
/// Returns [`Error::CorruptIndex`] if records reference unknown names or
/// the router parts disagree with each other
pub fn restore(snapshot: IndexSnapshot) -> Result<TransportModel, Error> {
    let IndexSnapshot {
        catalogue: catalogue_record,
        render_settings,
        router: router_record,
    } = snapshot;

    let catalogue = restore_catalogue(catalogue_record)?;
    debug!(
        "Catalogue restored: {} stops, {} buses",
        catalogue.stop_count(),
        catalogue.bus_count()
    );
    let router = restore_router(&catalogue, router_record)?;

    Ok(TransportModel::new(catalogue, router, render_settings))
}

fn restore_catalogue(record: CatalogueRecord) -> Result<TransportCatalogue, Error> {
    let mut catalogue = TransportCatalogue::new();

    for stop in record.stops {
        catalogue.add_stop(stop.name, Point::new(stop.longitude, stop.latitude))?;
    }
    for distance in record.distances {
        let from = stored_stop(&catalogue, &distance.from)?;
        let to = stored_stop(&catalogue, &distance.to)?;
        catalogue.add_distance(from, to, distance.meters);
    }
    for bus in record.buses {
        let stops = bus
            .stops
            .iter()
            .map(|name| stored_stop(&catalogue, name))
            .collect::<Result<Vec<_>, _>>()?;
        catalogue.add_bus(bus.name, stops, bus.is_roundtrip)?;
    }

    Ok(catalogue)
}

fn restore_router(catalogue: &TransportCatalogue, record: RouterRecord) -> Result<TransportRouter, Error> {
    let RouterRecord {
        settings,
        graph: graph_record,
        routes,
        stop_vertices: vertex_records,
        edge_info,
    } = record;

    let vertex_count = graph_record.vertex_count;
    if vertex_count != catalogue.stop_count() * 2 {
        return Err(Error::CorruptIndex(format!(
            "{vertex_count} vertices for {} stops",
            catalogue.stop_count()
        )));
    }

    let mut graph = RoutingGraph::with_vertices(vertex_count);
    for edge in &graph_record.edges {
        if edge.from >= vertex_count || edge.to >= vertex_count {
            return Err(Error::CorruptIndex(format!(
                "edge {} -> {} is outside the graph",
                edge.from, edge.to
            )));
        }
        graph.add_edge(edge.from, edge.to, edge.weight);
    }

    if graph_record.incidence_lists.len() != vertex_count {
        return Err(Error::CorruptIndex("incidence lists do not match vertex count".to_string()));
    }
    for (vertex, stored) in graph_record.incidence_lists.iter().enumerate() {
        if graph.incidence_list(vertex) != *stored {
            return Err(Error::CorruptIndex(format!(
                "incidence list of vertex {vertex} does not match the edge list"
            )));
        }
    }

    let mut stop_vertices: Vec<Option<StopPairVertexId>> = vec![None; catalogue.stop_count()];
    for record in vertex_records {
        let stop = stored_stop(catalogue, &record.stop_name)?;
        if stop_vertices[stop].replace(record.vertices).is_some() {
            return Err(Error::CorruptIndex(format!(
                "stop '{}' has two vertex pairs",
                record.stop_name
            )));
        }
    }
    let stop_vertices = stop_vertices
        .into_iter()
        .enumerate()
        .map(|(stop, pair)| {
            pair.ok_or_else(|| {
                Error::CorruptIndex(format!(
                    "stop '{}' has no vertex pair",
                    catalogue.stops()[stop].name
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    TransportRouter::from_parts(
        settings,
        graph,
        ShortestPathTable::from_rows(routes),
        stop_vertices,
        edge_info,
    )
}

fn stored_stop(catalogue: &TransportCatalogue, name: &str) -> Result<StopId, Error> {
    catalogue
        .find_stop(name)
        .ok_or_else(|| Error::CorruptIndex(format!("reference to unknown stop '{name}'")))
}
