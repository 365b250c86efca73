use itertools::Itertools;

use crate::{Error, StopId, TransportCatalogue};

/// One ride between two stops of the same bus without leaving it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BusSegment {
    pub from: StopId,
    pub to: StopId,
    /// Number of stop-to-stop hops covered
    pub span_count: usize,
    /// Road distance in meters
    pub meters: u64,
}

/// Every `(i, j)` pair with `i < j` along `stops`, with the cumulative road
/// distance between them.
///
/// # Errors
///
/// Fails if two adjacent stops have no recorded distance
pub(crate) fn bus_segments(
    catalogue: &TransportCatalogue,
    stops: &[StopId],
) -> Result<Vec<BusSegment>, Error> {
    // prefix[k] = road distance from stops[0] to stops[k]
    let mut prefix = Vec::with_capacity(stops.len());
    prefix.push(0_u64);
    for (from, to) in stops.iter().copied().tuple_windows() {
        let hop = u64::from(catalogue.distance_between(from, to)?);
        prefix.push(prefix[prefix.len() - 1] + hop);
    }

    let mut segments = Vec::with_capacity(stops.len() * stops.len().saturating_sub(1) / 2);
    for i in 0..stops.len() {
        for j in i + 1..stops.len() {
            segments.push(BusSegment {
                from: stops[i],
                to: stops[j],
                span_count: j - i,
                meters: prefix[j] - prefix[i],
            });
        }
    }

    Ok(segments)
}
