//! One-shot construction of the travel-time graph.
//!
//! Ride edges connect every stop of a line segment to every later stop of
//! the same segment, weighted by the accumulated travel time. Riding any
//! number of stops on one bus is therefore a single edge, and the path
//! solver never has to reason about staying on a vehicle.

use rayon::prelude::*;
use tracing::debug;

use crate::catalog::Catalog;
use crate::domain::{Line, LineId, StopId};

use super::config::RoutingSettings;
use super::graph::{Edge, GraphError, TransitGraph};

/// Builds a [`TransitGraph`] from a catalogue and routing settings.
pub struct GraphBuilder<'a> {
    catalog: &'a Catalog,
    settings: RoutingSettings,
}

impl<'a> GraphBuilder<'a> {
    /// Create a builder over a fully populated catalogue.
    pub fn new(catalog: &'a Catalog, settings: RoutingSettings) -> Self {
        Self { catalog, settings }
    }

    /// Build the graph.
    ///
    /// Wait edges come first, one per stop in stop order, followed by the
    /// ride edges of each line in line order. Lines are processed in
    /// parallel; the result does not depend on scheduling.
    ///
    /// Any missing road distance aborts the whole build.
    pub fn build(&self) -> Result<TransitGraph, GraphError> {
        self.settings.validate()?;

        let mut edges: Vec<Edge> = self
            .catalog
            .stops()
            .map(|(stop, _)| Edge::wait(stop, self.settings.bus_wait_time))
            .collect();

        let lines: Vec<(LineId, &Line)> = self.catalog.lines().collect();
        let ride_edges: Vec<Vec<Edge>> = lines
            .par_iter()
            .map(|&(id, line)| self.line_edges(id, line))
            .collect::<Result<_, GraphError>>()?;

        edges.extend(ride_edges.into_iter().flatten());

        let graph = TransitGraph::from_edges(self.catalog.stop_count(), edges)?;
        debug!(
            stops = self.catalog.stop_count(),
            lines = self.catalog.line_count(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "transit graph built"
        );
        Ok(graph)
    }

    /// Ride edges for every segment of one line.
    fn line_edges(&self, id: LineId, line: &Line) -> Result<Vec<Edge>, GraphError> {
        let route = line.full_route();
        let mut edges = Vec::new();
        for (begin, end) in ride_segments(route.len(), line.is_round_trip()) {
            self.segment_edges(id, &route, begin, end, &mut edges)?;
        }
        debug!(line = %line.name, stops = route.len(), edges = edges.len(), "line edges generated");
        Ok(edges)
    }

    /// Emit boarding(i) → arrival(j) for every `begin <= i < j <= end`.
    fn segment_edges(
        &self,
        line: LineId,
        route: &[StopId],
        begin: usize,
        end: usize,
        edges: &mut Vec<Edge>,
    ) -> Result<(), GraphError> {
        let meters_per_minute = self.settings.meters_per_minute();

        for i in begin..end {
            let mut minutes = 0.0;
            for j in (i + 1)..=end {
                let meters = self.catalog.lookup_distance(route[j - 1], route[j])?;
                minutes += meters / meters_per_minute;
                edges.push(Edge::ride(route[i], route[j], line, j - i, minutes));
            }
        }
        Ok(())
    }
}

/// Inclusive index ranges of a full traversal that ride edges may span.
///
/// A round trip is one segment. An out-and-back traversal is split at its
/// turnaround stop, `len / 2`, so no edge joins the outward pass through
/// a stop to the return pass through the same stop.
///
/// # Examples
///
/// ```
/// use transit_server::router::ride_segments;
///
/// assert_eq!(ride_segments(4, true), vec![(0, 3)]);
/// assert_eq!(ride_segments(5, false), vec![(0, 2), (2, 4)]);
/// assert!(ride_segments(1, false).is_empty());
/// ```
pub fn ride_segments(len: usize, round_trip: bool) -> Vec<(usize, usize)> {
    if len < 2 {
        return Vec::new();
    }
    if round_trip {
        vec![(0, len - 1)]
    } else {
        let mid = len / 2;
        vec![(0, mid), (mid, len - 1)]
    }
}
