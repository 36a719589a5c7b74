//! Line and stop query results.

use std::collections::HashSet;

use crate::domain::{CatalogError, Line, great_circle_distance};

use super::Catalog;

/// Answer to "which lines serve this stop".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinesServing {
    /// No stop with this name exists
    UnknownStop,
    /// The stop exists but no line visits it
    NoLines,
    /// Names of the serving lines, sorted and without duplicates
    Lines(Vec<String>),
}

/// Shape statistics of one line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSummary {
    /// Stops visited by a full traversal, counting repeats
    pub stop_count: usize,
    /// Distinct stops on the line
    pub unique_stop_count: usize,
    /// Road length of a full traversal, in meters
    pub route_length: f64,
    /// Road length divided by great-circle length
    ///
    /// Road distances are assumed to be at least the straight-line
    /// distance, which makes this 1.0 or more for realistic data. The
    /// catalogue does not enforce it. A line whose stops all share one
    /// position has no straight-line length and a non-finite curvature.
    pub curvature: f64,
}

impl LineSummary {
    pub(super) fn compute(catalog: &Catalog, line: &Line) -> Result<Self, CatalogError> {
        let route = line.full_route();
        if route.is_empty() {
            return Err(CatalogError::EmptyLine(line.name.clone()));
        }

        let mut route_length = 0.0;
        let mut straight_length = 0.0;
        for pair in route.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            route_length += catalog.lookup_distance(from, to)?;
            if from != to {
                straight_length += great_circle_distance(
                    catalog.stop(from).coordinates,
                    catalog.stop(to).coordinates,
                );
            }
        }

        let unique_stop_count = route.iter().collect::<HashSet<_>>().len();

        Ok(Self {
            stop_count: route.len(),
            unique_stop_count,
            route_length,
            curvature: route_length / straight_length,
        })
    }
}
