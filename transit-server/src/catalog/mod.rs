//! Transit catalogue.
//!
//! The catalogue owns every stop, line and road distance of the network
//! and answers the structural queries: which lines serve a stop, how long
//! a line is, and how far apart two adjacent stops are by road.
//!
//! Population is append-only. Each stop and line is issued a handle in
//! insertion order; those handles are what the router uses to number its
//! graph vertices.

mod summary;

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::domain::{CatalogError, Coordinates, Line, LineId, Route, Stop, StopId};

pub use summary::{LineSummary, LinesServing};

/// The stops, lines and road distances of a transit network.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    stops: Vec<Stop>,
    stop_index: HashMap<String, StopId>,
    lines: Vec<Line>,
    line_index: HashMap<String, LineId>,
    /// Lines visiting each stop, indexed by `StopId`.
    lines_at_stop: Vec<BTreeSet<LineId>>,
    /// Directed road distances in meters.
    distances: HashMap<(StopId, StopId), f64>,
}

impl Catalog {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stop.
    ///
    /// Stop names are unique: registering a name twice is rejected and
    /// leaves the catalogue unchanged.
    pub fn add_stop(
        &mut self,
        name: impl Into<String>,
        coordinates: Coordinates,
    ) -> Result<StopId, CatalogError> {
        let name = name.into();
        if self.stop_index.contains_key(&name) {
            return Err(CatalogError::DuplicateStop(name));
        }

        let id = StopId(self.stops.len());
        self.stop_index.insert(name.clone(), id);
        self.stops.push(Stop::new(name, coordinates));
        self.lines_at_stop.push(BTreeSet::new());
        Ok(id)
    }

    /// Register a line without a route.
    pub fn add_line(&mut self, name: impl Into<String>) -> Result<LineId, CatalogError> {
        let name = name.into();
        if self.line_index.contains_key(&name) {
            return Err(CatalogError::DuplicateLine(name));
        }

        let id = LineId(self.lines.len());
        self.line_index.insert(name.clone(), id);
        self.lines.push(Line::new(name));
        Ok(id)
    }

    /// Set the outward stop sequence of a registered line.
    ///
    /// Every stop must already exist. On error nothing is modified.
    pub fn set_line_route<S: AsRef<str>>(
        &mut self,
        name: &str,
        stops: &[S],
        round_trip: bool,
    ) -> Result<(), CatalogError> {
        let line_id = self
            .line_id(name)
            .ok_or_else(|| CatalogError::UnknownLine(name.to_string()))?;
        if self.lines[line_id.0].route().is_some() {
            return Err(CatalogError::RouteAlreadySet(name.to_string()));
        }

        let stop_ids = stops
            .iter()
            .map(|s| self.require_stop(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        for stop in &stop_ids {
            self.lines_at_stop[stop.0].insert(line_id);
        }

        debug!(
            line = name,
            stops = stop_ids.len(),
            round_trip,
            "line route set"
        );
        self.lines[line_id.0].set_route(Route {
            stops: stop_ids,
            round_trip,
        });
        Ok(())
    }

    /// Register a line together with its route.
    pub fn add_line_with_route<S: AsRef<str>>(
        &mut self,
        name: &str,
        stops: &[S],
        round_trip: bool,
    ) -> Result<LineId, CatalogError> {
        // Validate stops before registering so a failure leaves no trace
        for stop in stops {
            self.require_stop(stop.as_ref())?;
        }
        let id = self.add_line(name)?;
        self.set_line_route(name, stops, round_trip)?;
        Ok(id)
    }

    /// Record the road distance from one stop to another, in meters.
    ///
    /// Only the given direction is stored. Recording the same direction
    /// again replaces the previous value.
    pub fn record_distance(&mut self, from: &str, to: &str, meters: f64) -> Result<(), CatalogError> {
        if !meters.is_finite() || meters < 0.0 {
            return Err(CatalogError::InvalidDistance {
                from: from.to_string(),
                to: to.to_string(),
                meters,
            });
        }
        let from_id = self.require_stop(from)?;
        let to_id = self.require_stop(to)?;
        self.distances.insert((from_id, to_id), meters);
        Ok(())
    }

    /// Road distance between two stops, in meters.
    ///
    /// The recorded `from → to` direction wins; if it is absent the
    /// `to → from` entry is used. It is an error for both to be absent.
    ///
    /// # Panics
    ///
    /// Panics if either handle was not issued by this catalogue.
    pub fn lookup_distance(&self, from: StopId, to: StopId) -> Result<f64, CatalogError> {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
            .ok_or_else(|| CatalogError::MissingDistance {
                from: self.stops[from.0].name.clone(),
                to: self.stops[to.0].name.clone(),
            })
    }

    /// Road distance between two stops given by name.
    pub fn distance_between(&self, from: &str, to: &str) -> Result<f64, CatalogError> {
        let from_id = self.require_stop(from)?;
        let to_id = self.require_stop(to)?;
        self.lookup_distance(from_id, to_id)
    }

    /// Lines whose route includes `stop`, sorted by name.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_server::catalog::{Catalog, LinesServing};
    /// use transit_server::domain::Coordinates;
    ///
    /// let mut catalog = Catalog::new();
    /// catalog.add_stop("A", Coordinates::new(0.0, 0.0)).unwrap();
    /// catalog.add_stop("B", Coordinates::new(0.0, 1.0)).unwrap();
    /// catalog.add_stop("C", Coordinates::new(0.0, 2.0)).unwrap();
    /// catalog.add_line_with_route("828", &["A", "B", "A"], true).unwrap();
    /// catalog.add_line_with_route("256", &["B", "A"], false).unwrap();
    ///
    /// assert_eq!(
    ///     catalog.find_lines_serving("A"),
    ///     LinesServing::Lines(vec!["256".to_string(), "828".to_string()])
    /// );
    /// assert_eq!(catalog.find_lines_serving("C"), LinesServing::NoLines);
    /// assert_eq!(catalog.find_lines_serving("D"), LinesServing::UnknownStop);
    /// ```
    pub fn find_lines_serving(&self, stop: &str) -> LinesServing {
        let Some(id) = self.stop_id(stop) else {
            return LinesServing::UnknownStop;
        };

        let names: BTreeSet<&str> = self.lines_at_stop[id.0]
            .iter()
            .map(|line| self.lines[line.0].name.as_str())
            .collect();

        if names.is_empty() {
            LinesServing::NoLines
        } else {
            LinesServing::Lines(names.into_iter().map(str::to_string).collect())
        }
    }

    /// Stop counts, road length and curvature of a line.
    pub fn line_summary(&self, name: &str) -> Result<LineSummary, CatalogError> {
        let line = self
            .line_by_name(name)
            .ok_or_else(|| CatalogError::UnknownLine(name.to_string()))?;
        LineSummary::compute(self, line)
    }

    /// Look up a stop handle by name.
    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    /// Look up a line handle by name.
    pub fn line_id(&self, name: &str) -> Option<LineId> {
        self.line_index.get(name).copied()
    }

    /// Get a stop by handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was not issued by this catalogue.
    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.0]
    }

    /// Get a line by handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was not issued by this catalogue.
    pub fn line(&self, id: LineId) -> &Line {
        &self.lines[id.0]
    }

    /// Get a line by name.
    pub fn line_by_name(&self, name: &str) -> Option<&Line> {
        self.line_id(name).map(|id| &self.lines[id.0])
    }

    /// All stops in insertion order.
    pub fn stops(&self) -> impl ExactSizeIterator<Item = (StopId, &Stop)> {
        self.stops.iter().enumerate().map(|(i, s)| (StopId(i), s))
    }

    /// All lines in insertion order.
    pub fn lines(&self) -> impl ExactSizeIterator<Item = (LineId, &Line)> {
        self.lines.iter().enumerate().map(|(i, l)| (LineId(i), l))
    }

    /// Line names in lexicographic order.
    pub fn line_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.lines.iter().map(|l| l.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Coordinates along the full traversal of a line, or `None` for an
    /// unknown line.
    pub fn line_geometry(&self, name: &str) -> Option<Vec<Coordinates>> {
        let line = self.line_by_name(name)?;
        Some(
            line.full_route()
                .into_iter()
                .map(|stop| self.stops[stop.0].coordinates)
                .collect(),
        )
    }

    /// Whether the named line is a closed loop, or `None` for an unknown line.
    pub fn is_round_trip(&self, name: &str) -> Option<bool> {
        self.line_by_name(name).map(Line::is_round_trip)
    }

    /// Coordinates of every stop visited by at least one line, in stop
    /// insertion order.
    pub fn served_coordinates(&self) -> Vec<Coordinates> {
        self.stops
            .iter()
            .zip(&self.lines_at_stop)
            .filter(|(_, lines)| !lines.is_empty())
            .map(|(stop, _)| stop.coordinates)
            .collect()
    }

    /// Number of registered stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Number of registered lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn require_stop(&self, name: &str) -> Result<StopId, CatalogError> {
        self.stop_id(name)
            .ok_or_else(|| CatalogError::UnknownStop(name.to_string()))
    }
}
