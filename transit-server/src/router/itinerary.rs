//! Itinerary resolution.
//!
//! Turns a stop-to-stop query into a sequence of wait and ride legs. A
//! query runs from the origin's arrival vertex to the destination's
//! arrival vertex, so every itinerary starts with one wait at the origin
//! and ends on stepping off at the destination.

use tracing::trace;

use crate::catalog::Catalog;
use crate::domain::StopId;

use super::dijkstra::{Dijkstra, PathSolver};
use super::graph::{EdgeKind, TransitGraph, Vertex};

/// Error from an itinerary query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No stop with this name exists
    #[error("unknown stop: {0}")]
    UnknownStop(String),
}

/// One step of an itinerary. Times are minutes.
#[derive(Debug, Clone, PartialEq)]
pub enum Leg {
    /// Waiting at a stop for the next bus
    Wait { stop: String, time: f64 },
    /// Riding one line for `span_count` stops
    Ride {
        line: String,
        span_count: usize,
        time: f64,
    },
}

impl Leg {
    /// Duration of this leg in minutes.
    pub fn time(&self) -> f64 {
        match self {
            Leg::Wait { time, .. } | Leg::Ride { time, .. } => *time,
        }
    }
}

/// A complete answer to a stop-to-stop query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Itinerary {
    /// Legs in travel order
    pub legs: Vec<Leg>,
    /// Sum of leg times, in minutes
    pub total_time: f64,
}

impl Itinerary {
    /// The itinerary for a query whose origin is its destination.
    pub fn empty() -> Self {
        Self::default()
    }

    fn from_legs(legs: Vec<Leg>) -> Self {
        let total_time = legs.iter().map(Leg::time).sum();
        Self { legs, total_time }
    }
}

/// Result of a route query.
///
/// Disconnected networks are normal, so an unreachable destination is an
/// ordinary outcome rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// A fastest itinerary
    Found(Itinerary),
    /// The destination cannot be reached from the origin
    NoRoute,
}

impl RouteOutcome {
    /// Returns the itinerary, if one was found.
    pub fn itinerary(&self) -> Option<&Itinerary> {
        match self {
            RouteOutcome::Found(itinerary) => Some(itinerary),
            RouteOutcome::NoRoute => None,
        }
    }
}

/// Answers route queries against a built graph.
///
/// The resolver only reads the catalogue and graph, so any number of
/// resolvers can share them across threads.
pub struct ItineraryResolver<'a, S: PathSolver = Dijkstra> {
    catalog: &'a Catalog,
    graph: &'a TransitGraph,
    solver: S,
}

impl<'a> ItineraryResolver<'a, Dijkstra> {
    /// Create a resolver using Dijkstra's algorithm.
    pub fn new(catalog: &'a Catalog, graph: &'a TransitGraph) -> Self {
        Self::with_solver(catalog, graph, Dijkstra)
    }
}

impl<'a, S: PathSolver> ItineraryResolver<'a, S> {
    /// Create a resolver with a specific path solver.
    ///
    /// `graph` must have been built from `catalog`.
    pub fn with_solver(catalog: &'a Catalog, graph: &'a TransitGraph, solver: S) -> Self {
        Self {
            catalog,
            graph,
            solver,
        }
    }

    /// The path solver in use.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Find the fastest itinerary between two stops given by name.
    pub fn resolve(&self, from: &str, to: &str) -> Result<RouteOutcome, ResolveError> {
        let from_id = self.require_stop(from)?;
        let to_id = self.require_stop(to)?;
        Ok(self.resolve_ids(from_id, to_id))
    }

    /// Find the fastest itinerary between two stop handles.
    pub fn resolve_ids(&self, from: StopId, to: StopId) -> RouteOutcome {
        if from == to {
            return RouteOutcome::Found(Itinerary::empty());
        }

        let Some(route) =
            self.solver
                .find_shortest_path(self.graph, Vertex::Arrival(from), Vertex::Arrival(to))
        else {
            trace!(%from, %to, "no route");
            return RouteOutcome::NoRoute;
        };

        let legs = route
            .edges
            .iter()
            .map(|&id| {
                let edge = self.graph.edge(id);
                match edge.from {
                    Vertex::Arrival(stop) => Leg::Wait {
                        stop: self.catalog.stop(stop).name.clone(),
                        time: edge.weight,
                    },
                    Vertex::Boarding(_) => {
                        // The graph only accepts ride edges out of boarding vertices
                        let EdgeKind::Ride { line, span_count } = edge.kind else {
                            unreachable!("wait edge {id:?} leaves a boarding vertex");
                        };
                        Leg::Ride {
                            line: self.catalog.line(line).name.clone(),
                            span_count,
                            time: edge.weight,
                        }
                    }
                }
            })
            .collect();

        RouteOutcome::Found(Itinerary::from_legs(legs))
    }

    fn require_stop(&self, name: &str) -> Result<StopId, ResolveError> {
        self.catalog
            .stop_id(name)
            .ok_or_else(|| ResolveError::UnknownStop(name.to_string()))
    }
}
