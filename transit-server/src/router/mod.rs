//! Travel-time graph and itinerary queries.
//!
//! The router turns a populated [`Catalog`](crate::catalog::Catalog) into a
//! weighted directed graph whose shortest paths are real travel plans,
//! then answers stop-to-stop queries against it:
//!
//! 1. [`GraphBuilder`] builds an immutable [`TransitGraph`] once.
//! 2. A [`PathSolver`] ([`Dijkstra`] by default) finds cheapest paths.
//! 3. [`ItineraryResolver`] turns paths into wait and ride legs.

mod builder;
mod config;
mod dijkstra;
mod graph;
mod itinerary;


pub use builder::{GraphBuilder, ride_segments};
pub use config::{ConfigError, RoutingSettings};
pub use dijkstra::{Dijkstra, PathSolver, RouteInfo};
pub use graph::{Edge, EdgeId, EdgeKind, GraphError, TransitGraph, Vertex};
pub use itinerary::{Itinerary, ItineraryResolver, Leg, ResolveError, RouteOutcome};
