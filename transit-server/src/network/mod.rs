//! Loading a complete network from a JSON document.
//!
//! A [`Network`] bundles the populated catalogue, the routing settings and
//! the travel-time graph built from them. It is immutable once loaded and
//! is shared across request handlers behind an `Arc`.

mod document;

use std::path::Path;

use tracing::{debug, info};

pub use document::{BaseRequest, BusDefinition, NetworkDocument, StopDefinition};

use crate::catalog::Catalog;
use crate::domain::{CatalogError, Coordinates};
use crate::router::{
    ConfigError, GraphBuilder, GraphError, ItineraryResolver, RoutingSettings, TransitGraph,
};

/// Errors that can occur when loading a network.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document could not be read
    #[error("failed to read network document: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or has the wrong shape
    #[error("failed to parse network document: {0}")]
    Json(#[from] serde_json::Error),

    /// A stop, line or distance was rejected by the catalogue
    #[error("invalid network: {0}")]
    Catalog(#[from] CatalogError),

    /// Graph construction failed
    #[error("failed to build transit graph: {0}")]
    Graph(GraphError),

    /// Routing settings are unusable
    #[error("invalid routing settings: {0}")]
    Config(#[from] ConfigError),
}

impl From<GraphError> for LoadError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Catalog(e) => LoadError::Catalog(e),
            GraphError::Config(e) => LoadError::Config(e),
            other => LoadError::Graph(other),
        }
    }
}

/// A loaded, routable transit network.
#[derive(Debug)]
pub struct Network {
    catalog: Catalog,
    settings: RoutingSettings,
    graph: TransitGraph,
}

impl Network {
    /// Build a network from an already populated catalogue.
    pub fn new(catalog: Catalog, settings: RoutingSettings) -> Result<Self, LoadError> {
        settings.validate()?;
        let graph = GraphBuilder::new(&catalog, settings).build()?;
        Ok(Self {
            catalog,
            settings,
            graph,
        })
    }

    /// Parse and load a network document.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let document: NetworkDocument = serde_json::from_str(json)?;
        load_network(document)
    }

    /// Read and load a network document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let network = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            stops = network.catalog.stop_count(),
            lines = network.catalog.line_count(),
            "network loaded"
        );
        Ok(network)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> RoutingSettings {
        self.settings
    }

    pub fn graph(&self) -> &TransitGraph {
        &self.graph
    }

    /// A resolver borrowing this network.
    pub fn resolver(&self) -> ItineraryResolver<'_> {
        ItineraryResolver::new(&self.catalog, &self.graph)
    }
}

/// Populate a catalogue from a document and build its graph.
///
/// Stops are registered first, then lines, then road distances, so any
/// entry may refer to a stop defined later in the document.
pub fn load_network(document: NetworkDocument) -> Result<Network, LoadError> {
    let NetworkDocument {
        base_requests,
        routing_settings,
    } = document;
    routing_settings.validate()?;

    let mut stops = Vec::new();
    let mut buses = Vec::new();
    for request in base_requests {
        match request {
            BaseRequest::Stop(stop) => stops.push(stop),
            BaseRequest::Bus(bus) => buses.push(bus),
        }
    }

    let mut catalog = Catalog::new();
    for stop in &stops {
        catalog.add_stop(
            stop.name.as_str(),
            Coordinates::new(stop.latitude, stop.longitude),
        )?;
    }
    for bus in &buses {
        catalog.add_line_with_route(&bus.name, bus.stops.as_slice(), bus.is_roundtrip)?;
    }
    for stop in &stops {
        for (neighbour, &meters) in &stop.road_distances {
            catalog.record_distance(&stop.name, neighbour, meters)?;
        }
    }

    debug!(
        stops = stops.len(),
        lines = buses.len(),
        "catalogue populated"
    );
    Network::new(catalog, routing_settings)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::router::RouteOutcome;

    const SAMPLE: &str = r#"{
        "base_requests": [
            {"type": "Bus", "name": "L1", "stops": ["A", "B", "C"], "is_roundtrip": true},
            {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0,
             "road_distances": {"B": 1000}},
            {"type": "Stop", "name": "B", "latitude": 0.0, "longitude": 1.0,
             "road_distances": {"C": 1200}},
            {"type": "Stop", "name": "C", "latitude": 0.0, "longitude": 2.0},
            {"type": "Stop", "name": "D", "latitude": 5.0, "longitude": 5.0}
        ],
        "routing_settings": {"bus_wait_time": 5, "bus_velocity": 60}
    }"#;

    #[test]
    fn loads_lines_before_their_stops() {
        let network = Network::from_json(SAMPLE).unwrap();
        assert_eq!(network.catalog().stop_count(), 4);
        assert_eq!(network.catalog().line_count(), 1);
        // 4 wait edges + 3 ride edges
        assert_eq!(network.graph().edge_count(), 7);
        assert_eq!(network.settings().bus_wait_time, 5.0);
    }

    #[test]
    fn loaded_network_resolves_routes() {
        let network = Network::from_json(SAMPLE).unwrap();
        let resolver = network.resolver();

        let outcome = resolver.resolve("A", "C").unwrap();
        let itinerary = outcome.itinerary().unwrap();
        assert_eq!(itinerary.legs.len(), 2);
        assert!((itinerary.total_time - 7.2).abs() < 1e-9);

        assert_eq!(resolver.resolve("A", "D").unwrap(), RouteOutcome::NoRoute);
    }

    #[test]
    fn distance_may_name_a_later_stop() {
        let json = r#"{
            "base_requests": [
                {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0,
                 "road_distances": {"B": 300}},
                {"type": "Stop", "name": "B", "latitude": 0.0, "longitude": 0.01}
            ],
            "routing_settings": {"bus_wait_time": 1, "bus_velocity": 30}
        }"#;
        let network = Network::from_json(json).unwrap();
        assert_eq!(network.catalog().distance_between("B", "A").unwrap(), 300.0);
    }

    #[test]
    fn unknown_stop_on_line_is_a_catalog_error() {
        let json = r#"{
            "base_requests": [
                {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0},
                {"type": "Bus", "name": "L", "stops": ["A", "Nowhere"], "is_roundtrip": false}
            ],
            "routing_settings": {"bus_wait_time": 1, "bus_velocity": 30}
        }"#;
        let err = Network::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Catalog(CatalogError::UnknownStop(ref name)) if name == "Nowhere"
        ));
    }

    #[test]
    fn missing_distance_is_a_catalog_error() {
        let json = r#"{
            "base_requests": [
                {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0},
                {"type": "Stop", "name": "B", "latitude": 0.0, "longitude": 1.0},
                {"type": "Bus", "name": "L", "stops": ["A", "B"], "is_roundtrip": false}
            ],
            "routing_settings": {"bus_wait_time": 1, "bus_velocity": 30}
        }"#;
        assert!(matches!(
            Network::from_json(json).unwrap_err(),
            LoadError::Catalog(CatalogError::MissingDistance { .. })
        ));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let json = r#"{"base_requests": [], "routing_settings": {"bus_wait_time": 1, "bus_velocity": 0}}"#;
        assert!(matches!(
            Network::from_json(json).unwrap_err(),
            LoadError::Config(ConfigError::InvalidVelocity(_))
        ));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            Network::from_json("{ not json").unwrap_err(),
            LoadError::Json(_)
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let network = Network::from_path(file.path()).unwrap();
        assert_eq!(network.catalog().line_names(), vec!["L1"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Network::from_path(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
