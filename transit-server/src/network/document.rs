//! Serde types for the network description document.
//!
//! The document lists stops and buses under `base_requests` and the
//! routing parameters under `routing_settings`. Unknown keys (render
//! settings, queued stat requests) are ignored.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::router::RoutingSettings;

/// Top-level network document.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkDocument {
    /// Stop and bus definitions, in any order
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,

    /// Wait time and bus speed
    pub routing_settings: RoutingSettings,
}

/// One entry of `base_requests`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(StopDefinition),
    Bus(BusDefinition),
}

/// A stop and the road distances measured from it.
#[derive(Debug, Clone, Deserialize)]
pub struct StopDefinition {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Road distance in meters from this stop to each named neighbour
    #[serde(default)]
    pub road_distances: BTreeMap<String, f64>,
}

/// A bus line and its outward stop sequence.
#[derive(Debug, Clone, Deserialize)]
pub struct BusDefinition {
    pub name: String,
    #[serde(default)]
    pub stops: Vec<String>,
    pub is_roundtrip: bool,
}
