//! Data transfer objects for web requests and responses.
//!
//! Field names follow the transit query format: lines are "buses" and a
//! ride leg is a "Bus" item.

use serde::{Deserialize, Serialize};

use crate::catalog::LineSummary;
use crate::domain::Coordinates;
use crate::router::{Itinerary, Leg};

/// Query parameters for a route search.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    /// Origin stop name
    pub from: Option<String>,

    /// Destination stop name
    pub to: Option<String>,
}

/// Lines serving a stop.
#[derive(Debug, Serialize, PartialEq)]
pub struct StopResponse {
    /// Line names, sorted
    pub buses: Vec<String>,
}

/// Statistics for one line.
#[derive(Debug, Serialize, PartialEq)]
pub struct LineResponse {
    /// Road length divided by great-circle length
    pub curvature: f64,

    /// Road length of the full traversal, in meters
    pub route_length: f64,

    /// Stops visited on the full traversal
    pub stop_count: usize,

    /// Distinct stops on the line
    pub unique_stop_count: usize,
}

/// All line names.
#[derive(Debug, Serialize)]
pub struct LineListResponse {
    pub lines: Vec<String>,
}

/// Stop positions along a line, in traversal order.
#[derive(Debug, Serialize)]
pub struct GeometryResponse {
    pub name: String,
    pub is_roundtrip: bool,
    pub points: Vec<Coordinates>,
}

/// Positions of every stop served by at least one line.
#[derive(Debug, Serialize)]
pub struct ServedStopsResponse {
    pub points: Vec<Coordinates>,
}

/// A fastest itinerary.
#[derive(Debug, Serialize, PartialEq)]
pub struct RouteResponse {
    /// Total time in minutes
    pub total_time: f64,

    /// Legs in travel order
    pub items: Vec<RouteItem>,
}

/// One leg of an itinerary.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum RouteItem {
    Wait {
        stop_name: String,
        time: f64,
    },
    Bus {
        bus: String,
        span_count: usize,
        time: f64,
    },
}

/// One query of a `/stat` batch.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum StatRequest {
    Stop { id: i64, name: String },
    Bus { id: i64, name: String },
    Route { id: i64, from: String, to: String },
}

impl StatRequest {
    /// The caller's request id, echoed back as `request_id`.
    pub fn id(&self) -> i64 {
        match self {
            StatRequest::Stop { id, .. }
            | StatRequest::Bus { id, .. }
            | StatRequest::Route { id, .. } => *id,
        }
    }
}

/// Answer to one `/stat` query.
#[derive(Debug, Serialize, PartialEq)]
pub struct StatResponse {
    pub request_id: i64,

    #[serde(flatten)]
    pub answer: StatAnswer,
}

/// Body of a `/stat` answer, merged into the response object.
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum StatAnswer {
    Stop(StopResponse),
    Bus(LineResponse),
    Route(RouteResponse),
    Error { error_message: String },
}

impl StatAnswer {
    /// The answer for an unknown stop, line or unreachable destination.
    pub fn not_found() -> Self {
        StatAnswer::Error {
            error_message: "not found".to_string(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<LineSummary> for LineResponse {
    fn from(summary: LineSummary) -> Self {
        Self {
            curvature: summary.curvature,
            route_length: summary.route_length,
            stop_count: summary.stop_count,
            unique_stop_count: summary.unique_stop_count,
        }
    }
}

impl From<&Leg> for RouteItem {
    fn from(leg: &Leg) -> Self {
        match leg {
            Leg::Wait { stop, time } => RouteItem::Wait {
                stop_name: stop.clone(),
                time: *time,
            },
            Leg::Ride {
                line,
                span_count,
                time,
            } => RouteItem::Bus {
                bus: line.clone(),
                span_count: *span_count,
                time: *time,
            },
        }
    }
}

impl From<&Itinerary> for RouteResponse {
    fn from(itinerary: &Itinerary) -> Self {
        Self {
            total_time: itinerary.total_time,
            items: itinerary.legs.iter().map(RouteItem::from).collect(),
        }
    }
}
