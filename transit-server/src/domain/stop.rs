//! Stop types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable handle of a stop within a catalogue.
///
/// Handles are assigned in insertion order, starting at zero, and never
/// change once issued. They are only meaningful for the catalogue that
/// issued them.
///
/// # Examples
///
/// ```
/// use transit_server::domain::StopId;
///
/// let id = StopId(3);
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(pub usize);

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees
    #[serde(rename = "latitude")]
    pub lat: f64,
    /// Longitude in degrees
    #[serde(rename = "longitude")]
    pub lng: f64,
}

impl Coordinates {
    /// Creates a new position.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A named stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Unique stop name
    pub name: String,
    /// Position of the stop
    pub coordinates: Coordinates,
}

impl Stop {
    /// Creates a new stop.
    pub fn new(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            coordinates,
        }
    }
}
