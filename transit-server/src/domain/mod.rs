//! Domain types for the transit network.
//!
//! Stops and lines are owned by the catalogue and referenced everywhere
//! else through the `StopId` and `LineId` handles it issues.

mod error;
mod geo;
mod line;
mod stop;

pub use error::CatalogError;
pub use geo::{EARTH_RADIUS_M, great_circle_distance};
pub use line::{Line, LineId, Route};
pub use stop::{Coordinates, Stop, StopId};
