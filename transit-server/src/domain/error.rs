//! Catalogue error types.
//!
//! These errors represent malformed network data. They are fatal for
//! catalogue and graph construction and are distinct from ordinary query
//! outcomes such as "stop has no lines".

/// Errors raised while populating or reading the catalogue.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// A stop with this name is already registered
    #[error("duplicate stop: {0}")]
    DuplicateStop(String),

    /// A line with this name is already registered
    #[error("duplicate line: {0}")]
    DuplicateLine(String),

    /// Referenced stop does not exist
    #[error("unknown stop: {0}")]
    UnknownStop(String),

    /// Referenced line does not exist
    #[error("unknown line: {0}")]
    UnknownLine(String),

    /// The line already has a route
    #[error("route already set for line {0}")]
    RouteAlreadySet(String),

    /// The line has no stops
    #[error("line {0} has no stops")]
    EmptyLine(String),

    /// No road distance recorded in either direction
    #[error("no road distance between {from} and {to}")]
    MissingDistance { from: String, to: String },

    /// Road distance is negative or not a number
    #[error("invalid road distance {meters} from {from} to {to}")]
    InvalidDistance { from: String, to: String, meters: f64 },
}
