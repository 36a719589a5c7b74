//! Web layer for the transit query service.
//!
//! Provides HTTP endpoints for stop, line and route queries.

mod dto;
mod routes;
mod stat;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use stat::answer_stat_request;
pub use state::AppState;
