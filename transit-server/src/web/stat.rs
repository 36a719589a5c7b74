//! Answers to stop, line and route queries.
//!
//! The single-query endpoints and the `/stat` batch share these lookups so
//! both report missing data the same way.

use tracing::{debug, error};

use crate::catalog::{Catalog, LinesServing};
use crate::router::RouteOutcome;

use super::dto::{LineResponse, RouteResponse, StatAnswer, StatRequest, StatResponse, StopResponse};
use super::routes::AppError;
use super::state::AppState;

/// Lines serving a stop, or `None` for an unknown stop.
pub(super) fn stop_answer(catalog: &Catalog, name: &str) -> Option<StopResponse> {
    match catalog.find_lines_serving(name) {
        LinesServing::UnknownStop => None,
        LinesServing::NoLines => Some(StopResponse { buses: Vec::new() }),
        LinesServing::Lines(buses) => Some(StopResponse { buses }),
    }
}

/// Fastest itinerary between two stops, or `None` if either stop is
/// unknown or the destination is unreachable.
pub(super) async fn route_answer(
    state: &AppState,
    from: &str,
    to: &str,
) -> Result<Option<RouteResponse>, AppError> {
    let catalog = state.network.catalog();
    let (Some(from_id), Some(to_id)) = (catalog.stop_id(from), catalog.stop_id(to)) else {
        debug!(from, to, "route query names an unknown stop");
        return Ok(None);
    };

    let outcome = state
        .routes
        .get_or_resolve(&state.network, from_id, to_id)
        .await
        .map_err(|e| AppError::Internal {
            message: format!("route search failed: {e}"),
        })?;
    Ok(match outcome.as_ref() {
        RouteOutcome::Found(itinerary) => Some(RouteResponse::from(itinerary)),
        RouteOutcome::NoRoute => None,
    })
}

/// Answer one query of a `/stat` batch.
pub async fn answer_stat_request(state: &AppState, request: &StatRequest) -> StatResponse {
    let catalog = state.network.catalog();
    let answer = match request {
        StatRequest::Stop { name, .. } => stop_answer(catalog, name).map(StatAnswer::Stop),
        StatRequest::Bus { name, .. } => catalog
            .line_summary(name)
            .ok()
            .map(|summary| StatAnswer::Bus(LineResponse::from(summary))),
        StatRequest::Route { from, to, .. } => match route_answer(state, from, to).await {
            Ok(route) => route.map(StatAnswer::Route),
            Err(e) => {
                error!(request_id = request.id(), error = ?e, "route query failed");
                Some(StatAnswer::Error {
                    error_message: "internal error".to_string(),
                })
            }
        },
    };

    StatResponse {
        request_id: request.id(),
        answer: answer.unwrap_or_else(StatAnswer::not_found),
    }
}
