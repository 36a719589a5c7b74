//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::CatalogError;

use super::dto::*;
use super::stat::{answer_stat_request, route_answer, stop_answer};
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stops/:name", get(stop_lines))
        .route("/lines", get(list_lines))
        .route("/lines/:name", get(line_summary))
        .route("/lines/:name/geometry", get(line_geometry))
        .route("/geometry/stops", get(served_stops))
        .route("/route", get(find_route))
        .route("/stat", post(stat_batch))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Lines serving a stop.
async fn stop_lines(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<StopResponse>, AppError> {
    stop_answer(state.network.catalog(), &name)
        .map(Json)
        .ok_or_else(AppError::not_found)
}

/// Names of all lines, sorted.
async fn list_lines(State(state): State<AppState>) -> Json<LineListResponse> {
    let lines = state
        .network
        .catalog()
        .line_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(LineListResponse { lines })
}

/// Statistics for one line.
async fn line_summary(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<LineResponse>, AppError> {
    let summary = state.network.catalog().line_summary(&name)?;
    Ok(Json(LineResponse::from(summary)))
}

/// Stop coordinates along the full traversal of a line.
async fn line_geometry(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<GeometryResponse>, AppError> {
    let catalog = state.network.catalog();
    let (Some(points), Some(is_roundtrip)) =
        (catalog.line_geometry(&name), catalog.is_round_trip(&name))
    else {
        return Err(AppError::not_found());
    };

    Ok(Json(GeometryResponse {
        name,
        is_roundtrip,
        points,
    }))
}

/// Coordinates of the stops a map should draw.
async fn served_stops(State(state): State<AppState>) -> Json<ServedStopsResponse> {
    Json(ServedStopsResponse {
        points: state.network.catalog().served_coordinates(),
    })
}

/// Fastest itinerary between two stops.
async fn find_route(
    State(state): State<AppState>,
    Query(req): Query<RouteQuery>,
) -> Result<Json<RouteResponse>, AppError> {
    let from = req.from.ok_or_else(|| AppError::BadRequest {
        message: "Missing 'from' parameter".to_string(),
    })?;
    let to = req.to.ok_or_else(|| AppError::BadRequest {
        message: "Missing 'to' parameter".to_string(),
    })?;

    route_answer(&state, &from, &to)
        .await?
        .map(Json)
        .ok_or_else(AppError::not_found)
}

/// Answer a batch of queries in order.
async fn stat_batch(
    State(state): State<AppState>,
    Json(requests): Json<Vec<StatRequest>>,
) -> Json<Vec<StatResponse>> {
    let mut responses = Vec::with_capacity(requests.len());
    for request in &requests {
        responses.push(answer_stat_request(&state, request).await);
    }
    Json(responses)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl AppError {
    fn not_found() -> Self {
        AppError::NotFound {
            message: "not found".to_string(),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownStop(_)
            | CatalogError::UnknownLine(_)
            | CatalogError::EmptyLine(_) => AppError::not_found(),
            other => AppError::Internal {
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, error = %message, "request failed");
        } else {
            warn!(%status, error = %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
