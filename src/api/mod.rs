//! REST API endpoints.
//!
//! Axum-based HTTP API exposing the derived statistics: season summary,
//! form, trends, rankings, career breakdowns and match timelines. Handlers
//! materialize a snapshot from storage and hand it to the calculation
//! engine; they hold no state of their own.

pub mod routes;
pub mod state;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Pagination parameters.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 50,
        }
    }
}

impl Pagination {
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size.unwrap_or(50).clamp(1, 100),
        }
    }

    pub fn offset(&self) -> u32 {
        (self.page - 1) * self.page_size
    }
}

/// Pagination metadata in responses.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(pagination: &Pagination, total_items: u32) -> Self {
        let total_pages = total_items.div_ceil(pagination.page_size);
        Self {
            page: pagination.page,
            page_size: pagination.page_size,
            total_items,
            total_pages,
            has_next: pagination.page < total_pages,
            has_prev: pagination.page > 1,
        }
    }
}

/// Build the full API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/teams", get(routes::teams::list_teams))
        .route("/api/teams/duplicates", get(routes::teams::duplicate_teams))
        .route("/api/teams/:team_id", get(routes::teams::team_detail))
        .route(
            "/api/teams/:team_id/matches",
            get(routes::matches::list_matches),
        )
        .route(
            "/api/teams/:team_id/matches/:match_id/timeline",
            get(routes::matches::match_timeline),
        )
        .route(
            "/api/teams/:team_id/stats/season",
            get(routes::stats::season),
        )
        .route("/api/teams/:team_id/stats/form", get(routes::stats::form))
        .route(
            "/api/teams/:team_id/stats/trends",
            get(routes::stats::monthly),
        )
        .route(
            "/api/teams/:team_id/stats/top-players",
            get(routes::stats::top_players),
        )
        .route(
            "/api/teams/:team_id/stats/opponents",
            get(routes::stats::opponents),
        )
        .route(
            "/api/teams/:team_id/stats/career",
            get(routes::stats::career),
        )
        .route(
            "/api/teams/:team_id/stats/player-of-month",
            get(routes::stats::player_of_month),
        )
        .route(
            "/api/teams/:team_id/stats/shot-types",
            get(routes::stats::shot_type_trend),
        )
        .route("/api/shared/:token", get(routes::matches::shared_match))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
