//! REST API endpoints.
//!
//! Axum-based HTTP API exposing the three request handlers: player
//! ingestion, statistics aggregation, and question answering. Every
//! failure is converted into a structured error body; the server never
//! terminates on a bad request.

pub mod routes;
pub mod state;

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::aggregate::AggregateError;
use crate::agents::AgentError;
use crate::riot::RiotError;
use crate::secrets::SecretError;
use crate::storage::StorageError;
use state::AppState;

/// API error taxonomy. Each variant maps to one response status class.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    PlayerNotFound(String),

    #[error("{0}")]
    CredentialInvalid(String),

    #[error("upstream request failed with status {status}: {detail}")]
    Upstream { status: u16, detail: String },

    #[error("{0}")]
    NoData(String),

    #[error("{0}")]
    NoProcessedData(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ApiError::PlayerNotFound(_) => (StatusCode::NOT_FOUND, "PLAYER_NOT_FOUND"),
            ApiError::CredentialInvalid(_) => (StatusCode::FORBIDDEN, "CREDENTIAL_INVALID"),
            ApiError::Upstream { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR"),
            ApiError::NoData(_) => (StatusCode::NOT_FOUND, "NO_DATA"),
            ApiError::NoProcessedData(_) => (StatusCode::NOT_FOUND, "NO_PROCESSED_DATA"),
            ApiError::StorageUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_UNAVAILABLE")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Remediation hint shown to the caller, where one exists.
    fn hint(&self) -> Option<&'static str> {
        match self {
            ApiError::CredentialInvalid(_) => {
                Some("Regenerate your Riot API key at https://developer.riotgames.com/")
            }
            ApiError::NoProcessedData(_) => {
                Some("Search for a summoner and process their stats before asking questions.")
            }
            _ => None,
        }
    }
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                hint: self.hint().map(str::to_string),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RiotError> for ApiError {
    fn from(err: RiotError) -> Self {
        match err {
            RiotError::NotFound(what) => {
                ApiError::PlayerNotFound(format!("{} not found. Check spelling and region.", what))
            }
            RiotError::Forbidden { .. } => {
                ApiError::CredentialInvalid("API key is invalid or expired".to_string())
            }
            RiotError::Status { status, body } => ApiError::Upstream {
                status,
                detail: body,
            },
            RiotError::Http(e) => ApiError::Internal(e.to_string()),
            RiotError::InvalidUrl(s) => ApiError::Internal(format!("invalid URL: {}", s)),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            // An expected missing object is handled in the route; one that
            // leaks here means a key vanished mid-request.
            StorageError::NotFound(key) => ApiError::Internal(format!("object not found: {}", key)),
            StorageError::InvalidKey(key) => ApiError::Internal(format!("invalid key: {}", key)),
            StorageError::Io(e) => ApiError::StorageUnavailable(e.to_string()),
        }
    }
}

impl From<SecretError> for ApiError {
    fn from(err: SecretError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<AggregateError> for ApiError {
    fn from(err: AggregateError) -> Self {
        match err {
            AggregateError::NoData => ApiError::NoData("No valid match data found".to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/api/players", post(routes::players::ingest))
        .route("/api/players/stats", post(routes::stats::process))
        .route("/api/players/query", post(routes::query::ask))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return base.allow_origin(Any);
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => base.allow_origin(value),
        Err(_) => base.allow_origin(Any),
    }
}
