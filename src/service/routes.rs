//! HTTP routes for the resolution service

use super::{ResolutionService, ResolveRequest, ResolveResponse, ServiceError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

/// Body of `GET /`
pub const STATUS_MESSAGE: &str = "EnvZero Orchestrator Running";

/// Largest request body buffered before the prompt is decoded
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Builds the router with all routes and middleware
pub fn build_router(service: Arc<ResolutionService>) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/api/resolve", post(resolve))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: STATUS_MESSAGE.to_string(),
    })
}

async fn resolve(
    State(service): State<Arc<ResolutionService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ResolveResponse>, ServiceError> {
    let result = match payload {
        Ok(Json(body)) => match ResolveRequest::from_json(body) {
            Ok(request) => service.resolve(request).await,
            Err(e) => Err(e),
        },
        Err(rejection) => Err(rejection_error(rejection)),
    };

    match result {
        Ok(manifest) => Ok(Json(ResolveResponse::success(manifest))),
        Err(e) => {
            log_failure(&e);
            Err(e)
        }
    }
}

/// Oversized bodies are an oversized prompt; every other rejection is a bad request
fn rejection_error(rejection: JsonRejection) -> ServiceError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServiceError::BodyTooLarge {
            limit: MAX_BODY_BYTES,
        }
    } else {
        ServiceError::InvalidRequest(rejection.body_text())
    }
}

fn log_failure(e: &ServiceError) {
    let status = e.status_code();
    match status {
        s if s.is_client_error() => {
            debug!(status = s.as_u16(), error = %e, "Rejected resolve request")
        }
        StatusCode::BAD_GATEWAY => {
            error!(status = status.as_u16(), error = %e, "Resolver contract violation")
        }
        _ => error!(status = status.as_u16(), error = ?e, "Unexpected error in /api/resolve"),
    }
}
