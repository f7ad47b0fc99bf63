//! Greeting and health check handlers

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::handlers::AppState;

/// GET / - Plain text greeting
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Plain text greeting")
    )
)]
pub async fn greeting() -> &'static str {
    "Hello from Castboard!"
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status: "healthy" or "degraded"
    pub status: String,
    /// Server version from Cargo.toml
    pub version: String,
    /// Service name
    pub service: String,
    /// Whether boards are stored persistently
    pub persistent_storage: bool,
}

/// GET /health - Health check endpoint
///
/// Returns JSON with service status and storage backend information.
/// Used for monitoring and load balancer health checks.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, persistent_storage) = match &state.boards {
        Some(store) => {
            let healthy = store.check_health().await.is_ok();
            (
                if healthy { "healthy" } else { "degraded" },
                store.is_persistent(),
            )
        }
        None => ("degraded", false),
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: "castboard-server".to_string(),
        persistent_storage,
    })
}
