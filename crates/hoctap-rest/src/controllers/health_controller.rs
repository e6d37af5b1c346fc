//! Health check and welcome controller.

use crate::{
    dto::{HealthData, WelcomeData},
    responses::{now_rfc3339, ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::get, Router};
use std::collections::BTreeMap;
use tracing::warn;

/// Endpoint catalogue returned by `GET /welcome`.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("health", "GET /health"),
    ("users", "GET /api/users"),
    ("user_by_id", "GET /api/users/{id}"),
    ("create_user", "POST /api/users"),
    ("update_user", "PUT /api/users/{id}"),
    ("delete_user", "DELETE /api/users/{id}"),
    ("users_stats", "GET /api/users/stats"),
    ("dashboard", "GET / (HTML Dashboard)"),
    ("api_docs", "GET /swagger-ui"),
];

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/welcome", get(welcome))
}

/// Health check endpoint.
///
/// Always answers 200; a failed database probe is reported in the body.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "API is running successfully", body = HealthData)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResult<HealthData> {
    let database = match state.database.health_check().await {
        Ok(()) => "healthy".to_string(),
        Err(e) => {
            warn!("Database health check failed: {}", e);
            format!("error: {}", e)
        }
    };

    ok(
        "API is running successfully",
        HealthData {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
            timestamp: now_rfc3339(),
        },
    )
}

/// Welcome endpoint listing the API surface.
#[utoipa::path(
    get,
    path = "/welcome",
    tag = "health",
    responses(
        (status = 200, description = "Welcome to HocTap API!", body = WelcomeData)
    )
)]
pub async fn welcome() -> ApiResult<WelcomeData> {
    let endpoints: BTreeMap<String, String> = ENDPOINTS
        .iter()
        .map(|(name, route)| ((*name).to_string(), (*route).to_string()))
        .collect();

    ok(
        "Welcome to HocTap API!",
        WelcomeData {
            endpoints,
            database: "MySQL with environment configuration".to_string(),
            documentation:
                "Use the endpoints above to interact with the API, or visit / for the web dashboard"
                    .to_string(),
        },
    )
}
