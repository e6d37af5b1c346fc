//! Main application router.

use crate::{
    controllers::{health_controller, user_controller},
    middleware::logging_middleware,
    openapi::ApiDoc,
    state::AppState,
};
use axum::{
    http::{header, Method},
    middleware, Router,
};
use hoctap_config::ServerConfig;
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeFile,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let cors = create_cors_layer(server_config);

    let api_router = Router::new().nest("/users", user_controller::router());

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api", api_router)
        .with_state(state)
        .merge(dashboard_router(Path::new(&server_config.static_dir)))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!(
        "Router created with REST endpoints, dashboard from '{}' and Swagger UI at /swagger-ui",
        server_config.static_dir
    );
    router
}

/// Serves the dashboard page and its two assets.
fn dashboard_router(static_dir: &Path) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route_service("/static/styles.css", ServeFile::new(static_dir.join("styles.css")))
        .route_service("/static/script.js", ServeFile::new(static_dir.join("script.js")))
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.cors_enabled {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        CorsLayer::new()
    }
}
