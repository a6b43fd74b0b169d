use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{
    handlers::{
        handle_analyze, handle_analyze_text, handle_hover, handle_resolve, handle_scte35,
        handle_tag,
    },
    state::AppState,
};
use crate::config::Config;

/// Create the application router from configuration.
pub fn create_router(config: &Config) -> anyhow::Result<Router> {
    let state = AppState::from_config(config)?;
    build_router(state, &config.cors_allowed_origin)
}

/// Assemble routes and middleware around an existing state.
pub fn build_router(state: AppState, cors_origin: &str) -> anyhow::Result<Router> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);
    let cors = if cors_origin == "*" {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(cors_origin.parse::<HeaderValue>()?)
    };

    let app = Router::new()
        .route("/analyze", get(handle_analyze).post(handle_analyze_text))
        .route("/hover", get(handle_hover))
        .route("/resolve", get(handle_resolve))
        .route("/scte35", get(handle_scte35))
        .route("/tags/{name}", get(handle_tag))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
