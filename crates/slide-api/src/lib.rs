//! # slide-api — landslide risk prediction service
//!
//! | Route                      | Body      | Response                                   |
//! |----------------------------|-----------|--------------------------------------------|
//! | `POST /api/predict`        | JSON      | `{result, probability, riskScore, factors}` |
//! | `POST /api/predict/batch`  | CSV       | `{predictions: [...], summary}`            |
//! | `GET /health/liveness`     |           | `ok`                                       |
//!
//! Failures answer with `{"error": "..."}`.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config: Arc::new(config) }
    }
}

/// Assemble the router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let limit = state.config.body_limit;
    Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .merge(routes::router())
        .layer(DefaultBodyLimit::max(limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn liveness() -> &'static str {
    "ok"
}
