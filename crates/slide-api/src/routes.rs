//! Prediction routes.
//!
//! Bodies are taken as raw bytes and parsed here rather than through the
//! `Json` extractor, so a missing content type or empty body yields the same
//! error object as malformed JSON.

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use slide_core::{parse_csv, score_batch, wire, PredictResponse, Summary};

use crate::error::ApiError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/predict", post(predict))
        .route("/api/predict/batch", post(predict_batch))
}

/// POST /api/predict — score one observation.
async fn predict(State(state): State<AppState>, body: Bytes) -> Result<Json<PredictResponse>, ApiError> {
    let resp = wire::predict(&body, state.config.mode)?;
    tracing::debug!(
        risk_score = resp.risk_score,
        result = resp.result.as_str(),
        "scored observation"
    );
    Ok(Json(resp))
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub predictions: Vec<PredictResponse>,
    pub summary: Summary,
}

/// POST /api/predict/batch — score every row of a CSV body, in order.
async fn predict_batch(State(state): State<AppState>, body: Bytes) -> Result<Json<BatchResponse>, ApiError> {
    let batch = parse_csv(body.as_ref())?;
    let scores = score_batch(&batch, state.config.mode)?;
    let summary = Summary::of_scored(batch.iter().zip(&scores));
    tracing::info!(rows = batch.len(), risky = summary.risky, "scored batch");
    Ok(Json(BatchResponse {
        predictions: scores.into_iter().map(PredictResponse::from).collect(),
        summary,
    }))
}
