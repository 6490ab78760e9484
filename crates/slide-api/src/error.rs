//! # API Error Types
//!
//! Every failure answers with `{"error": "<message>"}`. Bodies that cannot be
//! read as an observation get one generic message and a 500; the parse detail
//! is only logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use slide_core::wire::PredictError;
use slide_core::{ErrorResponse, UploadError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Body could not be parsed (500, generic message).
    #[error("malformed request: {0}")]
    Malformed(String),

    /// Observation rejected by strict validation (422).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// CSV batch could not be read (422).
    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Malformed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::Upload(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            Self::Malformed(_) => ErrorResponse::failed_to_process(),
            other => ErrorResponse { error: other.to_string() },
        }
    }
}

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::Malformed(e) => Self::Malformed(e.to_string()),
            PredictError::Invalid(e) => Self::Validation(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Malformed(_) => tracing::warn!(error = %self, "rejected request body"),
            _ => tracing::info!(error = %self, "rejected observation"),
        }
        (self.status(), Json(self.body())).into_response()
    }
}
