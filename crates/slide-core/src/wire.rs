//! JSON request/response shapes of the prediction endpoint.
//!
//! Request:  `{ "slope", "rockSize", "soilType", "vegetation", "rainfall" }`
//! Success:  `{ "result", "probability", "riskScore", "factors": {..} }`
//! Failure:  `{ "error": "..." }`
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observation::Observation;
use crate::scorer::{score_with, Classification, Factors, ScoreResult, ScoringMode};
use crate::validation::ValidationError;

/// Message returned for any body that cannot be read as an observation.
pub const FAILED_TO_PROCESS: &str = "Failed to process prediction";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub result: Classification,
    /// Same value as `risk_score`; kept for clients that read this name.
    pub probability: f64,
    pub risk_score: f64,
    pub factors: Factors,
}

impl From<ScoreResult> for PredictResponse {
    fn from(r: ScoreResult) -> Self {
        Self {
            result: r.result,
            probability: r.risk_score,
            risk_score: r.risk_score,
            factors: r.factors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn failed_to_process() -> Self {
        Self { error: FAILED_TO_PROCESS.to_string() }
    }
}

#[derive(Debug, Error)]
pub enum PredictError {
    /// Body was empty, not JSON, or not shaped like an observation.
    #[error("malformed request: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl PredictError {
    /// Client-facing body. Parse failures collapse to one generic message.
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            Self::Malformed(_) => ErrorResponse::failed_to_process(),
            Self::Invalid(e) => ErrorResponse { error: e.to_string() },
        }
    }
}

/// Parse a request body into an observation.
pub fn parse_request(body: &[u8]) -> Result<Observation, PredictError> {
    Ok(serde_json::from_slice(body)?)
}

/// Parse, score and shape one request body.
pub fn predict(body: &[u8], mode: ScoringMode) -> Result<PredictResponse, PredictError> {
    let obs = parse_request(body)?;
    Ok(score_with(&obs, mode)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn probability_mirrors_risk_score() {
        let body = br#"{"slope": 45, "rockSize": "Medium", "soilType": "Sand", "vegetation": "Moderate", "rainfall": 100}"#;
        let resp = predict(body, ScoringMode::Permissive).unwrap();
        assert_eq!(resp.result, Classification::Risky);
        assert_eq!(resp.probability, resp.risk_score);
        assert_abs_diff_eq!(resp.risk_score, 0.725, epsilon = 1e-12);
        assert_abs_diff_eq!(resp.factors.rainfall, 0.125, epsilon = 1e-12);
    }

    #[test]
    fn response_json_has_contract_keys_only() {
        let body = br#"{"slope": 0, "rockSize": "Small", "soilType": "Rock", "vegetation": "Dense", "rainfall": 0}"#;
        let v = serde_json::to_value(predict(body, ScoringMode::Permissive).unwrap()).unwrap();
        let mut keys: Vec<_> = v.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["factors", "probability", "result", "riskScore"]);
        assert_eq!(v["result"], "Safe");
    }

    #[test]
    fn malformed_bodies_collapse_to_one_error() {
        let bodies: [&[u8]; 6] = [
            b"",
            b"not json",
            b"42",
            b"[1, 2]",
            br#"{"slope": "steep", "rainfall": 3}"#,
            br#"{"rockSize": "Small"}"#,
        ];
        for body in bodies {
            let err = predict(body, ScoringMode::Permissive).unwrap_err();
            assert!(matches!(err, PredictError::Malformed(_)));
            let v = serde_json::to_value(err.to_response()).unwrap();
            assert_eq!(v["error"], FAILED_TO_PROCESS);
            assert!(v.get("result").is_none());
            assert!(v.get("riskScore").is_none());
        }
    }

    #[test]
    fn strict_validation_message_is_passed_through() {
        let body = br#"{"slope": 10, "rockSize": "Tiny", "soilType": "Rock", "vegetation": "Dense", "rainfall": 3}"#;
        assert!(predict(body, ScoringMode::Permissive).is_ok());
        let err = predict(body, ScoringMode::Strict).unwrap_err();
        assert!(matches!(err, PredictError::Invalid(_)));
        assert!(err.to_response().error.starts_with("rockSize:"));
    }
}
