//! Heuristic landslide risk score.
//!
//! A weighted sum of five independent contributions:
//!
//!   slope      = min(slope / 90, 1)     × 0.30
//!   rock size  = {Small 0.10, Medium 0.20, Large 0.30}, default 0.20
//!   soil type  = {Rock 0.10, Sand 0.15, Silt 0.20, Clay 0.25, Mixed 0.20}, default 0.20
//!   vegetation = {Dense 0.05, Moderate 0.10, Sparse 0.15, None 0.20}, default 0.15
//!   rainfall   = min(rainfall / 200, 1) × 0.25
//!
//! The score is not normalised and is not a calibrated probability.
//! Anything above [`RISK_THRESHOLD`] is classified Risky.
use serde::{Deserialize, Serialize};

use crate::observation::Observation;
use crate::validation::{validate, ValidationError};

/// Scores strictly above this are Risky; exactly 0.5 is Safe.
pub const RISK_THRESHOLD: f64 = 0.5;

/// Slope at which the slope contribution saturates (degrees).
pub const SLOPE_CAP_DEG: f64 = 90.0;
pub const SLOPE_WEIGHT: f64 = 0.3;

/// Rainfall at which the rainfall contribution saturates (mm).
pub const RAINFALL_CAP_MM: f64 = 200.0;
pub const RAINFALL_WEIGHT: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Safe,
    Risky,
}

impl Classification {
    pub fn from_score(risk_score: f64) -> Self {
        if risk_score > RISK_THRESHOLD {
            Self::Risky
        } else {
            Self::Safe
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Risky => "Risky",
        }
    }
}

/// Per-input contributions to the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Factors {
    pub slope: f64,
    pub rock_size: f64,
    pub soil_type: f64,
    pub vegetation: f64,
    pub rainfall: f64,
}

impl Factors {
    /// Slope and rainfall are divided by their caps and clamped with
    /// `f64::min`, which returns the cap for NaN. A NaN slope or rainfall
    /// therefore contributes its full weight. Use [`ScoringMode::Strict`] to
    /// reject non-finite input instead.
    pub fn of(obs: &Observation) -> Self {
        Self {
            slope: (obs.slope / SLOPE_CAP_DEG).min(1.0) * SLOPE_WEIGHT,
            rock_size: obs.rock_size.weight(),
            soil_type: obs.soil_type.weight(),
            vegetation: obs.vegetation.weight(),
            rainfall: (obs.rainfall / RAINFALL_CAP_MM).min(1.0) * RAINFALL_WEIGHT,
        }
    }

    /// Sum in field order. The risk score is defined as exactly this value.
    pub fn total(&self) -> f64 {
        self.slope + self.rock_size + self.soil_type + self.vegetation + self.rainfall
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub risk_score: f64,
    pub result: Classification,
    pub factors: Factors,
}

/// How out-of-domain input is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Unknown categories take their default weight; numbers are used as-is,
    /// so negative slope or rainfall yields a negative contribution.
    #[default]
    Permissive,
    /// Reject unknown or missing categories and negative or non-finite numbers.
    Strict,
}

/// Score an observation. Total and pure.
///
/// No input is rejected here; see [`Factors::of`] for how NaN scores.
pub fn score(obs: &Observation) -> ScoreResult {
    let factors = Factors::of(obs);
    let risk_score = factors.total();
    ScoreResult {
        risk_score,
        result: Classification::from_score(risk_score),
        factors,
    }
}

/// Score under the given mode. Permissive never fails.
pub fn score_with(obs: &Observation, mode: ScoringMode) -> Result<ScoreResult, ValidationError> {
    if mode == ScoringMode::Strict {
        validate(obs)?;
    }
    Ok(score(obs))
}

/// Score many observations. Output order matches input order.
#[cfg(feature = "threading")]
pub fn score_batch(batch: &[Observation], mode: ScoringMode) -> Result<Vec<ScoreResult>, ValidationError> {
    use rayon::prelude::*;
    batch.par_iter().map(|o| score_with(o, mode)).collect()
}

/// Score many observations. Output order matches input order.
#[cfg(not(feature = "threading"))]
pub fn score_batch(batch: &[Observation], mode: ScoringMode) -> Result<Vec<ScoreResult>, ValidationError> {
    batch.iter().map(|o| score_with(o, mode)).collect()
}
