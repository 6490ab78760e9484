//! Status-card aggregates over the prediction history.
use serde::Serialize;

use crate::log::Prediction;
use crate::observation::Observation;
use crate::scorer::{Classification, ScoreResult, RAINFALL_CAP_MM};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub safe: usize,
    pub risky: usize,
    /// Share of Safe predictions as a rounded integer percent.
    pub safety_index: Option<u32>,
    /// Mean rainfall, rounded to whole mm.
    pub mean_rainfall_mm: Option<f64>,
    /// Mean rainfall as a share of the 200 mm saturation point, capped at 100.
    pub rainfall_gauge_pct: Option<f64>,
    pub mean_risk_score: Option<f64>,
}

impl Summary {
    /// Aggregates are `None` when there is nothing to aggregate.
    pub fn of<'a>(predictions: impl IntoIterator<Item = &'a Prediction>) -> Self {
        Self::of_scored(predictions.into_iter().map(|p| (&p.observation, &p.score)))
    }

    /// Same as [`Summary::of`] for observations scored outside a log.
    pub fn of_scored<'a>(rows: impl IntoIterator<Item = (&'a Observation, &'a ScoreResult)>) -> Self {
        let mut total = 0usize;
        let mut safe = 0usize;
        let mut rain_sum = 0.0f64;
        let mut score_sum = 0.0f64;

        for (obs, score) in rows {
            total += 1;
            if score.result == Classification::Safe {
                safe += 1;
            }
            rain_sum += obs.rainfall;
            score_sum += score.risk_score;
        }

        if total == 0 {
            return Self {
                total,
                safe,
                risky: 0,
                safety_index: None,
                mean_rainfall_mm: None,
                rainfall_gauge_pct: None,
                mean_risk_score: None,
            };
        }

        let n = total as f64;
        let mean_rain = rain_sum / n;
        Self {
            total,
            safe,
            risky: total - safe,
            safety_index: Some((safe as f64 / n * 100.0).round() as u32),
            mean_rainfall_mm: Some(mean_rain.round()),
            rainfall_gauge_pct: Some((mean_rain / RAINFALL_CAP_MM * 100.0).min(100.0)),
            mean_risk_score: Some(score_sum / n),
        }
    }
}
