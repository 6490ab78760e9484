//! In-memory prediction history, newest first.
use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::observation::Observation;
use crate::scorer::{score_batch, score_with, ScoreResult, ScoringMode};
use crate::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Unique within the log that issued it; increases with each record.
    pub id: u64,
    pub observation: Observation,
    pub score: ScoreResult,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct PredictionLog {
    entries: VecDeque<Prediction>,
    next_id: u64,
    mode: ScoringMode,
}

impl PredictionLog {
    pub fn new(mode: ScoringMode) -> Self {
        Self {
            entries: VecDeque::new(),
            next_id: 1,
            mode,
        }
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Score `observation` and put it at the head of the log.
    pub fn record(&mut self, observation: Observation, at: DateTime<Utc>) -> Result<&Prediction, ValidationError> {
        let score = score_with(&observation, self.mode)?;
        self.push(observation, score, at);
        Ok(&self.entries[0])
    }

    /// Record a batch as if each row were submitted in turn, so the last row
    /// ends up first. Nothing is recorded if any row fails validation.
    pub fn record_batch(&mut self, batch: Vec<Observation>, at: DateTime<Utc>) -> Result<usize, ValidationError> {
        let scores = score_batch(&batch, self.mode)?;
        let n = batch.len();
        for (observation, score) in batch.into_iter().zip(scores) {
            self.push(observation, score, at);
        }
        Ok(n)
    }

    fn push(&mut self, observation: Observation, score: ScoreResult, at: DateTime<Utc>) {
        // Id 0 is never issued, including for a default-constructed log.
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.entries.push_front(Prediction {
            id,
            observation,
            score,
            recorded_at: at,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prediction> {
        self.entries.iter()
    }

    /// Contiguous newest-first view.
    pub fn as_slice(&mut self) -> &[Prediction] {
        self.entries.make_contiguous()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::{score, Classification};
    use crate::upload::demo_batch;
    use chrono::TimeZone;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn newest_record_comes_first_with_fresh_ids() {
        let mut log = PredictionLog::new(ScoringMode::Permissive);
        let first = Observation::from_labels(0.0, "Small", "Rock", "Dense", 0.0);
        let second = Observation::from_labels(90.0, "Large", "Clay", "None", 200.0);

        let id1 = log.record(first.clone(), t(0)).unwrap().id;
        let p2 = log.record(second.clone(), t(5)).unwrap();
        assert!(p2.id > id1);
        assert_eq!(p2.score, score(&second));

        let rows: Vec<_> = log.iter().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].observation, second);
        assert_eq!(rows[0].score.result, Classification::Risky);
        assert_eq!(rows[1].observation, first);
        assert_eq!(rows[1].recorded_at, t(0));
    }

    #[test]
    fn batch_lands_in_reverse_submission_order() {
        let mut log = PredictionLog::default();
        let batch = demo_batch();
        assert_eq!(log.record_batch(batch.clone(), t(1)).unwrap(), 3);
        let observed: Vec<_> = log.iter().map(|p| p.observation.clone()).collect();
        assert_eq!(observed, vec![batch[2].clone(), batch[1].clone(), batch[0].clone()]);
        assert!(log.iter().all(|p| p.id > 0));
    }

    #[test]
    fn strict_log_rejects_whole_batch() {
        let mut log = PredictionLog::new(ScoringMode::Strict);
        let mut batch = demo_batch();
        batch.push(Observation::from_labels(10.0, "Gravel", "Rock", "Dense", 1.0));
        assert!(log.record_batch(batch, t(0)).is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn clear_keeps_ids_increasing() {
        let mut log = PredictionLog::new(ScoringMode::Permissive);
        let obs = demo_batch().remove(0);
        let before = log.record(obs.clone(), t(0)).unwrap().id;
        log.clear();
        assert!(log.is_empty());
        let after = log.record(obs, t(1)).unwrap().id;
        assert!(after > before);
        assert_eq!(log.as_slice().len(), 1);
    }
}
