//! Strict input checks, applied only under [`ScoringMode::Strict`].
//!
//! [`ScoringMode::Strict`]: crate::scorer::ScoringMode::Strict
use thiserror::Error;

use crate::observation::{Category, Label, Observation};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field}: unrecognised value {value:?} (expected one of {expected})")]
    UnknownCategory {
        field: &'static str,
        value: String,
        expected: String,
    },

    #[error("{field}: value is required")]
    MissingCategory { field: &'static str },

    #[error("{field}: must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field}: must be a finite number")]
    NonFinite { field: &'static str },
}

/// Check an observation. Reports the first problem in field order.
pub fn validate(obs: &Observation) -> Result<(), ValidationError> {
    check_measure("slope", obs.slope)?;
    check_label(&obs.rock_size)?;
    check_label(&obs.soil_type)?;
    check_label(&obs.vegetation)?;
    check_measure("rainfall", obs.rainfall)?;
    Ok(())
}

fn check_measure(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

fn check_label<T: Category>(label: &Label<T>) -> Result<(), ValidationError> {
    match label {
        Label::Known(_) => Ok(()),
        Label::Missing => Err(ValidationError::MissingCategory { field: T::FIELD }),
        Label::Other(raw) => Err(ValidationError::UnknownCategory {
            field: T::FIELD,
            value: raw.clone(),
            expected: T::ALL.iter().map(|c| c.label()).collect::<Vec<_>>().join(", "),
        }),
    }
}
