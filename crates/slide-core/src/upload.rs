//! CSV upload of observation batches.
//!
//! Expects a header row using the request field names:
//!
//! ```text
//! slope,rockSize,soilType,vegetation,rainfall
//! 45,Large,Clay,Sparse,120
//! ```
//!
//! Column order is free and category columns may be omitted or left empty
//! (they score with their default weight). Fields are whitespace-trimmed.
use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::observation::{Observation, RockSize, SoilType, Vegetation};

/// Rows shown in an upload preview.
pub const PREVIEW_ROWS: usize = 3;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0:?} is not a .csv file")]
    NotCsv(String),

    /// Empty input, or a first row without the `slope` and `rainfall` columns.
    #[error("missing header row (expected at least slope and rainfall columns)")]
    MissingHeader,

    #[error("header: {0}")]
    Header(#[source] csv::Error),

    /// `record` counts data rows from 1, header excluded.
    #[error("record {record}: {source}")]
    Row {
        record: usize,
        #[source]
        source: csv::Error,
    },

    #[error("record {record}: {field} must be a finite number")]
    NonFinite { record: usize, field: &'static str },
}

/// Parse every data row of a CSV document.
pub fn parse_csv<R: io::Read>(reader: R) -> Result<Vec<Observation>, UploadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(UploadError::Header)?;
    let has = |name: &str| headers.iter().any(|h| h == name);
    if !(has("slope") && has("rainfall")) {
        return Err(UploadError::MissingHeader);
    }

    let mut rows = Vec::new();
    for (i, row) in rdr.deserialize::<Observation>().enumerate() {
        let record = i + 1;
        let obs = row.map_err(|source| UploadError::Row { record, source })?;
        if !obs.slope.is_finite() {
            return Err(UploadError::NonFinite { record, field: "slope" });
        }
        if !obs.rainfall.is_finite() {
            return Err(UploadError::NonFinite { record, field: "rainfall" });
        }
        rows.push(obs);
    }
    Ok(rows)
}

/// A parsed upload awaiting confirmation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub file_name: String,
    pub total_rows: usize,
    /// The first [`PREVIEW_ROWS`] observations.
    pub rows: Vec<Observation>,
    #[serde(skip)]
    observations: Vec<Observation>,
}

impl Preview {
    pub fn new(file_name: impl Into<String>, observations: Vec<Observation>) -> Self {
        let rows = observations.iter().take(PREVIEW_ROWS).cloned().collect();
        Self {
            file_name: file_name.into(),
            total_rows: observations.len(),
            rows,
            observations,
        }
    }

    /// Read a named upload. Only `.csv` file names are accepted.
    pub fn read(file_name: &str, text: &str) -> Result<Self, UploadError> {
        if !file_name.ends_with(".csv") {
            return Err(UploadError::NotCsv(file_name.to_string()));
        }
        Ok(Self::new(file_name, parse_csv(text.as_bytes())?))
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }
}

/// Fixed three-row sample batch for demos.
pub fn demo_batch() -> Vec<Observation> {
    vec![
        Observation::new(45.0, RockSize::Large, SoilType::Clay, Vegetation::Sparse, 120.0),
        Observation::new(30.0, RockSize::Medium, SoilType::Sand, Vegetation::Dense, 80.0),
        Observation::new(60.0, RockSize::Small, SoilType::Rock, Vegetation::None, 200.0),
    ]
}
