//! Landslide risk assessment core.
//!
//! Scores geological observations with a fixed weighted-sum heuristic and
//! provides the bookkeeping a dashboard needs around it: CSV upload, an
//! in-memory prediction log, status-card aggregates and a searchable,
//! sortable, exportable results table.

pub mod observation;
pub mod scorer;
pub mod validation;
pub mod wire;
pub mod upload;
pub mod log;
pub mod summary;
pub mod table;

pub use observation::{Category, Label, Observation, RockSize, SoilType, Vegetation};
pub use scorer::{score, score_batch, score_with, Classification, Factors, ScoreResult, ScoringMode, RISK_THRESHOLD};
pub use validation::ValidationError;
pub use wire::{predict, ErrorResponse, PredictError, PredictResponse, FAILED_TO_PROCESS};
pub use upload::{demo_batch, parse_csv, Preview, UploadError, PREVIEW_ROWS};
pub use log::{Prediction, PredictionLog};
pub use summary::Summary;
pub use table::{format_probability, ResultsTable, SortColumn, SortDirection, TableRow, EXPORT_FILE_NAME, EXPORT_HEADERS};
