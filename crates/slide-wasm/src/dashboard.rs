//! Dashboard session state behind the browser bindings.
//!
//! Kept free of `JsValue` so it can be exercised natively.
use chrono::{DateTime, Utc};
use slide_core::{
    demo_batch, ErrorResponse, Observation, Prediction, PredictionLog, Preview, ResultsTable, ScoringMode,
    SortColumn, Summary, TableRow,
};

pub struct DashboardState {
    log: PredictionLog,
    table: ResultsTable,
    pending: Option<Preview>,
}

fn error(msg: impl ToString) -> ErrorResponse {
    ErrorResponse { error: msg.to_string() }
}

impl DashboardState {
    pub fn new(mode: ScoringMode) -> Self {
        Self {
            log: PredictionLog::new(mode),
            table: ResultsTable::new(),
            pending: None,
        }
    }

    /// Score one manually entered observation and record it.
    pub fn submit(&mut self, observation_json: &str, at: DateTime<Utc>) -> Result<Prediction, ErrorResponse> {
        let obs: Observation =
            serde_json::from_str(observation_json).map_err(|_| ErrorResponse::failed_to_process())?;
        self.log.record(obs, at).cloned().map_err(error)
    }

    /// Parse an uploaded file and hold it for confirmation.
    pub fn upload(&mut self, file_name: &str, csv_text: &str) -> Result<&Preview, ErrorResponse> {
        let preview = Preview::read(file_name, csv_text).map_err(error)?;
        Ok(&*self.pending.insert(preview))
    }

    /// Stage the built-in sample batch as if it had been uploaded.
    pub fn load_demo(&mut self) -> &Preview {
        self.pending.insert(Preview::new("demo.csv", demo_batch()))
    }

    pub fn pending(&self) -> Option<&Preview> {
        self.pending.as_ref()
    }

    pub fn clear_upload(&mut self) {
        self.pending = None;
    }

    /// Record every row of the staged upload. Returns the number recorded.
    pub fn process_upload(&mut self, at: DateTime<Utc>) -> Result<usize, ErrorResponse> {
        let Some(preview) = self.pending.take() else {
            return Ok(0);
        };
        self.log.record_batch(preview.into_observations(), at).map_err(error)
    }

    pub fn summary(&self) -> Summary {
        Summary::of(self.log.iter())
    }

    pub fn set_search(&mut self, term: &str) {
        self.table.set_search(term);
    }

    pub fn toggle_sort(&mut self, column: &str) -> Result<(), ErrorResponse> {
        let column: SortColumn = column.parse().map_err(error)?;
        self.table.toggle_sort(column);
        Ok(())
    }

    pub fn rows(&self) -> Vec<TableRow> {
        self.table.rows(self.log.iter())
    }

    pub fn export_csv(&self) -> Result<String, ErrorResponse> {
        self.table.export_string(self.log.iter()).map_err(error)
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn clear(&mut self) {
        self.log.clear();
        self.pending = None;
    }
}
