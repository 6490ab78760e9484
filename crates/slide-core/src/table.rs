//! Results table: search, sort and CSV export over the prediction history.
use std::cmp::Ordering;
use std::fmt;
use std::io;
use std::str::FromStr;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::log::Prediction;

pub const EXPORT_FILE_NAME: &str = "landslide_predictions.csv";

pub const EXPORT_HEADERS: [&str; 8] = [
    "Timestamp",
    "Slope",
    "Rock Size",
    "Soil Type",
    "Vegetation",
    "Rainfall",
    "Result",
    "Probability",
];

/// Columns the table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    Timestamp,
    Slope,
    Rainfall,
    Result,
    Probability,
}

impl SortColumn {
    pub const ALL: [SortColumn; 5] = [
        Self::Timestamp,
        Self::Slope,
        Self::Rainfall,
        Self::Result,
        Self::Probability,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Slope => "slope",
            Self::Rainfall => "rainfall",
            Self::Result => "result",
            Self::Probability => "probability",
        }
    }

    fn compare(self, a: &Prediction, b: &Prediction) -> Ordering {
        match self {
            Self::Timestamp => a.recorded_at.cmp(&b.recorded_at),
            Self::Slope => a.observation.slope.total_cmp(&b.observation.slope),
            Self::Rainfall => a.observation.rainfall.total_cmp(&b.observation.rainfall),
            Self::Result => a.score.result.as_str().cmp(b.score.result.as_str()),
            Self::Probability => a.score.risk_score.total_cmp(&b.score.risk_score),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown sort column {s:?}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// One display row, formatted the way the table shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub id: u64,
    pub timestamp: String,
    pub slope: f64,
    pub rock_size: String,
    pub soil_type: String,
    pub vegetation: String,
    pub rainfall: f64,
    pub result: String,
    pub probability: f64,
}

impl From<&Prediction> for TableRow {
    fn from(p: &Prediction) -> Self {
        Self {
            id: p.id,
            timestamp: timestamp(p),
            slope: p.observation.slope,
            rock_size: p.observation.rock_size.to_string(),
            soil_type: p.observation.soil_type.to_string(),
            vegetation: p.observation.vegetation.to_string(),
            rainfall: p.observation.rainfall,
            result: p.score.result.as_str().to_string(),
            probability: p.score.risk_score,
        }
    }
}

fn timestamp(p: &Prediction) -> String {
    p.recorded_at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Probability as a percentage with one decimal, e.g. `72.5%`.
pub fn format_probability(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

fn cells(p: &Prediction) -> [String; 8] {
    [
        timestamp(p),
        p.observation.slope.to_string(),
        p.observation.rock_size.to_string(),
        p.observation.soil_type.to_string(),
        p.observation.vegetation.to_string(),
        p.observation.rainfall.to_string(),
        p.score.result.as_str().to_string(),
        format_probability(p.score.risk_score),
    ]
}

/// Search and sort state. Rows themselves live in the log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsTable {
    search: String,
    sort: Option<(SortColumn, SortDirection)>,
}

impl ResultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn sort(&self) -> Option<(SortColumn, SortDirection)> {
        self.sort
    }

    pub fn sort_by(&mut self, column: SortColumn, direction: SortDirection) {
        self.sort = Some((column, direction));
    }

    /// Clicking the active column flips direction; a new column starts descending.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.sort = match self.sort {
            Some((active, dir)) if active == column => Some((column, dir.flip())),
            _ => Some((column, SortDirection::Desc)),
        };
    }

    /// Case-insensitive substring match against every displayed cell.
    pub fn matches(&self, p: &Prediction) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        cells(p).iter().any(|c| c.to_lowercase().contains(&needle))
    }

    /// Filtered, then stably sorted, rows.
    pub fn view<'a>(&self, rows: impl IntoIterator<Item = &'a Prediction>) -> Vec<&'a Prediction> {
        let mut out: Vec<&Prediction> = rows.into_iter().filter(|p| self.matches(p)).collect();
        if let Some((column, dir)) = self.sort {
            out.sort_by(|a, b| {
                let ord = column.compare(a, b);
                match dir {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }
        out
    }

    pub fn rows<'a>(&self, rows: impl IntoIterator<Item = &'a Prediction>) -> Vec<TableRow> {
        self.view(rows).into_iter().map(TableRow::from).collect()
    }

    /// Write the current view as CSV.
    pub fn export_csv<'a, W: io::Write>(
        &self,
        rows: impl IntoIterator<Item = &'a Prediction>,
        out: W,
    ) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(out);
        wtr.write_record(EXPORT_HEADERS)?;
        for p in self.view(rows) {
            wtr.write_record(cells(p))?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn export_string<'a>(&self, rows: impl IntoIterator<Item = &'a Prediction>) -> Result<String, csv::Error> {
        let mut buf = Vec::new();
        self.export_csv(rows, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
