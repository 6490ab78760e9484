/// Score a CSV batch of observations and write the results table export.
///
/// Input uses the upload format (`slope,rockSize,soilType,vegetation,rainfall`
/// header). Output is the dashboard export, newest first unless sorted.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use slide_core::{parse_csv, PredictionLog, ResultsTable, ScoringMode, SortColumn, SortDirection, Summary};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "batch_score", about = "Score a CSV batch of slope observations")]
struct Args {
    /// CSV file of observations.
    #[arg(short, long)]
    input: PathBuf,

    /// Export destination. Writes to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep only rows with a cell containing this text (case-insensitive).
    #[arg(long)]
    search: Option<String>,

    /// Sort by timestamp, slope, rainfall, result or probability.
    #[arg(long)]
    sort: Option<SortColumn>,

    /// Sort ascending instead of descending.
    #[arg(long, requires = "sort")]
    ascending: bool,

    /// Reject unknown categories and negative numbers.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let file = File::open(&args.input).with_context(|| format!("opening {}", args.input.display()))?;
    let batch = parse_csv(BufReader::new(file)).with_context(|| format!("reading {}", args.input.display()))?;
    tracing::info!(rows = batch.len(), input = %args.input.display(), "parsed batch");

    let mode = if args.strict { ScoringMode::Strict } else { ScoringMode::Permissive };
    let mut log = PredictionLog::new(mode);
    log.record_batch(batch, Utc::now())?;

    let summary = Summary::of(log.iter());
    report(&summary);

    let table = build_table(&args);
    match &args.output {
        Some(path) => {
            let out = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut out = BufWriter::new(out);
            table.export_csv(log.iter(), &mut out)?;
            out.flush()?;
            tracing::info!(output = %path.display(), "export written");
        }
        None => table.export_csv(log.iter(), io::stdout().lock())?,
    }

    Ok(())
}

fn build_table(args: &Args) -> ResultsTable {
    let mut table = ResultsTable::new();
    if let Some(term) = &args.search {
        table.set_search(term.as_str());
    }
    if let Some(column) = args.sort {
        let dir = if args.ascending { SortDirection::Asc } else { SortDirection::Desc };
        table.sort_by(column, dir);
    }
    table
}

fn report(summary: &Summary) {
    tracing::info!(
        total = summary.total,
        safe = summary.safe,
        risky = summary.risky,
        "predictions"
    );
    match (summary.safety_index, summary.mean_rainfall_mm) {
        (Some(index), Some(rain)) => {
            tracing::info!(safety_index = index, mean_rainfall_mm = rain, "status");
        }
        _ => tracing::warn!("batch was empty"),
    }
}
