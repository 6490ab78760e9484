/// Score a single observation from the command line and print the
/// prediction response as JSON.

use anyhow::Result;
use clap::Parser;
use slide_core::{score_with, Observation, PredictResponse, ScoringMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "score", about = "Score one slope observation for landslide risk")]
struct Args {
    /// Slope angle in degrees.
    #[arg(long, allow_negative_numbers = true)]
    slope: f64,

    /// Small, Medium or Large. Omit to score with the default weight.
    #[arg(long, default_value = "")]
    rock_size: String,

    /// Rock, Sand, Silt, Clay or Mixed.
    #[arg(long, default_value = "")]
    soil_type: String,

    /// Dense, Moderate, Sparse or None.
    #[arg(long, default_value = "")]
    vegetation: String,

    /// Rainfall in millimetres.
    #[arg(long, allow_negative_numbers = true)]
    rainfall: f64,

    /// Reject unknown categories and negative or non-finite numbers.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mode = if args.strict { ScoringMode::Strict } else { ScoringMode::Permissive };
    let obs = Observation::from_labels(
        args.slope,
        &args.rock_size,
        &args.soil_type,
        &args.vegetation,
        args.rainfall,
    );
    tracing::debug!(?obs, ?mode, "scoring");

    let result = score_with(&obs, mode)?;
    tracing::info!(
        slope = result.factors.slope,
        rock_size = result.factors.rock_size,
        soil_type = result.factors.soil_type,
        vegetation = result.factors.vegetation,
        rainfall = result.factors.rainfall,
        "factor contributions"
    );

    println!("{}", serde_json::to_string_pretty(&PredictResponse::from(result))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_observation() {
        let args = Args::try_parse_from([
            "score", "--slope", "45", "--rock-size", "Medium", "--soil-type", "Sand",
            "--vegetation", "Moderate", "--rainfall", "100",
        ])
        .unwrap();
        assert_eq!(args.slope, 45.0);
        assert_eq!(args.soil_type, "Sand");
        assert!(!args.strict);
    }

    #[test]
    fn categories_are_optional() {
        let args = Args::try_parse_from(["score", "--slope", "10", "--rainfall", "5", "--strict"]).unwrap();
        assert!(args.rock_size.is_empty());
        assert!(args.strict);
    }

    #[test]
    fn numbers_are_required() {
        assert!(Args::try_parse_from(["score", "--slope", "10"]).is_err());
    }
}
