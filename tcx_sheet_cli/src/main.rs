use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use tcx_sheet::resample;
use tcx_sheet::sheet::write_workbook;
use tcx_sheet::tcx::parse_tcx;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const SHEET_NAME: &str = "data";

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert a TCX recording into a resampled XLSX spreadsheet", long_about = None)]
struct Cli {
    /// Input TCX file
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Output XLSX file
    #[arg(value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Keep every Nth trackpoint (1 keeps all; lap boundaries and the
    /// first/last point are always kept)
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    density: u64,

    /// Verbose logging
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let data = fs::read(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    debug!("read {} bytes from {}", data.len(), cli.input.display());

    let database = parse_tcx(&data)
        .with_context(|| format!("failed to parse {}", cli.input.display()))?;
    let activities = &database.activities.activities;
    info!("Decoded {} activities", activities.len());

    let rows = resample(activities, cli.density);
    info!("Resampled {} rows (density {})", rows.len(), cli.density);

    write_workbook(&rows, SHEET_NAME, &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!("Wrote workbook: {}", cli.output.display());

    Ok(())
}
