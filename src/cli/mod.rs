//! Command-line parsing for the response risk modeller.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modelling code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rrm", version, about = "Fire-and-rescue response risk modeller")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the baseline plus every scenario, print the comparison table,
    /// and optionally plot/export.
    Run(RunArgs),
    /// Print the comparison table only (useful for scripting).
    Compare(RunArgs),
    /// Plot a previously exported results JSON.
    Plot(PlotArgs),
    /// Generate a synthetic demo dataset directory.
    Sample(SampleArgs),
}

/// Common options for running and comparing.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Directory holding the input tables (used for any path not given
    /// explicitly).
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Casualty-rate CSV (default: <data-dir>/casualty_rates.csv).
    #[arg(long)]
    pub areas: Option<PathBuf>,

    /// Baseline turnout-time CSV (default: <data-dir>/turnout_times.csv).
    #[arg(long)]
    pub turnout: Option<PathBuf>,

    /// Drive-time CSV (default: <data-dir>/drive_times.csv).
    #[arg(long)]
    pub drive: Option<PathBuf>,

    /// Scenario list JSON (default: <data-dir>/scenarios.json).
    #[arg(long)]
    pub scenarios: Option<PathBuf>,

    /// Treat incomplete rankings and override/baseline shape mismatches as
    /// per-scenario errors.
    #[arg(long)]
    pub strict: bool,

    /// First hour (inclusive) of the day-crewing window.
    #[arg(long, default_value_t = 7)]
    pub day_start: u8,

    /// Last hour (inclusive) of the day-crewing window.
    #[arg(long, default_value_t = 16)]
    pub day_end: u8,

    /// Render the risk-change scatter in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the comparison table to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full results (comparison + failures) to JSON.
    #[arg(long = "export-results")]
    pub export_results: Option<PathBuf>,
}

/// Options for plotting saved results.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Results JSON file produced by `rrm run --export-results`.
    #[arg(long, value_name = "JSON")]
    pub results: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for generating a demo dataset.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output directory for the generated tables.
    #[arg(long, default_value = "data")]
    pub out: PathBuf,

    /// Number of output areas to generate.
    #[arg(long, default_value_t = 40)]
    pub areas: usize,

    /// Number of fire stations to generate.
    #[arg(long, default_value_t = 8)]
    pub stations: usize,

    /// Random seed (a given seed always produces the same dataset).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}
