//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the reference tables and scenario list
//! - runs the baseline + scenario batch
//! - prints reports/plots
//! - writes optional exports

use std::path::PathBuf;

use clap::Parser;

use crate::cli::{Command, PlotArgs, RunArgs, SampleArgs};
use crate::domain::{DayWindow, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `rrm` binary.
pub fn run() -> Result<(), AppError> {
    // We want `rrm` and `rrm --strict` to behave like `rrm run ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the short UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args, OutputMode::Full),
        Command::Compare(args) => handle_run(args, OutputMode::CompareOnly),
        Command::Plot(args) => handle_plot(args),
        Command::Sample(args) => handle_sample(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    CompareOnly,
}

fn handle_run(args: RunArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;

    let tables = crate::io::ingest::load_reference_tables(
        &table_path(&args, &args.areas, "casualty_rates.csv"),
        &table_path(&args, &args.turnout, "turnout_times.csv"),
        &table_path(&args, &args.drive, "drive_times.csv"),
    )?;
    let scenarios =
        crate::io::ingest::load_scenarios(&table_path(&args, &args.scenarios, "scenarios.json"))?;

    if mode == OutputMode::Full {
        println!(
            "{}",
            crate::report::format_run_summary(&tables, &config, scenarios.len())
        );
        println!("Running base model plus {} scenario(s)...", scenarios.len());
    }

    let output = pipeline::run_batch(&tables, &scenarios, &config)?;

    println!("{}", crate::report::format_comparison(&output.comparisons));
    if !output.failures.is_empty() {
        eprint!("{}", crate::report::format_failures(&output.failures));
    }

    if mode == OutputMode::Full && args.plot && !args.no_plot {
        let plot =
            crate::plot::render_comparison_scatter(&output.comparisons, args.width, args.height);
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &args.export {
        crate::io::export::write_comparison_csv(path, &output.comparisons)?;
    }
    if let Some(path) = &args.export_results {
        crate::io::results::write_results_json(path, &output)?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let results = crate::io::results::read_results_json(&args.results)?;
    let plot = crate::plot::render_comparison_scatter(&results.comparisons, args.width, args.height);
    println!("{plot}");
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let tables = crate::data::generate_sample(&crate::data::SampleConfig {
        areas: args.areas,
        stations: args.stations,
        seed: args.seed,
    })?;
    crate::io::export::write_sample_dataset(&args.out, &tables)?;
    println!(
        "Sample dataset written to '{}' ({} areas, {} appliances, {} scenarios).",
        args.out.display(),
        args.areas,
        tables.turnout.callsigns().len(),
        tables.scenarios.len()
    );
    Ok(())
}

fn run_config_from_args(args: &RunArgs) -> Result<RunConfig, AppError> {
    let day_window = DayWindow::new(args.day_start, args.day_end)
        .map_err(|e| AppError::new(2, format!("Invalid day window: {e}")))?;
    Ok(RunConfig {
        day_window,
        strict: args.strict,
    })
}

fn table_path(args: &RunArgs, explicit: &Option<PathBuf>, default_name: &str) -> PathBuf {
    explicit
        .clone()
        .unwrap_or_else(|| args.data_dir.join(default_name))
}

/// Rewrite argv so `rrm` defaults to `rrm run`.
///
/// Rules:
/// - `rrm`                     -> `rrm run`
/// - `rrm --strict ...`        -> `rrm run --strict ...`
/// - `rrm --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "compare" | "plot" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_becomes_run() {
        assert_eq!(rewrite_args(argv(&["rrm"])), argv(&["rrm", "run"]));
    }

    #[test]
    fn leading_flags_become_run_flags() {
        assert_eq!(
            rewrite_args(argv(&["rrm", "--strict"])),
            argv(&["rrm", "run", "--strict"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["rrm", "sample", "--seed", "7"])),
            argv(&["rrm", "sample", "--seed", "7"])
        );
        assert_eq!(rewrite_args(argv(&["rrm", "--help"])), argv(&["rrm", "--help"]));
    }
}
