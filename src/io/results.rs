//! Read/write results JSON files.
//!
//! Results JSON is the portable representation of a finished batch run:
//! the full comparison table plus any recorded per-scenario failures. The
//! `plot` subcommand re-renders from it without re-running the model.
//!
//! The schema is defined by `domain::ResultsFile`.

use std::fs::File;
use std::path::Path;

use crate::app::pipeline::RunOutput;
use crate::domain::{FailureRecord, ResultsFile};
use crate::error::AppError;

/// Write a results JSON file.
pub fn write_results_json(path: &Path, output: &RunOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create results JSON '{}': {e}", path.display())))?;

    let results = ResultsFile {
        tool: "rrm".to_string(),
        comparisons: output.comparisons.clone(),
        failures: output
            .failures
            .iter()
            .map(|f| FailureRecord {
                scenario: f.scenario.clone(),
                reason: f.error.to_string(),
            })
            .collect(),
    };

    serde_json::to_writer_pretty(file, &results)
        .map_err(|e| AppError::new(2, format!("Failed to write results JSON: {e}")))?;

    Ok(())
}

/// Read a results JSON file.
pub fn read_results_json(path: &Path) -> Result<ResultsFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open results JSON '{}': {e}", path.display())))?;
    let results: ResultsFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid results JSON: {e}")))?;
    Ok(results)
}
