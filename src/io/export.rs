//! CSV exports.
//!
//! The comparison export is meant to be easy to consume in spreadsheets or
//! downstream scripts; the sample writer produces a ready-to-run dataset
//! directory for the `sample` subcommand.

use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::Path;

use crate::data::SampleTables;
use crate::domain::ComparisonRow;
use crate::error::AppError;

/// Write the comparison table to a CSV file, baseline row first.
pub fn write_comparison_csv(path: &Path, rows: &[ComparisonRow]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(
        file,
        "scenario,dwelling_score,rtc_score,additional_dwelling_fatalities_per_decade,additional_rtc_fatalities_per_decade,years_per_additional_dwelling_fatality,years_per_additional_rtc_fatality,pct_increase_dwelling_risk,pct_increase_rtc_risk,unscored_area_hours"
    )
    .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for row in rows {
        writeln!(
            file,
            "{},{:.10},{:.10},{:.10},{:.10},{},{},{:.6},{:.6},{}",
            csv_field(&row.scenario),
            row.dwelling_score,
            row.rtc_score,
            row.additional_dwelling_fatalities_per_decade,
            row.additional_rtc_fatalities_per_decade,
            fmt_opt(row.years_per_additional_dwelling_fatality),
            fmt_opt(row.years_per_additional_rtc_fatality),
            row.pct_increase_dwelling_risk,
            row.pct_increase_rtc_risk,
            row.unscored_area_hours,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write a generated sample dataset into a directory:
/// `casualty_rates.csv`, `turnout_times.csv`, `drive_times.csv`,
/// `scenarios.json`.
pub fn write_sample_dataset(dir: &Path, tables: &SampleTables) -> Result<(), AppError> {
    create_dir_all(dir)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", dir.display())))?;

    let path = dir.join("casualty_rates.csv");
    let mut file = create(&path)?;
    writeln!(file, "oa_code,hour,dwelling_cas_rate,rtc_cas_rate").map_err(|e| write_err(&path, &e))?;
    for r in &tables.areas {
        writeln!(
            file,
            "{},{},{:.8},{:.8}",
            r.oa_code, r.hour, r.dwelling_cas_rate, r.rtc_cas_rate
        )
        .map_err(|e| write_err(&path, &e))?;
    }

    let path = dir.join("turnout_times.csv");
    let mut file = create(&path)?;
    writeln!(file, "callsign,hour,turnout_time").map_err(|e| write_err(&path, &e))?;
    for r in &tables.turnout.rows {
        writeln!(file, "{},{},{:.4}", r.callsign, r.hour, r.minutes)
            .map_err(|e| write_err(&path, &e))?;
    }

    let path = dir.join("drive_times.csv");
    let mut file = create(&path)?;
    writeln!(file, "oa_code,callsign,drive_time").map_err(|e| write_err(&path, &e))?;
    for r in &tables.drive {
        writeln!(file, "{},{},{:.4}", r.oa_code, r.callsign, r.minutes)
            .map_err(|e| write_err(&path, &e))?;
    }

    let path = dir.join("scenarios.json");
    let file = create(&path)?;
    serde_json::to_writer_pretty(file, &tables.scenarios).map_err(|e| {
        AppError::new(2, format!("Failed to write '{}': {e}", path.display()))
    })?;

    Ok(())
}

fn create(path: &Path) -> Result<File, AppError> {
    File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))
}

fn write_err(path: &Path, e: &std::io::Error) -> AppError {
    AppError::new(2, format!("Failed to write '{}': {e}", path.display()))
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.6}")).unwrap_or_default()
}

fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_fields_quote_commas() {
        assert_eq!(csv_field("Remove A, B"), "\"Remove A, B\"");
        assert_eq!(csv_field("plain"), "plain");
    }

    #[test]
    fn missing_years_export_as_empty() {
        assert_eq!(fmt_opt(None), "");
        assert_eq!(fmt_opt(Some(2.0)), "2.000000");
    }
}
