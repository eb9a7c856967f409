//! CSV/JSON ingest and validation.
//!
//! This module turns the on-disk reference tables into clean in-memory
//! rows that are safe to rank and score.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Structural row validation**: a malformed row in reference data
//!   aborts the load with its line number; there is no partial result to
//!   salvage from broken reference tables
//! - **Deterministic behavior**: row order is preserved exactly as read

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{
    AreaHourRow, DriveTimeTable, ReferenceTables, ScenarioSpec, StationDriveTime, TurnoutRow,
    TurnoutTable, HOURS,
};
use crate::error::AppError;

/// Load all three reference tables.
pub fn load_reference_tables(
    areas: &Path,
    turnout: &Path,
    drive: &Path,
) -> Result<ReferenceTables, AppError> {
    Ok(ReferenceTables {
        areas: load_area_rates(areas)?,
        turnout: load_turnout_times(turnout)?,
        drive: load_drive_times(drive)?,
    })
}

/// Load per-area-hour casualty rates.
///
/// Required columns: `oa_code`, `hour`, `dwelling_cas_rate`, `rtc_cas_rate`.
pub fn load_area_rates(path: &Path) -> Result<Vec<AreaHourRow>, AppError> {
    let (mut reader, header_map) = open_csv(path)?;
    ensure_columns(path, &header_map, &["oa_code", "hour", "dwelling_cas_rate", "rtc_cas_rate"])?;

    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    for (line, record) in records(&mut reader, path)? {
        let oa_code = get_required(&record, &header_map, "oa_code")
            .map_err(|e| row_error(path, line, &e))?
            .to_string();
        let hour = parse_hour(get_required(&record, &header_map, "hour").map_err(|e| row_error(path, line, &e))?)
            .map_err(|e| row_error(path, line, &e))?;
        let dwelling_cas_rate = parse_rate(&record, &header_map, "dwelling_cas_rate")
            .map_err(|e| row_error(path, line, &e))?;
        let rtc_cas_rate = parse_rate(&record, &header_map, "rtc_cas_rate")
            .map_err(|e| row_error(path, line, &e))?;

        if !seen.insert((oa_code.clone(), hour)) {
            return Err(row_error(path, line, &format!("duplicate (oa_code, hour) pair: ({oa_code}, {hour})")));
        }

        rows.push(AreaHourRow {
            oa_code,
            hour,
            dwelling_cas_rate,
            rtc_cas_rate,
        });
    }

    if rows.is_empty() {
        return Err(AppError::new(3, format!("No rows in '{}'.", path.display())));
    }
    Ok(rows)
}

/// Load baseline turnout times.
///
/// Required columns: `callsign` (alias: `appliance_callsign`), `hour`,
/// `turnout_time`.
pub fn load_turnout_times(path: &Path) -> Result<TurnoutTable, AppError> {
    let (mut reader, header_map) = open_csv(path)?;
    ensure_callsign_column(path, &header_map)?;
    ensure_columns(path, &header_map, &["hour", "turnout_time"])?;

    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    for (line, record) in records(&mut reader, path)? {
        let callsign = get_callsign(&record, &header_map).map_err(|e| row_error(path, line, &e))?;
        let hour = parse_hour(get_required(&record, &header_map, "hour").map_err(|e| row_error(path, line, &e))?)
            .map_err(|e| row_error(path, line, &e))?;
        let minutes = parse_rate(&record, &header_map, "turnout_time")
            .map_err(|e| row_error(path, line, &e))?;

        if !seen.insert((callsign.clone(), hour)) {
            return Err(row_error(path, line, &format!("duplicate (callsign, hour) pair: ({callsign}, {hour})")));
        }

        rows.push(TurnoutRow {
            callsign,
            hour,
            minutes,
        });
    }

    if rows.is_empty() {
        return Err(AppError::new(3, format!("No rows in '{}'.", path.display())));
    }
    Ok(TurnoutTable::new(rows))
}

/// Load drive times and expand to all 24 hours.
///
/// Required columns: `oa_code`, `callsign` (alias: `appliance_callsign`),
/// `drive_time`. The input is hour-independent; the cross join with the 24
/// hours happens here so downstream tables are uniformly hour-indexed.
pub fn load_drive_times(path: &Path) -> Result<DriveTimeTable, AppError> {
    let (mut reader, header_map) = open_csv(path)?;
    ensure_callsign_column(path, &header_map)?;
    ensure_columns(path, &header_map, &["oa_code", "drive_time"])?;

    let mut base = Vec::new();
    let mut seen = HashSet::new();
    for (line, record) in records(&mut reader, path)? {
        let oa_code = get_required(&record, &header_map, "oa_code")
            .map_err(|e| row_error(path, line, &e))?
            .to_string();
        let callsign = get_callsign(&record, &header_map).map_err(|e| row_error(path, line, &e))?;
        let minutes = parse_rate(&record, &header_map, "drive_time")
            .map_err(|e| row_error(path, line, &e))?;

        if !seen.insert((oa_code.clone(), callsign.clone())) {
            return Err(row_error(path, line, &format!("duplicate (oa_code, callsign) pair: ({oa_code}, {callsign})")));
        }

        base.push(StationDriveTime {
            oa_code,
            callsign,
            minutes,
        });
    }

    if base.is_empty() {
        return Err(AppError::new(3, format!("No rows in '{}'.", path.display())));
    }
    Ok(DriveTimeTable::expand(&base))
}

/// Load the ordered scenario list from JSON.
///
/// Mode tags are not validated here: a bad tag must fail only its own
/// scenario at expansion time, not the whole batch load.
pub fn load_scenarios(path: &Path) -> Result<Vec<ScenarioSpec>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open scenario file '{}': {e}", path.display()))
    })?;
    let scenarios: Vec<ScenarioSpec> = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid scenario file '{}': {e}", path.display())))?;
    Ok(scenarios)
}

fn open_csv(path: &Path) -> Result<(csv::Reader<File>, HashMap<String, usize>), AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers from '{}': {e}", path.display())))?
        .clone();

    let header_map = build_header_map(&headers);
    Ok((reader, header_map))
}

fn records(
    reader: &mut csv::Reader<File>,
    path: &Path,
) -> Result<Vec<(usize, StringRecord)>, AppError> {
    let mut out = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2 because records() starts after the header row and CSV line
        // numbers are 1-based.
        let line = idx + 2;
        let record = result.map_err(|e| row_error(path, line, &format!("CSV parse error: {e}")))?;
        out.push((line, record));
    }
    Ok(out)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header. If we don't strip it, schema validation will
    // incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_columns(
    path: &Path,
    header_map: &HashMap<String, usize>,
    required: &[&str],
) -> Result<(), AppError> {
    for name in required {
        if !header_map.contains_key(*name) {
            return Err(AppError::new(
                2,
                format!("'{}': missing required column: `{name}`", path.display()),
            ));
        }
    }
    Ok(())
}

fn ensure_callsign_column(path: &Path, header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    if !header_map.contains_key("callsign") && !header_map.contains_key("appliance_callsign") {
        return Err(AppError::new(
            2,
            format!(
                "'{}': missing required column: `callsign` (or `appliance_callsign`)",
                path.display()
            ),
        ));
    }
    Ok(())
}

fn get_callsign(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<String, String> {
    get_required(record, header_map, "callsign")
        .or_else(|_| get_required(record, header_map, "appliance_callsign"))
        .map(str::to_string)
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("missing required value: `{name}`"))
}

fn parse_hour(s: &str) -> Result<u8, String> {
    let hour: u8 = s
        .parse()
        .map_err(|_| format!("invalid hour '{s}' (expected an integer 0-23)"))?;
    if hour >= HOURS {
        return Err(format!("hour {hour} out of range 0-23"));
    }
    Ok(hour)
}

fn parse_rate(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<f64, String> {
    let raw = get_required(record, header_map, name)?;
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("invalid `{name}` value '{raw}'"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("`{name}` must be a non-negative finite number, got '{raw}'"));
    }
    Ok(value)
}

fn row_error(path: &Path, line: usize, message: &str) -> AppError {
    AppError::new(2, format!("'{}' line {line}: {message}", path.display()))
}
