//! Synthetic demo dataset generation.
//!
//! The upstream casualty/turnout/drive master tables are not distributable,
//! so the `sample` subcommand fabricates a plausible service area instead:
//! stations and output areas scattered over a unit square, drive times from
//! straight-line distance plus noise, and diurnal casualty-rate profiles.
//! Everything is seeded, so a given seed always produces the same dataset.

use std::collections::BTreeMap;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{
    AreaHourRow, ScenarioSpec, StationDriveTime, TurnoutRow, TurnoutTable, HOURS,
};
use crate::error::AppError;

/// Relative dwelling-fire casualty intensity by hour of day (overnight
/// peak: occupants asleep).
const DWELLING_PROFILE: [f64; HOURS as usize] = [
    1.6, 1.7, 1.8, 1.8, 1.6, 1.3, 1.0, 0.8, 0.7, 0.6, 0.6, 0.7, //
    0.7, 0.7, 0.8, 0.8, 0.9, 1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6,
];

/// Relative RTC casualty intensity by hour of day (commute peaks).
const RTC_PROFILE: [f64; HOURS as usize] = [
    0.3, 0.2, 0.2, 0.2, 0.3, 0.5, 0.9, 1.4, 1.6, 1.2, 1.0, 1.0, //
    1.0, 1.0, 1.1, 1.3, 1.6, 1.7, 1.4, 1.0, 0.8, 0.6, 0.5, 0.4,
];

/// Baseline casualty-rate scale (expected casualties per area-hour-year at
/// profile intensity 1.0).
const RATE_SCALE: f64 = 0.0008;

/// Minutes of drive time per unit of straight-line distance.
const DRIVE_MINUTES_PER_UNIT: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub areas: usize,
    pub stations: usize,
    pub seed: u64,
}

/// A generated dataset, ready to write with `io::export::write_sample_dataset`.
#[derive(Debug, Clone)]
pub struct SampleTables {
    pub areas: Vec<AreaHourRow>,
    pub turnout: TurnoutTable,
    pub drive: Vec<StationDriveTime>,
    pub scenarios: Vec<ScenarioSpec>,
}

struct Station {
    prefix: String,
    x: f64,
    y: f64,
    pumps: Vec<String>,
    wholetime: bool,
}

/// Generate a synthetic service area.
pub fn generate_sample(config: &SampleConfig) -> Result<SampleTables, AppError> {
    if config.areas == 0 {
        return Err(AppError::new(2, "Sample area count must be > 0."));
    }
    if config.stations == 0 {
        return Err(AppError::new(2, "Sample station count must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise: Normal<f64> = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    // Stations: position, crewing, one or two pumps.
    let mut stations = Vec::with_capacity(config.stations);
    for s in 0..config.stations {
        let prefix = format!("K{:02}", s + 1);
        let two_pumps = rng.gen_bool(0.3);
        let pumps = (1..=if two_pumps { 2 } else { 1 })
            .map(|p| format!("{prefix}P{p}"))
            .collect();
        stations.push(Station {
            prefix,
            x: rng.gen_range(0.0..1.0),
            y: rng.gen_range(0.0..1.0),
            pumps,
            wholetime: rng.gen_bool(0.4),
        });
    }

    // Baseline turnout: wholetime stations hold ~2 minutes around the
    // clock; retained stations ~5 minutes with a small overnight penalty.
    let mut turnout_rows = Vec::new();
    for station in &stations {
        for pump in &station.pumps {
            for hour in 0..HOURS {
                let base = if station.wholetime { 2.0 } else { 5.0 };
                let overnight = if !station.wholetime && !(7..=22).contains(&hour) {
                    1.0
                } else {
                    0.0
                };
                let jitter = 0.15 * noise.sample(&mut rng);
                let minutes = (base + overnight + jitter).max(1.0);
                turnout_rows.push(TurnoutRow {
                    callsign: pump.clone(),
                    hour,
                    minutes,
                });
            }
        }
    }

    // Output areas: position, per-hour casualty rates, per-pump drive time.
    let mut areas = Vec::with_capacity(config.areas * HOURS as usize);
    let mut drive = Vec::new();
    for a in 0..config.areas {
        let oa_code = format!("E{:05}", a + 1);
        let (x, y) = (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0));

        let dwelling_factor = (1.0 + 0.35 * noise.sample(&mut rng)).max(0.1);
        let rtc_factor = (1.0 + 0.35 * noise.sample(&mut rng)).max(0.1);
        for hour in 0..HOURS {
            areas.push(AreaHourRow {
                oa_code: oa_code.clone(),
                hour,
                dwelling_cas_rate: RATE_SCALE * DWELLING_PROFILE[hour as usize] * dwelling_factor,
                rtc_cas_rate: RATE_SCALE * RTC_PROFILE[hour as usize] * rtc_factor,
            });
        }

        for station in &stations {
            let dist = ((x - station.x).powi(2) + (y - station.y).powi(2)).sqrt();
            for pump in &station.pumps {
                let jitter = 0.8 * noise.sample(&mut rng);
                let minutes = (1.5 + dist * DRIVE_MINUTES_PER_UNIT + jitter).clamp(1.0, 60.0);
                drive.push(StationDriveTime {
                    oa_code: oa_code.clone(),
                    callsign: pump.clone(),
                    minutes,
                });
            }
        }
    }

    let scenarios = demo_scenarios(&stations);

    Ok(SampleTables {
        areas,
        turnout: TurnoutTable::new(turnout_rows),
        drive,
        scenarios,
    })
}

/// A small scenario list exercising each mode against real stations.
fn demo_scenarios(stations: &[Station]) -> Vec<ScenarioSpec> {
    let with_all_pumps = |station: &Station, mode: &str| {
        station
            .pumps
            .iter()
            .map(|p| (p.clone(), mode.to_string()))
            .collect::<BTreeMap<_, _>>()
    };

    let mut out = Vec::new();
    if let Some(station) = stations.first() {
        out.push(ScenarioSpec {
            name: format!("Remove {}", station.prefix),
            appliances: with_all_pumps(station, "unavailable"),
        });
    }
    if let Some(station) = stations.get(1) {
        out.push(ScenarioSpec {
            name: format!("Day-crew {}", station.prefix),
            appliances: with_all_pumps(station, "day-crewed"),
        });
    }
    if let Some(station) = stations.get(2) {
        out.push(ScenarioSpec {
            name: format!("Night cover only {}", station.prefix),
            appliances: with_all_pumps(station, "night-only"),
        });
    }
    if let Some(station) = stations.get(3) {
        out.push(ScenarioSpec {
            name: format!("Wholetime {}", station.prefix),
            appliances: with_all_pumps(station, "reduced-crew"),
        });
    }
    out
}
