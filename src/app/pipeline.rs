//! Shared batch-run logic used by the `run` and `compare` front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! expand scenario -> merge turnout -> rank responses -> score -> compare
//!
//! The CLI front-ends then focus on presentation (printing vs exports).

use rayon::prelude::*;

use crate::domain::{
    ComparisonRow, ReferenceTables, RunConfig, ScenarioSpec, ScoreResult,
};
use crate::error::{AppError, ScenarioError};
use crate::rank::rank_responses;
use crate::scenario::{expand_overrides, merge_turnout};
use crate::score::score_area_hours;

/// Name given to the empty-override baseline run.
pub const BASELINE_NAME: &str = "Base Case";

/// A per-scenario failure recorded by the batch runner.
#[derive(Debug, Clone)]
pub struct ScenarioFailure {
    pub scenario: String,
    pub error: ScenarioError,
}

/// All computed outputs of a batch run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// The baseline score (always present; a baseline failure aborts).
    pub baseline: ScoreResult,
    /// Successful scenario scores, in input order.
    pub scores: Vec<ScoreResult>,
    /// Comparison rows: baseline first, then successful scenarios in input
    /// order.
    pub comparisons: Vec<ComparisonRow>,
    /// Failures recorded against individual scenarios, in input order.
    pub failures: Vec<ScenarioFailure>,
}

/// Run the baseline plus every scenario and derive comparison rows.
///
/// Scenarios are independent and evaluated in parallel over the shared
/// read-only reference tables; results are reassembled in input order, so
/// the output never depends on completion order. A failure inside one
/// scenario is recorded and the batch continues; only baseline or
/// structural failures abort.
pub fn run_batch(
    tables: &ReferenceTables,
    scenarios: &[ScenarioSpec],
    config: &RunConfig,
) -> Result<RunOutput, AppError> {
    let baseline = score_baseline(tables, config)?;

    // One task per scenario; collect preserves input order.
    let outcomes: Vec<(String, Result<ScoreResult, ScenarioError>)> = scenarios
        .par_iter()
        .map(|spec| (spec.name.clone(), evaluate_scenario(tables, spec, config)))
        .collect();

    let mut scores = Vec::new();
    let mut comparisons = vec![crate::report::baseline_row(&baseline)];
    let mut failures = Vec::new();

    for (scenario, outcome) in outcomes {
        let result = outcome.and_then(|score| {
            let row = crate::report::comparison_row(&baseline, &score)?;
            Ok((score, row))
        });
        match result {
            Ok((score, row)) => {
                scores.push(score);
                comparisons.push(row);
            }
            Err(error) => failures.push(ScenarioFailure { scenario, error }),
        }
    }

    Ok(RunOutput {
        baseline,
        scores,
        comparisons,
        failures,
    })
}

/// Score the unmodified baseline tables.
///
/// The baseline is unconditional: any failure here is structural (there is
/// nothing to compare against) and aborts the run.
fn score_baseline(tables: &ReferenceTables, config: &RunConfig) -> Result<ScoreResult, AppError> {
    let ranking = rank_responses(&tables.drive, &tables.turnout);
    let score = score_area_hours(&tables.areas, &ranking, BASELINE_NAME)
        .map_err(|e| AppError::new(3, format!("baseline run failed: {e}")))?;

    if config.strict && score.unscored_rows > 0 {
        return Err(AppError::new(
            3,
            format!(
                "baseline run failed: {}",
                ScenarioError::UnscoredAreaHours(score.unscored_rows)
            ),
        ));
    }

    Ok(score)
}

/// Evaluate one scenario end to end.
fn evaluate_scenario(
    tables: &ReferenceTables,
    spec: &ScenarioSpec,
    config: &RunConfig,
) -> Result<ScoreResult, ScenarioError> {
    let overrides = expand_overrides(&spec.appliances, &config.day_window)?;
    let merged = merge_turnout(&tables.turnout, &overrides);
    if config.strict && !merged.unmatched.is_empty() {
        return Err(ScenarioError::UnknownCallsigns(merged.unmatched));
    }

    let ranking = rank_responses(&tables.drive, &merged.table);
    let score = score_area_hours(&tables.areas, &ranking, &spec.name)?;
    if config.strict && score.unscored_rows > 0 {
        return Err(ScenarioError::UnscoredAreaHours(score.unscored_rows));
    }

    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AreaHourRow, DriveTimeTable, StationDriveTime, TurnoutRow, TurnoutTable, HOURS,
    };
    use std::collections::BTreeMap;

    fn tables() -> ReferenceTables {
        // Three appliances, two areas, flat rates.
        let mut turnout_rows = Vec::new();
        for callsign in ["K01P1", "K01P2", "K02P1"] {
            for hour in 0..HOURS {
                turnout_rows.push(TurnoutRow {
                    callsign: callsign.to_string(),
                    hour,
                    minutes: 3.0,
                });
            }
        }

        let drive = DriveTimeTable::expand(&[
            StationDriveTime { oa_code: "E001".into(), callsign: "K01P1".into(), minutes: 2.0 },
            StationDriveTime { oa_code: "E001".into(), callsign: "K01P2".into(), minutes: 4.0 },
            StationDriveTime { oa_code: "E001".into(), callsign: "K02P1".into(), minutes: 9.0 },
            StationDriveTime { oa_code: "E002".into(), callsign: "K01P1".into(), minutes: 7.0 },
            StationDriveTime { oa_code: "E002".into(), callsign: "K01P2".into(), minutes: 8.0 },
            StationDriveTime { oa_code: "E002".into(), callsign: "K02P1".into(), minutes: 3.0 },
        ]);

        let mut areas = Vec::new();
        for oa in ["E001", "E002"] {
            for hour in 0..HOURS {
                areas.push(AreaHourRow {
                    oa_code: oa.to_string(),
                    hour,
                    dwelling_cas_rate: 0.002,
                    rtc_cas_rate: 0.001,
                });
            }
        }

        ReferenceTables {
            areas,
            turnout: TurnoutTable::new(turnout_rows),
            drive,
        }
    }

    fn spec(name: &str, entries: &[(&str, &str)]) -> ScenarioSpec {
        let mut appliances = BTreeMap::new();
        for &(callsign, mode) in entries {
            appliances.insert(callsign.to_string(), mode.to_string());
        }
        ScenarioSpec {
            name: name.to_string(),
            appliances,
        }
    }

    #[test]
    fn baseline_comes_first_and_order_is_preserved() {
        let scenarios = vec![
            spec("First", &[("K01P1", "off")]),
            spec("Broken", &[("K01P2", "nonsense")]),
            spec("Second", &[("K02P1", "off")]),
        ];

        let out = run_batch(&tables(), &scenarios, &RunConfig::default()).unwrap();
        let names: Vec<&str> = out.comparisons.iter().map(|r| r.scenario.as_str()).collect();
        assert_eq!(names, vec![BASELINE_NAME, "First", "Second"]);
        assert_eq!(out.failures.len(), 1);
        assert_eq!(out.failures[0].scenario, "Broken");
        assert!(matches!(
            out.failures[0].error,
            ScenarioError::InvalidMode { .. }
        ));
    }

    #[test]
    fn removing_an_appliance_increases_risk() {
        let out = run_batch(
            &tables(),
            &[spec("Remove K01P1", &[("K01P1", "off")])],
            &RunConfig::default(),
        )
        .unwrap();

        let row = &out.comparisons[1];
        assert!(row.pct_increase_dwelling_risk > 0.0);
        assert!(row.pct_increase_rtc_risk > 0.0);
        assert!(row.additional_dwelling_fatalities_per_decade > 0.0);
        assert!(row.years_per_additional_dwelling_fatality.unwrap() > 0.0);
    }

    #[test]
    fn empty_override_scenario_matches_baseline_exactly() {
        let out = run_batch(&tables(), &[spec("No-op", &[])], &RunConfig::default()).unwrap();

        let row = &out.comparisons[1];
        assert_eq!(row.dwelling_score.to_bits(), out.baseline.dwelling_score.to_bits());
        assert_eq!(row.additional_dwelling_fatalities_per_decade, 0.0);
        assert_eq!(row.years_per_additional_dwelling_fatality, None);
        assert_eq!(row.years_per_additional_rtc_fatality, None);
    }

    #[test]
    fn all_appliances_off_leaves_every_area_hour_unscored() {
        let everything_off = spec(
            "Shut Everything",
            &[("K01P1", "off"), ("K01P2", "off"), ("K02P1", "off")],
        );
        let out = run_batch(&tables(), &[everything_off], &RunConfig::default()).unwrap();

        let score = &out.scores[0];
        assert_eq!(score.scored_rows, 0);
        assert_eq!(score.unscored_rows, 2 * HOURS as usize);
        assert_eq!(score.dwelling_score, 0.0);
        // The unscored count is carried onto the comparison row.
        assert_eq!(out.comparisons[1].unscored_area_hours, 2 * HOURS as usize);
    }

    #[test]
    fn strict_mode_rejects_unknown_override_callsigns() {
        let config = RunConfig {
            strict: true,
            ..RunConfig::default()
        };
        let out = run_batch(
            &tables(),
            &[spec("Ghost", &[("ZZ99P9", "off")])],
            &config,
        )
        .unwrap();

        assert!(out.scores.is_empty());
        assert_eq!(
            out.failures[0].error,
            ScenarioError::UnknownCallsigns(vec!["ZZ99P9".to_string()])
        );
    }

    #[test]
    fn strict_mode_rejects_incomplete_rankings() {
        let config = RunConfig {
            strict: true,
            ..RunConfig::default()
        };
        // Two of three appliances off: every area-hour has one responder.
        let out = run_batch(
            &tables(),
            &[spec("Thin Cover", &[("K01P1", "off"), ("K01P2", "off")])],
            &config,
        )
        .unwrap();

        assert!(matches!(
            out.failures[0].error,
            ScenarioError::UnscoredAreaHours(_)
        ));
    }

    #[test]
    fn batch_rerun_is_deterministic() {
        let scenarios = vec![
            spec("A", &[("K01P1", "off")]),
            spec("B", &[("K01P2", "daycrewed")]),
            spec("C", &[("K02P1", "nightonly")]),
        ];

        let first = run_batch(&tables(), &scenarios, &RunConfig::default()).unwrap();
        let second = run_batch(&tables(), &scenarios, &RunConfig::default()).unwrap();
        assert_eq!(first.comparisons, second.comparisons);
        for (a, b) in first.scores.iter().zip(&second.scores) {
            assert_eq!(a.dwelling_score.to_bits(), b.dwelling_score.to_bits());
            assert_eq!(a.rtc_score.to_bits(), b.rtc_score.to_bits());
        }
    }
}
