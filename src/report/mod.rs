//! Reporting utilities: relative-risk metrics and formatted terminal output.
//!
//! We keep the derived-metric math next to the formatting so:
//! - the ranking/scoring code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;

pub use format::*;

use crate::domain::{ComparisonRow, ScoreResult};
use crate::error::ScenarioError;

/// Years in the "per decade" horizon of the relative metrics.
const DECADE_YEARS: f64 = 10.0;

/// The baseline's own comparison row: zero change by definition.
pub fn baseline_row(baseline: &ScoreResult) -> ComparisonRow {
    ComparisonRow {
        scenario: baseline.scenario.clone(),
        dwelling_score: baseline.dwelling_score,
        rtc_score: baseline.rtc_score,
        additional_dwelling_fatalities_per_decade: 0.0,
        additional_rtc_fatalities_per_decade: 0.0,
        years_per_additional_dwelling_fatality: None,
        years_per_additional_rtc_fatality: None,
        pct_increase_dwelling_risk: 0.0,
        pct_increase_rtc_risk: 0.0,
        unscored_area_hours: baseline.unscored_rows,
    }
}

/// Derive one scenario's relative metrics against the baseline.
pub fn comparison_row(
    baseline: &ScoreResult,
    score: &ScoreResult,
) -> Result<ComparisonRow, ScenarioError> {
    let (add_dwelling, years_dwelling) =
        additional_per_decade(baseline.dwelling_score, score.dwelling_score);
    let (add_rtc, years_rtc) = additional_per_decade(baseline.rtc_score, score.rtc_score);

    let pct_dwelling = pct_increase(baseline.dwelling_score, score.dwelling_score, "dwelling")?;
    let pct_rtc = pct_increase(baseline.rtc_score, score.rtc_score, "rtc")?;

    Ok(ComparisonRow {
        scenario: score.scenario.clone(),
        dwelling_score: score.dwelling_score,
        rtc_score: score.rtc_score,
        additional_dwelling_fatalities_per_decade: add_dwelling,
        additional_rtc_fatalities_per_decade: add_rtc,
        years_per_additional_dwelling_fatality: years_dwelling,
        years_per_additional_rtc_fatality: years_rtc,
        pct_increase_dwelling_risk: pct_dwelling,
        pct_increase_rtc_risk: pct_rtc,
        unscored_area_hours: score.unscored_rows,
    })
}

/// Additional fatalities over a decade, plus years per additional fatality.
///
/// The second value is `None` when the scenario changes nothing: there is
/// no finite number of years per additional fatality, and that is a result,
/// not an arithmetic error.
fn additional_per_decade(baseline: f64, scenario: f64) -> (f64, Option<f64>) {
    let additional = DECADE_YEARS * (scenario - baseline);
    let years = if additional == 0.0 {
        None
    } else {
        Some(DECADE_YEARS / additional)
    };
    (additional, years)
}

fn pct_increase(baseline: f64, scenario: f64, hazard: &'static str) -> Result<f64, ScenarioError> {
    if baseline == 0.0 {
        return Err(ScenarioError::ZeroBaselineScore { hazard });
    }
    Ok((scenario / baseline - 1.0) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(name: &str, dwelling: f64, rtc: f64) -> ScoreResult {
        ScoreResult {
            scenario: name.to_string(),
            dwelling_score: dwelling,
            rtc_score: rtc,
            scored_rows: 24,
            unscored_rows: 0,
        }
    }

    #[test]
    fn relative_metrics_match_hand_computation() {
        let base = score("Base Case", 2.0, 1.0);
        let scen = score("Remove Station", 2.5, 1.25);

        let row = comparison_row(&base, &scen).unwrap();
        assert!((row.additional_dwelling_fatalities_per_decade - 5.0).abs() < 1e-12);
        assert!((row.additional_rtc_fatalities_per_decade - 2.5).abs() < 1e-12);
        assert!((row.years_per_additional_dwelling_fatality.unwrap() - 2.0).abs() < 1e-12);
        assert!((row.years_per_additional_rtc_fatality.unwrap() - 4.0).abs() < 1e-12);
        assert!((row.pct_increase_dwelling_risk - 25.0).abs() < 1e-12);
        assert!((row.pct_increase_rtc_risk - 25.0).abs() < 1e-12);
    }

    #[test]
    fn risk_reduction_yields_negative_metrics() {
        let base = score("Base Case", 2.0, 1.0);
        let scen = score("Extra Pump", 1.5, 0.9);

        let row = comparison_row(&base, &scen).unwrap();
        assert!(row.additional_dwelling_fatalities_per_decade < 0.0);
        assert!(row.years_per_additional_dwelling_fatality.unwrap() < 0.0);
        assert!(row.pct_increase_dwelling_risk < 0.0);
    }

    #[test]
    fn no_change_reports_no_finite_years_value() {
        let base = score("Base Case", 2.0, 1.0);
        let scen = score("No-op", 2.0, 1.0);

        let row = comparison_row(&base, &scen).unwrap();
        assert_eq!(row.additional_dwelling_fatalities_per_decade, 0.0);
        assert_eq!(row.years_per_additional_dwelling_fatality, None);
        assert_eq!(row.years_per_additional_rtc_fatality, None);
        assert_eq!(row.pct_increase_dwelling_risk, 0.0);
    }

    #[test]
    fn zero_baseline_is_a_domain_error() {
        let base = score("Base Case", 0.0, 1.0);
        let scen = score("Remove Station", 0.5, 1.0);

        let err = comparison_row(&base, &scen).unwrap_err();
        assert_eq!(err, ScenarioError::ZeroBaselineScore { hazard: "dwelling" });
    }

    #[test]
    fn baseline_row_is_zero_change() {
        let base = score("Base Case", 2.0, 1.0);
        let row = baseline_row(&base);
        assert_eq!(row.scenario, "Base Case");
        assert_eq!(row.additional_dwelling_fatalities_per_decade, 0.0);
        assert_eq!(row.years_per_additional_rtc_fatality, None);
        assert_eq!(row.pct_increase_rtc_risk, 0.0);
    }
}
