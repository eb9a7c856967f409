//! Formatted terminal output for run summaries and comparison tables.

use crate::app::pipeline::ScenarioFailure;
use crate::domain::{ComparisonRow, ReferenceTables, RunConfig};

/// Format the run summary (dataset shape + settings).
pub fn format_run_summary(tables: &ReferenceTables, config: &RunConfig, scenarios: usize) -> String {
    let mut out = String::new();

    let areas: std::collections::HashSet<&str> =
        tables.areas.iter().map(|r| r.oa_code.as_str()).collect();
    let appliances = tables.turnout.callsigns().len();

    out.push_str("=== rrm - Response Risk Modeller ===\n");
    out.push_str(&format!(
        "Areas: {} | area-hour rows: {}\n",
        areas.len(),
        tables.areas.len()
    ));
    out.push_str(&format!(
        "Appliances: {} | turnout rows: {} | drive rows: {}\n",
        appliances,
        tables.turnout.rows.len(),
        tables.drive.rows.len()
    ));
    out.push_str(&format!(
        "Day window: {:02}:00-{:02}:59 | strict: {} | scenarios: {}\n",
        config.day_window.start, config.day_window.end, config.strict, scenarios
    ));

    out
}

/// Format the comparison table, baseline row first.
pub fn format_comparison(rows: &[ComparisonRow]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<28} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>9} {:>9} {:>8}\n",
        "scenario",
        "dwl_score",
        "rtc_score",
        "dwl+/10y",
        "rtc+/10y",
        "yrs/dwl+",
        "yrs/rtc+",
        "dwl_%",
        "rtc_%",
        "unscored"
    ));
    out.push_str(&format!(
        "{:-<28} {:-<10} {:-<10} {:-<10} {:-<10} {:-<10} {:-<10} {:-<9} {:-<9} {:-<8}\n",
        "", "", "", "", "", "", "", "", "", ""
    ));

    for row in rows {
        out.push_str(&format!(
            "{:<28} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10} {:>10} {:>9.2} {:>9.2} {:>8}\n",
            truncate(&row.scenario, 28),
            row.dwelling_score,
            row.rtc_score,
            row.additional_dwelling_fatalities_per_decade,
            row.additional_rtc_fatalities_per_decade,
            fmt_years(row.years_per_additional_dwelling_fatality),
            fmt_years(row.years_per_additional_rtc_fatality),
            row.pct_increase_dwelling_risk,
            row.pct_increase_rtc_risk,
            row.unscored_area_hours,
        ));
    }

    out
}

/// Format recorded per-scenario failures, one line each.
pub fn format_failures(failures: &[ScenarioFailure]) -> String {
    let mut out = String::new();
    for f in failures {
        out.push_str(&format!("scenario '{}' failed: {}\n", f.scenario, f.error));
    }
    out
}

fn fmt_years(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.2}"),
        // No change in risk: no finite number of years per additional fatality.
        None => "inf".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
