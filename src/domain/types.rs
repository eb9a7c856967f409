//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while running scenarios
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Hours modelled per day. Every hour-indexed table spans `0..HOURS`.
pub const HOURS: u8 = 24;

/// Turnout-time sentinel (minutes) marking an appliance as unavailable.
///
/// Large enough to lose every ranking comparison against a real response,
/// so the merge and ranking layers treat unavailable appliances uniformly
/// as numbers rather than as a separate excluded state. An appliance whose
/// turnout reaches this value is reported as absent in ranking output,
/// never as a huge finite response time.
pub const UNAVAILABLE_TURNOUT: f64 = 999.0;

/// Availability/staffing mode applied to an appliance by a scenario.
///
/// This is a closed set: scenario files carry the tags as strings and the
/// expander rejects anything outside it. The short aliases are the tags the
/// upstream cover-review spreadsheets use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplianceMode {
    /// Off the run for all 24 hours.
    #[serde(alias = "off")]
    Unavailable,
    /// Wholetime crewing: fast constant turnout.
    #[serde(alias = "wt")]
    ReducedCrew,
    /// Retained (on-call) crewing: slower constant turnout.
    #[serde(alias = "rds")]
    RetainedDuty,
    /// Wholetime turnout during the day window, retained otherwise.
    #[serde(alias = "daycrewed")]
    DayCrewed,
    /// Available outside the day window only.
    #[serde(alias = "nightonly")]
    NightOnly,
}

impl ApplianceMode {
    /// Parse a mode tag (canonical kebab-case name or upstream short alias).
    pub fn parse_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "unavailable" | "off" => Some(ApplianceMode::Unavailable),
            "reduced-crew" | "wt" => Some(ApplianceMode::ReducedCrew),
            "retained-duty" | "rds" => Some(ApplianceMode::RetainedDuty),
            "day-crewed" | "daycrewed" => Some(ApplianceMode::DayCrewed),
            "night-only" | "nightonly" => Some(ApplianceMode::NightOnly),
            _ => None,
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ApplianceMode::Unavailable => "unavailable",
            ApplianceMode::ReducedCrew => "reduced-crew",
            ApplianceMode::RetainedDuty => "retained-duty",
            ApplianceMode::DayCrewed => "day-crewed",
            ApplianceMode::NightOnly => "night-only",
        }
    }
}

/// Contiguous "day" window (inclusive hour bounds) used by the day-crewed
/// and night-only modes.
///
/// The boundary is a configuration parameter, not a constant: the upstream
/// source never pinned it down, so it is supplied by the caller (with a
/// 07:00-16:00 default) and validated once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start: u8,
    pub end: u8,
}

impl DayWindow {
    pub fn new(start: u8, end: u8) -> Result<Self, String> {
        if start > end {
            return Err(format!("day window start ({start}) is after end ({end})"));
        }
        if end >= HOURS {
            return Err(format!("day window end ({end}) must be below {HOURS}"));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, hour: u8) -> bool {
        hour >= self.start && hour <= self.end
    }
}

impl Default for DayWindow {
    fn default() -> Self {
        Self { start: 7, end: 16 }
    }
}

/// One scenario: a name plus the appliances it alters.
///
/// Mode tags stay as raw strings here; they are parsed during expansion so
/// a bad tag fails only this scenario, not the whole batch load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    pub appliances: BTreeMap<String, String>,
}

/// Per-hour casualty rates for one output area. Immutable reference data,
/// one row per (area, hour).
#[derive(Debug, Clone, PartialEq)]
pub struct AreaHourRow {
    pub oa_code: String,
    pub hour: u8,
    pub dwelling_cas_rate: f64,
    pub rtc_cas_rate: f64,
}

/// Minutes before an appliance leaves its station, for one hour of day.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnoutRow {
    pub callsign: String,
    pub hour: u8,
    pub minutes: f64,
}

/// Turnout times for every (callsign, hour). Row order is preserved from
/// the input: ranking tie-breaks depend on it being stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnoutTable {
    pub rows: Vec<TurnoutRow>,
}

impl TurnoutTable {
    pub fn new(rows: Vec<TurnoutRow>) -> Self {
        Self { rows }
    }

    /// Lookup index keyed by (callsign, hour).
    pub fn index(&self) -> std::collections::HashMap<(&str, u8), f64> {
        self.rows
            .iter()
            .map(|r| ((r.callsign.as_str(), r.hour), r.minutes))
            .collect()
    }

    /// Callsigns present in the table, in first-seen order.
    pub fn callsigns(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for r in &self.rows {
            if seen.insert(r.callsign.as_str()) {
                out.push(r.callsign.as_str());
            }
        }
        out
    }
}

/// Hour-independent drive time as supplied by the input table.
#[derive(Debug, Clone, PartialEq)]
pub struct StationDriveTime {
    pub oa_code: String,
    pub callsign: String,
    pub minutes: f64,
}

/// Minutes from station to area for one hour of day.
#[derive(Debug, Clone, PartialEq)]
pub struct DriveTimeRow {
    pub oa_code: String,
    pub callsign: String,
    pub hour: u8,
    pub minutes: f64,
}

/// Drive-time matrix expanded to all 24 hours.
///
/// Raw drive time is hour-independent in the input, but the model treats it
/// as hour-indexed for uniformity with turnout time, so the cross product
/// with the 24 hours is taken explicitly here. Row order follows the input
/// rows, hours innermost.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriveTimeTable {
    pub rows: Vec<DriveTimeRow>,
}

impl DriveTimeTable {
    pub fn expand(base: &[StationDriveTime]) -> Self {
        let mut rows = Vec::with_capacity(base.len() * HOURS as usize);
        for b in base {
            for hour in 0..HOURS {
                rows.push(DriveTimeRow {
                    oa_code: b.oa_code.clone(),
                    callsign: b.callsign.clone(),
                    hour,
                    minutes: b.minutes,
                });
            }
        }
        Self { rows }
    }
}

/// The static reference tables, loaded once per run and read-only after.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    pub areas: Vec<AreaHourRow>,
    pub turnout: TurnoutTable,
    pub drive: DriveTimeTable,
}

/// Aggregate expected-fatalities scores for one scenario run.
///
/// `unscored_rows` is the explicit missing marker for area-hours that had
/// fewer than two ranked appliances: those rows contribute nothing to the
/// sums and are never silently zero-scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub scenario: String,
    pub dwelling_score: f64,
    pub rtc_score: f64,
    pub scored_rows: usize,
    pub unscored_rows: usize,
}

/// One row of the final comparison table: a scenario's scores plus the
/// relative metrics derived against the baseline.
///
/// `years_per_additional_*_fatality` is `None` when the scenario's score
/// equals the baseline exactly (no finite value, not an error).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub scenario: String,
    pub dwelling_score: f64,
    pub rtc_score: f64,
    pub additional_dwelling_fatalities_per_decade: f64,
    pub additional_rtc_fatalities_per_decade: f64,
    pub years_per_additional_dwelling_fatality: Option<f64>,
    pub years_per_additional_rtc_fatality: Option<f64>,
    pub pct_increase_dwelling_risk: f64,
    pub pct_increase_rtc_risk: f64,
    pub unscored_area_hours: usize,
}

/// A recorded per-scenario failure, in exportable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub scenario: String,
    pub reason: String,
}

/// A saved results file (JSON): the comparison table plus any recorded
/// per-scenario failures, re-loadable for plotting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsFile {
    pub tool: String,
    pub comparisons: Vec<ComparisonRow>,
    pub failures: Vec<FailureRecord>,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone, Copy, Default)]
pub struct RunConfig {
    pub day_window: DayWindow,
    /// Strict mode: incomplete rankings and override/baseline shape
    /// mismatches become per-scenario errors instead of being counted.
    pub strict: bool,
}
