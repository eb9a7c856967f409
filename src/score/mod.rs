//! Risk scoring: hazard formulas applied per area-hour, aggregated per
//! scenario.
//!
//! Iteration follows the casualty-rate table's row order, so the floating
//! point sums are bit-identical across repeated runs of the same inputs.

use crate::domain::{AreaHourRow, ScoreResult};
use crate::error::ScenarioError;
use crate::hazard;
use crate::rank::ResponseRanking;

/// Score every area-hour against a ranking and aggregate.
///
/// Area-hours with an incomplete ranking are counted in
/// `ScoreResult::unscored_rows` and contribute nothing to either sum. A
/// zero first-response time is a domain error for the RTC ratio and fails
/// the whole scenario.
pub fn score_area_hours(
    areas: &[AreaHourRow],
    ranking: &ResponseRanking,
    scenario: &str,
) -> Result<ScoreResult, ScenarioError> {
    let mut dwelling_score = 0.0;
    let mut rtc_score = 0.0;
    let mut scored_rows = 0usize;
    let mut unscored_rows = 0usize;

    for area in areas {
        let pair = ranking.get(&area.oa_code, area.hour);
        let (tt1, tt2) = match pair {
            Some(p) if p.is_complete() => (p.tt1.unwrap_or_default(), p.tt2.unwrap_or_default()),
            _ => {
                unscored_rows += 1;
                continue;
            }
        };

        if tt1 <= 0.0 {
            return Err(ScenarioError::ZeroFirstResponse {
                oa_code: area.oa_code.clone(),
                hour: area.hour,
            });
        }

        dwelling_score += hazard::dwelling_fatalities(area.dwelling_cas_rate, tt1, tt2);
        rtc_score += hazard::rtc_fatalities(area.rtc_cas_rate, tt1, tt2);
        scored_rows += 1;
    }

    Ok(ScoreResult {
        scenario: scenario.to_string(),
        dwelling_score,
        rtc_score,
        scored_rows,
        unscored_rows,
    })
}
