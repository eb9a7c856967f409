//! Mode tag to turnout-vector expansion.
//!
//! Each recognized mode maps deterministically to a 24-element turnout-time
//! vector (index = hour of day). A mode applies identically to every hour
//! slot within its rule; there is no per-appliance customization below the
//! mode granularity.

use std::collections::BTreeMap;

use crate::domain::{ApplianceMode, DayWindow, HOURS, UNAVAILABLE_TURNOUT};
use crate::error::ScenarioError;

/// Wholetime (reduced-crew) turnout, minutes.
const WHOLETIME_TURNOUT: f64 = 2.0;
/// Retained-duty turnout, minutes.
const RETAINED_TURNOUT: f64 = 5.0;

/// A scenario's expanded override layer: callsign to 24-hour turnout vector.
pub type OverrideTable = BTreeMap<String, [f64; HOURS as usize]>;

/// Build the 24-hour turnout vector for one mode.
pub fn mode_vector(mode: ApplianceMode, day: &DayWindow) -> [f64; HOURS as usize] {
    let mut out = [0.0; HOURS as usize];
    for hour in 0..HOURS {
        out[hour as usize] = match mode {
            ApplianceMode::Unavailable => UNAVAILABLE_TURNOUT,
            ApplianceMode::ReducedCrew => WHOLETIME_TURNOUT,
            ApplianceMode::RetainedDuty => RETAINED_TURNOUT,
            ApplianceMode::DayCrewed => {
                if day.contains(hour) {
                    WHOLETIME_TURNOUT
                } else {
                    RETAINED_TURNOUT
                }
            }
            ApplianceMode::NightOnly => {
                if day.contains(hour) {
                    UNAVAILABLE_TURNOUT
                } else {
                    RETAINED_TURNOUT
                }
            }
        };
    }
    out
}

/// Expand a scenario's raw (callsign, mode tag) entries into an override
/// table.
///
/// An unrecognized tag fails the whole scenario rather than silently
/// passing through.
pub fn expand_overrides(
    appliances: &BTreeMap<String, String>,
    day: &DayWindow,
) -> Result<OverrideTable, ScenarioError> {
    let mut out = OverrideTable::new();
    for (callsign, tag) in appliances {
        let mode = ApplianceMode::parse_tag(tag).ok_or_else(|| ScenarioError::InvalidMode {
            callsign: callsign.clone(),
            tag: tag.clone(),
        })?;
        out.insert(callsign.clone(), mode_vector(mode, day));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> DayWindow {
        DayWindow::default()
    }

    #[test]
    fn constant_modes_fill_all_hours() {
        assert!(mode_vector(ApplianceMode::Unavailable, &day())
            .iter()
            .all(|&v| v == UNAVAILABLE_TURNOUT));
        assert!(mode_vector(ApplianceMode::ReducedCrew, &day())
            .iter()
            .all(|&v| v == WHOLETIME_TURNOUT));
        assert!(mode_vector(ApplianceMode::RetainedDuty, &day())
            .iter()
            .all(|&v| v == RETAINED_TURNOUT));
    }

    #[test]
    fn day_crewed_switches_at_window_bounds() {
        let v = mode_vector(ApplianceMode::DayCrewed, &day());
        assert_eq!(v[6], RETAINED_TURNOUT);
        assert_eq!(v[7], WHOLETIME_TURNOUT);
        assert_eq!(v[16], WHOLETIME_TURNOUT);
        assert_eq!(v[17], RETAINED_TURNOUT);
        assert_eq!(v[0], RETAINED_TURNOUT);
        assert_eq!(v[23], RETAINED_TURNOUT);
    }

    #[test]
    fn night_only_mirrors_day_crewed() {
        let v = mode_vector(ApplianceMode::NightOnly, &day());
        assert_eq!(v[6], RETAINED_TURNOUT);
        assert_eq!(v[7], UNAVAILABLE_TURNOUT);
        assert_eq!(v[16], UNAVAILABLE_TURNOUT);
        assert_eq!(v[17], RETAINED_TURNOUT);
    }

    #[test]
    fn day_window_is_configurable() {
        let narrow = DayWindow::new(9, 10).unwrap();
        let v = mode_vector(ApplianceMode::DayCrewed, &narrow);
        assert_eq!(v[8], RETAINED_TURNOUT);
        assert_eq!(v[9], WHOLETIME_TURNOUT);
        assert_eq!(v[10], WHOLETIME_TURNOUT);
        assert_eq!(v[11], RETAINED_TURNOUT);
    }

    #[test]
    fn unrecognized_tag_fails_expansion() {
        let mut appliances = BTreeMap::new();
        appliances.insert("K01P1".to_string(), "off".to_string());
        appliances.insert("K01P2".to_string(), "standby".to_string());

        let err = expand_overrides(&appliances, &day()).unwrap_err();
        assert_eq!(
            err,
            ScenarioError::InvalidMode {
                callsign: "K01P2".to_string(),
                tag: "standby".to_string(),
            }
        );
    }

    #[test]
    fn expansion_covers_every_named_appliance() {
        let mut appliances = BTreeMap::new();
        appliances.insert("K01P1".to_string(), "off".to_string());
        appliances.insert("K02P1".to_string(), "day-crewed".to_string());

        let overrides = expand_overrides(&appliances, &day()).unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides["K01P1"][12], UNAVAILABLE_TURNOUT);
        assert_eq!(overrides["K02P1"][12], WHOLETIME_TURNOUT);
    }
}
