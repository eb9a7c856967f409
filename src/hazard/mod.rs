//! Fatality hazard models.
//!
//! Two models, both functions of (casualty rate, first response time,
//! second response time), both yielding an expected-fatalities contribution
//! for one area-hour:
//!
//! - dwelling fire: quadratic response factor, first/second arrivals
//!   weighted 72/28
//! - road traffic collision: linear in the first arrival, scaled by the
//!   second/first arrival ratio
//!
//! Both are pure; aggregation and missing-value handling live in `score`.

/// Weight of the first-arriving appliance in the dwelling model.
pub const FIRST_APPLIANCE_WEIGHT: f64 = 0.72;
/// Weight of the second-arriving appliance in the dwelling model.
pub const SECOND_APPLIANCE_WEIGHT: f64 = 0.28;

/// Dwelling-fire response factor for one appliance's response time (minutes).
pub fn response_factor(minutes: f64) -> f64 {
    0.0002 * minutes * minutes - 0.0006 * minutes + 0.0218
}

/// Expected dwelling-fire fatalities for one area-hour.
pub fn dwelling_fatalities(cas_rate: f64, tt1: f64, tt2: f64) -> f64 {
    cas_rate
        * (FIRST_APPLIANCE_WEIGHT * response_factor(tt1)
            + SECOND_APPLIANCE_WEIGHT * response_factor(tt2))
}

/// Expected road-traffic-collision fatalities for one area-hour.
///
/// The second/first arrival ratio makes `tt1 = 0` a domain error; callers
/// must check for it before calling (see `score`).
pub fn rtc_fatalities(cas_rate: f64, tt1: f64, tt2: f64) -> f64 {
    let first_term = (tt1 * 0.0024 + 0.0202) * 0.93;
    let arrival_ratio = tt2 / tt1;
    let second_term = 0.026 * arrival_ratio + 0.93;
    cas_rate * first_term * second_term
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn response_factor_known_values() {
        // 0.0002 * 16 - 0.0006 * 4 + 0.0218
        assert!((response_factor(4.0) - 0.0226).abs() < TOL);
        // At zero, only the constant term remains.
        assert!((response_factor(0.0) - 0.0218).abs() < TOL);
    }

    #[test]
    fn dwelling_matches_hand_computation() {
        // Single area-hour with totals 4.0 and 9.0 minutes, unit casualty rate.
        let expected = 0.72 * response_factor(4.0) + 0.28 * response_factor(9.0);
        assert!((dwelling_fatalities(1.0, 4.0, 9.0) - expected).abs() < TOL);
    }

    #[test]
    fn rtc_matches_hand_computation() {
        let expected = ((4.0 * 0.0024 + 0.0202) * 0.93) * (0.026 * (9.0 / 4.0) + 0.93);
        assert!((rtc_fatalities(1.0, 4.0, 9.0) - expected).abs() < TOL);
    }

    #[test]
    fn scores_non_negative_for_valid_inputs() {
        for &(cas, tt1, tt2) in &[
            (0.0, 1.0, 2.0),
            (0.5, 0.5, 0.5),
            (2.0, 3.0, 30.0),
            (1e-4, 12.0, 18.0),
        ] {
            assert!(dwelling_fatalities(cas, tt1, tt2) >= 0.0);
            assert!(rtc_fatalities(cas, tt1, tt2) >= 0.0);
        }
    }

    #[test]
    fn scales_linearly_in_casualty_rate() {
        let one = dwelling_fatalities(1.0, 5.0, 8.0);
        let three = dwelling_fatalities(3.0, 5.0, 8.0);
        assert!((three - 3.0 * one).abs() < TOL);
    }
}
