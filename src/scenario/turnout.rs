//! Turnout-table layering: override over baseline.
//!
//! The baseline is never mutated. The merged table has exactly the shape of
//! the baseline: same rows, same order, with values replaced where the
//! override layer names the row's callsign.

use crate::domain::TurnoutTable;
use crate::scenario::modes::OverrideTable;

/// A merged turnout table plus the override callsigns that matched nothing
/// in the baseline schema (for strict-mode shape checks).
#[derive(Debug, Clone)]
pub struct MergedTurnout {
    pub table: TurnoutTable,
    pub unmatched: Vec<String>,
}

/// Merge an override layer into the baseline turnout table.
///
/// Guarantees: every (callsign, hour) pair present in the baseline has a
/// value in the result, no rows are dropped or duplicated, and rows for
/// callsigns outside the override are carried through unchanged.
pub fn merge_turnout(baseline: &TurnoutTable, overrides: &OverrideTable) -> MergedTurnout {
    let mut matched = std::collections::HashSet::new();

    let rows = baseline
        .rows
        .iter()
        .map(|row| {
            let mut merged = row.clone();
            if let Some(vector) = overrides.get(row.callsign.as_str()) {
                matched.insert(row.callsign.as_str());
                merged.minutes = vector[row.hour as usize];
            }
            merged
        })
        .collect();

    let unmatched = overrides
        .keys()
        .filter(|c| !matched.contains(c.as_str()))
        .cloned()
        .collect();

    MergedTurnout {
        table: TurnoutTable::new(rows),
        unmatched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TurnoutRow, HOURS, UNAVAILABLE_TURNOUT};

    fn baseline() -> TurnoutTable {
        let mut rows = Vec::new();
        for callsign in ["K01P1", "K02P1"] {
            for hour in 0..HOURS {
                rows.push(TurnoutRow {
                    callsign: callsign.to_string(),
                    hour,
                    minutes: 3.0 + f64::from(hour) * 0.01,
                });
            }
        }
        TurnoutTable::new(rows)
    }

    #[test]
    fn empty_override_is_identity() {
        let base = baseline();
        let merged = merge_turnout(&base, &OverrideTable::new());
        assert_eq!(merged.table, base);
        assert!(merged.unmatched.is_empty());
    }

    #[test]
    fn override_wins_only_for_named_callsigns() {
        let base = baseline();
        let mut overrides = OverrideTable::new();
        overrides.insert("K01P1".to_string(), [UNAVAILABLE_TURNOUT; HOURS as usize]);

        let merged = merge_turnout(&base, &overrides);
        assert_eq!(merged.table.rows.len(), base.rows.len());
        for (row, orig) in merged.table.rows.iter().zip(&base.rows) {
            assert_eq!(row.callsign, orig.callsign);
            assert_eq!(row.hour, orig.hour);
            if row.callsign == "K01P1" {
                assert_eq!(row.minutes, UNAVAILABLE_TURNOUT);
            } else {
                assert_eq!(row.minutes, orig.minutes);
            }
        }
        // Baseline untouched.
        assert!(base.rows.iter().all(|r| r.minutes < UNAVAILABLE_TURNOUT));
    }

    #[test]
    fn override_applies_per_hour_values() {
        let base = baseline();
        let mut vector = [5.0; HOURS as usize];
        for hour in 7..=16 {
            vector[hour] = 2.0;
        }
        let mut overrides = OverrideTable::new();
        overrides.insert("K02P1".to_string(), vector);

        let merged = merge_turnout(&base, &overrides);
        let at = |h: u8| {
            merged
                .table
                .rows
                .iter()
                .find(|r| r.callsign == "K02P1" && r.hour == h)
                .unwrap()
                .minutes
        };
        assert_eq!(at(6), 5.0);
        assert_eq!(at(7), 2.0);
        assert_eq!(at(16), 2.0);
        assert_eq!(at(17), 5.0);
    }

    #[test]
    fn unmatched_callsigns_are_reported() {
        let base = baseline();
        let mut overrides = OverrideTable::new();
        overrides.insert("ZZ99P9".to_string(), [2.0; HOURS as usize]);

        let merged = merge_turnout(&base, &overrides);
        assert_eq!(merged.table, base);
        assert_eq!(merged.unmatched, vec!["ZZ99P9".to_string()]);
    }
}
