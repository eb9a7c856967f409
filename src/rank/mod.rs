//! Response ranking: which two appliances arrive first, per area-hour.
//!
//! The join of drive time and turnout time happens on (callsign, hour); an
//! appliance/hour with no turnout entry contributes no response for that
//! area-hour. Totals are ranked ascending within each (area, hour) group
//! with **first-seen wins** tie-breaking: the pass runs in input row order
//! and only a strictly smaller total displaces an earlier appliance, so the
//! result is reproducible with no hidden hash-order dependence.

use std::collections::HashMap;

use crate::domain::{DriveTimeTable, TurnoutTable, HOURS, UNAVAILABLE_TURNOUT};

/// The two smallest total response times for one (area, hour).
///
/// Invariants: `tt1 <= tt2` whenever both are present, and `tt2` present
/// implies `tt1` present. An area-hour with fewer than two eligible
/// responders leaves the corresponding field(s) `None`; missing propagates
/// to scoring rather than becoming zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResponsePair {
    pub tt1: Option<f64>,
    pub tt2: Option<f64>,
}

impl ResponsePair {
    pub fn is_complete(&self) -> bool {
        self.tt1.is_some() && self.tt2.is_some()
    }
}

/// First/second response times keyed by area, with one pair per hour.
#[derive(Debug, Clone, Default)]
pub struct ResponseRanking {
    areas: HashMap<String, [ResponsePair; HOURS as usize]>,
}

impl ResponseRanking {
    pub fn get(&self, oa_code: &str, hour: u8) -> Option<&ResponsePair> {
        self.areas.get(oa_code).map(|pairs| &pairs[hour as usize])
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    total: f64,
    available: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct BestTwo {
    first: Option<Candidate>,
    second: Option<Candidate>,
}

impl BestTwo {
    /// Insert with strict `<` comparisons so the earlier-seen appliance
    /// keeps its rank on equal totals.
    fn offer(&mut self, candidate: Candidate) {
        match self.first {
            None => self.first = Some(candidate),
            Some(first) if candidate.total < first.total => {
                self.second = self.first;
                self.first = Some(candidate);
            }
            Some(_) => match self.second {
                None => self.second = Some(candidate),
                Some(second) if candidate.total < second.total => {
                    self.second = Some(candidate);
                }
                Some(_) => {}
            },
        }
    }

    /// Collapse to the reported pair.
    ///
    /// The unavailable sentinel competes in the comparisons above (and
    /// loses to every real response), but a sentinel-backed winner is
    /// reported as absent: an area-hour whose responders are all
    /// unavailable has no ranking, not a huge finite one.
    fn into_pair(self) -> ResponsePair {
        let Some(first) = self.first.filter(|c| c.available) else {
            return ResponsePair::default();
        };
        let second = self.second.filter(|c| c.available);
        ResponsePair {
            tt1: Some(first.total),
            tt2: second.map(|c| c.total),
        }
    }
}

/// Rank total response times (drive + turnout) per (area, hour).
pub fn rank_responses(drive: &DriveTimeTable, turnout: &TurnoutTable) -> ResponseRanking {
    let turnout_index = turnout.index();

    let mut groups: HashMap<String, [BestTwo; HOURS as usize]> = HashMap::new();
    for row in &drive.rows {
        let Some(&turnout_minutes) = turnout_index.get(&(row.callsign.as_str(), row.hour)) else {
            continue;
        };
        let candidate = Candidate {
            total: row.minutes + turnout_minutes,
            available: turnout_minutes < UNAVAILABLE_TURNOUT,
        };
        if let Some(group) = groups.get_mut(row.oa_code.as_str()) {
            group[row.hour as usize].offer(candidate);
        } else {
            let mut group = [BestTwo::default(); HOURS as usize];
            group[row.hour as usize].offer(candidate);
            groups.insert(row.oa_code.clone(), group);
        }
    }

    let areas = groups
        .into_iter()
        .map(|(oa_code, best)| (oa_code, best.map(BestTwo::into_pair)))
        .collect();
    ResponseRanking { areas }
}
