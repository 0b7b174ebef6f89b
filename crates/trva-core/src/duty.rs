//! Test-duty bucketing of interrupted fault currents.
//!
//! Breaker testing standards grade TRV withstand at four fractions of the
//! rated interrupting current: 10%, 30%, 60%, and 100%. Each (run, phase)
//! of a clearing-side group is assigned to exactly one duty by its RMS
//! interrupted current; currents outside [0, rating] are dropped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{TrvaError, TrvaResult};
use crate::records::{BrkRecord, Phase, RunId};

/// One of the four standardized test-duty categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TestDuty {
    #[serde(rename = "10%")]
    T10,
    #[serde(rename = "30%")]
    T30,
    #[serde(rename = "60%")]
    T60,
    #[serde(rename = "100%")]
    T100,
}

impl TestDuty {
    /// Fixed evaluation order; the intervals partition [0, rating] so the
    /// order does not change the outcome, but it must be deterministic.
    pub const ALL: [TestDuty; 4] = [TestDuty::T10, TestDuty::T30, TestDuty::T60, TestDuty::T100];

    pub fn label(&self) -> &'static str {
        match self {
            TestDuty::T10 => "10%",
            TestDuty::T30 => "30%",
            TestDuty::T60 => "60%",
            TestDuty::T100 => "100%",
        }
    }
}

impl std::fmt::Display for TestDuty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Duty current intervals derived once per analysis from the breaker's
/// rated interrupting current.
///
/// The first three intervals are half-open [low, high); the 100% interval
/// is closed at the rating so a current exactly equal to the rating lands
/// in "100%" instead of being orphaned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DutyIntervals {
    rating_ka: f64,
}

impl DutyIntervals {
    pub fn from_rating(rating_ka: f64) -> TrvaResult<Self> {
        if !rating_ka.is_finite() || rating_ka <= 0.0 {
            return Err(TrvaError::InvalidConfiguration(format!(
                "rated interrupting current must be a positive number of kA, got {rating_ka}"
            )));
        }
        Ok(Self { rating_ka })
    }

    pub fn rating_ka(&self) -> f64 {
        self.rating_ka
    }

    /// Interval bounds in kA for one duty.
    pub fn bounds(&self, duty: TestDuty) -> (f64, f64) {
        match duty {
            TestDuty::T10 => (0.0, 0.1 * self.rating_ka),
            TestDuty::T30 => (0.1 * self.rating_ka, 0.3 * self.rating_ka),
            TestDuty::T60 => (0.3 * self.rating_ka, 0.6 * self.rating_ka),
            TestDuty::T100 => (0.6 * self.rating_ka, self.rating_ka),
        }
    }

    /// Assign an RMS current to its duty, or `None` if it lies outside
    /// [0, rating].
    pub fn classify(&self, rms_ka: f64) -> Option<TestDuty> {
        for duty in TestDuty::ALL {
            let (low, high) = self.bounds(duty);
            let contained = if duty == TestDuty::T100 {
                rms_ka >= low && rms_ka <= high
            } else {
                rms_ka >= low && rms_ka < high
            };
            if contained {
                return Some(duty);
            }
        }
        None
    }
}

/// A (run, phase) pair assigned to a duty bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyEntry {
    pub run: RunId,
    pub phase: Phase,
}

/// Mapping from duty to the ordered (run, phase) entries assigned to it.
///
/// All four duties are always present; a duty nobody qualified for maps to
/// an empty list, which is a valid outcome rather than an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DutyBuckets {
    entries: BTreeMap<TestDuty, Vec<DutyEntry>>,
}

impl DutyBuckets {
    pub fn entries(&self, duty: TestDuty) -> &[DutyEntry] {
        self.entries.get(&duty).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_entries(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

/// Assign every phase of every record in one clearing-side group to its
/// duty bucket.
///
/// Phases are evaluated independently; a phase whose current falls outside
/// every interval is recorded nowhere. Bucket order follows the group's
/// record order, phases A then B then C within a record.
pub fn assign_duty_buckets(group: &[BrkRecord], intervals: &DutyIntervals) -> DutyBuckets {
    let mut buckets = DutyBuckets::default();
    for duty in TestDuty::ALL {
        buckets.entries.insert(duty, Vec::new());
    }

    for record in group {
        for phase in Phase::ALL {
            let rms = record.rms_ka.get(phase);
            match intervals.classify(rms) {
                Some(duty) => {
                    buckets
                        .entries
                        .entry(duty)
                        .or_default()
                        .push(DutyEntry { run: record.run, phase });
                }
                None => {
                    debug!(
                        run = record.run,
                        phase = phase.label(),
                        rms_ka = rms,
                        "phase current outside [0, rating], dropped from duty bucketing"
                    );
                }
            }
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::PhaseValues;

    fn brk_record(run: RunId, rms: PhaseValues) -> BrkRecord {
        BrkRecord {
            run,
            rated_interrupting_ka: 40.0,
            rms_ka: rms,
            exceedance: PhaseValues { a: 0.0, b: 0.0, c: 0.0 },
        }
    }

    #[test]
    fn test_intervals_partition_full_range() {
        let intervals = DutyIntervals::from_rating(40.0).unwrap();

        // Every value in [0, rating] belongs to exactly one duty, including
        // both boundaries.
        let samples = [0.0, 0.1, 3.9999, 4.0, 11.9, 12.0, 23.9, 24.0, 39.9, 40.0];
        for rms in samples {
            let hits: Vec<TestDuty> = TestDuty::ALL
                .into_iter()
                .filter(|&duty| intervals.classify(rms) == Some(duty))
                .collect();
            assert_eq!(hits.len(), 1, "rms {rms} matched {hits:?}");
        }

        assert_eq!(intervals.classify(4.0), Some(TestDuty::T30));
        assert_eq!(intervals.classify(40.0), Some(TestDuty::T100));
    }

    #[test]
    fn test_out_of_range_current_dropped() {
        let intervals = DutyIntervals::from_rating(40.0).unwrap();
        assert_eq!(intervals.classify(40.0001), None);
        assert_eq!(intervals.classify(-0.5), None);
        assert_eq!(intervals.classify(f64::NAN), None);
    }

    #[test]
    fn test_rating_must_be_positive() {
        assert!(DutyIntervals::from_rating(0.0).is_err());
        assert!(DutyIntervals::from_rating(-63.0).is_err());
        assert!(DutyIntervals::from_rating(f64::NAN).is_err());
    }

    #[test]
    fn test_assignment_is_per_phase_and_unique() {
        let intervals = DutyIntervals::from_rating(40.0).unwrap();
        let group = vec![
            brk_record(1, PhaseValues { a: 3.0, b: 22.0, c: 41.0 }),
            brk_record(2, PhaseValues { a: 39.0, b: 4.0, c: 0.0 }),
        ];

        let buckets = assign_duty_buckets(&group, &intervals);

        assert_eq!(
            buckets.entries(TestDuty::T10),
            &[
                DutyEntry { run: 1, phase: Phase::A },
                DutyEntry { run: 2, phase: Phase::C },
            ]
        );
        assert_eq!(
            buckets.entries(TestDuty::T30),
            &[DutyEntry { run: 2, phase: Phase::B }]
        );
        assert_eq!(
            buckets.entries(TestDuty::T60),
            &[DutyEntry { run: 1, phase: Phase::B }]
        );
        assert_eq!(
            buckets.entries(TestDuty::T100),
            &[DutyEntry { run: 2, phase: Phase::A }]
        );

        // Run 1 phase C exceeded the rating and must appear nowhere.
        assert_eq!(buckets.total_entries(), 5);
        for duty in TestDuty::ALL {
            assert!(!buckets
                .entries(duty)
                .contains(&DutyEntry { run: 1, phase: Phase::C }));
        }
    }

    #[test]
    fn test_empty_group_yields_empty_buckets() {
        let intervals = DutyIntervals::from_rating(40.0).unwrap();
        let buckets = assign_duty_buckets(&[], &intervals);
        for duty in TestDuty::ALL {
            assert!(buckets.entries(duty).is_empty());
        }
    }
}
