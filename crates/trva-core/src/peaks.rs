//! Worst-case voltage stress extraction per duty bucket.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::duty::{DutyBuckets, TestDuty};
use crate::error::TrvaResult;
use crate::records::{Phase, RunId, TrvTable};

/// The (run, phase) producing the highest peak recovery voltage in one
/// duty bucket, with the stress values read back from the TRV record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DutyPeak {
    pub run: RunId,
    pub phase: Phase,
    pub peak_kv: f64,
    pub rrrv_kv_per_us: f64,
}

/// Per-duty worst case for one clearing side.
///
/// A duty with no qualifying entries maps to `None`: the explicit
/// "no qualifying run" outcome, never a zero or a sentinel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DutyPeaks {
    peaks: BTreeMap<TestDuty, Option<DutyPeak>>,
}

impl DutyPeaks {
    pub fn get(&self, duty: TestDuty) -> Option<&DutyPeak> {
        self.peaks.get(&duty).and_then(|peak| peak.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (TestDuty, Option<&DutyPeak>)> {
        TestDuty::ALL.into_iter().map(|duty| (duty, self.get(duty)))
    }
}

/// Scan each duty bucket against the TRV table and keep the entry with the
/// maximum peak voltage.
///
/// Replacement is on strict improvement only, so the first entry (in
/// bucketer output order) achieving the maximum wins ties. An entry whose
/// run is absent from the TRV table is a `MissingJoinKey` failure, same
/// invariant as the classifier join.
pub fn find_duty_peaks(buckets: &DutyBuckets, trv: &TrvTable) -> TrvaResult<DutyPeaks> {
    let mut peaks = BTreeMap::new();

    for duty in TestDuty::ALL {
        let mut best: Option<DutyPeak> = None;
        for entry in buckets.entries(duty) {
            let record = trv.lookup(entry.run)?;
            let peak_kv = record.peak_kv.get(entry.phase);
            let improves = match &best {
                Some(current) => peak_kv > current.peak_kv,
                None => true,
            };
            if improves {
                best = Some(DutyPeak {
                    run: entry.run,
                    phase: entry.phase,
                    peak_kv,
                    rrrv_kv_per_us: record.rrrv_kv_per_us.get(entry.phase),
                });
            }
        }
        if let Some(peak) = &best {
            debug!(
                duty = duty.label(),
                run = peak.run,
                phase = peak.phase.label(),
                peak_kv = peak.peak_kv,
                "duty bucket worst case"
            );
        }
        peaks.insert(duty, best);
    }

    Ok(DutyPeaks { peaks })
}
