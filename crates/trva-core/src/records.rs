//! Typed snapshots of the two simulator exports.
//!
//! A [`TrvTable`] and a [`BrkTable`] are built once from the parsed exports
//! and are read-only afterwards. Both are keyed by run number so that the
//! joins in the classifier and peak extractor are direct lookups with an
//! explicit [`TrvaError::MissingJoinKey`] failure path, never positional
//! index alignment.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{TrvaError, TrvaResult};

/// Run number: the unique key shared by the TRV and BRK exports.
pub type RunId = u32;

/// One phase of the three-phase breaker group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    A,
    B,
    C,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::A, Phase::B, Phase::C];

    pub fn label(&self) -> &'static str {
        match self {
            Phase::A => "A",
            Phase::B => "B",
            Phase::C => "C",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which terminal's breaker pole opens first for a simulated fault.
///
/// The export encodes this numerically; decoding lives with the parser so
/// the core only ever sees the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClearingSide {
    Local,
    Remote,
}

impl ClearingSide {
    pub fn label(&self) -> &'static str {
        match self {
            ClearingSide::Local => "local",
            ClearingSide::Remote => "remote",
        }
    }
}

/// One value per phase of the three-phase group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseValues {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl PhaseValues {
    pub fn get(&self, phase: Phase) -> f64 {
        match phase {
            Phase::A => self.a,
            Phase::B => self.b,
            Phase::C => self.c,
        }
    }
}

/// One row of the TRV export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrvRecord {
    pub run: RunId,
    /// Fault-type code as emitted by the simulator (not consumed here)
    pub fault_type: f64,
    /// Fault-location code as emitted by the simulator (not consumed here)
    pub fault_location: f64,
    pub first_to_clear: ClearingSide,
    /// Seconds
    pub bypass_time: f64,
    /// Peak recovery voltage per phase, kV
    pub peak_kv: PhaseValues,
    /// Rate of rise of recovery voltage per phase, kV/µs
    pub rrrv_kv_per_us: PhaseValues,
}

/// One row of the BRK export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrkRecord {
    pub run: RunId,
    /// Rated interrupting current as echoed by the simulator, kA
    pub rated_interrupting_ka: f64,
    /// Interrupted RMS current per phase, kA
    pub rms_ka: PhaseValues,
    /// Per-phase exceedance flags; diagnostic only, carried but not consumed
    pub exceedance: PhaseValues,
}

/// Immutable TRV table keyed by run number.
#[derive(Debug, Clone)]
pub struct TrvTable {
    records: Vec<TrvRecord>,
    by_run: HashMap<RunId, usize>,
}

impl TrvTable {
    /// Build the table, enforcing run-number uniqueness.
    pub fn new(records: Vec<TrvRecord>) -> TrvaResult<Self> {
        let by_run = index_by_run(records.iter().map(|r| r.run), "TRV")?;
        Ok(Self { records, by_run })
    }

    pub fn get(&self, run: RunId) -> Option<&TrvRecord> {
        self.by_run.get(&run).map(|&idx| &self.records[idx])
    }

    /// Join lookup; a miss means the export pair is mismatched.
    pub fn lookup(&self, run: RunId) -> TrvaResult<&TrvRecord> {
        self.get(run)
            .ok_or(TrvaError::MissingJoinKey { run, table: "TRV" })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrvRecord> {
        self.records.iter()
    }
}

/// Immutable BRK table, preserving export row order.
#[derive(Debug, Clone)]
pub struct BrkTable {
    records: Vec<BrkRecord>,
}

impl BrkTable {
    /// Build the table, enforcing run-number uniqueness.
    pub fn new(records: Vec<BrkRecord>) -> TrvaResult<Self> {
        index_by_run(records.iter().map(|r| r.run), "BRK")?;
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BrkRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[BrkRecord] {
        &self.records
    }
}

fn index_by_run(
    runs: impl Iterator<Item = RunId>,
    table: &'static str,
) -> TrvaResult<HashMap<RunId, usize>> {
    let mut by_run = HashMap::new();
    for (idx, run) in runs.enumerate() {
        if by_run.insert(run, idx).is_some() {
            return Err(TrvaError::MalformedTable {
                file: table.to_string(),
                detail: format!("run {run} appears more than once"),
            });
        }
    }
    Ok(by_run)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trv_record(run: RunId, side: ClearingSide, peak_a: f64) -> TrvRecord {
        TrvRecord {
            run,
            fault_type: 1.0,
            fault_location: 1.0,
            first_to_clear: side,
            bypass_time: 0.0,
            peak_kv: PhaseValues { a: peak_a, b: 0.0, c: 0.0 },
            rrrv_kv_per_us: PhaseValues { a: 1.0, b: 0.0, c: 0.0 },
        }
    }

    #[test]
    fn test_lookup_hit_and_miss() {
        let table = TrvTable::new(vec![
            trv_record(1, ClearingSide::Local, 300.0),
            trv_record(2, ClearingSide::Remote, 450.0),
        ])
        .unwrap();

        assert_eq!(table.lookup(2).unwrap().peak_kv.a, 450.0);
        let err = table.lookup(3).unwrap_err();
        assert!(matches!(err, TrvaError::MissingJoinKey { run: 3, table: "TRV" }));
    }

    #[test]
    fn test_duplicate_run_rejected() {
        let result = TrvTable::new(vec![
            trv_record(1, ClearingSide::Local, 300.0),
            trv_record(1, ClearingSide::Remote, 450.0),
        ]);
        assert!(matches!(result, Err(TrvaError::MalformedTable { .. })));
    }

    #[test]
    fn test_phase_values_by_phase() {
        let values = PhaseValues { a: 1.0, b: 2.0, c: 3.0 };
        assert_eq!(values.get(Phase::A), 1.0);
        assert_eq!(values.get(Phase::B), 2.0);
        assert_eq!(values.get(Phase::C), 3.0);
    }
}
