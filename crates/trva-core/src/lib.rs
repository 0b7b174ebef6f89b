//! # trva-core: TRV test-duty classification and extremum extraction
//!
//! Core pipeline for verifying a circuit breaker's TRV withstand envelope
//! against a transient simulator's paired TRV/BRK export files:
//!
//! 1. **Clearing-side classification** ([`classify`]): join BRK records to
//!    TRV records by run number and partition them by which terminal's pole
//!    clears first.
//! 2. **Duty bucketing** ([`duty`]): assign each (run, phase) to one of
//!    the standardized 10/30/60/100% test-duty buckets by its interrupted
//!    RMS current relative to the breaker's rated interrupting current.
//! 3. **Peak extraction** ([`peaks`]): per bucket, find the run/phase with
//!    the highest peak recovery voltage and carry its rate of rise.
//!
//! [`analysis::run_analysis`] wires the stages in fixed order over
//! immutable table snapshots ([`records`]); every stage is a pure function
//! and every failure aborts the run before any report is produced.
//! Reference withstand envelopes per IEEE voltage class live in
//! [`envelope`]. Parsing the raw exports is the `trva-io` crate's job.

pub mod analysis;
pub mod classify;
pub mod duty;
pub mod envelope;
pub mod error;
pub mod peaks;
pub mod records;

pub use analysis::{run_analysis, AnalysisConfig, DutyAnalysis};
pub use classify::{split_by_first_to_clear, ClearingGroups};
pub use duty::{assign_duty_buckets, DutyBuckets, DutyEntry, DutyIntervals, TestDuty};
pub use envelope::{class_labels, voltage_class, DutyEnvelope, VoltageClass};
pub use error::{TrvaError, TrvaResult};
pub use peaks::{find_duty_peaks, DutyPeak, DutyPeaks};
pub use records::{
    BrkRecord, BrkTable, ClearingSide, Phase, PhaseValues, RunId, TrvRecord, TrvTable,
};
