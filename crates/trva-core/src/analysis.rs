//! Fixed-order analysis pipeline: classify, bucket, extract.
//!
//! Each stage is a pure function of its inputs; the whole pipeline is
//! invoked exactly once per analysis run. Any stage failure aborts the run
//! before any report is produced.

use serde::Serialize;
use tracing::info;

use crate::classify::split_by_first_to_clear;
use crate::duty::{assign_duty_buckets, DutyIntervals};
use crate::envelope::voltage_class;
use crate::error::{TrvaError, TrvaResult};
use crate::peaks::{find_duty_peaks, DutyPeaks};
use crate::records::{BrkTable, TrvTable};

/// Everything the front-end must supply before an analysis may start.
///
/// [`AnalysisConfig::validate`] is the explicit precondition check: no
/// implicit front-end state is part of this contract.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisConfig {
    pub local_station: String,
    pub remote_station: String,
    pub breaker_names: String,
    /// Breaker rated interrupting current, kA
    pub rating_ka: f64,
    /// IEEE TRV voltage class label, kV rms (e.g. "145")
    pub voltage_class: String,
}

impl AnalysisConfig {
    pub fn validate(&self) -> TrvaResult<()> {
        for (field, value) in [
            ("local station", &self.local_station),
            ("remote station", &self.remote_station),
            ("breaker names", &self.breaker_names),
        ] {
            if value.trim().is_empty() {
                return Err(TrvaError::InvalidConfiguration(format!(
                    "{field} must not be empty"
                )));
            }
        }
        if voltage_class(&self.voltage_class).is_none() {
            return Err(TrvaError::InvalidConfiguration(format!(
                "unknown TRV voltage class '{}'",
                self.voltage_class
            )));
        }
        DutyIntervals::from_rating(self.rating_ka)?;
        Ok(())
    }
}

/// Result of one full analysis: per-duty worst cases for each clearing side.
#[derive(Debug, Clone, Serialize)]
pub struct DutyAnalysis {
    pub config: AnalysisConfig,
    pub local: DutyPeaks,
    pub remote: DutyPeaks,
}

/// Run the full pipeline over immutable table snapshots.
pub fn run_analysis(
    config: &AnalysisConfig,
    trv: &TrvTable,
    brk: &BrkTable,
) -> TrvaResult<DutyAnalysis> {
    config.validate()?;
    let intervals = DutyIntervals::from_rating(config.rating_ka)?;

    info!(
        trv_runs = trv.len(),
        brk_runs = brk.len(),
        rating_ka = config.rating_ka,
        "starting duty analysis"
    );

    let groups = split_by_first_to_clear(brk, trv)?;
    let local_buckets = assign_duty_buckets(&groups.local, &intervals);
    let remote_buckets = assign_duty_buckets(&groups.remote, &intervals);
    let local = find_duty_peaks(&local_buckets, trv)?;
    let remote = find_duty_peaks(&remote_buckets, trv)?;

    info!(
        local_entries = local_buckets.total_entries(),
        remote_entries = remote_buckets.total_entries(),
        "duty analysis complete"
    );

    Ok(DutyAnalysis {
        config: config.clone(),
        local,
        remote,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duty::TestDuty;
    use crate::records::{BrkRecord, ClearingSide, Phase, PhaseValues, TrvRecord};

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            local_station: "NORTHGATE".into(),
            remote_station: "EASTFIELD".into(),
            breaker_names: "CB-1".into(),
            rating_ka: 40.0,
            voltage_class: "145".into(),
        }
    }

    fn scenario_tables() -> (TrvTable, BrkTable) {
        // Run 1 clears local first, run 2 remote first; phases B and C are
        // pushed past the rating so only phase A qualifies anywhere.
        let trv = TrvTable::new(vec![
            TrvRecord {
                run: 1,
                fault_type: 1.0,
                fault_location: 1.0,
                first_to_clear: ClearingSide::Local,
                bypass_time: 0.004,
                peak_kv: PhaseValues { a: 300.0, b: 0.0, c: 0.0 },
                rrrv_kv_per_us: PhaseValues { a: 5.0, b: 0.0, c: 0.0 },
            },
            TrvRecord {
                run: 2,
                fault_type: 1.0,
                fault_location: 2.0,
                first_to_clear: ClearingSide::Remote,
                bypass_time: 0.004,
                peak_kv: PhaseValues { a: 450.0, b: 0.0, c: 0.0 },
                rrrv_kv_per_us: PhaseValues { a: 7.0, b: 0.0, c: 0.0 },
            },
        ])
        .unwrap();
        let brk = BrkTable::new(vec![
            BrkRecord {
                run: 1,
                rated_interrupting_ka: 40.0,
                rms_ka: PhaseValues { a: 3.0, b: 99.0, c: 99.0 },
                exceedance: PhaseValues { a: 0.0, b: 0.0, c: 0.0 },
            },
            BrkRecord {
                run: 2,
                rated_interrupting_ka: 40.0,
                rms_ka: PhaseValues { a: 22.0, b: 99.0, c: 99.0 },
                exceedance: PhaseValues { a: 0.0, b: 0.0, c: 0.0 },
            },
        ])
        .unwrap();
        (trv, brk)
    }

    #[test]
    fn test_end_to_end_scenario() {
        let (trv, brk) = scenario_tables();
        let analysis = run_analysis(&config(), &trv, &brk).unwrap();

        // rating 40: 3 kA -> 10% (< 4), 22 kA -> 60% (12 <= 22 < 24)
        let local_t10 = analysis.local.get(TestDuty::T10).unwrap();
        assert_eq!(local_t10.run, 1);
        assert_eq!(local_t10.phase, Phase::A);
        assert_eq!(local_t10.peak_kv, 300.0);
        assert_eq!(local_t10.rrrv_kv_per_us, 5.0);

        let remote_t60 = analysis.remote.get(TestDuty::T60).unwrap();
        assert_eq!(remote_t60.run, 2);
        assert_eq!(remote_t60.peak_kv, 450.0);
        assert_eq!(remote_t60.rrrv_kv_per_us, 7.0);

        // Every other bucket on both sides reports no qualifying run.
        for duty in [TestDuty::T30, TestDuty::T60, TestDuty::T100] {
            assert!(analysis.local.get(duty).is_none());
        }
        for duty in [TestDuty::T10, TestDuty::T30, TestDuty::T100] {
            assert!(analysis.remote.get(duty).is_none());
        }
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let (trv, brk) = scenario_tables();
        let first = run_analysis(&config(), &trv, &brk).unwrap();
        let second = run_analysis(&config(), &trv, &brk).unwrap();
        assert_eq!(first.local, second.local);
        assert_eq!(first.remote, second.remote);
    }

    #[test]
    fn test_config_preconditions() {
        let (trv, brk) = scenario_tables();

        let mut bad = config();
        bad.local_station = "  ".into();
        assert!(matches!(
            run_analysis(&bad, &trv, &brk),
            Err(TrvaError::InvalidConfiguration(_))
        ));

        let mut bad = config();
        bad.rating_ka = -1.0;
        assert!(matches!(
            run_analysis(&bad, &trv, &brk),
            Err(TrvaError::InvalidConfiguration(_))
        ));

        let mut bad = config();
        bad.voltage_class = "999".into();
        assert!(matches!(
            run_analysis(&bad, &trv, &brk),
            Err(TrvaError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_results_serialize_with_duty_labels() {
        let (trv, brk) = scenario_tables();
        let analysis = run_analysis(&config(), &trv, &brk).unwrap();
        let json = serde_json::to_string(&analysis).unwrap();
        assert!(json.contains("\"10%\""));
        assert!(json.contains("\"100%\""));
        // Empty buckets serialize as explicit nulls, not zeros.
        assert!(json.contains("null"));
    }
}
