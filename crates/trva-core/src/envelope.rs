//! Standard TRV withstand envelopes per IEEE voltage class.
//!
//! Breaker standards (IEEE C37.06 / C37.011) specify, per rated maximum
//! voltage class and per test duty, the envelope peak TRV and rate of rise
//! the breaker must withstand. The report prints these next to the
//! simulated worst case so the engineer can read off margin directly.
//!
//! Envelope peak is computed as `kpp * kaf * U * sqrt(2/3)` with the
//! first-pole-to-clear factor kpp = 1.3 and the standard amplitude factor
//! per duty; RRRV values are the standard per-duty rates.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::duty::TestDuty;

/// First-pole-to-clear factor for effectively grounded systems.
const KPP: f64 = 1.3;

/// Standard envelope values for one test duty of one voltage class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DutyEnvelope {
    /// Envelope peak TRV, kV
    pub peak_kv: f64,
    /// Envelope rate of rise, kV/µs
    pub rrrv_kv_per_us: f64,
}

/// One rated-maximum-voltage class row of the standard table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoltageClass {
    /// Rated maximum voltage, kV rms (also the selection label, e.g. "145")
    pub class_kv: f64,
    t10: DutyEnvelope,
    t30: DutyEnvelope,
    t60: DutyEnvelope,
    t100: DutyEnvelope,
}

impl VoltageClass {
    fn new(class_kv: f64) -> Self {
        // Amplitude factor and RRRV per duty: the lower the interrupted
        // current fraction, the steeper and higher the envelope.
        let duty = |kaf: f64, rrrv: f64| DutyEnvelope {
            peak_kv: round_kv(KPP * kaf * class_kv * (2.0f64 / 3.0).sqrt()),
            rrrv_kv_per_us: rrrv,
        };
        Self {
            class_kv,
            t10: duty(1.76, 7.0),
            t30: duty(1.54, 5.0),
            t60: duty(1.50, 3.0),
            t100: duty(1.40, 2.0),
        }
    }

    pub fn label(&self) -> String {
        format!("{}", self.class_kv)
    }

    pub fn envelope(&self, duty: TestDuty) -> DutyEnvelope {
        match duty {
            TestDuty::T10 => self.t10,
            TestDuty::T30 => self.t30,
            TestDuty::T60 => self.t60,
            TestDuty::T100 => self.t100,
        }
    }
}

fn round_kv(value: f64) -> f64 {
    value.round()
}

/// The supported voltage classes, ascending.
pub static VOLTAGE_CLASSES: Lazy<Vec<VoltageClass>> = Lazy::new(|| {
    [123.0, 145.0, 170.0, 245.0, 362.0, 550.0]
        .into_iter()
        .map(VoltageClass::new)
        .collect()
});

/// Look up a class by its kV label (e.g. "145" or "145.0").
pub fn voltage_class(label: &str) -> Option<&'static VoltageClass> {
    let requested: f64 = label.trim().parse().ok()?;
    VOLTAGE_CLASSES
        .iter()
        .find(|class| class.class_kv == requested)
}

/// Labels for front-end selection lists.
pub fn class_labels() -> Vec<String> {
    VOLTAGE_CLASSES.iter().map(VoltageClass::label).collect()
}
