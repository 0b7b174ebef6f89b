//! Clearing-side classification of BRK records.
//!
//! The breaker under test experiences a different TRV profile depending on
//! whether the local or the remote terminal clears first, so the two sides
//! are analyzed as independent pipelines from this point on.

use tracing::debug;

use crate::error::TrvaResult;
use crate::records::{BrkRecord, BrkTable, ClearingSide, TrvTable};

/// BRK records partitioned by the TRV export's first-to-clear indicator.
///
/// The two groups are disjoint and their union is the full BRK table;
/// order within each group follows the original BRK table order.
#[derive(Debug, Clone)]
pub struct ClearingGroups {
    pub local: Vec<BrkRecord>,
    pub remote: Vec<BrkRecord>,
}

impl ClearingGroups {
    pub fn side(&self, side: ClearingSide) -> &[BrkRecord] {
        match side {
            ClearingSide::Local => &self.local,
            ClearingSide::Remote => &self.remote,
        }
    }
}

/// Stable partition of the BRK table by each run's first-to-clear terminal.
///
/// Fails with `MissingJoinKey` if any BRK run has no TRV counterpart: that
/// indicates a mismatched pair of export files, not a recoverable case.
pub fn split_by_first_to_clear(brk: &BrkTable, trv: &TrvTable) -> TrvaResult<ClearingGroups> {
    let mut local = Vec::new();
    let mut remote = Vec::new();

    for record in brk.iter() {
        let matched = trv.lookup(record.run)?;
        match matched.first_to_clear {
            ClearingSide::Local => local.push(record.clone()),
            ClearingSide::Remote => remote.push(record.clone()),
        }
    }

    debug!(
        local_runs = local.len(),
        remote_runs = remote.len(),
        "partitioned BRK records by first-to-clear terminal"
    );
    Ok(ClearingGroups { local, remote })
}
