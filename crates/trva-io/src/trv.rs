//! TRV export importer.
//!
//! Eleven fixed columns per data row; the data region ends at the first
//! post-header row whose first column is not an integer, because these
//! exports routinely carry a free-text summary after the table.

use std::path::Path;

use trva_core::{ClearingSide, PhaseValues, RunId, TrvRecord, TrvTable, TrvaError, TrvaResult};

use crate::table::{read_numeric_table, TableLayout, Termination};

pub const TRV_COLUMNS: [&str; 11] = [
    "Run #",
    "Fault_Type",
    "Fault_Location",
    "Loc1/Rem2 First",
    "Bypass Time",
    "CB1_A_Peak(kV)",
    "CB1_B_Peak(kV)",
    "CB1_C_Peak(kV)",
    "CB1_A_RRRV(kV/u)",
    "CB1_B_RRRV(kV/u)",
    "CB1_C_RRRV(kV/u)",
];

const TRV_LAYOUT: TableLayout = TableLayout {
    name: "TRV",
    columns: &TRV_COLUMNS,
    termination: Termination::AtNonIntegerKey,
};

/// Export encoding of the first-to-clear indicator.
const LOCAL_CLEARS_FIRST: f64 = 1.0;
const REMOTE_CLEARS_FIRST: f64 = 2.0;

pub fn read_trv_export(path: &Path) -> TrvaResult<TrvTable> {
    let rows = read_numeric_table(path, &TRV_LAYOUT)?;
    let file = path.display().to_string();
    let mut records = Vec::with_capacity(rows.len());
    for row in &rows {
        records.push(trv_record_from_row(row, &file)?);
    }
    TrvTable::new(records)
}

fn trv_record_from_row(row: &[f64], file: &str) -> TrvaResult<TrvRecord> {
    let run = run_id(row[0], file)?;
    Ok(TrvRecord {
        run,
        fault_type: row[1],
        fault_location: row[2],
        first_to_clear: clearing_side_from_code(row[3], run, file)?,
        bypass_time: row[4],
        peak_kv: PhaseValues { a: row[5], b: row[6], c: row[7] },
        rrrv_kv_per_us: PhaseValues { a: row[8], b: row[9], c: row[10] },
    })
}

/// Run numbers are positive integers; anything else in the key column of a
/// retained row means the export is malformed.
pub(crate) fn run_id(value: f64, file: &str) -> TrvaResult<RunId> {
    if value.fract() == 0.0 && value >= 1.0 && value <= f64::from(u32::MAX) {
        Ok(value as RunId)
    } else {
        Err(TrvaError::MalformedTable {
            file: file.to_string(),
            detail: format!("'{value}' is not a positive integer run number"),
        })
    }
}

fn clearing_side_from_code(code: f64, run: RunId, file: &str) -> TrvaResult<ClearingSide> {
    if code == LOCAL_CLEARS_FIRST {
        Ok(ClearingSide::Local)
    } else if code == REMOTE_CLEARS_FIRST {
        Ok(ClearingSide::Remote)
    } else {
        Err(TrvaError::MalformedTable {
            file: file.to_string(),
            detail: format!(
                "run {run}: first-to-clear code '{code}' is neither {LOCAL_CLEARS_FIRST} (local) nor {REMOTE_CLEARS_FIRST} (remote)"
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_export(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_trv_export() {
        let file = write_export(
            "Run# Fault_Type Fault_Location Loc1/Rem2 Bypass A_Peak B_Peak C_Peak A_RRRV B_RRRV C_RRRV\n\
             1 1 1 1 0.004 300.0 280.0 260.0 5.0 4.5 4.0\n\
             2 2 1 2 0.004 450.0 430.0 410.0 7.0 6.5 6.0\n",
        );

        let table = read_trv_export(file.path()).unwrap();
        assert_eq!(table.len(), 2);

        let run1 = table.get(1).unwrap();
        assert_eq!(run1.first_to_clear, ClearingSide::Local);
        assert_eq!(run1.peak_kv.a, 300.0);
        assert_eq!(run1.rrrv_kv_per_us.c, 4.0);

        let run2 = table.get(2).unwrap();
        assert_eq!(run2.first_to_clear, ClearingSide::Remote);
    }

    #[test]
    fn test_footer_ends_data_region() {
        let file = write_export(
            "header\n\
             1 1 1 1 0.004 300.0 280.0 260.0 5.0 4.5 4.0\n\
             Summary of fault sweep follows\n\
             maximum observed 450.0\n",
        );

        let table = read_trv_export(file.path()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_unknown_clearing_code_rejected() {
        let file = write_export(
            "header\n\
             1 1 1 3 0.004 300.0 280.0 260.0 5.0 4.5 4.0\n",
        );

        let err = read_trv_export(file.path()).unwrap_err();
        assert!(matches!(err, TrvaError::MalformedTable { .. }));
        assert!(err.to_string().contains("first-to-clear"));
    }

    #[test]
    fn test_run_id_must_be_positive_integer() {
        assert!(run_id(3.0, "t.txt").is_ok());
        assert!(run_id(0.0, "t.txt").is_err());
        assert!(run_id(2.5, "t.txt").is_err());
        assert!(run_id(-1.0, "t.txt").is_err());
    }
}
