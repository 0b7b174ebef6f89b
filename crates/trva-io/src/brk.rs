//! BRK export importer.
//!
//! Eight fixed columns per data row, read through end of file: unlike the
//! TRV export, BRK exports do not carry trailing summaries, so there is no
//! early-termination heuristic and a stray footer is a malformed table.

use std::path::Path;

use trva_core::{BrkRecord, BrkTable, PhaseValues, TrvaResult};

use crate::table::{read_numeric_table, TableLayout, Termination};
use crate::trv::run_id;

pub const BRK_COLUMNS: [&str; 8] = [
    "Run #",
    "BRK1_Int_Rt",
    "BRK1A_RMS",
    "BRK1B_RMS",
    "BRK1C_RMS",
    "CB1_Excd_A",
    "CB1_Excd_B",
    "CB1_Excd_C",
];

const BRK_LAYOUT: TableLayout = TableLayout {
    name: "BRK",
    columns: &BRK_COLUMNS,
    termination: Termination::Eof,
};

pub fn read_brk_export(path: &Path) -> TrvaResult<BrkTable> {
    let rows = read_numeric_table(path, &BRK_LAYOUT)?;
    let file = path.display().to_string();
    let mut records = Vec::with_capacity(rows.len());
    for row in &rows {
        records.push(BrkRecord {
            run: run_id(row[0], &file)?,
            rated_interrupting_ka: row[1],
            rms_ka: PhaseValues { a: row[2], b: row[3], c: row[4] },
            exceedance: PhaseValues { a: row[5], b: row[6], c: row[7] },
        });
    }
    BrkTable::new(records)
}
