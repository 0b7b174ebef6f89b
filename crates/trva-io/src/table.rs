//! Whitespace-delimited table reader shared by the TRV and BRK importers.
//!
//! The simulator's exports are a single header line followed by numeric
//! data rows; some exports append free-text footer/summary lines after the
//! data region. The two importers differ only in column layout and in the
//! [`Termination`] policy, so the shared reader takes both as data rather
//! than duplicating the line loop.

use std::fs;
use std::path::Path;

use tracing::debug;
use trva_core::{TrvaError, TrvaResult};

/// Where the data region of an export ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Stop at the first row (after at least one data row) whose first
    /// column is not integer-parseable. Tolerates trailing footer text.
    AtNonIntegerKey,
    /// Read data rows through end of file.
    Eof,
}

/// Column layout and termination policy for one export format.
#[derive(Debug, Clone, Copy)]
pub struct TableLayout {
    /// Short format name for diagnostics ("TRV", "BRK")
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub termination: Termination,
}

/// Read an export file into numeric rows of exactly `layout.columns` width.
pub fn read_numeric_table(path: &Path, layout: &TableLayout) -> TrvaResult<Vec<Vec<f64>>> {
    if !path.exists() {
        return Err(TrvaError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let contents = fs::read_to_string(path)?;
    parse_numeric_table(&contents, &path.display().to_string(), layout)
}

/// Parse export text into numeric rows.
///
/// One header line is skipped; blank lines are ignored wherever they
/// occur, including inside the data region. After row collection every
/// cell must parse as a real number; any failure is fatal for the whole
/// file so no partial or garbage rows are ever admitted.
pub fn parse_numeric_table(
    contents: &str,
    file: &str,
    layout: &TableLayout,
) -> TrvaResult<Vec<Vec<f64>>> {
    let mut raw_rows: Vec<Vec<&str>> = Vec::new();
    let mut header_skipped = false;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !header_skipped {
            header_skipped = true;
            continue;
        }

        let columns: Vec<&str> = line.split_whitespace().collect();
        let key_is_integer = columns
            .first()
            .is_some_and(|cell| cell.parse::<i64>().is_ok());
        if layout.termination == Termination::AtNonIntegerKey
            && !raw_rows.is_empty()
            && !key_is_integer
        {
            debug!(
                format = layout.name,
                rows = raw_rows.len(),
                "non-integer first column ends the data region"
            );
            break;
        }
        raw_rows.push(columns);
    }

    let mut table = Vec::with_capacity(raw_rows.len());
    for (row_idx, columns) in raw_rows.iter().enumerate() {
        if columns.len() != layout.columns.len() {
            return Err(TrvaError::MalformedTable {
                file: file.to_string(),
                detail: format!(
                    "{} data row {} has {} columns, expected {}",
                    layout.name,
                    row_idx + 1,
                    columns.len(),
                    layout.columns.len()
                ),
            });
        }
        let mut values = Vec::with_capacity(columns.len());
        for (col_idx, cell) in columns.iter().enumerate() {
            let value: f64 = cell.parse().map_err(|_| TrvaError::MalformedTable {
                file: file.to_string(),
                detail: format!(
                    "{} data row {}, column '{}': '{}' is not a number",
                    layout.name,
                    row_idx + 1,
                    layout.columns[col_idx],
                    cell
                ),
            })?;
            values.push(value);
        }
        table.push(values);
    }

    debug!(format = layout.name, rows = table.len(), "export table parsed");
    Ok(table)
}
