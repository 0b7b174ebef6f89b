//! # trva-io: export parsing and report emission
//!
//! Importers for the transient simulator's paired TRV and BRK text exports
//! and the report emitters consuming a finished
//! [`trva_core::DutyAnalysis`].
//!
//! Both exports are line-oriented whitespace-delimited tables behind a
//! shared reader ([`table`]); they differ only in column layout and in how
//! the data region ends. The TRV export tolerates trailing footer text
//! while the BRK export must be numeric through end of file, an asymmetry
//! carried as an explicit [`table::Termination`] policy.

pub mod brk;
pub mod report;
pub mod table;
pub mod trv;

pub use brk::{read_brk_export, BRK_COLUMNS};
pub use report::{render_report, write_report, ReportFormat};
pub use table::{parse_numeric_table, read_numeric_table, TableLayout, Termination};
pub use trv::{read_trv_export, TRV_COLUMNS};
