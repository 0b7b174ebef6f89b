//! Unified error types for the TRV analyzer
//!
//! This module provides a common error type [`TrvaError`] covering every
//! failure mode of the analysis pipeline. Parsing, joining, and
//! configuration errors can be handled uniformly at API boundaries.
//!
//! # Example
//!
//! ```ignore
//! use trva_core::{TrvaError, TrvaResult};
//!
//! fn analyze(trv_path: &str, brk_path: &str) -> TrvaResult<()> {
//!     let trv = read_trv_export(trv_path)?;
//!     let brk = read_brk_export(brk_path)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all analyzer operations.
///
/// Every error carries enough context (file name, run number, column) for
/// the user to diagnose the offending export without re-running under a
/// debugger. No variant is recoverable: any error aborts the analysis run
/// before a report is written.
#[derive(Error, Debug)]
pub enum TrvaError {
    /// I/O errors while reading an export
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A declared input path does not exist
    #[error("input file not found: {path}")]
    FileNotFound { path: String },

    /// A retained data row contains a value that does not parse as declared
    #[error("malformed table in '{file}': {detail}")]
    MalformedTable { file: String, detail: String },

    /// A run number present in one export has no counterpart in the other.
    /// Signals a mismatched TRV/BRK export pair; dropping the run silently
    /// would produce a misleading safety analysis.
    #[error("run {run} has no matching record in the {table} table; TRV and BRK exports do not describe the same study")]
    MissingJoinKey { run: u32, table: &'static str },

    /// Invalid analysis configuration (rating, station names, voltage class)
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using TrvaError.
pub type TrvaResult<T> = Result<T, TrvaError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for TrvaError {
    fn from(err: anyhow::Error) -> Self {
        TrvaError::Other(err.to_string())
    }
}

impl From<String> for TrvaError {
    fn from(s: String) -> Self {
        TrvaError::Other(s)
    }
}

impl From<&str> for TrvaError {
    fn from(s: &str) -> Self {
        TrvaError::Other(s.to_string())
    }
}
