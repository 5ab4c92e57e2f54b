//! Error types for score aggregation.
//!
//! I/O and CSV syntax failures are carried as `anyhow` errors with context;
//! the cases below are the ones the aggregation itself detects.

use std::path::PathBuf;
use thiserror::Error;

/// A failure while reading or summing score files.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The header row does not name a required column.
    #[error("{}: header has no `{column}` column", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// The file has a header but no data rows, so there is no last record.
    #[error("{}: no score rows after the header", path.display())]
    EmptyScoreFile { path: PathBuf },

    /// The last row is shorter than the header and lacks the column.
    #[error("{}: last row has no value for `{column}`", path.display())]
    MissingField { path: PathBuf, column: String },

    /// A required value is not an integer.
    #[error("{}: `{column}` value {value:?} is not an integer", path.display())]
    InvalidInteger {
        path: PathBuf,
        column: String,
        value: String,
    },

    /// A percentage was requested with a zero denominator.
    #[error("division by zero: max score is 0 for {what}")]
    ZeroMax { what: String },

    /// Summing or scaling scores overflowed a 64-bit integer.
    #[error("integer overflow while computing {what}")]
    Overflow { what: String },
}
