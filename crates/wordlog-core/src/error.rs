//! Error types for wordlog.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Top-level error type for ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row that is not a header line but cannot be read as a record.
    #[error("invalid ledger row at line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    #[error("cannot move staged ledger into place at {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
