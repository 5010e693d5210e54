//! Error types for horde-journal.

use thiserror::Error;

/// Errors that can occur when writing the journal.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

pub type JournalResult<T> = Result<T, JournalError>;
