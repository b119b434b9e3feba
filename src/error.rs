//! Error types for the storage layer.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Row validation. The messages are what the REPL prints verbatim.
    #[error("ID must be positive.")]
    NegativeId(i32),

    #[error("String is too long.")]
    StringTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Table full.")]
    TableFull,

    #[error("corrupt record at byte {offset}: {reason}")]
    CorruptRecord { offset: usize, reason: String },

    #[error("corrupted database file {}: {source}", .path.display())]
    CorruptedFile {
        path: PathBuf,
        #[source]
        source: Box<DbError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DbError {
    pub(crate) fn corrupt(offset: usize, reason: impl Into<String>) -> Self {
        DbError::CorruptRecord {
            offset,
            reason: reason.into(),
        }
    }
}
