use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the record store and column operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("unknown column `{0}`")]
    UnknownColumn(String),

    #[error("column `{0}` already exists")]
    DuplicateColumn(String),

    #[error("position {position} out of range for header of {len} columns")]
    OutOfRange { position: usize, len: usize },

    #[error("row {row}: value `{value}` in column `{column}` is not a number")]
    Parse {
        column: String,
        value: String,
        row: usize,
    },

    #[error("line {line}: expected {expected} cells, found {found}")]
    Malformed {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("row has {found} cells but header has {expected} columns")]
    RowShape { expected: usize, found: usize },

    #[error("delimiter {0:?} is not a single ASCII byte")]
    InvalidDelimiter(char),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
