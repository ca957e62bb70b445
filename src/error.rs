use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not open file {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A field failed numeric conversion or fell outside its domain.
    #[error("line {line}: invalid value {value:?} for field `{field}`")]
    Parse {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("{0} requires a non-empty input")]
    EmptyInput(&'static str),

    #[error("{operation} requires at least two values, got {len}")]
    DegenerateInput { operation: &'static str, len: usize },

    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("invalid shape: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("train row count {train_rows} exceeds the {total} loaded observations")]
    InvalidSplit { train_rows: usize, total: usize },

    #[error("input has more than the configured maximum of {max_rows} rows")]
    CapacityExceeded { max_rows: usize },

    #[error("column `{0}` not found in header")]
    MissingColumn(String),
}
