//! Dataset error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The dataset file could not be read
    #[error("Failed to read dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be parsed
    #[error("Malformed dataset record: {0}")]
    Csv(#[from] csv::Error),

    /// The source parsed but contained no rows
    #[error("Dataset is empty")]
    Empty,

    /// A parsed row violates a dataset constraint
    #[error("Invalid row {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
}

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
