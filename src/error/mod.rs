//! Error handling for the co-occurrence analysis pipeline.

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use std::io;

/// Specialized error type for the analysis pipeline
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required column is missing from the input table
    #[error("column '{column}' not found in input table")]
    ColumnNotFound {
        /// Name of the missing column
        column: String,
    },

    /// A column holds a different data type than the pipeline expects
    #[error("invalid data type for column '{column}': expected {expected}")]
    InvalidDataType {
        /// Name of the offending column
        column: String,
        /// Expected type description
        expected: String,
    },

    /// The input table has no rows
    #[error("input table is empty")]
    EmptyInput,

    /// A statistical computation could not be carried out
    #[error("statistical error: {0}")]
    Statistics(String),

    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error reading or writing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, Error>;
