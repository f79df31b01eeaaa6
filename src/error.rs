//! Error types shared by the loading, cleaning, statistics and chart stages.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Cannot read '{}': {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed CSV at line {line}: {message}")]
    Parse { line: u64, message: String },
    #[error("Column '{column}' not found")]
    ColumnNotFound { column: String },
    #[error("Column '{column}' is not numeric (found {dtype})")]
    NonNumericColumn { column: String, dtype: String },
    #[error("Failed to render chart: {0}")]
    Chart(String),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl AnalysisError {
    pub fn column_not_found(column: &str) -> Self {
        Self::ColumnNotFound {
            column: column.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
