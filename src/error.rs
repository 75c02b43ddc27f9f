use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to read {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{}: row {row}, column `{column}`: `{value}` is not a number", .path.display())]
    InvalidNumber {
        path: PathBuf,
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to render chart {}: {message}", .path.display())]
    Chart { path: PathBuf, message: String },
}
