use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store at '{path}' is unavailable")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("I/O error reading collection '{0}'")]
    ReadIo(PathBuf, #[source] std::io::Error),
    #[error("Decoding error reading collection '{0}'")]
    ReadPolars(PathBuf, #[source] PolarsError),

    #[error("Collection '{path}' has no value in row {row}, column '{column}'")]
    MissingValue {
        path: PathBuf,
        row: usize,
        column: String,
    },

    #[error("I/O error writing collection '{0}'")]
    WriteIo(PathBuf, #[source] std::io::Error),
    #[error("Encoding error writing collection '{0}'")]
    WritePolars(PathBuf, #[source] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
