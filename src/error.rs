use crate::remote::error::FetchError;
use crate::types::calendar::{MAX_YEAR, MIN_YEAR};
use crate::types::data_type::DataType;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(
        "Invalid year range {from}..={to}: expected {min} <= from <= to <= {max}",
        min = MIN_YEAR,
        max = MAX_YEAR
    )]
    InvalidRange { from: i32, to: i32 },

    // One Arc is handed to every caller that awaited the failed load.
    #[error("No {data_type} data available from the store or the remote source")]
    DataUnavailable {
        data_type: DataType,
        #[source]
        source: Arc<FetchError>,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
