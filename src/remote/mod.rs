//! Remote source of raw daily records.

pub mod error;
pub mod http_source;

use crate::remote::error::FetchError;
use crate::types::data_type::DataType;
use crate::types::matrix::RawRecord;
use async_trait::async_trait;

/// Fetches the raw daily records of one data type.
///
/// A single call is a single attempt; retrying is left to the caller.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch_raw(&self, data_type: DataType) -> Result<Vec<RawRecord>, FetchError>;
}
