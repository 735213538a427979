//! Durable storage of normalized matrices, one collection per data type.

pub mod error;
pub mod memory_store;
pub mod noop_store;
pub mod parquet_store;

use crate::store::error::StoreError;
use crate::types::data_type::DataType;
use crate::types::matrix::{MonthRow, MonthlyMatrix};
use async_trait::async_trait;

/// Persists normalized matrices so later runs skip the remote source.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns every persisted row of `data_type` in insertion order.
    ///
    /// An empty result means nothing has been persisted yet; it is not an error.
    async fn read_all(&self, data_type: DataType) -> Result<Vec<MonthRow>, StoreError>;

    /// Persists `matrix` as the collection of `data_type`.
    ///
    /// On error nothing counts as committed, and a later `read_all` never
    /// observes a partially written collection.
    async fn write_all(&self, data_type: DataType, matrix: &MonthlyMatrix)
        -> Result<(), StoreError>;
}
