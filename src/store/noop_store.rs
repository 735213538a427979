use crate::store::error::StoreError;
use crate::store::RecordStore;
use crate::types::data_type::DataType;
use crate::types::matrix::{MonthRow, MonthlyMatrix};
use async_trait::async_trait;
use log::debug;

/// A store that keeps nothing.
///
/// Reads are always empty and writes are discarded, so every load goes to the
/// remote source. Used when the persistent store cannot be opened.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl NoopStore {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RecordStore for NoopStore {
    async fn read_all(&self, data_type: DataType) -> Result<Vec<MonthRow>, StoreError> {
        debug!("NoopStore: read_all({}) returning nothing", data_type);
        Ok(Vec::new())
    }

    async fn write_all(
        &self,
        data_type: DataType,
        _matrix: &MonthlyMatrix,
    ) -> Result<(), StoreError> {
        debug!("NoopStore: write_all({}) discarded", data_type);
        Ok(())
    }
}
