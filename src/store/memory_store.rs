use crate::store::error::StoreError;
use crate::store::RecordStore;
use crate::types::data_type::DataType;
use crate::types::matrix::{MonthRow, MonthlyMatrix};
use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local store, lost when dropped.
///
/// Rows are copied in on write and out on read.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<DataType, Vec<MonthRow>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `data_type` collection already holds `rows`.
    pub fn with_rows(data_type: DataType, rows: Vec<MonthRow>) -> Self {
        Self {
            collections: RwLock::new(HashMap::from([(data_type, rows)])),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn read_all(&self, data_type: DataType) -> Result<Vec<MonthRow>, StoreError> {
        let collections = self.collections.read().await;
        let rows = collections.get(&data_type).cloned().unwrap_or_default();
        debug!("InMemoryStore: read {} {} rows", rows.len(), data_type);
        Ok(rows)
    }

    async fn write_all(
        &self,
        data_type: DataType,
        matrix: &MonthlyMatrix,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections.insert(data_type, matrix.rows().to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_collections_are_separate() {
        let store = InMemoryStore::new();
        let mut matrix = MonthlyMatrix::zeroed();
        matrix.rows_mut()[3][4] = 12.5;

        store
            .write_all(DataType::Precipitation, &matrix)
            .await
            .unwrap();

        let rows = store.read_all(DataType::Precipitation).await.unwrap();
        assert_eq!(MonthlyMatrix::from_rows(rows), Some(matrix));
        assert!(store.read_all(DataType::Temperature).await.unwrap().is_empty());
    }
}
