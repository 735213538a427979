use crate::store::error::StoreError;
use crate::store::RecordStore;
use crate::types::data_type::DataType;
use crate::types::matrix::{MonthRow, MonthlyMatrix};
use crate::utils::ensure_cache_dir_exists;
use async_trait::async_trait;
use log::{debug, info};
use polars::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::{fs, task};

/// Stores each data type as a Parquet file `<dir>/<data_type>.parquet` with one
/// row per year and the columns `month_01`..`month_12`.
#[derive(Debug, Clone)]
pub struct ParquetStore {
    dir: PathBuf,
}

impl ParquetStore {
    /// Opens the store in `dir`, creating the directory and an empty collection
    /// for every data type that does not have one yet.
    ///
    /// Opening an existing store leaves its collections untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the directory or a collection
    /// cannot be created.
    pub async fn initialize(dir: &Path) -> Result<Self, StoreError> {
        let unavailable = |source: Box<dyn std::error::Error + Send + Sync>| {
            StoreError::Unavailable {
                path: dir.to_path_buf(),
                source,
            }
        };

        ensure_cache_dir_exists(dir)
            .await
            .map_err(|e| unavailable(Box::new(e)))?;

        let store = Self {
            dir: dir.to_path_buf(),
        };
        for data_type in DataType::ALL {
            let path = store.collection_path(data_type);
            let exists = fs::try_exists(&path)
                .await
                .map_err(|e| unavailable(Box::new(e)))?;
            if exists {
                continue;
            }
            info!("Provisioning {} collection at {:?}", data_type, path);
            Self::write_rows(Vec::new(), path)
                .await
                .map_err(|e| unavailable(Box::new(e)))?;
        }
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn collection_path(&self, data_type: DataType) -> PathBuf {
        self.dir
            .join(format!("{}.parquet", data_type.collection_name()))
    }

    /// Writes `rows` to a temporary file next to `path` and renames it into place.
    async fn write_rows(rows: Vec<MonthRow>, path: PathBuf) -> Result<(), StoreError> {
        task::spawn_blocking(move || {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let mut df =
                rows_to_frame(&rows).map_err(|e| StoreError::WritePolars(path.clone(), e))?;
            let mut temp_file = NamedTempFile::new_in(dir)
                .map_err(|e| StoreError::WriteIo(path.clone(), e))?;
            ParquetWriter::new(temp_file.as_file_mut())
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut df)
                .map_err(|e| StoreError::WritePolars(path.clone(), e))?;
            temp_file
                .as_file()
                .sync_all()
                .map_err(|e| StoreError::WriteIo(path.clone(), e))?;
            temp_file
                .persist(&path)
                .map_err(|e| StoreError::WriteIo(path.clone(), e.error))?;
            Ok::<(), StoreError>(())
        })
        .await??;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for ParquetStore {
    async fn read_all(&self, data_type: DataType) -> Result<Vec<MonthRow>, StoreError> {
        let path = self.collection_path(data_type);
        let rows = task::spawn_blocking(move || read_rows(&path)).await??;
        debug!("Read {} {} rows from store", rows.len(), data_type);
        Ok(rows)
    }

    async fn write_all(
        &self,
        data_type: DataType,
        matrix: &MonthlyMatrix,
    ) -> Result<(), StoreError> {
        let path = self.collection_path(data_type);
        Self::write_rows(matrix.rows().to_vec(), path.clone()).await?;
        info!("Stored {} data at {:?}", data_type, path);
        Ok(())
    }
}

fn month_column(month_index: usize) -> String {
    format!("month_{:02}", month_index + 1)
}

fn rows_to_frame(rows: &[MonthRow]) -> PolarsResult<DataFrame> {
    let columns = (0..12)
        .map(|month| {
            let values: Vec<f64> = rows.iter().map(|row| row[month]).collect();
            Column::new(month_column(month).as_str().into(), values)
        })
        .collect();
    DataFrame::new(columns)
}

/// Reads a collection; a missing file reads as empty.
fn read_rows(path: &Path) -> Result<Vec<MonthRow>, StoreError> {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::ReadIo(path.to_path_buf(), e)),
    };
    let df = ParquetReader::new(file)
        .finish()
        .map_err(|e| StoreError::ReadPolars(path.to_path_buf(), e))?;

    let mut rows = vec![[0.0; 12]; df.height()];
    for month in 0..12 {
        let name = month_column(month);
        let values = df
            .column(&name)
            .and_then(|column| column.f64())
            .map_err(|e| StoreError::ReadPolars(path.to_path_buf(), e))?;
        for (row_index, (row, value)) in rows.iter_mut().zip(values.into_iter()).enumerate() {
            row[month] = value.ok_or_else(|| StoreError::MissingValue {
                path: path.to_path_buf(),
                row: row_index,
                column: name.clone(),
            })?;
        }
    }
    Ok(rows)
}
