//! This module provides the main entry point: a client that resolves monthly
//! matrices through the persistent store and the remote endpoint, and averages
//! them over a year range.

use crate::error::HistoryError;
use crate::remote::http_source::HttpSource;
use crate::remote::RemoteSource;
use crate::store::noop_store::NoopStore;
use crate::store::parquet_store::ParquetStore;
use crate::store::RecordStore;
use crate::types::data_type::{ChartScale, DataType};
use crate::types::matrix::{MonthlyAverages, MonthlyMatrix};
use crate::types::selection::Selection;
use crate::utils::get_cache_dir;
use crate::weather_data::aggregator::{average, validate_range};
use crate::weather_data::loader::MatrixLoader;
use bon::bon;
use log::warn;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// What a chart renderer needs to draw one selection: the 12 monthly values and
/// the vertical bounds for the data type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartData {
    pub averages: MonthlyAverages,
    pub scale: ChartScale,
}

/// The client for historic monthly weather data.
///
/// Matrices are loaded once per data type and kept for the lifetime of the
/// client. The first load of a data type reads the local store; only when the
/// store is empty are the daily records downloaded, normalized and written back.
///
/// # Examples
///
/// ```no_run
/// # use meteohistory::{DataType, HistoryError, MeteoHistory};
/// # #[tokio::main]
/// # async fn main() -> Result<(), HistoryError> {
/// let client = MeteoHistory::builder()
///     .base_url("https://example.org/d")
///     .build()
///     .await?;
///
/// let summer_1950s = client.averages(DataType::Temperature, 1950, 1959).await?;
/// println!("July mean: {:.1} °C", summer_1950s[6]);
///
/// client.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct MeteoHistory {
    loader: MatrixLoader,
}

#[bon]
impl MeteoHistory {
    /// Creates a client that downloads from `base_url` and persists under
    /// `cache_folder`.
    ///
    /// # Arguments
    ///
    /// * `.base_url(impl Into<String>)`: **Required.** Root of the endpoint serving
    ///   `temperature.json` and `precipitation.json`.
    /// * `.cache_folder(PathBuf)`: Optional. Where the store lives. Defaults to a
    ///   `meteohistory` folder in the system cache directory.
    /// * `.timeout(Duration)`: Optional. Per-request timeout. Without one a hung
    ///   download blocks its waiters indefinitely.
    /// * `.gzip(bool)`: Optional. Download `*.json.gz` instead of `*.json`.
    /// * `.persist(bool)`: Optional, default `true`. When `false` nothing is read
    ///   from or written to disk.
    ///
    /// A store that cannot be opened is not an error: the client logs a warning
    /// and falls back to fetching on every new process.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Fetch`] if the HTTP client cannot be built.
    #[builder]
    pub async fn new(
        #[builder(into)] base_url: String,
        cache_folder: Option<PathBuf>,
        timeout: Option<Duration>,
        #[builder(default)] gzip: bool,
        #[builder(default = true)] persist: bool,
    ) -> Result<Self, HistoryError> {
        let source = HttpSource::builder()
            .base_url(base_url)
            .maybe_timeout(timeout)
            .gzip(gzip)
            .build()?;

        let store: Arc<dyn RecordStore> = if persist {
            Self::open_store(cache_folder).await
        } else {
            Arc::new(NoopStore::new())
        };
        Ok(Self::with_parts(store, Arc::new(source)))
    }

    /// Creates a client over custom store and source implementations.
    pub fn with_parts(store: Arc<dyn RecordStore>, source: Arc<dyn RemoteSource>) -> Self {
        Self {
            loader: MatrixLoader::new(store, source),
        }
    }

    async fn open_store(cache_folder: Option<PathBuf>) -> Arc<dyn RecordStore> {
        let folder = match cache_folder.map_or_else(get_cache_dir, Ok) {
            Ok(folder) => folder,
            Err(e) => {
                warn!("No cache directory available, data will not persist: {}", e);
                return Arc::new(NoopStore::new());
            }
        };
        match ParquetStore::initialize(&folder).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!("Store unavailable, data will not persist: {}", e);
                Arc::new(NoopStore::new())
            }
        }
    }

    /// The full year-by-month matrix of `data_type`.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::DataUnavailable`] when neither the store nor the
    /// remote source can provide the data. Calling again retries.
    pub async fn matrix(&self, data_type: DataType) -> Result<Arc<MonthlyMatrix>, HistoryError> {
        self.loader.load(data_type).await
    }

    /// Per-month averages of `data_type` over the years `from..=to`.
    ///
    /// The range is checked before anything is loaded.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidRange`] for an inverted or out-of-range
    /// year span, or [`HistoryError::DataUnavailable`] when loading fails.
    pub async fn averages(
        &self,
        data_type: DataType,
        from: i32,
        to: i32,
    ) -> Result<MonthlyAverages, HistoryError> {
        validate_range(from, to)?;
        let matrix = self.loader.load(data_type).await?;
        average(&matrix, from, to)
    }

    /// Averages and chart bounds for a UI selection.
    pub async fn chart_data(&self, selection: Selection) -> Result<ChartData, HistoryError> {
        let data_type = selection.data_type();
        let averages = self
            .averages(data_type, selection.from(), selection.to())
            .await?;
        Ok(ChartData {
            averages,
            scale: data_type.chart_scale(),
        })
    }

    /// Waits for pending store writes. Call before the process exits so the
    /// next run finds the data on disk.
    pub async fn shutdown(&self) {
        self.loader.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::error::FetchError;
    use crate::store::memory_store::InMemoryStore;
    use crate::test_support::{serve_once, unreachable_url};
    use crate::types::calendar::{MAX_YEAR, MIN_YEAR, RANGE_LENGTH};
    use crate::types::matrix::RawRecord;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BODY: &str = r#"[
        {"t":"1881-01-15","v":10},
        {"t":"1881-01-20","v":20},
        {"t":"1880-06-01","v":99},
        {"t":"1882-02-10","v":28}
    ]"#;

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RemoteSource for CountingSource {
        async fn fetch_raw(&self, _data_type: DataType) -> Result<Vec<RawRecord>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(serde_json::from_str(BODY).unwrap())
        }
    }

    #[tokio::test]
    async fn test_invalid_range_skips_loading() {
        let source = Arc::new(CountingSource::default());
        let client = MeteoHistory::with_parts(Arc::new(InMemoryStore::new()), source.clone());

        let err = client
            .averages(DataType::Temperature, 2006, 1881)
            .await
            .unwrap_err();
        assert!(matches!(err, HistoryError::InvalidRange { .. }));
        let err = client
            .averages(DataType::Temperature, 1800, 1900)
            .await
            .unwrap_err();
        assert!(matches!(err, HistoryError::InvalidRange { .. }));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_chart_data_for_selection() {
        let source = Arc::new(CountingSource::default());
        let client = MeteoHistory::with_parts(Arc::new(InMemoryStore::new()), source.clone());
        let selection = Selection::new(DataType::Precipitation, 1881, 1882).unwrap();

        let chart = client.chart_data(selection).await.unwrap();

        assert_eq!(chart.scale, DataType::Precipitation.chart_scale());
        assert_eq!(chart.averages[0], 15.0);
        assert_eq!(chart.averages[1], 14.0);
        assert_eq!(chart.averages[5], 0.0);

        let whole = client
            .averages(DataType::Precipitation, MIN_YEAR, MAX_YEAR)
            .await
            .unwrap();
        assert_eq!(whole[0], 30.0 / RANGE_LENGTH as f64);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_builder_persists_between_clients() {
        let cache = tempfile::tempdir().unwrap();
        let base_url = serve_once("200 OK", BODY.as_bytes().to_vec()).await;

        let client = MeteoHistory::builder()
            .base_url(base_url)
            .cache_folder(cache.path().to_path_buf())
            .build()
            .await
            .unwrap();
        let first = client
            .averages(DataType::Temperature, 1881, 1881)
            .await
            .unwrap();
        assert_eq!(first[0], 30.0 / 31.0);
        client.shutdown().await;

        // The endpoint is gone; the second client must be served by the store.
        let offline = MeteoHistory::builder()
            .base_url(unreachable_url().await)
            .cache_folder(cache.path().to_path_buf())
            .build()
            .await
            .unwrap();
        let second = offline
            .averages(DataType::Temperature, 1881, 1881)
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unavailable_store_degrades_to_remote() {
        let cache = tempfile::tempdir().unwrap();
        let blocker = cache.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();
        let base_url = serve_once("200 OK", BODY.as_bytes().to_vec()).await;

        let client = MeteoHistory::builder()
            .base_url(base_url)
            .cache_folder(blocker)
            .build()
            .await
            .unwrap();
        let averages = client
            .averages(DataType::Temperature, 1882, 1882)
            .await
            .unwrap();
        assert_eq!(averages[1], 1.0);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_data_unavailable() {
        let client = MeteoHistory::builder()
            .base_url(unreachable_url().await)
            .persist(false)
            .build()
            .await
            .unwrap();

        let err = client.matrix(DataType::Precipitation).await.unwrap_err();
        match err {
            HistoryError::DataUnavailable { data_type, source } => {
                assert_eq!(data_type, DataType::Precipitation);
                assert!(matches!(*source, FetchError::NetworkRequest(..)));
            }
            other => panic!("expected DataUnavailable, got {:?}", other),
        }
    }
}
