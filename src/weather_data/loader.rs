use crate::error::HistoryError;
use crate::remote::error::FetchError;
use crate::remote::RemoteSource;
use crate::store::RecordStore;
use crate::types::calendar::RANGE_LENGTH;
use crate::types::data_type::DataType;
use crate::types::matrix::MonthlyMatrix;
use crate::weather_data::normalizer::normalize;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use log::{info, warn};
use std::collections::{hash_map::Entry, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::task::TaskTracker;

type LoadOutcome = Result<Arc<MonthlyMatrix>, Arc<FetchError>>;
type PendingLoad = Shared<BoxFuture<'static, LoadOutcome>>;

/// State of one data type in the memo. A data type without an entry has never
/// been requested, or its last load failed.
#[derive(Clone)]
enum MemoEntry {
    /// A load is in flight; every caller awaits this same handle.
    Pending(PendingLoad),
    Resolved(Arc<MonthlyMatrix>),
}

type Memo = Arc<Mutex<HashMap<DataType, MemoEntry>>>;

/// Resolves the matrix of a data type from memory, the store or the remote
/// source, in that order.
///
/// At most one load per data type is in flight: callers arriving while a load
/// runs await the same handle. Successful loads stay memoized for the lifetime
/// of the loader; failed loads are forgotten so the next call retries.
pub struct MatrixLoader {
    store: Arc<dyn RecordStore>,
    source: Arc<dyn RemoteSource>,
    memo: Memo,
    write_backs: TaskTracker,
}

impl MatrixLoader {
    pub fn new(store: Arc<dyn RecordStore>, source: Arc<dyn RemoteSource>) -> Self {
        Self {
            store,
            source,
            memo: Arc::new(Mutex::new(HashMap::new())),
            write_backs: TaskTracker::new(),
        }
    }

    /// Returns the matrix for `data_type`, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::DataUnavailable`] when the store has nothing and
    /// the remote fetch fails. The failure is not cached.
    pub async fn load(&self, data_type: DataType) -> Result<Arc<MonthlyMatrix>, HistoryError> {
        let pending = {
            let mut memo = self.memo.lock().await;
            match memo.entry(data_type) {
                Entry::Occupied(entry) => match entry.get() {
                    MemoEntry::Resolved(matrix) => return Ok(Arc::clone(matrix)),
                    MemoEntry::Pending(pending) => pending.clone(),
                },
                Entry::Vacant(entry) => {
                    // Registered before any I/O so concurrent callers join this load.
                    let pending = self.start_load(data_type);
                    entry.insert(MemoEntry::Pending(pending.clone()));
                    pending
                }
            }
        };

        pending
            .await
            .map_err(|source| HistoryError::DataUnavailable { data_type, source })
    }

    /// Waits for every write-back started so far to finish.
    pub async fn shutdown(&self) {
        self.write_backs.close();
        self.write_backs.wait().await;
        self.write_backs.reopen();
    }

    fn start_load(&self, data_type: DataType) -> PendingLoad {
        let store = Arc::clone(&self.store);
        let source = Arc::clone(&self.source);
        let memo = Arc::clone(&self.memo);
        let write_backs = self.write_backs.clone();

        async move {
            let outcome = resolve(data_type, store, source, &write_backs).await;
            // Settle the memo before any awaiting caller sees the outcome.
            let mut memo = memo.lock().await;
            match &outcome {
                Ok(matrix) => {
                    memo.insert(data_type, MemoEntry::Resolved(Arc::clone(matrix)));
                }
                Err(e) => {
                    warn!("Loading {} data failed, next request retries: {}", data_type, e);
                    memo.remove(&data_type);
                }
            }
            outcome
        }
        .boxed()
        .shared()
    }
}

/// Store first, remote second. Store faults count as misses.
async fn resolve(
    data_type: DataType,
    store: Arc<dyn RecordStore>,
    source: Arc<dyn RemoteSource>,
    write_backs: &TaskTracker,
) -> LoadOutcome {
    match store.read_all(data_type).await {
        Ok(rows) if rows.is_empty() => {
            info!("Store miss for {} data", data_type);
        }
        Ok(rows) => {
            let row_count = rows.len();
            match MonthlyMatrix::from_rows(rows) {
                Some(matrix) => {
                    info!("Store hit for {} data", data_type);
                    return Ok(Arc::new(matrix));
                }
                None => warn!(
                    "Store holds {} {} rows instead of {}, fetching again",
                    row_count, data_type, RANGE_LENGTH
                ),
            }
        }
        Err(e) => warn!("Store read for {} data failed, fetching instead: {}", data_type, e),
    }

    let records = source.fetch_raw(data_type).await.map_err(Arc::new)?;
    let matrix = Arc::new(normalize(data_type, &records));
    info!(
        "Normalized {} {} records into monthly values",
        records.len(),
        data_type
    );

    let to_store = Arc::clone(&matrix);
    write_backs.spawn(async move {
        match store.write_all(data_type, &to_store).await {
            Ok(()) => info!("Persisted {} data", data_type),
            Err(e) => warn!("Persisting {} data failed: {}", data_type, e),
        }
    });

    Ok(matrix)
}
