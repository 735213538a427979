use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meteohistory::{
    average, normalize, DataType, FetchError, InMemoryStore, MatrixLoader, RawRecord,
    RemoteSource, MAX_YEAR, MIN_YEAR,
};
use std::sync::Arc;

/// One sample per day over the whole horizon.
fn daily_records() -> Vec<RawRecord> {
    let first = NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).unwrap();
    let last = NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31).unwrap();
    first
        .iter_days()
        .take_while(|date| *date <= last)
        .enumerate()
        .map(|(i, date)| RawRecord::new(date, (i as f64 / 58.1).sin() * 15.0 + 8.0))
        .collect()
}

struct StaticSource(Vec<RawRecord>);

#[async_trait::async_trait]
impl RemoteSource for StaticSource {
    async fn fetch_raw(&self, _data_type: DataType) -> Result<Vec<RawRecord>, FetchError> {
        Ok(self.0.clone())
    }
}

fn bench_pipeline(c: &mut Criterion) {
    let records = daily_records();
    let matrix = normalize(DataType::Temperature, &records);

    c.bench_function("normalize_temperature", |b| {
        b.iter(|| normalize(black_box(DataType::Temperature), black_box(&records)))
    });
    c.bench_function("average_full_range", |b| {
        b.iter(|| average(black_box(&matrix), MIN_YEAR, MAX_YEAR))
    });

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let loader = MatrixLoader::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(StaticSource(records.clone())),
    );
    runtime.block_on(async {
        loader.load(DataType::Temperature).await.unwrap();
    });
    c.bench_function("load_memoized", |b| {
        b.to_async(&runtime)
            .iter(|| loader.load(black_box(DataType::Temperature)))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
