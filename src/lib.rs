//! Monthly averages of historic temperature and precipitation.
//!
//! Daily records are downloaded once per data type, folded into a dense
//! year-by-month matrix, stored locally and averaged over any year range
//! between [`MIN_YEAR`] and [`MAX_YEAR`].

mod error;
mod meteohistory;
mod remote;
mod store;
mod types;
mod utils;
mod weather_data;

#[cfg(test)]
mod test_support;

pub use error::HistoryError;
pub use meteohistory::*;

pub use remote::error::FetchError;
pub use remote::http_source::HttpSource;
pub use remote::RemoteSource;

pub use store::error::StoreError;
pub use store::memory_store::InMemoryStore;
pub use store::noop_store::NoopStore;
pub use store::parquet_store::ParquetStore;
pub use store::RecordStore;

pub use types::calendar::{
    available_years, days_in_month, is_leap_year, MAX_YEAR, MIN_YEAR, RANGE_LENGTH,
};
pub use types::data_type::{ChartScale, DataType, UnknownDataType};
pub use types::matrix::{MonthRow, MonthlyAverages, MonthlyMatrix, RawRecord};
pub use types::selection::Selection;

pub use weather_data::aggregator::average;
pub use weather_data::loader::MatrixLoader;
pub use weather_data::normalizer::normalize;
