use crate::types::calendar::{days_in_month, year_offset, MIN_YEAR};
use crate::types::data_type::DataType;
use crate::types::matrix::{MonthlyMatrix, RawRecord};
use chrono::Datelike;
use log::debug;

/// Folds daily records into a dense year-by-month matrix.
///
/// Values of the same month are summed. Records dated outside the supported
/// horizon are skipped. For data types that normalize by day count (temperature)
/// every monthly sum is then divided by the number of days in that month, turning
/// it into a mean of daily values; other data types keep the monthly total.
///
/// ```
/// use chrono::NaiveDate;
/// use meteohistory::{normalize, DataType, RawRecord};
///
/// let records = [
///     RawRecord::new(NaiveDate::from_ymd_opt(1881, 1, 15).unwrap(), 10.0),
///     RawRecord::new(NaiveDate::from_ymd_opt(1881, 1, 20).unwrap(), 20.0),
/// ];
/// let matrix = normalize(DataType::Temperature, &records);
/// assert_eq!(matrix.year(1881).unwrap()[0], 30.0 / 31.0);
/// ```
pub fn normalize(data_type: DataType, records: &[RawRecord]) -> MonthlyMatrix {
    let mut matrix = MonthlyMatrix::zeroed();
    let rows = matrix.rows_mut();

    let mut dropped = 0usize;
    for record in records {
        let Some(offset) = year_offset(record.date.year()) else {
            dropped += 1;
            continue;
        };
        rows[offset][record.date.month0() as usize] += record.value;
    }
    if dropped > 0 {
        debug!(
            "Skipped {} {} records outside the supported years",
            dropped, data_type
        );
    }

    if data_type.normalizes_by_day_count() {
        for (year, row) in (MIN_YEAR..).zip(rows.iter_mut()) {
            for (month0, sum) in row.iter_mut().enumerate() {
                *sum /= f64::from(days_in_month(month0 as u32 + 1, year));
            }
        }
    }

    matrix
}
