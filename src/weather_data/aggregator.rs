use crate::error::HistoryError;
use crate::types::calendar::{MAX_YEAR, MIN_YEAR};
use crate::types::matrix::{MonthlyAverages, MonthlyMatrix};

/// Checks `MIN_YEAR <= from <= to <= MAX_YEAR`.
pub(crate) fn validate_range(from: i32, to: i32) -> Result<(), HistoryError> {
    if MIN_YEAR <= from && from <= to && to <= MAX_YEAR {
        Ok(())
    } else {
        Err(HistoryError::InvalidRange { from, to })
    }
}

/// Averages each month over the years `from..=to`.
///
/// A single-year range returns that year's row.
///
/// # Errors
///
/// Returns [`HistoryError::InvalidRange`] when the range is inverted or leaves
/// the supported years.
///
/// ```
/// use meteohistory::{average, MonthlyMatrix};
///
/// let matrix = MonthlyMatrix::zeroed();
/// let averages = average(&matrix, 1950, 1959).unwrap();
/// assert_eq!(averages.values(), &[0.0; 12]);
/// assert!(average(&matrix, 2006, 1881).is_err());
/// ```
pub fn average(matrix: &MonthlyMatrix, from: i32, to: i32) -> Result<MonthlyAverages, HistoryError> {
    validate_range(from, to)?;
    let start = (from - MIN_YEAR) as usize;
    let end = (to - MIN_YEAR) as usize;
    let slice = &matrix.rows()[start..=end];

    let mut sums = [0.0; 12];
    for row in slice {
        for (sum, value) in sums.iter_mut().zip(row) {
            *sum += value;
        }
    }
    let count = slice.len() as f64;
    Ok(MonthlyAverages(sums.map(|sum| sum / count)))
}
