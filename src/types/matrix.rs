//! Record and aggregate types flowing through the pipeline: raw daily records,
//! the dense year-by-month matrix and the 12-month averages derived from it.

use crate::types::calendar::{year_offset, MIN_YEAR, RANGE_LENGTH};
use chrono::NaiveDate;
use serde::Deserialize;
use std::ops::Index;

/// Twelve monthly values, January first.
pub type MonthRow = [f64; 12];

/// One daily sample as served by the remote endpoint.
///
/// The wire format is `{ "t": "YYYY-MM-DD", "v": number }`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "t")]
    pub date: NaiveDate,
    #[serde(rename = "v")]
    pub value: f64,
}

impl RawRecord {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Dense year-by-month aggregates covering every year of the supported horizon.
///
/// Row `i` holds the year `MIN_YEAR + i`; years without data are all zeros, so
/// every year in range always has a row.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyMatrix {
    rows: Vec<MonthRow>,
}

impl MonthlyMatrix {
    /// A matrix with every month of every year set to zero.
    pub fn zeroed() -> Self {
        Self {
            rows: vec![[0.0; 12]; RANGE_LENGTH],
        }
    }

    /// Rebuilds a matrix from persisted rows.
    ///
    /// Returns `None` unless exactly one row per supported year is given.
    pub fn from_rows(rows: Vec<MonthRow>) -> Option<Self> {
        (rows.len() == RANGE_LENGTH).then_some(Self { rows })
    }

    /// The row for `year`, or `None` outside the supported horizon.
    pub fn year(&self, year: i32) -> Option<&MonthRow> {
        year_offset(year).map(|offset| &self.rows[offset])
    }

    /// All rows, oldest year first.
    pub fn rows(&self) -> &[MonthRow] {
        &self.rows
    }

    /// Iterates `(year, row)` pairs, oldest year first.
    pub fn iter_years(&self) -> impl Iterator<Item = (i32, &MonthRow)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(offset, row)| (MIN_YEAR + offset as i32, row))
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [MonthRow] {
        &mut self.rows
    }
}

/// Per-month averages over a range of years, January first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyAverages(pub(crate) MonthRow);

impl MonthlyAverages {
    pub fn values(&self) -> &MonthRow {
        &self.0
    }

    pub fn into_inner(self) -> MonthRow {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

/// Indexed by `month - 1`.
impl Index<usize> for MonthlyAverages {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::calendar::MAX_YEAR;

    #[test]
    fn test_deserialize_wire_record() {
        let record: RawRecord = serde_json::from_str(r#"{"t":"1881-01-15","v":-3.5}"#).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(1881, 1, 15).unwrap());
        assert_eq!(record.value, -3.5);
    }

    #[test]
    fn test_from_rows_requires_full_horizon() {
        assert!(MonthlyMatrix::from_rows(vec![[1.0; 12]; RANGE_LENGTH]).is_some());
        assert!(MonthlyMatrix::from_rows(vec![[1.0; 12]; RANGE_LENGTH - 1]).is_none());
        assert!(MonthlyMatrix::from_rows(Vec::new()).is_none());
    }

    #[test]
    fn test_year_lookup() {
        let mut matrix = MonthlyMatrix::zeroed();
        matrix.rows_mut()[RANGE_LENGTH - 1][11] = 4.0;
        assert_eq!(matrix.year(MAX_YEAR).map(|row| row[11]), Some(4.0));
        assert!(matrix.year(MAX_YEAR + 1).is_none());
        let (first_year, _) = matrix.iter_years().next().unwrap();
        assert_eq!(first_year, MIN_YEAR);
    }
}
