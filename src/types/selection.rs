//! The caller-selected view: which data type and which inclusive year range
//! to average over.

use crate::error::HistoryError;
use crate::types::calendar::{MAX_YEAR, MIN_YEAR};
use crate::types::data_type::DataType;
use crate::weather_data::aggregator::validate_range;
use std::ops::RangeInclusive;

/// A validated `(data type, from, to)` selection.
///
/// The default selection shows temperature over the whole horizon.
///
/// ```
/// use meteohistory::{DataType, Selection, MAX_YEAR, MIN_YEAR};
///
/// let selection = Selection::default();
/// assert_eq!(selection.data_type(), DataType::Temperature);
/// assert_eq!((selection.from(), selection.to()), (MIN_YEAR, MAX_YEAR));
///
/// assert!(Selection::new(DataType::Precipitation, 1950, 1949).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    data_type: DataType,
    from: i32,
    to: i32,
}

impl Selection {
    /// Creates a selection, rejecting inverted or out-of-horizon ranges with
    /// [`HistoryError::InvalidRange`].
    pub fn new(data_type: DataType, from: i32, to: i32) -> Result<Self, HistoryError> {
        validate_range(from, to)?;
        Ok(Self {
            data_type,
            from,
            to,
        })
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn from(&self) -> i32 {
        self.from
    }

    pub fn to(&self) -> i32 {
        self.to
    }

    pub fn with_data_type(self, data_type: DataType) -> Self {
        Self { data_type, ..self }
    }

    pub fn with_from(self, from: i32) -> Result<Self, HistoryError> {
        Self::new(self.data_type, from, self.to)
    }

    pub fn with_to(self, to: i32) -> Result<Self, HistoryError> {
        Self::new(self.data_type, self.from, to)
    }

    /// Years that may still be picked as the start without passing the end.
    pub fn selectable_from_years(&self) -> RangeInclusive<i32> {
        MIN_YEAR..=self.to
    }

    /// Years that may still be picked as the end without preceding the start.
    pub fn selectable_to_years(&self) -> RangeInclusive<i32> {
        self.from..=MAX_YEAR
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            data_type: DataType::Temperature,
            from: MIN_YEAR,
            to: MAX_YEAR,
        }
    }
}
