//! Defines the measurement categories served by the dataset and their
//! per-category settings (endpoint path, store collection, chart scale).

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A measurement category of the historic dataset.
///
/// Selects both the store collection and the endpoint path the daily records
/// are fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Daily mean air temperature in °C. Stored as the monthly mean of daily values.
    Temperature,
    /// Daily precipitation in mm. Stored as the monthly total.
    Precipitation,
}

impl DataType {
    /// Every data type, in display order.
    pub const ALL: [DataType; 2] = [DataType::Temperature, DataType::Precipitation];

    pub(crate) fn path_segment(&self) -> &'static str {
        match self {
            DataType::Temperature => "temperature",
            DataType::Precipitation => "precipitation",
        }
    }

    /// Name of the store collection holding this data type.
    pub(crate) fn collection_name(&self) -> &'static str {
        self.path_segment()
    }

    /// Whether monthly sums are divided by the number of days in the month.
    ///
    /// Daily temperatures are averaged, precipitation is accumulated.
    pub fn normalizes_by_day_count(&self) -> bool {
        matches!(self, DataType::Temperature)
    }

    /// Vertical bounds a chart of this data type is drawn with.
    ///
    /// ```
    /// use meteohistory::DataType;
    ///
    /// let scale = DataType::Precipitation.chart_scale();
    /// assert_eq!((scale.max, scale.min), (100.0, -10.0));
    /// ```
    pub fn chart_scale(&self) -> ChartScale {
        match self {
            DataType::Temperature => ChartScale {
                max: 50.0,
                min: -50.0,
            },
            DataType::Precipitation => ChartScale {
                max: 100.0,
                min: -10.0,
            },
        }
    }
}

/// Formats a `DataType` using its endpoint path segment.
///
/// ```
/// use meteohistory::DataType;
///
/// assert_eq!(DataType::Temperature.to_string(), "temperature");
/// ```
impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown data type '{0}', expected 'temperature' or 'precipitation'")]
pub struct UnknownDataType(pub String);

impl FromStr for DataType {
    type Err = UnknownDataType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .into_iter()
            .find(|data_type| data_type.path_segment().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDataType(s.to_string()))
    }
}

/// Upper and lower value bounds of a chart axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScale {
    pub max: f64,
    pub min: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_button_values() {
        assert_eq!("temperature".parse::<DataType>(), Ok(DataType::Temperature));
        assert_eq!(
            " Precipitation ".parse::<DataType>(),
            Ok(DataType::Precipitation)
        );
        assert_eq!(
            "wind".parse::<DataType>(),
            Err(UnknownDataType("wind".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for data_type in DataType::ALL {
            assert_eq!(data_type.to_string().parse::<DataType>(), Ok(data_type));
        }
    }

    #[test]
    fn test_only_temperature_is_day_normalized() {
        assert!(DataType::Temperature.normalizes_by_day_count());
        assert!(!DataType::Precipitation.normalizes_by_day_count());
    }

    #[test]
    fn test_chart_scales() {
        assert_eq!(
            DataType::Temperature.chart_scale(),
            ChartScale {
                max: 50.0,
                min: -50.0
            }
        );
        assert_eq!(
            DataType::Precipitation.chart_scale(),
            ChartScale {
                max: 100.0,
                min: -10.0
            }
        );
    }
}
