//! Contains the `Dataset` structure, the in-memory table of one pollutant's observations.

use crate::datasets::error::DatasetError;
use crate::types::pollutant::Pollutant;
use polars::prelude::*;
use std::iter;

/// Name of the time column written by the export pipeline.
pub const DEFAULT_TIME_COLUMN: &str = "Data";

/// A wide table of daily observations for one pollutant: one row per timestamp and one
/// `Float64` column per station code.
///
/// All station columns share the time index by construction, since they live in a single
/// frame. The time column is normalised to `Datetime(ms)` and station columns to `Float64`
/// when the dataset is created, so the analysis functions can rely on those types.
///
/// Datasets are created once at start-up and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    pollutant: Pollutant,
    time_column: String,
    stations: Vec<String>,
    frame: DataFrame,
}

impl Dataset {
    /// Wraps a frame read from disk.
    ///
    /// Every column other than `time_column` is treated as a station.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::MissingTimeColumn`] if `time_column` is not present, and
    /// [`DatasetError::DataFrameProcessing`] if the time column or a station column cannot be
    /// cast to its expected type.
    pub fn new(
        pollutant: Pollutant,
        frame: DataFrame,
        time_column: &str,
    ) -> Result<Self, DatasetError> {
        if frame.column(time_column).is_err() {
            return Err(DatasetError::MissingTimeColumn {
                pollutant,
                column: time_column.to_string(),
            });
        }

        let stations: Vec<String> = frame
            .get_column_names()
            .into_iter()
            .filter(|name| name.as_str() != time_column)
            .map(|name| name.to_string())
            .collect();

        let casts: Vec<Expr> = iter::once(
            col(time_column).cast(DataType::Datetime(TimeUnit::Milliseconds, None)),
        )
        .chain(
            stations
                .iter()
                .map(|station| col(station.as_str()).cast(DataType::Float64)),
        )
        .collect();

        let frame = frame.lazy().with_columns(casts).collect()?;

        Ok(Self {
            pollutant,
            time_column: time_column.to_string(),
            stations,
            frame,
        })
    }

    pub fn pollutant(&self) -> Pollutant {
        self.pollutant
    }

    pub fn time_column(&self) -> &str {
        &self.time_column
    }

    /// Station codes, in column order.
    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    pub fn has_station(&self, station: &str) -> bool {
        self.stations.iter().any(|s| s == station)
    }

    /// Number of timestamps in the index.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use std::error::Error;

    #[test]
    fn test_dataset_columns() {
        let ds = constant_dataset(Pollutant::PM10, 2021, 2021, &[("S1", 1.0), ("S2", 2.0)]);
        assert_eq!(ds.stations(), ["S1".to_string(), "S2".to_string()]);
        assert!(ds.has_station("S2"));
        assert!(!ds.has_station("Data"));
        assert!(!ds.has_station("S3"));
        assert_eq!(ds.height(), 365);
        assert_eq!(ds.pollutant(), Pollutant::PM10);
    }

    #[test]
    fn test_dataset_normalises_types() -> Result<(), Box<dyn Error>> {
        let frame = df!(
            "Data" => [
                chrono::NaiveDate::from_ymd_opt(2020, 2, 28).unwrap(),
                chrono::NaiveDate::from_ymd_opt(2020, 2, 29).unwrap(),
            ],
            "S1" => [3i64, 4],
        )?;
        let ds = Dataset::new(Pollutant::NO2, frame, "Data")?;
        assert_eq!(
            ds.frame().column("Data")?.dtype(),
            &DataType::Datetime(TimeUnit::Milliseconds, None)
        );
        assert_eq!(ds.frame().column("S1")?.dtype(), &DataType::Float64);
        Ok(())
    }

    #[test]
    fn test_dataset_without_time_column() -> Result<(), Box<dyn Error>> {
        let frame = df!("S1" => [1.0, 2.0])?;
        let err = Dataset::new(Pollutant::O3, frame, "Data").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingTimeColumn { pollutant: Pollutant::O3, .. }
        ));
        Ok(())
    }
}
