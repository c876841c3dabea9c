//! Ephemeral views derived from a dataset for a single request.

use crate::types::pollutant::Unit;
use chrono::NaiveDateTime;

/// Observations of one station for one pollutant, with missing entries removed.
///
/// `timestamps` and `values` always have the same length and keep the order of the
/// dataset's time index.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub station: String,
    pub pollutant: String,
    pub unit: Unit,
    pub timestamps: Vec<NaiveDateTime>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(timestamp, value)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.timestamps.iter().copied().zip(self.values.iter().copied())
    }
}

/// Mean concentration for one day of the year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimatologyPoint {
    /// Calendar ordinal day, 1..=366.
    pub day_of_year: u32,
    /// `None` when every observation falling on this day was missing.
    pub mean: Option<f64>,
}

/// Mean annual course of a pollutant over a set of stations, one point per day of year,
/// sorted by day.
#[derive(Debug, Clone, PartialEq)]
pub struct Climatology {
    pub pollutant: String,
    pub unit: Unit,
    /// Requested stations present in the dataset, sorted. A station whose values were all
    /// missing is still listed.
    pub stations: Vec<String>,
    pub points: Vec<ClimatologyPoint>,
}

impl Climatology {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
