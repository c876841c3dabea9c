use crate::datasets::dataset::Dataset;
use crate::datasets::error::DatasetError;
use crate::types::pollutant::Unit;
use crate::types::series::TimeSeries;
use chrono::DateTime;
use polars::prelude::*;

const TIMESTAMP_MS: &str = "timestamp_ms";
const VALUE: &str = "value";

/// Extracts one station's observations from `dataset`, dropping missing values.
///
/// Returns `Ok(None)` when `station` is not a column of the dataset. The unit is looked up
/// by `pollutant` name and falls back to µg/m³ for unknown names.
///
/// # Errors
///
/// Only Polars failures while collecting the column are reported as errors.
pub fn extract(
    dataset: &Dataset,
    station: &str,
    pollutant: &str,
) -> Result<Option<TimeSeries>, DatasetError> {
    if !dataset.has_station(station) {
        return Ok(None);
    }

    let filtered = dataset
        .frame()
        .clone()
        .lazy()
        .select([
            col(dataset.time_column())
                .cast(DataType::Int64)
                .alias(TIMESTAMP_MS),
            col(station).alias(VALUE),
        ])
        .filter(
            col(TIMESTAMP_MS)
                .is_not_null()
                .and(col(VALUE).is_not_null())
                .and(col(VALUE).is_not_nan()),
        )
        .collect()?;

    let timestamps = filtered.column(TIMESTAMP_MS)?.i64()?;
    let values = filtered.column(VALUE)?.f64()?;

    let (timestamps, values): (Vec<_>, Vec<_>) = timestamps
        .into_iter()
        .zip(values.into_iter())
        .filter_map(|(ms, value)| {
            let timestamp = DateTime::from_timestamp_millis(ms?)?.naive_utc();
            Some((timestamp, value?))
        })
        .unzip();

    Ok(Some(TimeSeries {
        station: station.to_string(),
        pollutant: pollutant.to_string(),
        unit: Unit::for_pollutant(pollutant),
        timestamps,
        values,
    }))
}
