use crate::datasets::dataset::Dataset;
use crate::datasets::error::DatasetError;
use crate::types::pollutant::Unit;
use crate::types::series::{Climatology, ClimatologyPoint};
use log::debug;
use polars::prelude::*;
use std::collections::BTreeSet;

const TIMESTAMP: &str = "timestamp";
const STATION: &str = "station";
const VALUE: &str = "value";
const DAY_OF_YEAR: &str = "day_of_year";
const MEAN: &str = "mean";

/// Melts the selected station columns into one long (timestamp, station, value) frame,
/// one row per observation per station. Missing values are kept as nulls.
fn long_format(dataset: &Dataset, stations: &[&str]) -> PolarsResult<LazyFrame> {
    let per_station: Vec<LazyFrame> = stations
        .iter()
        .map(|station| {
            dataset.frame().clone().lazy().select([
                col(dataset.time_column()).alias(TIMESTAMP),
                lit(*station).alias(STATION),
                col(*station).fill_nan(lit(NULL)).alias(VALUE),
            ])
        })
        .collect();
    concat(per_station, UnionArgs::default())
}

/// Computes the mean annual course of a pollutant over a set of stations.
///
/// Stations in `station_codes` that are not columns of `dataset` are ignored; if none
/// remain, `Ok(None)` is returned. Every observation of the remaining stations is assigned
/// its calendar day of year (1..=366) and averaged per day, mixing all stations and all
/// years. Missing values do not count towards a mean, but a day where every value is
/// missing still appears with a `None` mean. There is no minimum number of samples.
///
/// The result does not depend on the order of `station_codes`.
///
/// # Errors
///
/// Only Polars failures while building or collecting the aggregation.
pub fn aggregate(
    dataset: &Dataset,
    station_codes: &[impl AsRef<str>],
    pollutant: &str,
) -> Result<Option<Climatology>, DatasetError> {
    let valid: BTreeSet<&str> = station_codes
        .iter()
        .map(|station| station.as_ref())
        .filter(|station| dataset.has_station(station))
        .collect();
    if valid.is_empty() {
        debug!(
            "None of {} requested stations present in {} dataset",
            station_codes.len(),
            dataset.pollutant()
        );
        return Ok(None);
    }
    let stations: Vec<&str> = valid.into_iter().collect();

    let means = long_format(dataset, &stations)?
        .filter(col(TIMESTAMP).is_not_null())
        .with_column(
            col(TIMESTAMP)
                .dt()
                .ordinal_day()
                .cast(DataType::Int32)
                .alias(DAY_OF_YEAR),
        )
        .group_by([col(DAY_OF_YEAR)])
        .agg([col(VALUE).mean().alias(MEAN)])
        .sort([DAY_OF_YEAR], SortMultipleOptions::default())
        .collect()?;

    let days = means.column(DAY_OF_YEAR)?.i32()?;
    let values = means.column(MEAN)?.f64()?;
    let points = days
        .into_iter()
        .zip(values.into_iter())
        .filter_map(|(day, mean)| {
            Some(ClimatologyPoint {
                day_of_year: u32::try_from(day?).ok()?,
                mean,
            })
        })
        .collect();

    Ok(Some(Climatology {
        pollutant: pollutant.to_string(),
        unit: Unit::for_pollutant(pollutant),
        stations: stations.into_iter().map(str::to_string).collect(),
        points,
    }))
}
