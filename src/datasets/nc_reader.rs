//! Reads the netCDF files written by the export pipeline.
//!
//! Every one-dimensional variable along the file's main dimension becomes one column:
//! variables with CF time units (`<unit> since <reference>`) are decoded to `Datetime(ms)`,
//! string variables become `String` columns and everything else `Float64`. Entries equal to
//! the variable's `_FillValue` or `missing_value` are read as nulls.

use crate::datasets::error::ReadError;
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use netcdf::{AttributeValue, Variable};
use polars::prelude::*;
use std::path::Path;

const REFERENCE_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Decoded CF time units.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TimeUnits {
    millis_per_unit: f64,
    reference: NaiveDateTime,
}

impl TimeUnits {
    /// `Ok(None)` when `units` does not describe time at all.
    fn parse(variable: &str, units: &str) -> Result<Option<Self>, ReadError> {
        let Some((unit, reference)) = units.split_once(" since ") else {
            return Ok(None);
        };
        millis_per_unit(unit.trim())
            .zip(parse_reference(reference))
            .map(|(millis_per_unit, reference)| {
                Some(Self {
                    millis_per_unit,
                    reference,
                })
            })
            .ok_or_else(|| ReadError::TimeUnits {
                variable: variable.to_string(),
                units: units.to_string(),
            })
    }

    fn to_millis(self, offset: f64) -> Option<i64> {
        if !offset.is_finite() {
            return None;
        }
        let base = self.reference.and_utc().timestamp_millis();
        Some(base + (offset * self.millis_per_unit).round() as i64)
    }
}

fn millis_per_unit(unit: &str) -> Option<f64> {
    let millis = match unit.to_ascii_lowercase().as_str() {
        "days" | "day" | "d" => 86_400_000.0,
        "hours" | "hour" | "hr" | "h" => 3_600_000.0,
        "minutes" | "minute" | "min" => 60_000.0,
        "seconds" | "second" | "sec" | "s" => 1_000.0,
        "milliseconds" | "millisecond" | "ms" => 1.0,
        "microseconds" | "microsecond" | "us" => 1e-3,
        "nanoseconds" | "nanosecond" | "ns" => 1e-6,
        _ => return None,
    };
    Some(millis)
}

fn parse_reference(text: &str) -> Option<NaiveDateTime> {
    let text = text
        .trim()
        .trim_end_matches("UTC")
        .trim_end_matches("+00:00")
        .trim_end_matches('Z')
        .trim();
    REFERENCE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn text_attribute(variable: &Variable, name: &str) -> Option<String> {
    match variable.attribute(name)?.value().ok()? {
        AttributeValue::Str(text) => Some(text),
        _ => None,
    }
}

fn numeric_attribute(value: AttributeValue) -> Option<f64> {
    match value {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(v.into()),
        AttributeValue::Longlong(v) => Some(v as f64),
        AttributeValue::Ulonglong(v) => Some(v as f64),
        AttributeValue::Int(v) => Some(v.into()),
        AttributeValue::Uint(v) => Some(v.into()),
        AttributeValue::Short(v) => Some(v.into()),
        AttributeValue::Ushort(v) => Some(v.into()),
        AttributeValue::Schar(v) => Some(v.into()),
        AttributeValue::Uchar(v) => Some(v.into()),
        _ => None,
    }
}

fn fill_values(variable: &Variable) -> Vec<f64> {
    ["_FillValue", "missing_value"]
        .iter()
        .filter_map(|name| variable.attribute(name)?.value().ok())
        .filter_map(numeric_attribute)
        .collect()
}

fn read_column(variable: &Variable, len: usize) -> Result<Column, ReadError> {
    let name = variable.name();

    let raw = match variable.get_values::<f64, _>(..) {
        Ok(raw) => raw,
        Err(numeric_error) => {
            let strings: Result<Vec<String>, _> =
                (0..len).map(|i| variable.get_string([i])).collect();
            return match strings {
                Ok(strings) => Ok(Column::new(name.into(), strings)),
                Err(_) => Err(numeric_error.into()),
            };
        }
    };

    let fill = fill_values(variable);
    let values: Vec<Option<f64>> = raw
        .into_iter()
        .map(|value| (!fill.contains(&value)).then_some(value))
        .collect();

    let time_units = match text_attribute(variable, "units") {
        Some(units) => TimeUnits::parse(&name, &units)?,
        None => None,
    };
    match time_units {
        Some(units) => {
            let millis: Vec<Option<i64>> = values
                .into_iter()
                .map(|value| value.and_then(|offset| units.to_millis(offset)))
                .collect();
            Ok(Column::new(name.into(), millis)
                .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?)
        }
        None => Ok(Column::new(name.into(), values)),
    }
}

/// The dimension shared by the most one-dimensional variables; the first seen on ties.
fn main_dimension(variables: &[Variable]) -> Option<(String, usize)> {
    let mut counts: Vec<(String, usize, usize)> = Vec::new();
    for variable in variables {
        let dimension = &variable.dimensions()[0];
        let name = dimension.name();
        match counts.iter_mut().find(|(seen, _, _)| *seen == name) {
            Some((_, _, count)) => *count += 1,
            None => counts.push((name, dimension.len(), 1)),
        }
    }
    counts
        .into_iter()
        .rev()
        .max_by_key(|(_, _, count)| *count)
        .map(|(name, len, _)| (name, len))
}

/// Reads all one-dimensional variables along the file's main dimension into one frame.
pub fn read_netcdf(path: &Path) -> Result<DataFrame, ReadError> {
    let file = netcdf::open(path)?;
    let variables: Vec<Variable> = file
        .variables()
        .filter(|variable| variable.dimensions().len() == 1)
        .collect();
    let (dimension, len) = main_dimension(&variables).ok_or(ReadError::NoVariables)?;

    let mut columns = Vec::with_capacity(variables.len());
    for variable in &variables {
        if variable.dimensions()[0].name() != dimension {
            debug!(
                "Skipping variable '{}' of {:?}, not along '{}'",
                variable.name(),
                path,
                dimension
            );
            continue;
        }
        columns.push(read_column(variable, len)?);
    }
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::Path;

    pub const FILL_VALUE: f64 = -999.0;

    /// Writes a pipeline-style dataset: a `Data` time coordinate and one variable per station.
    pub fn write_dataset(
        path: &Path,
        time_units: &str,
        offsets: &[f64],
        stations: &[(&str, Vec<f64>)],
    ) -> Result<(), netcdf::Error> {
        let mut file = netcdf::create(path)?;
        file.add_dimension("Data", offsets.len())?;
        {
            let mut time = file.add_variable::<f64>("Data", &["Data"])?;
            time.put_attribute("units", time_units)?;
            time.put_values(offsets, ..)?;
        }
        for (station, values) in stations {
            let mut variable = file.add_variable::<f64>(station, &["Data"])?;
            variable.put_attribute("_FillValue", FILL_VALUE)?;
            variable.put_values(values.as_slice(), ..)?;
        }
        Ok(())
    }

    /// Writes a station table the way a pandas frame is exported: an `index` dimension with
    /// one string variable per column.
    pub fn write_metadata(
        path: &Path,
        station_column: &str,
        location_column: &str,
        records: &[(&str, &str)],
    ) -> Result<(), netcdf::Error> {
        let mut file = netcdf::create(path)?;
        file.add_dimension("index", records.len())?;
        {
            let positions: Vec<i64> = (0..records.len() as i64).collect();
            let mut index = file.add_variable::<i64>("index", &["index"])?;
            index.put_values(positions.as_slice(), ..)?;
        }
        {
            let mut stations = file.add_string_variable(station_column, &["index"])?;
            for (i, (station, _)) in records.iter().enumerate() {
                stations.put_string(station, [i])?;
            }
        }
        {
            let mut locations = file.add_string_variable(location_column, &["index"])?;
            for (i, (_, location)) in records.iter().enumerate() {
                locations.put_string(location, [i])?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{write_dataset, write_metadata, FILL_VALUE};
    use super::*;
    use std::error::Error;
    use tempfile::tempdir;

    fn datetime(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_time_units() -> Result<(), Box<dyn Error>> {
        let days = TimeUnits::parse("Data", "days since 2021-01-01")?.unwrap();
        assert_eq!(days.reference, datetime(2021, 1, 1, 0));
        assert_eq!(
            days.to_millis(2.0),
            Some(datetime(2021, 1, 3, 0).and_utc().timestamp_millis())
        );

        let hours = TimeUnits::parse("Data", "hours since 2000-01-01T06:00:00Z")?.unwrap();
        assert_eq!(
            hours.to_millis(18.0),
            Some(datetime(2000, 1, 2, 0).and_utc().timestamp_millis())
        );
        assert_eq!(hours.to_millis(f64::NAN), None);

        let seconds = TimeUnits::parse("t", "seconds since 1970-01-01 00:00:00")?.unwrap();
        assert_eq!(seconds.to_millis(1.5), Some(1_500));

        assert_eq!(TimeUnits::parse("S1", "ug/m3")?, None);
        assert!(matches!(
            TimeUnits::parse("Data", "fortnights since 2000-01-01"),
            Err(ReadError::TimeUnits { .. })
        ));
        assert!(TimeUnits::parse("Data", "days since yesterday").is_err());
        Ok(())
    }

    #[test]
    fn test_read_dataset_file() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("PM10_24g_merged.nc");
        write_dataset(
            &path,
            "days since 2021-01-01",
            &[0.0, 1.0, 2.0],
            &[
                ("S1", vec![10.0, FILL_VALUE, 12.0]),
                ("S2", vec![20.0, 21.0, f64::NAN]),
            ],
        )?;

        let frame = read_netcdf(&path)?;
        assert_eq!(frame.shape(), (3, 3));
        assert_eq!(
            frame.column("Data")?.dtype(),
            &DataType::Datetime(TimeUnit::Milliseconds, None)
        );
        let times = frame
            .column("Data")?
            .cast(&DataType::Int64)?
            .i64()?
            .get(1);
        assert_eq!(times, Some(datetime(2021, 1, 2, 0).and_utc().timestamp_millis()));
        assert_eq!(frame.column("S1")?.null_count(), 1);
        assert_eq!(frame.column("S1")?.f64()?.get(2), Some(12.0));
        Ok(())
    }

    #[test]
    fn test_read_metadata_file() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("metadata.nc");
        write_metadata(
            &path,
            "kod_stacji",
            "miejscowość",
            &[("S1", "Łódź"), ("S2", "Łódź"), ("S3", "Kielce")],
        )?;

        let frame = read_netcdf(&path)?;
        assert_eq!(frame.height(), 3);
        let stations = frame.column("kod_stacji")?.str()?;
        let locations = frame.column("miejscowość")?.str()?;
        assert_eq!(stations.get(2), Some("S3"));
        assert_eq!(locations.get(0), Some("Łódź"));
        Ok(())
    }

    #[test]
    fn test_garbage_is_an_error() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("broken.nc");
        std::fs::write(&path, b"not netcdf at all")?;
        assert!(matches!(read_netcdf(&path), Err(ReadError::NetCdf(_))));
        Ok(())
    }
}
