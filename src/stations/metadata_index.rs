//! Maps station codes to the locations (place names) they belong to.

use crate::datasets::loader::{read_frame, FileFormat};
use crate::stations::error::MetadataError;
use bon::bon;
use log::info;
use polars::prelude::DataType;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

pub const DEFAULT_STATION_COLUMN: &str = "kod_stacji";
pub const DEFAULT_LOCATION_COLUMN: &str = "miejscowość";

/// One deduplicated (station, location) pair from the metadata file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StationRecord {
    station: String,
    /// `None` when the metadata has no place recorded for the station.
    location: Option<String>,
}

/// Station → location table, built once at start-up.
///
/// Many stations map to one location; a station may have no location at all.
#[derive(Debug, Clone, Default)]
pub struct MetadataIndex {
    records: Vec<StationRecord>,
}

#[bon]
impl MetadataIndex {
    /// Reads the station metadata file.
    ///
    /// # Arguments
    ///
    /// * `.path(&Path)`: **Required.** The metadata file.
    /// * `.format(FileFormat)`: Optional. Defaults to [`FileFormat::NetCdf`].
    /// * `.station_column(&str)`: Optional. Defaults to `"kod_stacji"`.
    /// * `.location_column(&str)`: Optional. Defaults to `"miejscowość"`.
    ///
    /// # Errors
    ///
    /// Any [`MetadataError`]. Unlike pollutant datasets, the dashboard cannot run without
    /// this file, so callers should treat an error as fatal.
    #[builder]
    pub fn load(
        path: &Path,
        format: Option<FileFormat>,
        station_column: Option<&str>,
        location_column: Option<&str>,
    ) -> Result<Self, MetadataError> {
        let format = format.unwrap_or_default();
        let station_column = station_column.unwrap_or(DEFAULT_STATION_COLUMN);
        let location_column = location_column.unwrap_or(DEFAULT_LOCATION_COLUMN);

        if !path.is_file() {
            return Err(MetadataError::MissingFile(path.to_path_buf()));
        }
        let frame =
            read_frame(path, format).map_err(|e| MetadataError::Read(path.to_path_buf(), e))?;

        let text_column = |name: &str| {
            frame
                .column(name)
                .map_err(|_| MetadataError::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })?
                .cast(&DataType::String)
                .map_err(|e| MetadataError::Column {
                    column: name.to_string(),
                    source: e,
                })
        };
        let stations = text_column(station_column)?;
        let locations = text_column(location_column)?;
        let stations = stations.str().map_err(|e| MetadataError::Column {
            column: station_column.to_string(),
            source: e,
        })?;
        let locations = locations.str().map_err(|e| MetadataError::Column {
            column: location_column.to_string(),
            source: e,
        })?;

        let index = Self::from_records(
            stations
                .into_iter()
                .zip(locations.into_iter())
                .filter_map(|(station, location)| station.map(|s| (s, location))),
        );
        info!(
            "Loaded metadata for {} stations in {} locations from {:?}",
            index.len(),
            index.all_locations().len(),
            path
        );
        Ok(index)
    }
}

impl MetadataIndex {
    /// Builds the index from raw (station, location) pairs, dropping exact duplicates and
    /// keeping the first-seen order.
    ///
    /// # Examples
    ///
    /// ```
    /// use smogwatch::MetadataIndex;
    ///
    /// let index = MetadataIndex::from_records([
    ///     ("A", Some("Warsaw")),
    ///     ("B", Some("Warsaw")),
    ///     ("C", None),
    /// ]);
    /// assert_eq!(index.all_locations(), vec!["Warsaw".to_string()]);
    /// assert_eq!(index.stations_for_location("Warsaw"), vec!["A", "B"]);
    /// ```
    pub fn from_records<I, S, L>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<L>)>,
        S: Into<String>,
        L: Into<String>,
    {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .map(|(station, location)| StationRecord {
                station: station.into(),
                location: location.map(Into::into),
            })
            .filter(|record| seen.insert(record.clone()))
            .collect();
        Self { records }
    }

    /// Station codes recorded for `location`, in metadata order.
    pub fn stations_for_location(&self, location: &str) -> Vec<String> {
        self.records
            .iter()
            .filter(|record| record.location.as_deref() == Some(location))
            .map(|record| record.station.clone())
            .collect()
    }

    /// Every location that has at least one station, sorted and deduplicated.
    pub fn all_locations(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|record| record.location.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn location_of(&self, station: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|record| record.station == station)
            .and_then(|record| record.location.as_deref())
    }

    /// Number of distinct (station, location) pairs.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
