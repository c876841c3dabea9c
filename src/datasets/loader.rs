//! Reads the array-oriented files produced by the export pipeline into Polars frames.

use crate::datasets::error::ReadError;
use log::debug;
use polars::prelude::*;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// On-disk format of dataset and metadata files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// The pipeline's native output. Needs the `netcdf` feature.
    #[default]
    #[serde(alias = "nc")]
    NetCdf,
    Parquet,
    /// Comma separated with a header row; date-like columns are parsed on read.
    Csv,
}

impl FileFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::NetCdf => "nc",
            FileFormat::Parquet => "parquet",
            FileFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Reads a whole file into memory.
///
/// The caller is expected to have checked that `path` exists; errors are returned as-is so
/// each caller can attach its own context.
pub fn read_frame(path: &Path, format: FileFormat) -> Result<DataFrame, ReadError> {
    debug!("Reading {} file {:?}", format, path);
    let frame = match format {
        #[cfg(feature = "netcdf")]
        FileFormat::NetCdf => return crate::datasets::nc_reader::read_netcdf(path),
        #[cfg(not(feature = "netcdf"))]
        FileFormat::NetCdf => return Err(ReadError::Unsupported(format)),
        FileFormat::Parquet => LazyFrame::scan_parquet(path, Default::default())?.collect()?,
        FileFormat::Csv => CsvReadOptions::default()
            .with_has_header(true)
            .map_parse_options(|opts| opts.with_try_parse_dates(true))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?,
    };
    Ok(frame)
}
