use crate::datasets::loader::FileFormat;
use crate::types::pollutant::Pollutant;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn one file into a `DataFrame`, whatever its format.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[cfg(feature = "netcdf")]
    #[error(transparent)]
    NetCdf(#[from] netcdf::Error),

    #[error("Variable '{variable}' has unsupported time units '{units}'")]
    TimeUnits { variable: String, units: String },

    #[error("File has no one-dimensional variables")]
    NoVariables,

    #[error("Support for '{0}' files is not enabled in this build")]
    Unsupported(FileFormat),
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset file '{0}' does not exist")]
    MissingFile(PathBuf),

    #[error("Failed to read dataset file '{0}'")]
    Read(PathBuf, #[source] ReadError),

    #[error("Dataset for {pollutant} has no time column '{column}'")]
    MissingTimeColumn { pollutant: Pollutant, column: String },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
