use crate::datasets::error::ReadError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Station metadata file '{0}' does not exist")]
    MissingFile(PathBuf),

    #[error("Failed to read station metadata file '{0}'")]
    Read(PathBuf, #[source] ReadError),

    #[error("Required column '{column}' not found in station metadata '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Station metadata column '{column}' could not be read as text")]
    Column {
        column: String,
        #[source]
        source: PolarsError,
    },
}
