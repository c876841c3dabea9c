mod analysis;
mod charts;
mod config;
mod datasets;
mod error;
mod stations;
mod types;
mod utils;
mod web;

pub use error::SmogwatchError;

pub use config::*;

pub use datasets::dataset::Dataset;
pub use datasets::error::{DatasetError, ReadError};
pub use datasets::loader::FileFormat;
pub use datasets::store::DatasetStore;

pub use stations::error::MetadataError;
pub use stations::metadata_index::*;

pub use types::pollutant::*;
pub use types::series::*;

pub use analysis::climatology::aggregate;
pub use analysis::extractor::extract;

pub use charts::renderer::*;

pub use web::server::{router, serve};
pub use web::state::AppState;
