pub mod dataset;
pub mod error;
pub mod loader;
#[cfg(feature = "netcdf")]
pub mod nc_reader;
pub mod store;
