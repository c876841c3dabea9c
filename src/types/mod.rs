pub mod pollutant;
pub mod series;
