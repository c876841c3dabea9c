//! Turns a loaded dataset plus a request into the data behind a chart.

pub mod climatology;
pub mod extractor;
