pub mod error;
pub mod metadata_index;
