use crate::config::ConfigError;
use crate::datasets::error::DatasetError;
use crate::stations::error::MetadataError;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmogwatchError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Failed to bind server to {0}")]
    Bind(SocketAddr, #[source] std::io::Error),

    #[error("Server stopped with an error")]
    Serve(#[source] std::io::Error),
}
