//! Error types for the SAAT query evaluation engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to memory-map {path}: {source}")]
    Mapping {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("index corruption: {0}")]
    Corruption(String),

    #[error("missing required parameter: {0}")]
    MissingParameter(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}
