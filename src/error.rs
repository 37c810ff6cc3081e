//! Error types for the analysis pipeline, history storage and report download
//!
//! Analysis failures are deliberately coarse: the transport-level cause is logged
//! and then collapsed into [`AnalysisError::Failed`], so callers only distinguish
//! "it did not work" from "the server answered with data we do not recognize".

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Network rejection, unsuccessful status, empty body or unparseable record
    #[error("unknown parsing error :(")]
    Failed,

    /// The first record parsed but contains none of the recognized highlight keys
    #[error("file was not processed correctly on the server")]
    InvalidServerResponse,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode history: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("storage quota exceeded: {needed} bytes needed, {quota} bytes available")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

#[derive(Debug, Error)]
pub enum ReportError {
    /// The server rejected the request and explained why
    #[error("an error occurred: {0}")]
    Server(String),

    #[error("unknown error while trying to generate the report")]
    Failed,

    #[error("failed to save report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
