//! Error types for vartablib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building attribute bags or run configuration
#[derive(Error, Debug)]
pub enum VartabError {
    /// A bag value that is neither a scalar nor a flat sequence of scalars
    #[error("invalid value for field '{field}': expected scalar or list of scalars, found {found}")]
    InvalidFieldValue { field: String, found: String },

    /// A record that is not a key/value object
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Malformed custom track descriptor
    #[error("invalid custom track '{spec}': {message}")]
    InvalidCustomSpec { spec: String, message: String },

    /// Failed to read a configuration or header file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
