//! Error types for the patch tree system.

use std::path::PathBuf;
use thiserror::Error;

/// Manifest parsing errors
///
/// The first malformed line aborts the whole manifest; nothing partial is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Line {line}: expected {expected} tab-separated fields, found {found}")]
    FieldCount {
        line: usize,
        expected: &'static str,
        found: usize,
    },

    #[error("Line {line}: invalid size {value:?}")]
    InvalidSize { line: usize, value: String },
}

/// Retrieval errors raised by the transport collaborator
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Relay proxy rejected {url}: {message}")]
    Relay { url: String, message: String },

    #[error("Repository location not configured: {0}")]
    MissingLocation(String),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch {resource} from primary ({primary}) and backup ({backup})")]
    AllLocationsFailed {
        resource: String,
        primary: Box<TransportError>,
        backup: Box<TransportError>,
    },
}

/// Internal tree invariant violations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("Merge directory entry is missing: {segment:?}")]
    MergeInvariant { segment: String },
}

/// File content retrieval errors
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("File not found in tree: {0}")]
    NotFound(String),

    #[error("{path} is {size} bytes, over the {limit} byte viewing limit")]
    TooLarge { path: String, size: u64, limit: u64 },
}

/// Top-level errors surfaced by the catalog and CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Manifest {manifest} is malformed: {source}")]
    Parse {
        manifest: String,
        #[source]
        source: ParseError,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown file set: {0} (expected launcher, game or all)")]
    UnknownFileSet(String),

    #[error("Refresh of {0} was superseded by a newer refresh")]
    Superseded(String),

    #[error("Failed to render output: {0}")]
    Output(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
