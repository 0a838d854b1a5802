//! Error types for telegram-datasets
//!
//! This module provides the crate-wide error type, including:
//! - Classification failures (unknown service actions, malformed records)
//! - Enrichment misses (users/channels the API no longer knows about)
//! - Transport, configuration and dataset I/O errors
//! - Stable machine-readable error codes for callers that report failures

use crate::types::EntityKind;
use thiserror::Error;

/// Result type alias for telegram-datasets operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for telegram-datasets
///
/// Every variant except [`Error::EntityNotFound`] aborts the current
/// invocation. Entity misses are built for reporting only and are skipped by
/// the enrichment step.
#[derive(Debug, Error)]
pub enum Error {
    /// A service record carried an action tag outside the known set
    #[error("unknown message service action found: {tag}")]
    UnrecognizedActionKind {
        /// The offending action tag as delivered by the API
        tag: String,
    },

    /// A record could not be classified because a required part is missing
    #[error("malformed record {message_id}: {reason}")]
    MalformedRecord {
        /// Message ID of the offending record
        message_id: i64,
        /// What was missing or inconsistent
        reason: String,
    },

    /// A user or channel lookup found nothing
    #[error("{kind} {id} not found")]
    EntityNotFound {
        /// Which kind of entity was looked up
        kind: EntityKind,
        /// The identifier that was looked up
        id: i64,
    },

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "TELEGRAM_API_ID")
        key: Option<String>,
    },

    /// The API answered with a non-success status
    #[error("API returned HTTP {status}: {url}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV encoding or decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A CSV file on disk does not have the columns of the requested table
    #[error("column mismatch: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        /// Columns of the requested row type
        expected: Vec<String>,
        /// Columns found in the file header
        found: Vec<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset or snapshot not found on disk
    #[error("not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::UnrecognizedActionKind { .. } => "unrecognized_action_kind",
            Error::MalformedRecord { .. } => "malformed_record",
            Error::EntityNotFound { .. } => "entity_not_found",
            Error::Config { .. } => "config_error",
            Error::Api { .. } => "api_error",
            Error::Network(_) => "network_error",
            Error::Serialization(_) => "serialization_error",
            Error::Csv(_) => "csv_error",
            Error::SchemaMismatch { .. } => "schema_mismatch",
            Error::Io(_) => "io_error",
            Error::NotFound(_) => "not_found",
        }
    }

    pub(crate) fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}
