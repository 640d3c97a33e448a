//! Error types for the vetsearch crate.
//!
//! Building and combining specifications never fails. Errors come from the
//! collaborators around them: configuration loading, pagination resolution,
//! and parsing domain values from text.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur around building and executing searches.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A date range was validated and its start lies after its end.
    #[error("date range start {start} is after end {end}")]
    InvertedRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A page size of zero was requested or configured.
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    /// The configured default page size is larger than the maximum.
    #[error("default page size {default} exceeds maximum page size {max}")]
    DefaultExceedsMax { default: usize, max: usize },

    /// Text did not name a known appointment status.
    #[error("unknown appointment status: '{0}'")]
    UnknownStatus(String),

    /// Text did not name a known service type.
    #[error("unknown service type: '{0}'")]
    UnknownService(String),

    /// Text did not name a searchable field.
    #[error("unknown search field: '{0}'")]
    UnknownField(String),

    /// The configuration document could not be parsed.
    #[error("invalid search configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// The configuration file could not be read.
    #[error("failed to read search configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for vetsearch operations.
pub type Result<T> = std::result::Result<T, SearchError>;
