use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced to the caller.
///
/// Individual malformed contacts are normally skipped during extraction and only
/// become [`Error::MalformedRecord`] in strict mode. An empty result is never an error.
#[derive(Debug, Error)]
pub enum Error {
    /// The interaction file could not be located or read.
    #[error("failed to read interaction file {}: {source}", path.display())]
    InputNotFound {
        /// Offending input path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The interaction file is not valid JSON.
    #[error("interaction file {} is not valid JSON: {source}", path.display())]
    InvalidJson {
        /// Offending input path
        path: PathBuf,
        /// Underlying decode error
        source: serde_json::Error,
    },

    /// The top-level JSON value is not an object keyed by atom paths.
    #[error("expected a JSON object keyed by atom paths, found {found}")]
    NotAnAtomMap {
        /// Kind of JSON value that was found instead
        found: &'static str,
    },

    /// A single contact could not be decoded (strict mode only).
    #[error("malformed contact record under '{key}': {reason}")]
    MalformedRecord {
        /// Atom-path key owning the contact
        key: String,
        /// Why the record was rejected
        reason: String,
    },

    /// A ligand code or chain list could not be parsed.
    #[error("invalid selection '{input}': {reason}")]
    InvalidSelection {
        /// Raw selection string
        input: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// A text or JSON artifact could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Serialization {
        /// Output path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A table could not be built or written by polars.
    #[error("failed to produce table {}: {source}", path.display())]
    Table {
        /// Output path
        path: PathBuf,
        /// Underlying polars error
        source: polars::error::PolarsError,
    },
}

impl Error {
    pub(crate) fn malformed(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedRecord {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}
