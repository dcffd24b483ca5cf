//! Error types for Cachet
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::domain::ports::{CdnError, StorageError};

/// Result type alias for Cachet operations
pub type CachetResult<T> = Result<T, CachetError>;

/// Main error type for Cachet operations
#[derive(Error, Debug)]
pub enum CachetError {
    /// Manifest contains no files
    #[error("manifest is empty - nothing to publish (is the build directory correct?)")]
    EmptyManifest,

    /// No record classified as the entry point
    #[error("no entry point '{entry_filename}' at the publication root")]
    MissingEntryPoint { entry_filename: String },

    /// Two manifest records normalize to the same path
    #[error("duplicate path in manifest: {path}")]
    DuplicatePath { path: String },

    /// Wildcard invalidation requested without explicit confirmation
    #[error("wildcard invalidation requires explicit confirmation")]
    UnconfirmedWildcard,

    /// Path matches both the hashed-asset rule and the entry-point rule
    #[error("'{path}' is both a hashed asset and the entry point")]
    AmbiguousClassification { path: String },

    /// Path cannot be normalized to a publication-relative path
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// A configured glob pattern failed to compile
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// A setting the command needs was never provided
    #[error("{setting} is not configured ({hint})")]
    NotConfigured {
        setting: &'static str,
        hint: &'static str,
    },

    /// Publication source directory is missing
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Storage collaborator failure
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// CDN collaborator failure
    #[error("CDN error: {0}")]
    Cdn(#[from] CdnError),

    /// Invalidation did not complete before the deadline
    #[error("invalidation {id} still in progress after {}s", .waited.as_secs())]
    InvalidationTimeout { id: String, waited: Duration },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CachetError {
    /// Stable machine-readable code used in JSON error events
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyManifest => "empty_manifest",
            Self::MissingEntryPoint { .. } => "missing_entry_point",
            Self::DuplicatePath { .. } => "duplicate_path",
            Self::UnconfirmedWildcard => "unconfirmed_wildcard",
            Self::AmbiguousClassification { .. } => "ambiguous_classification",
            Self::InvalidPath { .. } => "invalid_path",
            Self::InvalidPattern { .. } => "invalid_pattern",
            Self::Config { .. } => "config",
            Self::NotConfigured { .. } => "not_configured",
            Self::DirectoryNotFound { .. } => "directory_not_found",
            Self::Storage(_) => "storage",
            Self::Cdn(_) => "cdn",
            Self::InvalidationTimeout { .. } => "invalidation_timeout",
            Self::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_entry_point() {
        let err = CachetError::MissingEntryPoint {
            entry_filename: "index.html".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no entry point 'index.html' at the publication root"
        );
    }

    #[test]
    fn test_error_display_timeout() {
        let err = CachetError::InvalidationTimeout {
            id: "I2J3".to_string(),
            waited: Duration::from_secs(90),
        };
        assert_eq!(err.to_string(), "invalidation I2J3 still in progress after 90s");
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(CachetError::EmptyManifest.code(), "empty_manifest");
        assert_eq!(CachetError::UnconfirmedWildcard.code(), "unconfirmed_wildcard");
    }
}
