//! CDN Port
//!
//! Abstracts the CDN in front of the bucket. Waiting for completion is the
//! caller's loop; the port only answers single status queries.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Error reported by a CDN backend
#[derive(Debug, Clone, Error)]
pub enum CdnError {
    /// The provider rejected the request
    #[error("request rejected: {0}")]
    Rejected(String),
    /// Unknown invalidation id
    #[error("unknown invalidation: {0}")]
    UnknownInvalidation(String),
    /// External command could not run or exited non-zero
    #[error("command failed: {0}")]
    CommandFailed(String),
    /// Provider output could not be understood
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// State of a submitted invalidation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidationStatus {
    InProgress,
    Completed,
}

impl fmt::Display for InvalidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "in progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Trait for CDN backends
///
/// Implementations:
/// - `MemoryCdn` - in-memory, completes after a configurable number of polls
/// - `AwsCliCdn` - drives `aws cloudfront`
pub trait CdnBackend {
    /// Submit an invalidation; returns the provider's id
    fn create_invalidation(
        &self,
        distribution_id: &str,
        paths: &[String],
    ) -> Result<String, CdnError>;

    /// Query one invalidation
    fn get_invalidation_status(
        &self,
        distribution_id: &str,
        invalidation_id: &str,
    ) -> Result<InvalidationStatus, CdnError>;
}
