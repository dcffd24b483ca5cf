//! Storage Port
//!
//! Abstracts the object store the site is published to. The planner never
//! calls this; the publish use case does, one object at a time, in plan
//! order.

use thiserror::Error;

use crate::domain::entities::RemoteListing;
use crate::domain::value_objects::AssetPath;

/// Error reported by a storage backend
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Object could not be written or removed
    #[error("{operation} {path} failed: {message}")]
    ObjectFailed {
        operation: &'static str,
        path: String,
        message: String,
    },
    /// Listing the bucket failed
    #[error("listing failed: {0}")]
    ListFailed(String),
    /// External command could not run or exited non-zero
    #[error("command failed: {0}")]
    CommandFailed(String),
    /// Backend is not configured or not installed
    #[error("not available: {0}")]
    NotAvailable(String),
}

impl StorageError {
    pub fn put(path: &AssetPath, message: impl Into<String>) -> Self {
        Self::ObjectFailed {
            operation: "put",
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub fn delete(path: &AssetPath, message: impl Into<String>) -> Self {
        Self::ObjectFailed {
            operation: "delete",
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// Trait for object stores
///
/// Implementations:
/// - `MemoryStorage` - in-memory, for tests and dry runs
/// - `LocalDirStorage` - mirrors the bucket into a directory
/// - `AwsCliStorage` - drives `aws s3`
pub trait StorageBackend {
    /// Display name for logs and reports
    fn display_name(&self) -> String;

    /// List every object under `prefix`
    fn list_remote_objects(&self, prefix: &str) -> Result<RemoteListing, StorageError>;

    /// Upload one object. `cache_control` must be stored byte-exact.
    fn put_object(
        &self,
        path: &AssetPath,
        bytes: &[u8],
        cache_control: &str,
    ) -> Result<(), StorageError>;

    /// Remove one object
    fn delete_object(&self, path: &AssetPath) -> Result<(), StorageError>;
}
