//! Cachet - cache-aware static site publisher
//!
//! Cachet publishes a static build to an object store behind a CDN. Every
//! file gets a cache tier from its path alone; files are uploaded tier by
//! tier with the entry document last; and the CDN invalidation covers only
//! the paths whose URL did not change with their content.
//!
//! The planning core (`domain`) is pure and synchronous. Storage, CDN and
//! file system access live behind ports implemented in `infrastructure`;
//! `application` wires the two into the `publish` and `invalidate` flows.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use config::Config;
pub use domain::entities::{
    AssetRecord, InvalidationRequest, ManifestEntry, PublicationPlan, RemoteListing, RemoteObject,
    UploadBatch,
};
pub use domain::services::{Classifier, InvalidationSelector, Planner};
pub use domain::value_objects::{AssetPath, CacheTier, CostWarning};
pub use error::{CachetError, CachetResult};
