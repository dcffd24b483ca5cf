//! Domain Entities
//!
//! - `ManifestEntry` / `AssetRecord` - a file before and after classification
//! - `RemoteListing` - what the bucket held before this run
//! - `PublicationPlan` - ordered upload batches and deletions
//! - `InvalidationRequest` - CDN paths to discard

mod asset;
mod invalidation;
mod plan;
mod remote_listing;

pub use asset::{AssetRecord, ManifestEntry};
pub use invalidation::{InvalidationRequest, InvalidationSelection, WILDCARD_PATH};
pub use plan::{PublicationPlan, UploadBatch};
pub use remote_listing::{RemoteListing, RemoteObject};
