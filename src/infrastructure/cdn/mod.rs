//! CDN backends
//!
//! Implementations of `CdnBackend`:
//! - `MemoryCdn` - in-memory, completes after N polls
//! - `AwsCliCdn` - CloudFront through the `aws` binary

mod aws_cli;
mod memory;

pub use aws_cli::AwsCliCdn;
pub use memory::{MemoryCdn, RecordedInvalidation};
