//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Atomic writes and the build directory scanner
//! - `storage/` - Object store backends (memory, local dir, S3)
//! - `cdn/` - CDN backends (memory, CloudFront)
//! - `events/` - Publish event sinks (console, NDJSON)
//! - `telemetry` - tracing subscriber setup

pub mod aws_cli;
pub mod cdn;
pub mod events;
pub mod fs;
pub mod storage;
pub mod telemetry;

// Re-export for convenience
pub use cdn::{AwsCliCdn, MemoryCdn};
pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::{LocalFs, ManifestScanner};
pub use storage::{AwsCliStorage, LocalDirStorage, MemoryStorage};
