//! Storage backends
//!
//! Implementations of `StorageBackend`:
//! - `MemoryStorage` - in-memory, records operation order
//! - `LocalDirStorage` - a directory plus a metadata index
//! - `AwsCliStorage` - S3 through the `aws` binary

mod aws_cli;
mod local_dir;
mod memory;

pub use aws_cli::AwsCliStorage;
pub use local_dir::{LocalDirStorage, ObjectMeta, INDEX_DIR};
pub use memory::{MemoryStorage, StorageOp, StoredObject};
