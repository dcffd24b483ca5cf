//! File System Implementations
//!
//! - `LocalFs` - atomic writes for on-disk state
//! - `ManifestScanner` - build directory walker

mod local;
mod manifest;

pub use local::LocalFs;
pub use manifest::ManifestScanner;
