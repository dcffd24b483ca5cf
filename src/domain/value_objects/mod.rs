//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod cache_tier;
mod config_warning;
mod cost_warning;
mod hash;
mod path;
mod patterns;

pub use cache_tier::CacheTier;
pub use config_warning::ConfigWarning;
pub use cost_warning::CostWarning;
pub use hash::ContentHash;
pub use path::{AssetPath, PathError};
pub use patterns::PatternSet;
