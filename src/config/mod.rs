//! Configuration module for Cachet
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (CACHET_*)
//! 3. Project config (./cachet.toml or --config)
//! 4. User config (~/.config/cachet/config.toml)
//! 5. Built-in defaults (lowest priority)
//!
//! The planning core only ever sees the structured sections
//! (`classifier`, `cache_directives`, `invalidation`); everything else
//! configures the collaborators around it.

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{apply_overrides, project_config_path, CONFIG_FILE_NAME};
pub use types::{
    CacheDirectives, CdnConfig, ClassifierConfig, Config, InvalidationPolicy, LogFormat,
    LogLevel, LoggingConfig, ManifestConfig, Precedence, StorageConfig, StorageKind,
    MIN_POLL_INTERVAL_SECS,
};
