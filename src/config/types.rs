//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::CacheTier;
use crate::error::CachetResult;

use super::loader::{self, ConfigWarning};

/// How to resolve a path that is both a hashed asset and the entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Precedence {
    /// Entry-point freshness wins
    #[default]
    EntryFirst,
    /// Hashed-asset immutability wins
    HashFirst,
    /// Fail with `AmbiguousClassification`
    Reject,
}

/// Classifier rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_entry_filename")]
    pub entry_filename: String,

    #[serde(default = "default_hash_patterns")]
    pub hash_patterns: Vec<String>,

    /// Also require the segment before the extension to look like a hash
    #[serde(default = "default_true")]
    pub require_hash_segment: bool,

    #[serde(default = "default_min_hash_length")]
    pub min_hash_length: usize,

    #[serde(default = "default_media_extensions")]
    pub media_extensions: Vec<String>,

    #[serde(default)]
    pub precedence: Precedence,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            entry_filename: default_entry_filename(),
            hash_patterns: default_hash_patterns(),
            require_hash_segment: true,
            min_hash_length: default_min_hash_length(),
            media_extensions: default_media_extensions(),
            precedence: Precedence::default(),
        }
    }
}

fn default_entry_filename() -> String {
    "index.html".to_string()
}

fn default_hash_patterns() -> Vec<String> {
    ["*.*.js", "*.*.css", "*.*.woff", "*.*.woff2"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_min_hash_length() -> usize {
    6
}

fn default_media_extensions() -> Vec<String> {
    [
        "png", "jpg", "jpeg", "gif", "svg", "webp", "ico", "mp4", "webm",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_true() -> bool {
    true
}

/// `Cache-Control` directive per tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheDirectives {
    #[serde(default = "default_immutable")]
    pub immutable: String,
    #[serde(default = "default_media")]
    pub media: String,
    #[serde(default = "default_generic_static")]
    pub generic_static: String,
    #[serde(default = "default_secondary_html")]
    pub secondary_html: String,
    #[serde(default = "default_entry_point")]
    pub entry_point: String,
}

impl Default for CacheDirectives {
    fn default() -> Self {
        Self {
            immutable: default_immutable(),
            media: default_media(),
            generic_static: default_generic_static(),
            secondary_html: default_secondary_html(),
            entry_point: default_entry_point(),
        }
    }
}

impl CacheDirectives {
    /// Directive for a tier
    pub fn for_tier(&self, tier: CacheTier) -> &str {
        match tier {
            CacheTier::Immutable => &self.immutable,
            CacheTier::Media => &self.media,
            CacheTier::GenericStatic => &self.generic_static,
            CacheTier::SecondaryHtml => &self.secondary_html,
            CacheTier::EntryPoint => &self.entry_point,
        }
    }
}

fn default_immutable() -> String {
    CacheTier::Immutable.default_directive().to_string()
}

fn default_media() -> String {
    CacheTier::Media.default_directive().to_string()
}

fn default_generic_static() -> String {
    CacheTier::GenericStatic.default_directive().to_string()
}

fn default_secondary_html() -> String {
    CacheTier::SecondaryHtml.default_directive().to_string()
}

fn default_entry_point() -> String {
    CacheTier::EntryPoint.default_directive().to_string()
}

/// Invalidation selection policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidationPolicy {
    /// Only invalidate the entry point(s)
    #[serde(default = "default_true")]
    pub entry_only: bool,

    /// Operator has confirmed a wildcard invalidation
    #[serde(default)]
    pub explicit_wildcard_confirmed: bool,

    /// Advisory budget for discrete paths
    #[serde(default)]
    pub max_discrete_paths: Option<usize>,

    /// Caller asks for `/*`; set per run, never read from a file
    #[serde(skip)]
    pub wildcard: bool,
}

impl Default for InvalidationPolicy {
    fn default() -> Self {
        Self {
            entry_only: true,
            explicit_wildcard_confirmed: false,
            max_discrete_paths: None,
            wildcard: false,
        }
    }
}

impl InvalidationPolicy {
    /// Request `/*`, carrying the operator's confirmation
    pub fn wildcard(confirmed: bool) -> Self {
        Self {
            explicit_wildcard_confirmed: confirmed,
            wildcard: true,
            ..Self::default()
        }
    }
}

/// Manifest walk configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Gitignore-style patterns excluded from the walk
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub follow_links: bool,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            exclude: default_excludes(),
            follow_links: false,
        }
    }
}

fn default_excludes() -> Vec<String> {
    [".DS_Store", "Thumbs.db", ".git/", ".cachet/"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Storage collaborator kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StorageKind {
    /// Drive the `aws s3` command-line tool
    #[default]
    AwsCli,
    /// Mirror into a local directory
    Local,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub kind: StorageKind,

    /// Bucket name (aws-cli)
    #[serde(default)]
    pub bucket: Option<String>,

    /// Mirror directory (local)
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Key prefix inside the bucket
    #[serde(default)]
    pub prefix: String,

    /// Remove remote objects that are gone locally
    #[serde(default = "default_true")]
    pub delete: bool,

    /// Skip uploads whose content hash matches the remote copy
    #[serde(default = "default_true")]
    pub skip_unchanged: bool,

    /// AWS CLI profile
    #[serde(default)]
    pub profile: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: StorageKind::default(),
            bucket: None,
            directory: None,
            prefix: String::new(),
            delete: true,
            skip_unchanged: true,
            profile: None,
        }
    }
}

/// CDN configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdnConfig {
    /// Distribution to invalidate; no invalidation when unset
    #[serde(default)]
    pub distribution_id: Option<String>,

    /// Block until the invalidation completes
    #[serde(default = "default_true")]
    pub wait: bool,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// AWS CLI profile
    #[serde(default)]
    pub profile: Option<String>,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            distribution_id: None,
            wait: true,
            poll_interval_secs: default_poll_interval_secs(),
            timeout_secs: default_timeout_secs(),
            profile: None,
        }
    }
}

/// Floor for the status poll interval
pub const MIN_POLL_INTERVAL_SECS: u64 = 1;

impl CdnConfig {
    /// Never below `MIN_POLL_INTERVAL_SECS`, so `0` cannot turn the wait
    /// loop into a tight stream of `get-invalidation` calls
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(MIN_POLL_INTERVAL_SECS))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_timeout_secs() -> u64 {
    900
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Raise the level by `steps` (one per `-v`)
    pub fn raised(self, steps: u8) -> Self {
        let order = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let idx = order.iter().position(|l| *l == self).unwrap_or(1);
        order[(idx + steps as usize).min(order.len() - 1)]
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub cache_directives: CacheDirectives,

    #[serde(default)]
    pub invalidation: InvalidationPolicy,

    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub cdn: CdnConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> CachetResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> CachetResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> CachetResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (CACHET_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
