//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CachetError, CachetResult};

use super::types::{Config, LogFormat, LogLevel};

pub use crate::domain::value_objects::ConfigWarning;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "cachet.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> CachetResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Parse TOML content, recording unknown keys instead of failing on them.
pub fn parse_with_warnings(content: &str, path: &Path) -> CachetResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| CachetError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults.
///
/// A config file that exists but fails to parse is an error; silently
/// publishing with default cache headers would be worse than stopping.
pub fn load_or_default(project_root: Option<&Path>) -> CachetResult<(Config, Vec<ConfigWarning>)> {
    if let Some(root) = project_root {
        let project_config = root.join(CONFIG_FILE_NAME);
        if project_config.exists() {
            let (config, warnings) = load_with_warnings(&project_config)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }

    if let Some(user_config_dir) = dirs::config_dir() {
        let user_config = user_config_dir.join("cachet/config.toml");
        if user_config.exists() {
            let (config, warnings) = load_with_warnings(&user_config)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }

    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// Apply environment variable overrides (CACHET_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from an arbitrary lookup (the environment in production)
pub fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(entry) = lookup("CACHET_ENTRY_FILENAME") {
        if !entry.trim().is_empty() {
            config.classifier.entry_filename = entry.trim().to_string();
        }
    }

    if let Some(bucket) = lookup("CACHET_BUCKET") {
        config.storage.bucket = Some(bucket);
    }

    if let Some(distribution) = lookup("CACHET_DISTRIBUTION_ID") {
        config.cdn.distribution_id = Some(distribution);
    }

    if let Some(level) = lookup("CACHET_LOG_LEVEL") {
        config.logging.level = match level.to_lowercase().as_str() {
            "error" => LogLevel::Error,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Warn,
        };
    }

    if let Some(format) = lookup("CACHET_LOG_FORMAT") {
        config.logging.format = match format.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        };
    }

    config
}

/// Project config path for a working directory
pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "classifier",
        "entry_filename",
        "hash_patterns",
        "require_hash_segment",
        "min_hash_length",
        "media_extensions",
        "precedence",
        "cache_directives",
        "immutable",
        "media",
        "generic_static",
        "secondary_html",
        "entry_point",
        "invalidation",
        "entry_only",
        "explicit_wildcard_confirmed",
        "max_discrete_paths",
        "manifest",
        "exclude",
        "follow_links",
        "storage",
        "kind",
        "bucket",
        "directory",
        "prefix",
        "delete",
        "skip_unchanged",
        "profile",
        "cdn",
        "distribution_id",
        "wait",
        "poll_interval_secs",
        "timeout_secs",
        "logging",
        "level",
        "format",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
