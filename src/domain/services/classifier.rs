//! Asset classification service
//!
//! Maps a path to a cache tier. Rules run in a fixed order and the first
//! match wins:
//!
//! 1. hashed asset (`*.*.js`, `*.*.css`, ...) → `Immutable`
//! 2. media extension → `Media`
//! 3. entry filename at the publication root → `EntryPoint`
//! 4. any other `.html` → `SecondaryHtml`
//! 5. anything else → `GenericStatic`
//!
//! A path can satisfy both rule 1 and rule 3 only through configuration
//! (e.g. a hash pattern that matches the entry filename). `Precedence`
//! decides that case explicitly.

use std::collections::BTreeSet;

use crate::config::{ClassifierConfig, Precedence};
use crate::domain::entities::{AssetRecord, ManifestEntry};
use crate::domain::value_objects::{AssetPath, CacheTier, PatternSet};
use crate::error::{CachetError, CachetResult};

/// Pure path → tier classifier
#[derive(Debug, Clone)]
pub struct Classifier {
    entry_filename: String,
    hash_patterns: PatternSet,
    require_hash_segment: bool,
    min_hash_length: usize,
    media_extensions: BTreeSet<String>,
    precedence: Precedence,
}

impl Classifier {
    /// Build a classifier, compiling the configured hash patterns
    pub fn new(config: &ClassifierConfig) -> CachetResult<Self> {
        let media_extensions = config
            .media_extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        Ok(Self {
            entry_filename: config.entry_filename.clone(),
            hash_patterns: PatternSet::new(&config.hash_patterns)?,
            require_hash_segment: config.require_hash_segment,
            min_hash_length: config.min_hash_length,
            media_extensions,
            precedence: config.precedence,
        })
    }

    pub fn entry_filename(&self) -> &str {
        &self.entry_filename
    }

    /// Classify a raw path
    pub fn classify(&self, path: &str) -> CachetResult<CacheTier> {
        let normalized = AssetPath::new(path).map_err(|e| CachetError::InvalidPath {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        self.classify_path(&normalized)
    }

    /// Classify a normalized path
    pub fn classify_path(&self, path: &AssetPath) -> CachetResult<CacheTier> {
        let hashed = self.is_hashed(path);
        let entry = self.is_entry_point(path);

        if hashed && entry {
            return match self.precedence {
                Precedence::EntryFirst => Ok(CacheTier::EntryPoint),
                Precedence::HashFirst => Ok(CacheTier::Immutable),
                Precedence::Reject => Err(CachetError::AmbiguousClassification {
                    path: path.to_string(),
                }),
            };
        }

        if hashed {
            return Ok(CacheTier::Immutable);
        }

        let extension = path.extension();
        if let Some(ext) = &extension {
            if self.media_extensions.contains(ext) {
                return Ok(CacheTier::Media);
            }
        }

        if entry {
            return Ok(CacheTier::EntryPoint);
        }

        if extension.as_deref() == Some("html") {
            return Ok(CacheTier::SecondaryHtml);
        }

        Ok(CacheTier::GenericStatic)
    }

    /// Normalize and classify a manifest entry
    pub fn record(&self, entry: ManifestEntry) -> CachetResult<AssetRecord> {
        let path = AssetPath::new(&entry.path).map_err(|e| CachetError::InvalidPath {
            path: entry.path.clone(),
            reason: e.to_string(),
        })?;
        let tier = self.classify_path(&path)?;
        Ok(AssetRecord::new(
            path,
            entry.size_bytes,
            entry.content_hash,
            tier,
        ))
    }

    /// Classify a whole manifest
    pub fn records<I>(&self, entries: I) -> CachetResult<Vec<AssetRecord>>
    where
        I: IntoIterator<Item = ManifestEntry>,
    {
        entries.into_iter().map(|e| self.record(e)).collect()
    }

    fn is_entry_point(&self, path: &AssetPath) -> bool {
        path.is_root_level()
            && path.extension().as_deref() == Some("html")
            && path.file_name() == self.entry_filename
    }

    fn is_hashed(&self, path: &AssetPath) -> bool {
        if !self.hash_patterns.is_match(path.as_str()) {
            return false;
        }
        !self.require_hash_segment || self.has_hash_segment(path.file_name())
    }

    /// `name.<hash>.ext`: the segment before the extension must look like a
    /// content hash, so `jquery.min.js` stays out of the immutable tier.
    fn has_hash_segment(&self, file_name: &str) -> bool {
        let parts: Vec<&str> = file_name.split('.').collect();
        if parts.len() < 3 {
            return false;
        }
        let candidate = parts[parts.len() - 2];

        if candidate.len() < self.min_hash_length
            || !candidate.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return false;
        }

        candidate.chars().any(|c| c.is_ascii_digit())
            || (candidate.len() >= 8 && candidate.chars().all(|c| c.is_ascii_hexdigit()))
    }
}
