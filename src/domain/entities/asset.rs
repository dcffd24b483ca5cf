//! Asset entity - one file known to the planner
//!
//! A `ManifestEntry` is what the directory walk (or any other manifest
//! source) reports. The classifier turns it into an `AssetRecord`, whose
//! tier can never change afterwards.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AssetPath, CacheTier, ContentHash};

/// Raw manifest entry, before normalization and classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path relative to the publication root, in any separator style
    pub path: String,
    /// File size in bytes
    pub size_bytes: u64,
    /// Content hash, when the source computed one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<ContentHash>,
}

impl ManifestEntry {
    pub fn new(path: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            content_hash: None,
        }
    }

    pub fn with_hash(mut self, hash: ContentHash) -> Self {
        self.content_hash = Some(hash);
        self
    }
}

/// A classified file
///
/// Fields are private: records are only built by the classifier, so the
/// tier always agrees with the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRecord {
    path: AssetPath,
    size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_hash: Option<ContentHash>,
    tier: CacheTier,
}

impl AssetRecord {
    pub(crate) fn new(
        path: AssetPath,
        size_bytes: u64,
        content_hash: Option<ContentHash>,
        tier: CacheTier,
    ) -> Self {
        Self {
            path,
            size_bytes,
            content_hash,
            tier,
        }
    }

    pub fn path(&self) -> &AssetPath {
        &self.path
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn content_hash(&self) -> Option<&ContentHash> {
        self.content_hash.as_ref()
    }

    pub fn tier(&self) -> CacheTier {
        self.tier
    }

    /// Whether this record is the site entry document
    pub fn is_entry_point(&self) -> bool {
        self.tier == CacheTier::EntryPoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_entry_builder() {
        let entry = ManifestEntry::new("index.html", 512).with_hash(ContentHash::new("abc"));
        assert_eq!(entry.path, "index.html");
        assert_eq!(entry.size_bytes, 512);
        assert_eq!(entry.content_hash, Some(ContentHash::new("abc")));
    }

    #[test]
    fn record_accessors() {
        let record = AssetRecord::new(
            AssetPath::new("index.html").unwrap(),
            10,
            None,
            CacheTier::EntryPoint,
        );
        assert!(record.is_entry_point());
        assert_eq!(record.path().as_str(), "index.html");
        assert_eq!(record.size_bytes(), 10);
        assert!(record.content_hash().is_none());
    }

    #[test]
    fn record_serializes_without_missing_hash() {
        let record = AssetRecord::new(
            AssetPath::new("a.css").unwrap(),
            3,
            None,
            CacheTier::GenericStatic,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["path"], "a.css");
        assert_eq!(json["tier"], "generic-static");
        assert!(json.get("content_hash").is_none());
    }
}
