//! Manifest scanner
//!
//! Walks a build directory and produces the raw manifest. Paths are left
//! as the walker reports them; normalization belongs to the classifier.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

use crate::config::ManifestConfig;
use crate::domain::entities::ManifestEntry;
use crate::domain::value_objects::{ContentHash, PatternSet};
use crate::error::{CachetError, CachetResult};

/// Directory walker configured by `[manifest]`
#[derive(Debug, Clone)]
pub struct ManifestScanner {
    exclude: PatternSet,
    follow_links: bool,
}

impl ManifestScanner {
    pub fn new(config: &ManifestConfig) -> CachetResult<Self> {
        Ok(Self {
            exclude: PatternSet::new(&config.exclude)?,
            follow_links: config.follow_links,
        })
    }

    /// Scan `root`, hashing every file
    ///
    /// Entries are sorted by path. Git ignore files are not consulted: a
    /// build directory publishes what it contains.
    pub fn scan(&self, root: &Path) -> CachetResult<Vec<ManifestEntry>> {
        if !root.is_dir() {
            return Err(CachetError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let exclude = self.exclude.clone();
        let walk_root: PathBuf = root.to_path_buf();
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(self.follow_links)
            .filter_entry(move |entry| {
                let Some(rel) = relative(&walk_root, entry.path()) else {
                    return true;
                };
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !exclude.is_match_or_parent(&rel, is_dir)
            })
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let entry = result.map_err(|e| io::Error::other(e.to_string()))?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let Some(rel) = relative(root, entry.path()) else {
                continue;
            };

            let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
            let hash = ContentHash::from_reader(File::open(entry.path())?)?;
            debug!(path = %rel, size_bytes, "scanned");

            entries.push(ManifestEntry::new(rel, size_bytes).with_hash(hash));
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}

/// Root-relative path with `/` separators; `None` for the root itself
fn relative(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
