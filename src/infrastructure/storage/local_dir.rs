//! Local directory storage backend
//!
//! Mirrors the bucket into a directory, for previews and for tests that
//! want to look at real files. Object metadata lives beside the objects
//! in `.cachet/objects.json`:
//!
//! ```json
//! {
//!   "version": 1,
//!   "objects": {
//!     "index.html": {
//!       "cache_control": "no-cache, no-store, must-revalidate",
//!       "hash": "sha256:…",
//!       "uploaded_at": "2026-01-01T00:00:00Z"
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{RemoteListing, RemoteObject};
use crate::domain::ports::{StorageBackend, StorageError};
use crate::domain::value_objects::{AssetPath, ContentHash};

use super::super::fs::LocalFs;

/// Directory holding the index, relative to the storage root
pub const INDEX_DIR: &str = ".cachet";
const INDEX_FILE: &str = "objects.json";
const INDEX_VERSION: u32 = 1;

/// Metadata of one stored object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub cache_control: String,
    pub hash: ContentHash,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ObjectIndex {
    version: u32,
    #[serde(default)]
    objects: BTreeMap<AssetPath, ObjectMeta>,
}

impl Default for ObjectIndex {
    fn default() -> Self {
        Self {
            version: INDEX_VERSION,
            objects: BTreeMap::new(),
        }
    }
}

/// Object store backed by a local directory
#[derive(Debug, Clone)]
pub struct LocalDirStorage {
    root: PathBuf,
    fs: LocalFs,
}

impl LocalDirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fs: LocalFs::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stored metadata of an object
    pub fn metadata(&self, path: &AssetPath) -> Result<Option<ObjectMeta>, StorageError> {
        Ok(self.load_index()?.objects.get(path).cloned())
    }

    fn object_path(&self, path: &AssetPath) -> PathBuf {
        path.as_str()
            .split('/')
            .fold(self.root.clone(), |acc, seg| acc.join(seg))
    }

    fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_DIR).join(INDEX_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(INDEX_DIR).join("lock")
    }

    fn load_index(&self) -> Result<ObjectIndex, StorageError> {
        let path = self.index_path();
        if !path.exists() {
            return Ok(ObjectIndex::default());
        }
        let content = fs::read(&path).map_err(|e| StorageError::ListFailed(e.to_string()))?;
        let index: ObjectIndex = serde_json::from_slice(&content).map_err(|e| {
            StorageError::ListFailed(format!("corrupted index {}: {}", path.display(), e))
        })?;
        if index.version != INDEX_VERSION {
            return Err(StorageError::ListFailed(format!(
                "unsupported index version {} in {}",
                index.version,
                path.display()
            )));
        }
        Ok(index)
    }

    fn save_index(&self, index: &ObjectIndex) -> Result<(), StorageError> {
        let content = serde_json::to_vec_pretty(index)
            .map_err(|e| StorageError::CommandFailed(e.to_string()))?;
        self.fs
            .write_atomic(&self.index_path(), &content)
            .map_err(|e| StorageError::CommandFailed(e.to_string()))
    }

    /// Read-modify-write the index under an exclusive lock
    fn update_index<F>(&self, op: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut ObjectIndex),
    {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::CommandFailed(e.to_string()))?;
        }
        let lock_file =
            fs::File::create(&lock_path).map_err(|e| StorageError::CommandFailed(e.to_string()))?;
        lock_file
            .lock_exclusive()
            .map_err(|e| StorageError::CommandFailed(e.to_string()))?;

        let result = self.load_index().and_then(|mut index| {
            op(&mut index);
            self.save_index(&index)
        });

        let _ = lock_file.unlock();
        result
    }
}

impl StorageBackend for LocalDirStorage {
    fn display_name(&self) -> String {
        format!("dir:{}", self.root.display())
    }

    fn list_remote_objects(&self, prefix: &str) -> Result<RemoteListing, StorageError> {
        Ok(self
            .load_index()?
            .objects
            .into_iter()
            .filter(|(path, _)| path.as_str().starts_with(prefix))
            .map(|(path, meta)| (path, RemoteObject::new(meta.hash, meta.cache_control)))
            .collect())
    }

    fn put_object(
        &self,
        path: &AssetPath,
        bytes: &[u8],
        cache_control: &str,
    ) -> Result<(), StorageError> {
        self.fs
            .write_atomic(&self.object_path(path), bytes)
            .map_err(|e| StorageError::put(path, e.to_string()))?;

        let meta = ObjectMeta {
            cache_control: cache_control.to_string(),
            hash: ContentHash::from_bytes(bytes),
            uploaded_at: Utc::now(),
        };
        self.update_index(|index| {
            index.objects.insert(path.clone(), meta);
        })
    }

    fn delete_object(&self, path: &AssetPath) -> Result<(), StorageError> {
        self.fs
            .remove_and_prune(&self.object_path(path), &self.root)
            .map_err(|e| StorageError::delete(path, e.to_string()))?;
        self.update_index(|index| {
            index.objects.remove(path);
        })
    }
}
