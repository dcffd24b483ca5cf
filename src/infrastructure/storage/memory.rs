//! In-memory storage backend
//!
//! Keeps objects in a map and logs every mutation in call order, so tests
//! can assert the order uploads and deletions happened in.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::domain::entities::{RemoteListing, RemoteObject};
use crate::domain::ports::{StorageBackend, StorageError};
use crate::domain::value_objects::{AssetPath, ContentHash};

/// A stored object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub cache_control: String,
}

/// One recorded storage mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp {
    Put { path: String, cache_control: String },
    Delete { path: String },
}

#[derive(Debug, Default)]
struct State {
    objects: BTreeMap<AssetPath, StoredObject>,
    ops: Vec<StorageOp>,
    fail_on: Option<AssetPath>,
}

/// In-memory object store
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<State>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate an object without logging an operation
    pub fn with_object(self, path: &str, bytes: &[u8], cache_control: &str) -> Self {
        if let Ok(path) = AssetPath::new(path) {
            self.lock().objects.insert(
                path,
                StoredObject {
                    bytes: bytes.to_vec(),
                    cache_control: cache_control.to_string(),
                },
            );
        }
        self
    }

    /// Make `put_object` fail for one path
    pub fn failing_on(self, path: &str) -> Self {
        self.lock().fail_on = AssetPath::new(path).ok();
        self
    }

    pub fn object(&self, path: &str) -> Option<StoredObject> {
        let path = AssetPath::new(path).ok()?;
        self.lock().objects.get(&path).cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        self.lock().objects.keys().map(|p| p.to_string()).collect()
    }

    /// Mutations in the order they were made
    pub fn operations(&self) -> Vec<StorageOp> {
        self.lock().ops.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A poisoned map is still a valid map
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StorageBackend for MemoryStorage {
    fn display_name(&self) -> String {
        "memory".to_string()
    }

    fn list_remote_objects(&self, prefix: &str) -> Result<RemoteListing, StorageError> {
        let state = self.lock();
        Ok(state
            .objects
            .iter()
            .filter(|(path, _)| path.as_str().starts_with(prefix))
            .map(|(path, obj)| {
                (
                    path.clone(),
                    RemoteObject::new(ContentHash::from_bytes(&obj.bytes), &obj.cache_control),
                )
            })
            .collect())
    }

    fn put_object(
        &self,
        path: &AssetPath,
        bytes: &[u8],
        cache_control: &str,
    ) -> Result<(), StorageError> {
        let mut state = self.lock();
        if state.fail_on.as_ref() == Some(path) {
            return Err(StorageError::put(path, "injected failure"));
        }
        state.ops.push(StorageOp::Put {
            path: path.to_string(),
            cache_control: cache_control.to_string(),
        });
        state.objects.insert(
            path.clone(),
            StoredObject {
                bytes: bytes.to_vec(),
                cache_control: cache_control.to_string(),
            },
        );
        Ok(())
    }

    fn delete_object(&self, path: &AssetPath) -> Result<(), StorageError> {
        let mut state = self.lock();
        state.ops.push(StorageOp::Delete {
            path: path.to_string(),
        });
        state.objects.remove(path);
        Ok(())
    }
}
