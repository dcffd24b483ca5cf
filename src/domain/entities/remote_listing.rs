//! Remote listing - snapshot of what the bucket held before this run

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AssetPath, ContentHash};

/// What the store knows about one object
///
/// Either field is `None` when the backend cannot report it (S3 listings
/// carry neither a content hash nor the `Cache-Control` header).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<ContentHash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<String>,
}

impl RemoteObject {
    pub fn new(hash: ContentHash, cache_control: impl Into<String>) -> Self {
        Self {
            hash: Some(hash),
            cache_control: Some(cache_control.into()),
        }
    }
}

/// Remote object keys with whatever metadata the store reported
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteListing {
    objects: BTreeMap<AssetPath, RemoteObject>,
}

impl RemoteListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an object whose directive is unknown
    pub fn insert(&mut self, path: AssetPath, hash: Option<ContentHash>) {
        self.objects.insert(
            path,
            RemoteObject {
                hash,
                cache_control: None,
            },
        );
    }

    pub fn insert_object(&mut self, path: AssetPath, object: RemoteObject) {
        self.objects.insert(path, object);
    }

    pub fn contains(&self, path: &AssetPath) -> bool {
        self.objects.contains_key(path)
    }

    pub fn get(&self, path: &AssetPath) -> Option<&RemoteObject> {
        self.objects.get(path)
    }

    /// Known hash of a remote object
    pub fn hash_of(&self, path: &AssetPath) -> Option<&ContentHash> {
        self.get(path).and_then(|o| o.hash.as_ref())
    }

    /// Stored `Cache-Control` of a remote object
    pub fn cache_control_of(&self, path: &AssetPath) -> Option<&str> {
        self.get(path).and_then(|o| o.cache_control.as_deref())
    }

    /// True only when both the content and the directive are known to match
    pub fn is_current(&self, path: &AssetPath, hash: &ContentHash, cache_control: &str) -> bool {
        self.hash_of(path) == Some(hash) && self.cache_control_of(path) == Some(cache_control)
    }

    pub fn paths(&self) -> impl Iterator<Item = &AssetPath> {
        self.objects.keys()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl From<BTreeSet<AssetPath>> for RemoteListing {
    fn from(paths: BTreeSet<AssetPath>) -> Self {
        paths.into_iter().collect()
    }
}

impl FromIterator<AssetPath> for RemoteListing {
    fn from_iter<I: IntoIterator<Item = AssetPath>>(iter: I) -> Self {
        Self {
            objects: iter
                .into_iter()
                .map(|p| (p, RemoteObject::default()))
                .collect(),
        }
    }
}

impl FromIterator<(AssetPath, RemoteObject)> for RemoteListing {
    fn from_iter<I: IntoIterator<Item = (AssetPath, RemoteObject)>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}
