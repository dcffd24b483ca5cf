//! Shared generators for publication paths and manifests.

use proptest::prelude::*;

use cachet::config::ClassifierConfig;
use cachet::{AssetRecord, Classifier, ManifestEntry};

const EXTENSIONS: &[&str] = &[
    "html", "js", "css", "png", "jpg", "svg", "woff2", "txt", "json", "xml", "map",
];

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_-]{0,7}").unwrap()
}

fn hash_segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[0-9a-f]{8}").unwrap()
}

/// A file name, sometimes with a content hash before the extension
pub fn file_name() -> impl Strategy<Value = String> {
    (
        segment(),
        proptest::option::of(hash_segment()),
        proptest::sample::select(EXTENSIONS),
    )
        .prop_map(|(stem, hash, ext)| match hash {
            Some(hash) => format!("{}.{}.{}", stem, hash, ext),
            None => format!("{}.{}", stem, ext),
        })
}

/// A publication-relative path, up to three directories deep
pub fn asset_path() -> impl Strategy<Value = String> {
    (proptest::collection::vec(segment(), 0..=3), file_name()).prop_map(|(dirs, name)| {
        let mut parts = dirs;
        parts.push(name);
        parts.join("/")
    })
}

/// Distinct paths that always include the root `index.html`
pub fn manifest_paths() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set(asset_path(), 0..24).prop_map(|set| {
        let mut paths: Vec<String> = set.into_iter().collect();
        if !paths.iter().any(|p| p == "index.html") {
            paths.push("index.html".to_string());
        }
        paths
    })
}

pub fn classifier() -> Classifier {
    Classifier::new(&ClassifierConfig::default()).unwrap()
}

pub fn records(paths: &[String]) -> Vec<AssetRecord> {
    classifier()
        .records(paths.iter().map(|p| ManifestEntry::new(p.as_str(), p.len() as u64)))
        .unwrap()
}
