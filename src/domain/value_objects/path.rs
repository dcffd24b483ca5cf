//! Asset Path Value Object
//!
//! A publication-relative path in canonical form:
//! - Forward slashes only
//! - No leading `/` or `./`
//! - No empty, `.` or `..` segments
//!
//! Object keys, manifest paths and CDN paths all pass through here so that
//! set operations (deletions, invalidation dedup) compare like with like.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error when path normalization fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Path contains traversal components (..)
    ContainsTraversal,
    /// Path has no segments left after normalization
    Empty,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::ContainsTraversal => write!(f, "path contains traversal components (..)"),
            PathError::Empty => write!(f, "path is empty"),
        }
    }
}

impl std::error::Error for PathError {}

/// A normalized, forward-slash relative path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetPath(String);

impl AssetPath {
    /// Normalize a raw path
    pub fn new(raw: &str) -> Result<Self, PathError> {
        let unified = raw.replace('\\', "/");
        let mut segments = Vec::new();

        for segment in unified.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return Err(PathError::ContainsTraversal),
                s => segments.push(s),
            }
        }

        if segments.is_empty() {
            return Err(PathError::Empty);
        }

        Ok(Self(segments.join("/")))
    }

    /// Get the normalized path
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path segment
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Lowercased extension of the final segment, if any
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name();
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(name[idx + 1..].to_ascii_lowercase()),
        }
    }

    /// Number of directory components before the final segment
    pub fn depth(&self) -> usize {
        self.0.matches('/').count()
    }

    /// True when the file sits directly in the publication root
    pub fn is_root_level(&self) -> bool {
        self.depth() == 0
    }

    /// CDN form of the path (leading `/`)
    pub fn to_cdn_path(&self) -> String {
        format!("/{}", self.0)
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AssetPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl TryFrom<&str> for AssetPath {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AssetPath> for String {
    fn from(path: AssetPath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_relative_path() {
        let path = AssetPath::new("assets/app.js").unwrap();
        assert_eq!(path.as_str(), "assets/app.js");
    }

    #[test]
    fn strips_leading_slash_and_dot() {
        assert_eq!(AssetPath::new("/index.html").unwrap().as_str(), "index.html");
        assert_eq!(AssetPath::new("./index.html").unwrap().as_str(), "index.html");
    }

    #[test]
    fn converts_backslashes() {
        let path = AssetPath::new("img\\logo.png").unwrap();
        assert_eq!(path.as_str(), "img/logo.png");
    }

    #[test]
    fn collapses_empty_segments() {
        let path = AssetPath::new("docs//./guide.html").unwrap();
        assert_eq!(path.as_str(), "docs/guide.html");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(AssetPath::new(""), Err(PathError::Empty));
        assert_eq!(AssetPath::new("/./"), Err(PathError::Empty));
    }

    #[test]
    fn rejects_traversal() {
        assert_eq!(
            AssetPath::new("a/../../escape"),
            Err(PathError::ContainsTraversal)
        );
    }

    #[test]
    fn file_name_and_extension() {
        let path = AssetPath::new("fonts/Inter.WOFF2").unwrap();
        assert_eq!(path.file_name(), "Inter.WOFF2");
        assert_eq!(path.extension().as_deref(), Some("woff2"));
    }

    #[test]
    fn dotfile_has_no_extension() {
        let path = AssetPath::new(".nojekyll").unwrap();
        assert_eq!(path.extension(), None);
    }

    #[test]
    fn depth_counts_directories() {
        assert!(AssetPath::new("index.html").unwrap().is_root_level());
        assert_eq!(AssetPath::new("docs/api/index.html").unwrap().depth(), 2);
    }

    #[test]
    fn cdn_path_has_leading_slash() {
        let path = AssetPath::new("about.html").unwrap();
        assert_eq!(path.to_cdn_path(), "/about.html");
    }

    #[test]
    fn serde_normalizes() {
        let path: AssetPath = serde_json::from_str("\"/a//b.css\"").unwrap();
        assert_eq!(path.as_str(), "a/b.css");
        assert!(serde_json::from_str::<AssetPath>("\"../x\"").is_err());
    }
}
