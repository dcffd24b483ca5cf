//! Glob pattern set value object
//!
//! Wraps the `ignore` crate's gitignore matcher so configured globs follow
//! one well-known syntax: a pattern without `/` matches the final segment
//! at any depth, `!pattern` re-includes, and `dir/` matches a directory.

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::{CachetError, CachetResult};

/// A compiled set of gitignore-style globs
#[derive(Debug, Clone)]
pub struct PatternSet {
    matcher: Gitignore,
    patterns: Vec<String>,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl PatternSet {
    /// A pattern set that matches nothing
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            patterns: Vec::new(),
        }
    }

    /// Compile patterns. Blank lines and `#` comments are skipped.
    ///
    /// Matching is case-insensitive: `APP.1A2B3C.JS` and `app.1a2b3c.js`
    /// are the same asset to a CDN fronting a case-insensitive origin.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> CachetResult<Self> {
        let mut builder = GitignoreBuilder::new("");
        builder
            .case_insensitive(true)
            .map_err(|e| CachetError::InvalidPattern {
                pattern: String::new(),
                message: e.to_string(),
            })?;

        let mut kept = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() || pattern.starts_with('#') {
                continue;
            }
            builder
                .add_line(None, pattern)
                .map_err(|e| CachetError::InvalidPattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })?;
            kept.push(pattern.to_string());
        }

        let matcher = builder.build().map_err(|e| CachetError::InvalidPattern {
            pattern: kept.join(", "),
            message: e.to_string(),
        })?;

        Ok(Self {
            matcher,
            patterns: kept,
        })
    }

    /// Check whether a relative file path matches
    pub fn is_match(&self, rel_path: &str) -> bool {
        !self.patterns.is_empty() && self.matcher.matched(rel_path, false).is_ignore()
    }

    /// Check a path, also matching when any parent directory matches
    pub fn is_match_or_parent(&self, rel_path: &str, is_dir: bool) -> bool {
        !self.patterns.is_empty()
            && self
                .matcher
                .matched_path_or_any_parents(rel_path, is_dir)
                .is_ignore()
    }

    /// The patterns that were compiled
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Check if this is an empty pattern set
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let set = PatternSet::empty();
        assert!(!set.is_match("app.js"));
        assert!(set.is_empty());
    }

    #[test]
    fn basename_pattern_matches_at_any_depth() {
        let set = PatternSet::new(&["*.*.js"]).unwrap();
        assert!(set.is_match("app.abc123.js"));
        assert!(set.is_match("static/js/app.abc123.js"));
        assert!(!set.is_match("app.js"));
    }

    #[test]
    fn negation_reincludes() {
        let set = PatternSet::new(&["*.*.js", "!*.min.js"]).unwrap();
        assert!(set.is_match("app.abc123.js"));
        assert!(!set.is_match("vendor.min.js"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let set = PatternSet::new(&["*.*.css"]).unwrap();
        assert!(set.is_match("Main.F00BA4.CSS"));
    }

    #[test]
    fn comments_and_blanks_skipped() {
        let set = PatternSet::new(&["# hashed bundles", "", "*.*.js"]).unwrap();
        assert_eq!(set.patterns(), &["*.*.js".to_string()]);
    }

    #[test]
    fn directory_pattern_matches_children() {
        let set = PatternSet::new(&[".git/"]).unwrap();
        assert!(set.is_match_or_parent(".git/HEAD", false));
        assert!(!set.is_match_or_parent("git.html", false));
    }

    #[test]
    fn invalid_glob_is_reported() {
        let err = PatternSet::new(&["src/[z-a].js"]).unwrap_err();
        assert!(matches!(err, CachetError::InvalidPattern { .. }));
    }
}
