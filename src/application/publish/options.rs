//! Publish Options

use std::path::PathBuf;

/// Options for the publish use case
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Build output directory
    pub source: PathBuf,
    /// Plan and report without touching storage or the CDN
    pub dry_run: bool,
    /// Delete remote objects missing from the build
    pub delete: bool,
    /// Skip uploads whose remote copy has the same hash
    pub skip_unchanged: bool,
    /// Block until the invalidation completes
    pub wait: bool,
}

impl PublishOptions {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dry_run: false,
            delete: true,
            skip_unchanged: true,
            wait: true,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_delete(mut self, delete: bool) -> Self {
        self.delete = delete;
        self
    }

    pub fn with_skip_unchanged(mut self, skip: bool) -> Self {
        self.skip_unchanged = skip;
        self
    }

    pub fn with_wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }
}
