//! Publish Result

use crate::application::invalidate::InvalidationOutcome;
use crate::domain::entities::PublicationPlan;
use crate::domain::value_objects::AssetPath;

/// Result of a publish run
#[derive(Debug, Clone)]
pub struct PublishResult {
    /// The plan that was executed
    pub plan: PublicationPlan,
    /// Objects uploaded (or that would be, in a dry run), in upload order
    pub uploaded: Vec<AssetPath>,
    /// Objects skipped as unchanged
    pub skipped: Vec<AssetPath>,
    /// Remote objects deleted
    pub deleted: Vec<AssetPath>,
    /// Invalidation; `None` when nothing changed that needs one
    pub invalidation: Option<InvalidationOutcome>,
    pub dry_run: bool,
}

impl PublishResult {
    pub(crate) fn new(plan: PublicationPlan, dry_run: bool) -> Self {
        Self {
            plan,
            uploaded: Vec::new(),
            skipped: Vec::new(),
            deleted: Vec::new(),
            invalidation: None,
            dry_run,
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.uploaded.is_empty() || !self.deleted.is_empty()
    }

    /// Number of CDN paths submitted
    pub fn invalidated_count(&self) -> usize {
        self.invalidation
            .as_ref()
            .filter(|o| o.id.is_some())
            .map_or(0, |o| o.request.paths.len())
    }
}
