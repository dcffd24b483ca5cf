//! Publication plan - the planner's output

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::value_objects::{AssetPath, CacheTier};

use super::AssetRecord;

/// All records of one tier, uploaded together with one directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadBatch {
    pub tier: CacheTier,
    pub cache_control: String,
    pub assets: Vec<AssetRecord>,
}

impl UploadBatch {
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.assets.iter().map(AssetRecord::size_bytes).sum()
    }
}

/// Ordered upload batches plus the deletion set
///
/// Invariant: `upload_batches` is strictly ascending by tier, so the
/// entry-point batch is always last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationPlan {
    upload_batches: Vec<UploadBatch>,
    deletions: BTreeSet<AssetPath>,
    unchanged: BTreeSet<AssetPath>,
}

impl PublicationPlan {
    pub(crate) fn new(
        upload_batches: Vec<UploadBatch>,
        deletions: BTreeSet<AssetPath>,
        unchanged: BTreeSet<AssetPath>,
    ) -> Self {
        debug_assert!(upload_batches.windows(2).all(|w| w[0].tier < w[1].tier));
        Self {
            upload_batches,
            deletions,
            unchanged,
        }
    }

    pub fn upload_batches(&self) -> &[UploadBatch] {
        &self.upload_batches
    }

    /// Remote paths to delete after all uploads
    pub fn deletions(&self) -> &BTreeSet<AssetPath> {
        &self.deletions
    }

    /// Paths whose remote copy already has identical content
    pub fn unchanged(&self) -> &BTreeSet<AssetPath> {
        &self.unchanged
    }

    pub fn is_unchanged(&self, path: &AssetPath) -> bool {
        self.unchanged.contains(path)
    }

    /// Every record, in upload order
    pub fn records(&self) -> impl Iterator<Item = &AssetRecord> {
        self.upload_batches.iter().flat_map(|b| b.assets.iter())
    }

    pub fn total_files(&self) -> usize {
        self.upload_batches.iter().map(UploadBatch::len).sum()
    }

    pub fn total_bytes(&self) -> u64 {
        self.upload_batches.iter().map(UploadBatch::total_bytes).sum()
    }

    /// Uploads that actually carry new content
    pub fn upload_count(&self) -> usize {
        self.total_files() - self.unchanged.len()
    }

    /// Paths whose served content changes in this run: new or modified
    /// uploads plus deletions. This is what invalidation is computed from.
    pub fn changed_paths(&self) -> BTreeSet<AssetPath> {
        self.records()
            .map(AssetRecord::path)
            .filter(|p| !self.unchanged.contains(*p))
            .chain(self.deletions.iter())
            .cloned()
            .collect()
    }

    /// The batch for a tier, if any record landed in it
    pub fn batch(&self, tier: CacheTier) -> Option<&UploadBatch> {
        self.upload_batches.iter().find(|b| b.tier == tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, tier: CacheTier, size: u64) -> AssetRecord {
        AssetRecord::new(AssetPath::new(path).unwrap(), size, None, tier)
    }

    fn sample_plan() -> PublicationPlan {
        PublicationPlan::new(
            vec![
                UploadBatch {
                    tier: CacheTier::Immutable,
                    cache_control: "max-age=31536000, immutable".into(),
                    assets: vec![record("app.abc123.js", CacheTier::Immutable, 100)],
                },
                UploadBatch {
                    tier: CacheTier::EntryPoint,
                    cache_control: "no-cache".into(),
                    assets: vec![record("index.html", CacheTier::EntryPoint, 20)],
                },
            ],
            [AssetPath::new("old.html").unwrap()].into_iter().collect(),
            [AssetPath::new("app.abc123.js").unwrap()].into_iter().collect(),
        )
    }

    #[test]
    fn totals() {
        let plan = sample_plan();
        assert_eq!(plan.total_files(), 2);
        assert_eq!(plan.total_bytes(), 120);
        assert_eq!(plan.upload_count(), 1);
    }

    #[test]
    fn changed_paths_skip_unchanged_and_include_deletions() {
        let plan = sample_plan();
        let changed: Vec<String> = plan
            .changed_paths()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(changed, vec!["index.html", "old.html"]);
    }

    #[test]
    fn batch_lookup() {
        let plan = sample_plan();
        assert!(plan.batch(CacheTier::EntryPoint).is_some());
        assert!(plan.batch(CacheTier::Media).is_none());
    }

    #[test]
    fn records_follow_upload_order() {
        let plan = sample_plan();
        let tiers: Vec<CacheTier> = plan.records().map(AssetRecord::tier).collect();
        assert_eq!(tiers, vec![CacheTier::Immutable, CacheTier::EntryPoint]);
    }
}
