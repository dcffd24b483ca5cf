//! Plan Pipeline
//!
//! Scan → classify → plan, shared by `plan` and `publish`.

use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::domain::entities::{AssetRecord, PublicationPlan, RemoteListing};
use crate::domain::services::{Classifier, InvalidationSelector, Planner};
use crate::error::CachetResult;
use crate::infrastructure::fs::ManifestScanner;

/// Configured classifier, planner and scanner
#[derive(Debug, Clone)]
pub struct PlanPipeline {
    scanner: ManifestScanner,
    classifier: Classifier,
    planner: Planner,
}

impl PlanPipeline {
    pub fn from_config(config: &Config) -> CachetResult<Self> {
        Ok(Self {
            scanner: ManifestScanner::new(&config.manifest)?,
            classifier: Classifier::new(&config.classifier)?,
            planner: Planner::new(
                config.cache_directives.clone(),
                config.classifier.entry_filename.clone(),
            ),
        })
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn selector(&self) -> InvalidationSelector<'_> {
        InvalidationSelector::new(&self.classifier)
    }

    /// Scan and classify a build directory
    pub fn records(&self, source: &Path) -> CachetResult<Vec<AssetRecord>> {
        let entries = self.scanner.scan(source)?;
        debug!(source = %source.display(), files = entries.len(), "manifest scanned");
        self.classifier.records(entries)
    }

    /// Scan, classify and plan against an optional remote listing
    pub fn plan(
        &self,
        source: &Path,
        previous: Option<&RemoteListing>,
    ) -> CachetResult<PublicationPlan> {
        let records = self.records(source)?;
        let plan = self.planner.plan(&records, previous)?;
        info!(
            files = plan.total_files(),
            batches = plan.upload_batches().len(),
            deletions = plan.deletions().len(),
            unchanged = plan.unchanged().len(),
            "publication planned"
        );
        Ok(plan)
    }
}
