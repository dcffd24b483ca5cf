//! Publication planning service
//!
//! Pure domain logic: partitions classified records into upload batches
//! and computes the deletion set. No I/O - the caller lists the remote
//! bucket and executes the plan.
//!
//! Batches are emitted in ascending tier order. The entry document is
//! therefore uploaded after every asset it can reference, and a client
//! never receives fresh HTML that points at a hashed file still in flight.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::CacheDirectives;
use crate::domain::entities::{AssetRecord, PublicationPlan, RemoteListing, UploadBatch};
use crate::domain::value_objects::{AssetPath, CacheTier};
use crate::error::{CachetError, CachetResult};

/// Pure planning service
#[derive(Debug, Clone)]
pub struct Planner {
    directives: CacheDirectives,
    entry_filename: String,
}

impl Planner {
    pub fn new(directives: CacheDirectives, entry_filename: impl Into<String>) -> Self {
        Self {
            directives,
            entry_filename: entry_filename.into(),
        }
    }

    /// Plan a publication run
    ///
    /// # Arguments
    /// * `manifest` - Classified records of the local build
    /// * `previous` - Remote listing; deletions are only computed when given
    ///
    /// # Errors
    /// `EmptyManifest`, `DuplicatePath`, `MissingEntryPoint`
    pub fn plan(
        &self,
        manifest: &[AssetRecord],
        previous: Option<&RemoteListing>,
    ) -> CachetResult<PublicationPlan> {
        if manifest.is_empty() {
            return Err(CachetError::EmptyManifest);
        }

        let mut local_paths: BTreeSet<&AssetPath> = BTreeSet::new();
        for record in manifest {
            if !local_paths.insert(record.path()) {
                return Err(CachetError::DuplicatePath {
                    path: record.path().to_string(),
                });
            }
        }

        if !manifest.iter().any(AssetRecord::is_entry_point) {
            return Err(CachetError::MissingEntryPoint {
                entry_filename: self.entry_filename.clone(),
            });
        }

        let mut buckets: BTreeMap<CacheTier, Vec<AssetRecord>> = BTreeMap::new();
        for record in manifest {
            buckets.entry(record.tier()).or_default().push(record.clone());
        }

        // BTreeMap iterates in tier order, which is upload order
        let upload_batches = buckets
            .into_iter()
            .map(|(tier, mut assets)| {
                assets.sort_by(|a, b| a.path().cmp(b.path()));
                UploadBatch {
                    tier,
                    cache_control: self.directives.for_tier(tier).to_string(),
                    assets,
                }
            })
            .collect();

        // Same bytes under a different directive still need a re-upload,
        // otherwise the stored header goes stale
        let (deletions, unchanged) = match previous {
            Some(listing) => (
                listing
                    .paths()
                    .filter(|p| !local_paths.contains(p))
                    .cloned()
                    .collect(),
                manifest
                    .iter()
                    .filter(|r| {
                        r.content_hash().is_some_and(|hash| {
                            listing.is_current(
                                r.path(),
                                hash,
                                self.directives.for_tier(r.tier()),
                            )
                        })
                    })
                    .map(|r| r.path().clone())
                    .collect(),
            ),
            None => (BTreeSet::new(), BTreeSet::new()),
        };

        Ok(PublicationPlan::new(upload_batches, deletions, unchanged))
    }
}
