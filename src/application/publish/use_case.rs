//! Publish Use Case
//!
//! Orchestrates a publication run:
//! 1. List the remote store
//! 2. Scan, classify and plan the build directory
//! 3. Upload batches in plan order (entry point last)
//! 4. Delete remote objects the build no longer has
//! 5. Select, submit and optionally await the invalidation
//!
//! Any storage failure stops the run before later batches go out, so a
//! failed run never leaves a new entry point referencing missing assets.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{Config, InvalidationPolicy};
use crate::domain::ports::{CdnBackend, PublishEvent, PublishEventSink, StorageBackend};
use crate::domain::value_objects::AssetPath;
use crate::error::CachetResult;

use super::super::invalidate::{InvalidateUseCase, InvalidationOutcome};
use super::super::pipeline::PlanPipeline;
use super::options::PublishOptions;
use super::result::PublishResult;

/// Publish use case, parameterized by its storage and CDN ports
pub struct PublishUseCase<S, C>
where
    S: StorageBackend,
    C: CdnBackend,
{
    storage: S,
    invalidator: InvalidateUseCase<C>,
    pipeline: PlanPipeline,
    policy: InvalidationPolicy,
}

impl<S, C> PublishUseCase<S, C>
where
    S: StorageBackend,
    C: CdnBackend,
{
    pub fn new(storage: S, cdn: C, config: &Config) -> CachetResult<Self> {
        Ok(Self {
            storage,
            invalidator: InvalidateUseCase::new(
                cdn,
                config.cdn.clone(),
                config.invalidation.clone(),
            ),
            pipeline: PlanPipeline::from_config(config)?,
            policy: config.invalidation.clone(),
        })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn cdn(&self) -> &C {
        self.invalidator.cdn()
    }

    /// Execute a publish run
    pub fn execute(
        &self,
        options: &PublishOptions,
        sink: &dyn PublishEventSink,
    ) -> CachetResult<PublishResult> {
        let listing = self.storage.list_remote_objects("")?;
        debug!(remote_objects = listing.len(), "remote listed");

        let plan = self.pipeline.plan(&options.source, Some(&listing))?;
        let mut result = PublishResult::new(plan.clone(), options.dry_run);

        sink.on_event(PublishEvent::Started {
            destination: self.storage.display_name(),
            file_count: plan.total_files(),
            dry_run: options.dry_run,
        });

        for batch in plan.upload_batches() {
            info!(
                tier = %batch.tier,
                files = batch.len(),
                cache_control = %batch.cache_control,
                "uploading batch"
            );
            sink.on_event(PublishEvent::BatchStarted {
                tier: batch.tier,
                cache_control: batch.cache_control.clone(),
                count: batch.len(),
            });

            for asset in &batch.assets {
                let path = asset.path();
                if options.skip_unchanged && plan.is_unchanged(path) {
                    debug!(%path, "unchanged");
                    result.skipped.push(path.clone());
                    sink.on_event(PublishEvent::Skipped { path: path.clone() });
                    continue;
                }

                if !options.dry_run {
                    let bytes = fs::read(source_file(&options.source, path))?;
                    self.storage.put_object(path, &bytes, &batch.cache_control)?;
                }
                debug!(%path, "uploaded");
                result.uploaded.push(path.clone());
                sink.on_event(PublishEvent::Uploaded {
                    path: path.clone(),
                    tier: batch.tier,
                });
            }
        }

        if options.delete {
            for path in plan.deletions() {
                if !options.dry_run {
                    self.storage.delete_object(path)?;
                }
                debug!(%path, "deleted");
                result.deleted.push(path.clone());
                sink.on_event(PublishEvent::Deleted { path: path.clone() });
            }
        }

        result.invalidation = self.invalidate(&result, options, sink)?;

        let invalidated = result.invalidated_count();
        info!(
            uploaded = result.uploaded.len(),
            skipped = result.skipped.len(),
            deleted = result.deleted.len(),
            invalidated,
            "publish complete"
        );
        sink.on_event(PublishEvent::Completed {
            uploaded: result.uploaded.len(),
            skipped: result.skipped.len(),
            deleted: result.deleted.len(),
            invalidated,
        });

        Ok(result)
    }

    /// Invalidate what this run changed: new or modified uploads plus the
    /// deletions that were actually carried out.
    fn invalidate(
        &self,
        result: &PublishResult,
        options: &PublishOptions,
        sink: &dyn PublishEventSink,
    ) -> CachetResult<Option<InvalidationOutcome>> {
        let changed: Vec<&str> = result
            .plan
            .records()
            .map(|r| r.path())
            .filter(|p| !result.plan.is_unchanged(p))
            .chain(result.deleted.iter())
            .map(AssetPath::as_str)
            .collect();

        let selection = self.pipeline.selector().select(changed, &self.policy)?;
        if let Some(warning) = &selection.warning {
            warn!(%warning, "invalidation over budget");
            sink.on_event(PublishEvent::CostWarning(warning.clone()));
        }
        if selection.request.is_empty() {
            info!("nothing to invalidate");
            return Ok(None);
        }

        let mut outcome = InvalidationOutcome {
            request: selection.request,
            id: None,
            status: None,
            warning: selection.warning,
        };

        let distribution_id = match self.invalidator.distribution_id() {
            Ok(id) => id,
            Err(_) => {
                info!(
                    paths = ?outcome.request.paths,
                    "no CDN distribution configured, skipping invalidation"
                );
                return Ok(Some(outcome));
            }
        };
        if options.dry_run {
            return Ok(Some(outcome));
        }

        let id = self
            .invalidator
            .submit(distribution_id, &outcome.request, sink)?;
        if options.wait {
            outcome.status = Some(self.invalidator.wait(distribution_id, &id, sink)?);
        }
        outcome.id = Some(id);
        Ok(Some(outcome))
    }
}

/// On-disk location of a planned asset
fn source_file(source: &Path, path: &AssetPath) -> PathBuf {
    path.as_str()
        .split('/')
        .fold(source.to_path_buf(), |acc, seg| acc.join(seg))
}
