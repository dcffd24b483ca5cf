//! Invalidate Use Case
//!
//! Submits an invalidation for explicit paths (or the wildcard) and
//! optionally waits for the CDN to finish. `publish` reuses the wait loop.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::{CdnConfig, InvalidationPolicy};
use crate::domain::entities::InvalidationRequest;
use crate::domain::ports::{CdnBackend, InvalidationStatus, PublishEvent, PublishEventSink};
use crate::domain::services::InvalidationSelector;
use crate::domain::value_objects::CostWarning;
use crate::error::{CachetError, CachetResult};

/// Options for the invalidate use case
#[derive(Debug, Clone, Default)]
pub struct InvalidateOptions {
    /// Paths to invalidate, with or without a leading `/`
    pub paths: Vec<String>,
    /// Request the wildcard instead of discrete paths
    pub all: bool,
    /// The operator confirmed the wildcard (`--yes` or the prompt)
    pub confirmed: bool,
    /// Block until the CDN reports completion
    pub wait: bool,
}

impl InvalidateOptions {
    pub fn paths(paths: Vec<String>) -> Self {
        Self {
            paths,
            ..Self::default()
        }
    }

    pub fn all() -> Self {
        Self {
            all: true,
            ..Self::default()
        }
    }

    pub fn with_confirmed(mut self, confirmed: bool) -> Self {
        self.confirmed = confirmed;
        self
    }

    pub fn with_wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }
}

/// Outcome of a submitted (or skipped) invalidation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationOutcome {
    pub request: InvalidationRequest,
    /// Provider id; `None` when nothing was submitted
    pub id: Option<String>,
    /// Last known status; `None` when not polled
    pub status: Option<InvalidationStatus>,
    pub warning: Option<CostWarning>,
}

/// Invalidate use case
pub struct InvalidateUseCase<C: CdnBackend> {
    cdn: C,
    settings: CdnConfig,
    policy: InvalidationPolicy,
}

impl<C: CdnBackend> InvalidateUseCase<C> {
    pub fn new(cdn: C, settings: CdnConfig, policy: InvalidationPolicy) -> Self {
        Self {
            cdn,
            settings,
            policy,
        }
    }

    pub fn cdn(&self) -> &C {
        &self.cdn
    }

    /// Select and submit
    ///
    /// Explicit paths are taken as given, minus hashed assets: asking for a
    /// path is stronger than the entry-only default.
    pub fn execute(
        &self,
        selector: &InvalidationSelector<'_>,
        options: &InvalidateOptions,
        sink: &dyn PublishEventSink,
    ) -> CachetResult<InvalidationOutcome> {
        let distribution_id = self.distribution_id()?;

        let policy = InvalidationPolicy {
            entry_only: false,
            explicit_wildcard_confirmed: self.policy.explicit_wildcard_confirmed
                || options.confirmed,
            wildcard: options.all,
            ..self.policy.clone()
        };
        let selection = selector.select(&options.paths, &policy)?;
        if let Some(warning) = &selection.warning {
            warn!(%warning, "invalidation over budget");
            sink.on_event(PublishEvent::CostWarning(warning.clone()));
        }

        if selection.request.is_empty() {
            info!("nothing to invalidate");
            return Ok(InvalidationOutcome {
                request: selection.request,
                id: None,
                status: None,
                warning: selection.warning,
            });
        }

        let id = self.submit(distribution_id, &selection.request, sink)?;
        let status = if options.wait {
            Some(self.wait(distribution_id, &id, sink)?)
        } else {
            None
        };

        Ok(InvalidationOutcome {
            request: selection.request,
            id: Some(id),
            status,
            warning: selection.warning,
        })
    }

    pub(crate) fn distribution_id(&self) -> CachetResult<&str> {
        self.settings
            .distribution_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or(CachetError::NotConfigured {
                setting: "cdn.distribution_id",
                hint: "set [cdn] distribution_id or CACHET_DISTRIBUTION_ID",
            })
    }

    /// Submit a non-empty request
    pub(crate) fn submit(
        &self,
        distribution_id: &str,
        request: &InvalidationRequest,
        sink: &dyn PublishEventSink,
    ) -> CachetResult<String> {
        let id = self.cdn.create_invalidation(distribution_id, &request.paths)?;
        info!(%id, paths = request.paths.len(), wildcard = request.is_wildcard, "invalidation created");
        sink.on_event(PublishEvent::InvalidationCreated {
            id: id.clone(),
            paths: request.paths.clone(),
        });
        Ok(id)
    }

    /// Poll until completed or the configured timeout passes
    pub(crate) fn wait(
        &self,
        distribution_id: &str,
        id: &str,
        sink: &dyn PublishEventSink,
    ) -> CachetResult<InvalidationStatus> {
        wait_for_completion(
            &self.cdn,
            distribution_id,
            id,
            self.settings.poll_interval(),
            self.settings.timeout(),
            sink,
        )
    }
}

/// Poll `get_invalidation_status` every `interval` until `Completed`
///
/// # Errors
/// `InvalidationTimeout` once `timeout` has elapsed with the invalidation
/// still in progress; CDN errors are returned as they come.
pub fn wait_for_completion<C: CdnBackend + ?Sized>(
    cdn: &C,
    distribution_id: &str,
    id: &str,
    interval: Duration,
    timeout: Duration,
    sink: &dyn PublishEventSink,
) -> CachetResult<InvalidationStatus> {
    let started = Instant::now();
    loop {
        let status = cdn.get_invalidation_status(distribution_id, id)?;
        debug!(%id, %status, "polled invalidation");
        sink.on_event(PublishEvent::InvalidationPolled {
            id: id.to_string(),
            status,
        });

        if status == InvalidationStatus::Completed {
            info!(%id, "invalidation completed");
            return Ok(status);
        }

        let waited = started.elapsed();
        if waited >= timeout {
            return Err(CachetError::InvalidationTimeout {
                id: id.to_string(),
                waited,
            });
        }
        thread::sleep(interval.min(timeout - waited));
    }
}
