//! Publish Event Port
//!
//! Provides an observable interface for publish operations.
//! Enables progress reporting, JSON event streams, and debugging.

use crate::domain::value_objects::{AssetPath, CacheTier, CostWarning};

use super::InvalidationStatus;

/// Event emitted during publish operations
#[derive(Debug, Clone, PartialEq)]
pub enum PublishEvent {
    /// Publish started
    Started {
        destination: String,
        file_count: usize,
        dry_run: bool,
    },

    /// A tier batch is about to be uploaded
    BatchStarted {
        tier: CacheTier,
        cache_control: String,
        count: usize,
    },

    /// Object uploaded
    Uploaded { path: AssetPath, tier: CacheTier },

    /// Object skipped because the remote copy is identical
    Skipped { path: AssetPath },

    /// Remote object deleted
    Deleted { path: AssetPath },

    /// Invalidation budget exceeded (advisory)
    CostWarning(CostWarning),

    /// Invalidation submitted
    InvalidationCreated { id: String, paths: Vec<String> },

    /// Invalidation polled
    InvalidationPolled {
        id: String,
        status: InvalidationStatus,
    },

    /// Publish completed
    Completed {
        uploaded: usize,
        skipped: usize,
        deleted: usize,
        invalidated: usize,
    },
}

/// Trait for receiving publish events
///
/// Implementations can be:
/// - ConsoleEventSink: progress lines in the terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait PublishEventSink {
    /// Handle a publish event
    fn on_event(&self, event: PublishEvent);

    /// Check if this sink wants per-object events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl PublishEventSink for NoopEventSink {
    fn on_event(&self, _event: PublishEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
