//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod cdn;
pub mod publish_events;
pub mod storage;

pub use cdn::{CdnBackend, CdnError, InvalidationStatus};
pub use publish_events::{NoopEventSink, PublishEvent, PublishEventSink};
pub use storage::{StorageBackend, StorageError};
