//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `PlanPipeline` - Scan, classify and plan a build directory
//! - `PublishUseCase` - Upload batches, delete stale objects, invalidate
//! - `InvalidateUseCase` - Submit and await a standalone invalidation

pub mod invalidate;
pub mod pipeline;
pub mod publish;

pub use invalidate::{
    wait_for_completion, InvalidateOptions, InvalidateUseCase, InvalidationOutcome,
};
pub use pipeline::PlanPipeline;
pub use publish::{PublishOptions, PublishResult, PublishUseCase};
