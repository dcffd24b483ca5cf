//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod classifier;
mod invalidation;
mod planner;

pub use classifier::Classifier;
pub use invalidation::InvalidationSelector;
pub use planner::Planner;
