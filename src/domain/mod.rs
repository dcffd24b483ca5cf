//! Domain Layer
//!
//! The planning core - pure business logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Manifest records, remote listing, plan, invalidation request
//! - `value_objects/` - Immutable value types (AssetPath, CacheTier, ContentHash)
//! - `services/` - Classifier, Planner, InvalidationSelector
//! - `ports/` - Storage, CDN and event interfaces for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Services are stateless and deterministic
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
