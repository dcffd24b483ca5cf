//! Publish Module
//!
//! ## Structure
//!
//! - `options` - `PublishOptions`
//! - `result` - `PublishResult`
//! - `use_case` - `PublishUseCase`
//!
//! ## Usage
//!
//! ```ignore
//! use cachet::application::publish::{PublishOptions, PublishUseCase};
//!
//! let use_case = PublishUseCase::new(storage, cdn, &config)?;
//! let result = use_case.execute(&PublishOptions::new("dist"), &NoopEventSink)?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::PublishOptions;
pub use result::PublishResult;
pub use use_case::PublishUseCase;
