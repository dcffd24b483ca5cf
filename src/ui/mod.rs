//! Terminal and JSON presentation for the `cachet` binary

pub mod error;
pub mod json;
pub mod output;
