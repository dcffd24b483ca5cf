//! Invalidation request - the selector's output

use serde::Serialize;

use crate::domain::value_objects::CostWarning;

/// CDN path that discards every cached object
pub const WILDCARD_PATH: &str = "/*";

/// Paths to submit to the CDN
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidationRequest {
    /// Sorted, deduplicated CDN paths, each with a leading `/`
    pub paths: Vec<String>,
    pub is_wildcard: bool,
}

impl InvalidationRequest {
    pub fn discrete(paths: Vec<String>) -> Self {
        Self {
            paths,
            is_wildcard: false,
        }
    }

    pub fn wildcard() -> Self {
        Self {
            paths: vec![WILDCARD_PATH.to_string()],
            is_wildcard: true,
        }
    }

    /// Nothing needs invalidating
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Request plus the advisory raised while selecting it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidationSelection {
    pub request: InvalidationRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<CostWarning>,
}
