//! Cost warning value object.

use std::fmt;

use serde::Serialize;

/// Non-fatal advisory raised when a discrete invalidation is larger than
/// the configured budget.
///
/// Operators decide whether to proceed; the selector never fails on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostWarning {
    /// Number of discrete paths in the request
    pub path_count: usize,
    /// The configured `max_discrete_paths`
    pub limit: usize,
}

impl fmt::Display for CostWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalidating {} paths exceeds the budget of {}",
            self.path_count, self.limit
        )
    }
}
