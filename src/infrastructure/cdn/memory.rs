//! In-memory CDN backend

use std::sync::Mutex;

use crate::domain::ports::{CdnBackend, CdnError, InvalidationStatus};

/// A recorded invalidation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedInvalidation {
    pub id: String,
    pub distribution_id: String,
    pub paths: Vec<String>,
    pub polls: usize,
}

#[derive(Debug, Default)]
struct State {
    invalidations: Vec<RecordedInvalidation>,
}

/// CDN stand-in that reports `Completed` after a number of status polls
#[derive(Debug)]
pub struct MemoryCdn {
    polls_until_complete: Option<usize>,
    state: Mutex<State>,
}

impl Default for MemoryCdn {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCdn {
    /// Completes on the first poll
    pub fn new() -> Self {
        Self::completing_after(1)
    }

    /// Completes on poll number `polls`
    pub fn completing_after(polls: usize) -> Self {
        Self {
            polls_until_complete: Some(polls.max(1)),
            state: Mutex::new(State::default()),
        }
    }

    /// Stays in progress forever
    pub fn never_completing() -> Self {
        Self {
            polls_until_complete: None,
            state: Mutex::new(State::default()),
        }
    }

    pub fn invalidations(&self) -> Vec<RecordedInvalidation> {
        self.lock().invalidations.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CdnBackend for MemoryCdn {
    fn create_invalidation(
        &self,
        distribution_id: &str,
        paths: &[String],
    ) -> Result<String, CdnError> {
        if paths.is_empty() {
            return Err(CdnError::Rejected("no paths".into()));
        }
        let mut state = self.lock();
        let id = format!("I{:04}", state.invalidations.len() + 1);
        state.invalidations.push(RecordedInvalidation {
            id: id.clone(),
            distribution_id: distribution_id.to_string(),
            paths: paths.to_vec(),
            polls: 0,
        });
        Ok(id)
    }

    fn get_invalidation_status(
        &self,
        _distribution_id: &str,
        invalidation_id: &str,
    ) -> Result<InvalidationStatus, CdnError> {
        let mut state = self.lock();
        let record = state
            .invalidations
            .iter_mut()
            .find(|r| r.id == invalidation_id)
            .ok_or_else(|| CdnError::UnknownInvalidation(invalidation_id.to_string()))?;
        record.polls += 1;

        match self.polls_until_complete {
            Some(n) if record.polls >= n => Ok(InvalidationStatus::Completed),
            _ => Ok(InvalidationStatus::InProgress),
        }
    }
}
