//! In-flight submission tracking.
//!
//! The submission contract guarantees at most one outstanding insert per
//! user. [`SubmissionRegistry`] enforces that server-side: a handler
//! acquires a [`SubmissionGuard`] before starting a submission and the
//! slot frees itself when the guard drops, including on early returns and
//! panics.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Tracks which users currently have a submission in flight.
#[derive(Debug, Default)]
pub struct SubmissionRegistry {
    in_flight: Mutex<HashSet<String>>,
}

impl SubmissionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the submission slot for a user.
    ///
    /// Returns `None` if that user already has a submission in flight.
    pub fn acquire(registry: &Arc<Self>, user: &str) -> Option<SubmissionGuard> {
        let mut in_flight = registry.in_flight.lock().expect("registry lock poisoned");
        if !in_flight.insert(user.to_string()) {
            return None;
        }
        Some(SubmissionGuard {
            registry: Arc::clone(registry),
            user: user.to_string(),
        })
    }
}

/// Releases the user's submission slot on drop.
#[derive(Debug)]
pub struct SubmissionGuard {
    registry: Arc<SubmissionRegistry>,
    user: String,
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        let mut in_flight = self
            .registry
            .in_flight
            .lock()
            .expect("registry lock poisoned");
        in_flight.remove(&self.user);
    }
}
