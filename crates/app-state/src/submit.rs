//! In-flight tracking for form submissions
//!
//! While a submission is outstanding the submit button is disabled; a
//! second submit attempt is refused instead of queued.

use std::sync::atomic::{AtomicBool, Ordering};

/// One-at-a-time submission flag
#[derive(Debug, Default)]
pub struct InFlight {
    active: AtomicBool,
}

impl InFlight {
    /// Create an idle flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a submission is outstanding
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Start a submission
    ///
    /// Returns None when one is already outstanding. The flag clears when
    /// the returned guard drops, whichever way the submission ends.
    pub fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| InFlightGuard { active: &self.active })
    }
}

/// Marks a submission as outstanding until dropped
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    active: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }
}
