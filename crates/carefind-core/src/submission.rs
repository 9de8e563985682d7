//! Last-submission-wins guard for a single form.
//!
//! In-flight calls are never aborted. Each submit takes a ticket; when a call
//! resolves its result is applied only if the ticket is still the newest one
//! issued for that form.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

/// One tracker per form. Trackers for different forms are independent.
#[derive(Debug, Default)]
pub struct SubmissionTracker {
    latest: AtomicU64,
}

impl SubmissionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new submission, superseding all earlier ones.
    pub fn begin(&self) -> SubmissionTicket {
        SubmissionTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[must_use]
    pub fn is_current(&self, ticket: SubmissionTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Returns `value` if `ticket` is still current, otherwise drops it.
    pub fn accept<T>(&self, ticket: SubmissionTicket, value: T) -> Option<T> {
        self.is_current(ticket).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_ticket_is_current() {
        let tracker = SubmissionTracker::new();
        let first = tracker.begin();
        assert!(tracker.is_current(first));
        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn stale_result_is_discarded() {
        let tracker = SubmissionTracker::new();
        let slow = tracker.begin();
        let fast = tracker.begin();
        assert_eq!(tracker.accept(fast, "fast"), Some("fast"));
        assert_eq!(tracker.accept(slow, "slow"), None);
    }

    #[test]
    fn trackers_are_independent() {
        let search = SubmissionTracker::new();
        let analysis = SubmissionTracker::new();
        let s = search.begin();
        let _ = analysis.begin();
        let _ = analysis.begin();
        assert!(search.is_current(s));
    }
}
