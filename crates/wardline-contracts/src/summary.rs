//! Aggregate summary types for dashboard header cards.

use serde::{Deserialize, Serialize};

/// Record count for one status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount<S> {
    pub status: S,
    pub count: usize,
}

/// Counts and percentages derived from the current record collection.
///
/// Always recomputed, never persisted. `by_status` follows the order of the
/// status domain it was computed over and includes zero-count entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSummary<S> {
    /// Number of records summarized.
    pub total_count: usize,
    /// One entry per domain status, in domain order.
    pub by_status: Vec<StatusCount<S>>,
    /// Rounded percentage (0–100) when a progress measure applies and the
    /// input is non-empty. `None` otherwise, never NaN.
    pub derived_percentage: Option<u32>,
}

impl<S: PartialEq> AggregateSummary<S> {
    /// Count for `status`, or 0 when it is not part of the summarized domain.
    pub fn count(&self, status: &S) -> usize {
        self.by_status
            .iter()
            .find(|entry| &entry.status == status)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    /// Sum of all per-status counts.
    pub fn counted_total(&self) -> usize {
        self.by_status.iter().map(|entry| entry.count).sum()
    }
}
