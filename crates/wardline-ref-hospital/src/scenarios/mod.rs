//! Reference dashboard scenarios.
//!
//! Each scenario seeds one board from `mock_data`, applies the caller's
//! filters, prints the summary cards and drives a few transitions through
//! the audited dispatcher, including one the transition table rejects.

pub mod bulk_billing;
pub mod consent_status;
pub mod missed_visits;
pub mod ward_status;

use std::str::FromStr;

use wardline_audit::InMemoryAuditTrail;
use wardline_contracts::{
    criteria::{FilterCriteria, Selection, ALL_SENTINEL},
    error::{RegistryError, RegistryResult},
    record::Status,
    summary::AggregateSummary,
};

/// Raw filter values as typed on the command line. An empty value or
/// `"all"` disables the clause.
#[derive(Debug, Clone, Default)]
pub struct ViewFilters {
    pub search: String,
    pub status: String,
    pub category: String,
    pub priority: String,
}

impl ViewFilters {
    /// Parse into criteria for domain `S`.
    ///
    /// Fails with `UnknownStatus` when the status or priority is not a
    /// member of its domain.
    pub fn criteria<S: Status>(&self) -> RegistryResult<FilterCriteria<S>> {
        let category = if is_unset(&self.category) {
            Selection::All
        } else {
            Selection::Only(self.category.clone())
        };
        Ok(FilterCriteria::default()
            .with_search(self.search.clone())
            .with_status(selection(&self.status)?)
            .with_category(category)
            .with_priority(selection(&self.priority)?))
    }
}

fn is_unset(value: &str) -> bool {
    value.is_empty() || value == ALL_SENTINEL
}

fn selection<T: FromStr<Err = RegistryError>>(value: &str) -> RegistryResult<Selection<T>> {
    if is_unset(value) {
        Ok(Selection::All)
    } else {
        Selection::parse(value)
    }
}

// ── Shared output helpers ─────────────────────────────────────────────────────

pub(crate) fn print_summary<S: Status>(summary: &AggregateSummary<S>, percentage_label: &str) {
    let cards: Vec<String> = summary
        .by_status
        .iter()
        .map(|entry| format!("{}: {}", entry.status, entry.count))
        .collect();
    println!("  Summary ({} total): {}", summary.total_count, cards.join(", "));
    match summary.derived_percentage {
        Some(pct) => println!("  {}: {}%", percentage_label, pct),
        None => println!("  {}: n/a", percentage_label),
    }
}

pub(crate) fn print_audit(audit: &InMemoryAuditTrail) {
    let export = audit.export();
    println!(
        "  Audit chain integrity:  {} ({} event(s), {} rejected)",
        if audit.verify_integrity() { "VERIFIED" } else { "FAILED" },
        export.events.len(),
        export.rejected().count()
    );
}

/// Print the outcome of a transition the table is expected to reject.
pub(crate) fn print_rejection<T>(label: &str, result: RegistryResult<T>) {
    match result {
        Err(e @ RegistryError::InvalidTransition { .. }) => {
            println!("  {}: REJECTED ({})", label, e);
        }
        Err(e) => println!("  {}: unexpected error: {}", label, e),
        Ok(_) => println!("  {}: unexpectedly applied", label),
    }
}
