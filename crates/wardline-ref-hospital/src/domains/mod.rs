//! Hospital dashboard domains.
//!
//! Each module declares a closed status enum, the record type that carries
//! it, and a board that owns the record store, its dispatcher and its audit
//! trail.

pub mod alerts;
pub mod billing;
pub mod consent;
pub mod ward;

use wardline_audit::InMemoryAuditTrail;
use wardline_contracts::{error::RegistryResult, record::Status};
use wardline_core::{traits::TransitionPolicy, Dispatcher};
use wardline_transitions::TransitionTable;

/// A dispatcher for domain `S` that audits into a fresh trail.
///
/// The returned trail is a clone sharing the dispatcher's chain.
pub(crate) fn audited_dispatcher<S: Status>(
    policy: Box<dyn TransitionPolicy<S>>,
) -> (Dispatcher<S>, InMemoryAuditTrail) {
    let audit = InMemoryAuditTrail::default();
    let dispatcher = Dispatcher::new(policy, Box::new(audit.clone()));
    (dispatcher, audit)
}

/// Compile one of the bundled transition tables.
pub(crate) fn bundled_table<S: Status>(toml: &str) -> RegistryResult<Box<dyn TransitionPolicy<S>>> {
    Ok(Box::new(TransitionTable::<S>::from_toml_str(toml)?))
}
