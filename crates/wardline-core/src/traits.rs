//! Trait seams of the mutation pipeline.
//!
//! - `Lifecycle` is domain logic: how a record changes on a status transition.
//! - `TransitionPolicy` is the trusted gate deciding which `(from, to)` pairs are legal.
//! - `AuditWriter` is the trusted sink recording every transition attempt.
//!
//! The dispatcher wires them together. `Lifecycle::apply_transition` is
//! never called unless the policy first returns `Allow`.

use wardline_contracts::{
    error::RegistryResult,
    record::{Record, Status},
    transition::{TransitionContext, TransitionRecord, TransitionVerdict},
};

/// A record whose dependent fields follow its status.
pub trait Lifecycle: Record {
    /// Set the status to `to` and update every field that is a function of
    /// status (timestamps, actors, counters) in the same call.
    ///
    /// Must not change `id()`. The dispatcher rejects patches that do.
    fn apply_transition(&mut self, to: Self::Status, ctx: &TransitionContext);
}

/// Decides whether a status change is legal for one domain.
///
/// Implementations must be deterministic and free of I/O.
pub trait TransitionPolicy<S: Status> {
    fn evaluate(&self, from: S, to: S) -> TransitionVerdict;
}

/// Append-only sink for transition attempts.
///
/// A failed write aborts the transition; the record is left unchanged.
pub trait AuditWriter {
    fn write(&self, record: &TransitionRecord) -> RegistryResult<()>;
}

/// A policy that permits every change, including reversals out of
/// terminal statuses. Attempts are still audited by the dispatcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissivePolicy;

impl<S: Status> TransitionPolicy<S> for PermissivePolicy {
    fn evaluate(&self, _from: S, _to: S) -> TransitionVerdict {
        TransitionVerdict::Allow
    }
}

/// An audit sink that discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudit;

impl AuditWriter for NullAudit {
    fn write(&self, _record: &TransitionRecord) -> RegistryResult<()> {
        Ok(())
    }
}
