//! The mutation dispatcher: policy-checked, audited status transitions.
//!
//! Every call to `dispatch` follows the same order:
//!
//!   Lookup → Policy → Lifecycle::apply_transition → Audit → Commit
//!
//! The store is only written in the final step, so a rejected or unaudited
//! transition never leaves a partially updated record behind.

use std::sync::Arc;

use tracing::{debug, info, warn};

use wardline_contracts::{
    error::{RegistryError, RegistryResult},
    record::{Record, Status},
    transition::{TransitionContext, TransitionOutcome, TransitionRecord, TransitionVerdict},
};

use crate::{
    store::RecordStore,
    traits::{AuditWriter, Lifecycle, TransitionPolicy},
};

/// Applies status transitions for one status domain.
///
/// Construct one dispatcher per dashboard instance. It owns the trusted
/// components (policy and audit) and is handed the store on every call, so
/// the store keeps a single owner.
pub struct Dispatcher<S: Status> {
    policy: Box<dyn TransitionPolicy<S>>,
    audit: Box<dyn AuditWriter>,
}

impl<S: Status> Dispatcher<S> {
    pub fn new(policy: Box<dyn TransitionPolicy<S>>, audit: Box<dyn AuditWriter>) -> Self {
        Self { policy, audit }
    }

    /// Move the record `id` to status `to`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record has `id` (audited as rejected)
    /// - `InvalidTransition` if the policy denies `(from, to)` (audited as rejected)
    /// - `IdChanged` if the record's lifecycle rewrote its id
    /// - `AuditWriteFailed` if the audit sink fails; the store is unchanged
    pub fn dispatch<R>(
        &self,
        store: &mut RecordStore<R>,
        id: &str,
        to: S,
        ctx: &TransitionContext,
    ) -> RegistryResult<Arc<R>>
    where
        R: Lifecycle<Status = S>,
    {
        debug!(
            domain = S::DOMAIN_NAME,
            id = %id,
            to = %to,
            actor = %ctx.actor,
            "dispatching transition"
        );

        let current = match store.get(id) {
            Some(record) => Arc::clone(record),
            None => {
                warn!(domain = S::DOMAIN_NAME, id = %id, "transition target not found");
                self.audit.write(&self.record(
                    id,
                    None,
                    to,
                    ctx,
                    TransitionOutcome::Rejected {
                        reason: format!("record '{}' not found", id),
                    },
                ))?;
                return Err(RegistryError::NotFound { id: id.to_string() });
            }
        };

        let from = current.status();

        if let TransitionVerdict::Deny { reason } = self.policy.evaluate(from, to) {
            warn!(
                domain = S::DOMAIN_NAME,
                id = %id,
                from = %from,
                to = %to,
                reason = %reason,
                "transition denied"
            );
            self.audit.write(&self.record(
                id,
                Some(from),
                to,
                ctx,
                TransitionOutcome::Rejected { reason },
            ))?;
            return Err(RegistryError::InvalidTransition {
                id: id.to_string(),
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        let mut next = R::clone(&current);
        next.apply_transition(to, ctx);

        if next.id() != id {
            return Err(RegistryError::IdChanged {
                from: id.to_string(),
                to: next.id().to_string(),
            });
        }

        self.audit
            .write(&self.record(id, Some(from), to, ctx, TransitionOutcome::Applied))?;

        let updated = store.update_by_id(id, move |slot| *slot = next)?;

        info!(
            domain = S::DOMAIN_NAME,
            id = %id,
            from = %from,
            to = %to,
            actor = %ctx.actor,
            "transition applied"
        );

        Ok(updated)
    }

    /// `dispatch` with a context stamped at the current time.
    pub fn dispatch_now<R>(
        &self,
        store: &mut RecordStore<R>,
        id: &str,
        to: S,
        actor: &str,
    ) -> RegistryResult<Arc<R>>
    where
        R: Lifecycle<Status = S>,
    {
        self.dispatch(store, id, to, &TransitionContext::now(actor))
    }

    /// True when the policy would allow `record` to move to `to`.
    ///
    /// Lets the presentation layer disable buttons for illegal actions.
    pub fn can_transition<R>(&self, record: &R, to: S) -> bool
    where
        R: Record<Status = S>,
    {
        self.policy.evaluate(record.status(), to) == TransitionVerdict::Allow
    }

    fn record(
        &self,
        id: &str,
        from: Option<S>,
        to: S,
        ctx: &TransitionContext,
        outcome: TransitionOutcome,
    ) -> TransitionRecord {
        TransitionRecord {
            domain: S::DOMAIN_NAME.to_string(),
            record_id: id.to_string(),
            from: from.map(|s| s.to_string()),
            to: to.to_string(),
            actor: ctx.actor.clone(),
            outcome,
            timestamp: ctx.at,
        }
    }
}
