//! # wardline-audit
//!
//! Append-only, SHA-256 hash-chained audit trail of status transitions.
//!
//! Every attempt the dispatcher handles, applied or rejected, becomes an
//! `AuditEvent` that commits to its predecessor's hash. Altering any event
//! breaks the chain and `verify_chain` reports it.
//!
//! ```rust,ignore
//! use wardline_audit::InMemoryAuditTrail;
//!
//! let trail = InMemoryAuditTrail::default();
//! let dispatcher = Dispatcher::new(Box::new(table), Box::new(trail.clone()));
//! // ... dispatch transitions ...
//! assert!(trail.verify_integrity());
//! let history = trail.history("CF004");
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_event, verify_chain};
pub use event::{AuditEvent, AuditExport};
pub use memory::InMemoryAuditTrail;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use wardline_contracts::transition::{TransitionOutcome, TransitionRecord};
    use wardline_core::traits::AuditWriter;

    use super::*;

    fn record(id: &str, from: &str, to: &str, outcome: TransitionOutcome) -> TransitionRecord {
        TransitionRecord {
            domain: "consent-form".to_string(),
            record_id: id.to_string(),
            from: Some(from.to_string()),
            to: to.to_string(),
            actor: "Nurse Johnson".to_string(),
            outcome,
            timestamp: Utc::now(),
        }
    }

    fn populated() -> InMemoryAuditTrail {
        let trail = InMemoryAuditTrail::new("trail-001");
        trail
            .write(&record("CF004", "pending", "signed", TransitionOutcome::Applied))
            .unwrap();
        trail
            .write(&record(
                "CF003",
                "declined",
                "signed",
                TransitionOutcome::Rejected {
                    reason: "denied by default".to_string(),
                },
            ))
            .unwrap();
        trail
            .write(&record("CF004", "signed", "revoked", TransitionOutcome::Applied))
            .unwrap();
        trail
    }

    // ── Chain construction ───────────────────────────────────────────────────

    #[test]
    fn empty_trail_is_valid() {
        let trail = InMemoryAuditTrail::new("t");
        assert!(trail.is_empty());
        assert!(trail.verify_integrity());
        assert_eq!(trail.export().terminal_hash, "");
    }

    #[test]
    fn events_link_to_previous_hash() {
        let export = populated().export();
        assert_eq!(export.events.len(), 3);
        assert_eq!(export.events[0].prev_hash, AuditEvent::GENESIS_HASH);
        assert_eq!(export.events[1].prev_hash, export.events[0].this_hash);
        assert_eq!(export.events[2].prev_hash, export.events[1].this_hash);
        assert_eq!(export.terminal_hash, export.events[2].this_hash);
        assert!(export.events.iter().all(|e| e.this_hash.len() == 64));
    }

    #[test]
    fn hash_is_deterministic() {
        let r = record("CF001", "pending", "signed", TransitionOutcome::Applied);
        let a = hash_event("t", 0, &r, AuditEvent::GENESIS_HASH).unwrap();
        let b = hash_event("t", 0, &r, AuditEvent::GENESIS_HASH).unwrap();
        let other_seq = hash_event("t", 1, &r, AuditEvent::GENESIS_HASH).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, other_seq);
    }

    // ── Tamper detection ─────────────────────────────────────────────────────

    #[test]
    fn modified_record_breaks_chain() {
        let trail = populated();
        assert!(trail.verify_integrity());

        {
            let mut state = trail.state.lock().unwrap();
            state.events[1].record.outcome = TransitionOutcome::Applied;
        }
        assert!(!trail.verify_integrity());
    }

    #[test]
    fn removed_event_breaks_chain() {
        let mut events = populated().export().events;
        events.remove(1);
        assert!(!verify_chain(&events));
    }

    #[test]
    fn reordered_events_break_chain() {
        let mut events = populated().export().events;
        events.swap(0, 2);
        assert!(!verify_chain(&events));
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    #[test]
    fn history_returns_attempts_for_one_record() {
        let history = populated().history("CF004");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].to, "signed");
        assert_eq!(history[1].to, "revoked");
    }

    #[test]
    fn export_lists_rejections() {
        let export = populated().export();
        let rejected: Vec<&AuditEvent> = export.rejected().collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].record.record_id, "CF003");
    }

    #[test]
    fn clones_share_one_chain() {
        let trail = InMemoryAuditTrail::new("shared");
        let writer = trail.clone();
        writer
            .write(&record("W001", "stable", "critical", TransitionOutcome::Applied))
            .unwrap();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.trail_id(), "shared");
    }

    #[test]
    fn default_trails_have_unique_ids() {
        let a = InMemoryAuditTrail::default();
        let b = InMemoryAuditTrail::default();
        assert_ne!(a.trail_id(), b.trail_id());
    }
}
