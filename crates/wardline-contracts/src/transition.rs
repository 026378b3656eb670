//! Status-transition verdicts, context, and audit records.
//!
//! The transition policy consumes a `(from, to)` pair and produces a
//! `TransitionVerdict`. Every attempt the dispatcher handles, applied or
//! rejected, becomes exactly one `TransitionRecord` in the audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for one audit trail (one dashboard instance).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrailId(pub uuid::Uuid);

impl TrailId {
    /// Create a new, unique trail id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for TrailId {
    fn default() -> Self {
        Self::new()
    }
}

/// The decision a transition policy returns for one status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionVerdict {
    /// The change is listed in the domain's transition table.
    Allow,
    /// The change is not permitted.
    Deny {
        /// Human-readable explanation, written to the audit trail.
        reason: String,
    },
}

/// Who performed a transition and when.
///
/// Handed to `Lifecycle::apply_transition` so timestamp and actor fields are
/// written in the same patch as the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionContext {
    pub actor: String,
    pub at: DateTime<Utc>,
}

impl TransitionContext {
    /// Context stamped with the current wall-clock time.
    pub fn now(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            at: Utc::now(),
        }
    }
}

/// What happened to a transition attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionOutcome {
    Applied,
    Rejected { reason: String },
}

/// An immutable record of one transition attempt, written to the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Status domain of the record (e.g. "consent-form").
    pub domain: String,
    /// Id of the targeted record.
    pub record_id: String,
    /// Status before the attempt; absent when the record was not found.
    pub from: Option<String>,
    /// Requested status.
    pub to: String,
    /// Who requested the change.
    pub actor: String,
    pub outcome: TransitionOutcome,
    /// Wall-clock time of the attempt (UTC).
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    pub fn is_applied(&self) -> bool {
        self.outcome == TransitionOutcome::Applied
    }
}
