//! Audit event and export types.
//!
//! `AuditEvent` is one link in the hash chain: a `TransitionRecord` plus its
//! position and the hashes that make tampering detectable. `AuditExport` is
//! the snapshot handed to an "Audit Trail" view or report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wardline_contracts::transition::TransitionRecord;

/// A single entry in the hash chain of one trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    /// The trail this event belongs to.
    pub trail_id: String,

    /// The transition attempt being recorded.
    pub record: TransitionRecord,

    /// Hash of the previous event, or `GENESIS_HASH` for the first one.
    pub prev_hash: String,

    /// SHA-256 (hex) over trail_id, sequence, prev_hash and the record.
    pub this_hash: String,
}

impl AuditEvent {
    /// The `prev_hash` of the first event in every chain.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A snapshot of a trail at export time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditExport {
    pub trail_id: String,

    /// All events in chain order.
    pub events: Vec<AuditEvent>,

    pub exported_at: DateTime<Utc>,

    /// `this_hash` of the last event. Empty when the trail is empty.
    pub terminal_hash: String,
}

impl AuditExport {
    /// Events whose transition was rejected.
    pub fn rejected(&self) -> impl Iterator<Item = &AuditEvent> {
        self.events.iter().filter(|e| !e.record.is_applied())
    }
}
