//! Hash-chain primitives.
//!
//! Hash input layout (bytes, in order):
//!   1. trail_id as UTF-8
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 (64 hex chars)
//!   4. compact JSON of the transition record

use sha2::{Digest, Sha256};

use wardline_contracts::{
    error::{RegistryError, RegistryResult},
    transition::TransitionRecord,
};

use crate::event::AuditEvent;

/// Compute the lowercase hex SHA-256 of one event.
///
/// Fails with `AuditWriteFailed` if the record cannot be serialized.
pub fn hash_event(
    trail_id: &str,
    sequence: u64,
    record: &TransitionRecord,
    prev_hash: &str,
) -> RegistryResult<String> {
    let record_json = serde_json::to_vec(record).map_err(|e| RegistryError::AuditWriteFailed {
        reason: format!("transition record is not serializable: {}", e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(trail_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&record_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Check prev-hash linkage, sequence numbering and hash correctness of
/// every event. An empty chain is valid.
pub fn verify_chain(events: &[AuditEvent]) -> bool {
    let mut expected_prev = AuditEvent::GENESIS_HASH.to_string();

    for (position, event) in events.iter().enumerate() {
        if event.sequence != position as u64 || event.prev_hash != expected_prev {
            return false;
        }

        match hash_event(&event.trail_id, event.sequence, &event.record, &event.prev_hash) {
            Ok(recomputed) if recomputed == event.this_hash => {}
            _ => return false,
        }

        expected_prev = event.this_hash.clone();
    }

    true
}
