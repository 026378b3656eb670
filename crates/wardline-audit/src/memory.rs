//! In-memory implementation of `AuditWriter`.
//!
//! `InMemoryAuditTrail` keeps every event in a `Vec` behind `Arc<Mutex<_>>`.
//! Clones share the same chain, so a dashboard can hand one clone to its
//! dispatcher and keep another to render the trail.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::debug;

use wardline_contracts::{
    error::{RegistryError, RegistryResult},
    transition::{TrailId, TransitionRecord},
};
use wardline_core::traits::AuditWriter;

use crate::{
    chain::{hash_event, verify_chain},
    event::{AuditEvent, AuditExport},
};

#[derive(Debug)]
pub(crate) struct TrailState {
    pub(crate) events: Vec<AuditEvent>,
    pub(crate) last_hash: String,
}

/// An append-only transition trail backed by a SHA-256 hash chain.
#[derive(Debug, Clone)]
pub struct InMemoryAuditTrail {
    trail_id: String,
    pub(crate) state: Arc<Mutex<TrailState>>,
}

impl Default for InMemoryAuditTrail {
    fn default() -> Self {
        Self::new(TrailId::new().0.to_string())
    }
}

impl InMemoryAuditTrail {
    pub fn new(trail_id: impl Into<String>) -> Self {
        Self {
            trail_id: trail_id.into(),
            state: Arc::new(Mutex::new(TrailState {
                events: Vec::new(),
                last_hash: AuditEvent::GENESIS_HASH.to_string(),
            })),
        }
    }

    pub fn trail_id(&self) -> &str {
        &self.trail_id
    }

    // Reads tolerate poisoning: the chain itself is checked by verify_integrity.
    fn read(&self) -> MutexGuard<'_, TrailState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every transition attempt recorded for `record_id`, oldest first.
    pub fn history(&self, record_id: &str) -> Vec<TransitionRecord> {
        self.read()
            .events
            .iter()
            .filter(|e| e.record.record_id == record_id)
            .map(|e| e.record.clone())
            .collect()
    }

    /// Snapshot the trail for display or export.
    pub fn export(&self) -> AuditExport {
        let state = self.read();
        AuditExport {
            trail_id: self.trail_id.clone(),
            terminal_hash: state
                .events
                .last()
                .map(|e| e.this_hash.clone())
                .unwrap_or_default(),
            events: state.events.clone(),
            exported_at: Utc::now(),
        }
    }

    /// True when the in-memory chain has not been altered.
    pub fn verify_integrity(&self) -> bool {
        verify_chain(&self.read().events)
    }
}

impl AuditWriter for InMemoryAuditTrail {
    fn write(&self, record: &TransitionRecord) -> RegistryResult<()> {
        let mut state = self.state.lock().map_err(|e| RegistryError::AuditWriteFailed {
            reason: format!("audit trail lock poisoned: {}", e),
        })?;

        let sequence = state.events.len() as u64;
        let prev_hash = state.last_hash.clone();
        let this_hash = hash_event(&self.trail_id, sequence, record, &prev_hash)?;

        debug!(
            trail_id = %self.trail_id,
            sequence,
            record_id = %record.record_id,
            applied = record.is_applied(),
            "transition audited"
        );

        state.events.push(AuditEvent {
            sequence,
            trail_id: self.trail_id.clone(),
            record: record.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.last_hash = this_hash;

        Ok(())
    }
}
