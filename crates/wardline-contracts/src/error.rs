//! Error types for the WARDLINE record registry.
//!
//! All fallible registry operations return `RegistryResult<T>`. Variants
//! carry the offending ids and statuses as plain strings so they can be
//! written to the audit trail and shown to the operator unchanged.

use thiserror::Error;

/// The unified error type for the WARDLINE crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No record with the given id exists in the store.
    #[error("record '{id}' not found")]
    NotFound { id: String },

    /// The status change is not permitted from the record's current status.
    #[error("transition of record '{id}' from '{from}' to '{to}' is not permitted")]
    InvalidTransition { id: String, from: String, to: String },

    /// A record with the same id is already present in the store.
    #[error("record '{id}' already exists")]
    DuplicateId { id: String },

    /// A patch attempted to rewrite a record's id.
    #[error("record id is immutable: patch changed '{from}' to '{to}'")]
    IdChanged { from: String, to: String },

    /// A status string does not belong to the declared status domain.
    #[error("unknown status '{value}' for domain '{domain}'")]
    UnknownStatus { domain: String, value: String },

    /// A configuration document is missing, malformed, or inconsistent.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The audit trail could not record a transition attempt.
    ///
    /// Treated as fatal for the transition: an unaudited change is not applied.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },
}

/// Convenience alias used throughout the WARDLINE crates.
pub type RegistryResult<T> = Result<T, RegistryError>;
