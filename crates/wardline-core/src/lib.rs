//! # wardline-core
//!
//! The filterable record registry behind every WARDLINE dashboard.
//!
//! This crate provides:
//! - `RecordStore`, the single-owner, identity-preserving record collection
//! - the predicate filter engine (`filter::build_predicate`)
//! - the status aggregator (`aggregate::summarize` and friends)
//! - the `Dispatcher`, which applies policy-checked, audited transitions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wardline_core::{aggregate, filter, Dispatcher, RecordStore};
//!
//! let mut store = RecordStore::from_seed(seed)?;
//! let visible = filter::apply(&criteria, store.iter());
//! let summary = aggregate::summarize_all(store.iter());
//! dispatcher.dispatch_now(&mut store, "CF004", ConsentStatus::Signed, "John Smith")?;
//! ```

pub mod aggregate;
pub mod dispatcher;
pub mod filter;
pub mod store;
pub mod traits;

pub use dispatcher::Dispatcher;
pub use store::RecordStore;
pub use traits::{AuditWriter, Lifecycle, NullAudit, PermissivePolicy, TransitionPolicy};

// ── Tests ─────────────────────────────────────────────────────────────────────
