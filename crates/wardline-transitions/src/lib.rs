//! # wardline-transitions
//!
//! TOML-driven, deny-by-default status transition tables.
//!
//! ## Overview
//!
//! This crate provides [`TransitionTable`], which implements the
//! [`TransitionPolicy`](wardline_core::traits::TransitionPolicy) trait. Each
//! table belongs to one status domain; rules are evaluated in order, the
//! first match wins, and a change no rule covers is denied.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use wardline_transitions::TransitionTable;
//!
//! let table = TransitionTable::<ConsentStatus>::from_file(Path::new("transitions/consent.toml"))?;
//! ```

pub mod engine;
pub mod rule;

pub use engine::TransitionTable;
pub use rule::{RuleVerdict, TransitionConfig, TransitionRule};

// ── Tests ─────────────────────────────────────────────────────────────────────
