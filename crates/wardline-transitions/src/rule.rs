//! Transition rule types and configuration schema.
//!
//! A `TransitionConfig` is deserialized from TOML and holds an ordered list
//! of `TransitionRule`s. Rules are evaluated in declaration order and the
//! first rule matching both `from` and `to` wins. If no rule matches, the
//! table denies by default.

use serde::{Deserialize, Serialize};

/// What a matching rule decides.
///
/// ```toml
/// verdict = "allow"
/// verdict = "deny"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleVerdict {
    #[default]
    Allow,
    Deny,
}

/// A single transition rule loaded from TOML.
///
/// `from` accepts the wildcard `"*"`, matching any current status. Status
/// names are the kebab-case spellings of the domain enum and are validated
/// when the rule set is compiled into a `TransitionTable`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRule {
    /// Stable identifier used in logs and denial reasons.
    pub id: String,

    /// Human-readable explanation of what this rule controls.
    #[serde(default)]
    pub description: String,

    /// Current status this rule applies to, or `"*"`.
    pub from: String,

    /// Target statuses this rule covers.
    pub to: Vec<String>,

    /// Defaults to `allow`.
    #[serde(default)]
    pub verdict: RuleVerdict,

    /// Written to the audit trail when `verdict = "deny"`.
    pub deny_reason: Option<String>,
}

/// The top-level structure deserialized from a TOML transition file.
///
/// ```toml
/// domain = "consent-form"
///
/// [[rules]]
/// id = "sign-or-decline"
/// description = "A pending form may be signed or declined"
/// from = "pending"
/// to = ["signed", "declined"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Must equal the `DOMAIN_NAME` of the status type it is compiled for.
    pub domain: String,

    /// Ordered list of rules. First match wins.
    #[serde(default)]
    pub rules: Vec<TransitionRule>,
}
