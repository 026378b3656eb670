//! Compiled transition tables.
//!
//! `TransitionTable<S>` is built from a `TransitionConfig` (TOML) or from
//! code, and implements `TransitionPolicy<S>` from wardline-core.
//!
//! Evaluation algorithm:
//!
//! 1. Iterate rules in declaration order.
//! 2. The first rule whose `from` matches the current status (or is `"*"`)
//!    and whose `to` list contains the target decides the verdict.
//! 3. If no rule matched → `Deny` ("denied by default").

use std::path::Path;

use tracing::{debug, warn};

use wardline_contracts::{
    criteria::Selection,
    error::{RegistryError, RegistryResult},
    record::Status,
    transition::TransitionVerdict,
};
use wardline_core::traits::TransitionPolicy;

use crate::rule::{RuleVerdict, TransitionConfig};

const WILDCARD: &str = "*";

/// A rule with its status names resolved against the domain enum.
#[derive(Debug, Clone)]
struct CompiledRule<S> {
    id: String,
    from: Selection<S>,
    to: Vec<S>,
    verdict: RuleVerdict,
    deny_reason: Option<String>,
}

impl<S: Status> CompiledRule<S> {
    fn matches(&self, from: S, to: S) -> bool {
        let from_matches = match &self.from {
            Selection::All => true,
            Selection::Only(status) => *status == from,
        };
        from_matches && self.to.contains(&to)
    }
}

/// The legal status changes of one domain. Anything not listed is denied.
///
/// ```rust,ignore
/// let table = TransitionTable::<ConsentStatus>::from_toml_str(CONSENT_TRANSITIONS)?;
/// let dispatcher = Dispatcher::new(Box::new(table), Box::new(audit));
/// ```
#[derive(Debug, Clone)]
pub struct TransitionTable<S> {
    rules: Vec<CompiledRule<S>>,
}

impl<S> Default for TransitionTable<S> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<S: Status> TransitionTable<S> {
    /// An empty table: every transition is denied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `s` as TOML and compile it for the status domain `S`.
    ///
    /// Returns `ConfigError` if the TOML is malformed, names a different
    /// domain, or mentions a status outside `S::DOMAIN`.
    pub fn from_toml_str(s: &str) -> RegistryResult<Self> {
        let config: TransitionConfig = toml::from_str(s).map_err(|e| RegistryError::ConfigError {
            reason: format!("failed to parse transition TOML: {}", e),
        })?;
        Self::from_config(&config)
    }

    /// Read the file at `path` and compile it as a transition table.
    pub fn from_file(path: &Path) -> RegistryResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RegistryError::ConfigError {
            reason: format!("failed to read transition file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Compile an already-deserialized config.
    pub fn from_config(config: &TransitionConfig) -> RegistryResult<Self> {
        if config.domain != S::DOMAIN_NAME {
            return Err(RegistryError::ConfigError {
                reason: format!(
                    "transition table is for domain '{}', expected '{}'",
                    config.domain,
                    S::DOMAIN_NAME
                ),
            });
        }

        let mut rules = Vec::with_capacity(config.rules.len());
        for rule in &config.rules {
            let from = if rule.from == WILDCARD {
                Selection::All
            } else {
                Selection::Only(parse_in_rule::<S>(&rule.id, &rule.from)?)
            };
            let to = rule
                .to
                .iter()
                .map(|name| parse_in_rule::<S>(&rule.id, name))
                .collect::<RegistryResult<Vec<S>>>()?;

            rules.push(CompiledRule {
                id: rule.id.clone(),
                from,
                to,
                verdict: rule.verdict,
                deny_reason: rule.deny_reason.clone(),
            });
        }

        debug!(domain = S::DOMAIN_NAME, rule_count = rules.len(), "transition table compiled");
        Ok(Self { rules })
    }

    /// Append an allow rule from `from` to each of `to`.
    pub fn allow(mut self, id: impl Into<String>, from: S, to: &[S]) -> Self {
        self.rules.push(CompiledRule {
            id: id.into(),
            from: Selection::Only(from),
            to: to.to_vec(),
            verdict: RuleVerdict::Allow,
            deny_reason: None,
        });
        self
    }

    /// Every target reachable from `from`, in domain order.
    pub fn targets(&self, from: S) -> Vec<S> {
        S::DOMAIN
            .iter()
            .copied()
            .filter(|&to| {
                self.first_match(from, to)
                    .is_some_and(|rule| rule.verdict == RuleVerdict::Allow)
            })
            .collect()
    }

    fn first_match(&self, from: S, to: S) -> Option<&CompiledRule<S>> {
        self.rules.iter().find(|rule| rule.matches(from, to))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

fn parse_in_rule<S: Status>(rule_id: &str, name: &str) -> RegistryResult<S> {
    name.parse::<S>().map_err(|e| RegistryError::ConfigError {
        reason: format!("rule '{}': {}", rule_id, e),
    })
}

impl<S: Status> TransitionPolicy<S> for TransitionTable<S> {
    fn evaluate(&self, from: S, to: S) -> TransitionVerdict {
        if let Some(rule) = self.first_match(from, to) {
            debug!(
                domain = S::DOMAIN_NAME,
                rule_id = %rule.id,
                from = %from,
                to = %to,
                "transition rule matched"
            );
            return match rule.verdict {
                RuleVerdict::Allow => TransitionVerdict::Allow,
                RuleVerdict::Deny => TransitionVerdict::Deny {
                    reason: rule
                        .deny_reason
                        .clone()
                        .unwrap_or_else(|| format!("denied by rule '{}'", rule.id)),
                },
            };
        }

        warn!(
            domain = S::DOMAIN_NAME,
            from = %from,
            to = %to,
            "no transition rule matched; denying by default"
        );
        TransitionVerdict::Deny {
            reason: format!(
                "denied by default: no transition rule permits '{}' -> '{}'",
                from, to
            ),
        }
    }
}
