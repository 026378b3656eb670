//! Record and status-domain definitions.
//!
//! Every dashboard entity (ward patient, consent form, alert, billing batch)
//! implements `Record`, and its status field is a closed enum implementing
//! `Status`. Free-form status strings only exist at the parsing boundary.

use std::{fmt, hash::Hash, str::FromStr};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

/// A closed, ordered set of status values for one record type.
///
/// `DOMAIN` lists every value in display order. Summary cards are rendered
/// in this order, including statuses with no matching records.
pub trait Status:
    Copy
    + Eq
    + Hash
    + fmt::Debug
    + fmt::Display
    + FromStr<Err = RegistryError>
    + Serialize
    + DeserializeOwned
    + 'static
{
    /// Short name of the domain, used in logs and audit records
    /// (e.g. "consent-form", "ward-patient").
    const DOMAIN_NAME: &'static str;

    /// Every status value, in display order.
    const DOMAIN: &'static [Self];

    /// The canonical kebab-case spelling of this status.
    fn as_str(&self) -> &'static str;

    /// True for terminal-positive statuses (e.g. `signed`, `resolved`,
    /// `billed`) that count towards completion aggregates.
    fn is_complete(&self) -> bool {
        false
    }
}

/// Parse `value` against the declared domain of `S`.
///
/// Intended for `FromStr` implementations of status enums.
pub fn parse_status<S: Status>(value: &str) -> RegistryResult<S> {
    S::DOMAIN
        .iter()
        .copied()
        .find(|s| s.as_str() == value)
        .ok_or_else(|| RegistryError::UnknownStatus {
            domain: S::DOMAIN_NAME.to_string(),
            value: value.to_string(),
        })
}

/// One domain entity held in a record store.
pub trait Record: Clone + fmt::Debug {
    /// The status enum of this record type.
    type Status: Status;

    /// Stable, unique identifier. Never changes after creation.
    fn id(&self) -> &str;

    /// The current status.
    fn status(&self) -> Self::Status;

    /// String fields the free-text search is matched against.
    ///
    /// An empty list makes the search clause vacuously true.
    fn search_fields(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Optional grouping value for the category filter (ward, client, ...).
    fn category(&self) -> Option<&str> {
        None
    }

    /// Optional priority for the priority filter.
    fn priority(&self) -> Option<Priority> {
        None
    }
}

/// Priority levels shared by alerting and triage dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| RegistryError::UnknownStatus {
                domain: "priority".to_string(),
                value: s.to_string(),
            })
    }
}
