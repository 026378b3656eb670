//! # wardline-contracts
//!
//! Shared types and contracts for the WARDLINE record registry.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions, the `Record` / `Status` traits, and
//! error types.

pub mod criteria;
pub mod error;
pub mod record;
pub mod summary;
pub mod transition;

pub use criteria::{FilterCriteria, Selection, ALL_SENTINEL};
pub use error::{RegistryError, RegistryResult};
pub use record::{parse_status, Priority, Record, Status};
pub use summary::{AggregateSummary, StatusCount};
pub use transition::{
    TrailId, TransitionContext, TransitionOutcome, TransitionRecord, TransitionVerdict,
};

#[cfg(test)]
mod tests {
    use std::{fmt, str::FromStr};

    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    enum Light {
        Red,
        Amber,
        Green,
    }

    impl fmt::Display for Light {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    impl FromStr for Light {
        type Err = RegistryError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            parse_status(s)
        }
    }

    impl Status for Light {
        const DOMAIN_NAME: &'static str = "light";
        const DOMAIN: &'static [Self] = &[Light::Red, Light::Amber, Light::Green];

        fn as_str(&self) -> &'static str {
            match self {
                Light::Red => "red",
                Light::Amber => "amber",
                Light::Green => "green",
            }
        }
    }

    // ── Status parsing ───────────────────────────────────────────────────────

    #[test]
    fn parse_status_accepts_domain_values() {
        assert_eq!("amber".parse::<Light>().unwrap(), Light::Amber);
        assert_eq!(Light::Green.to_string(), "green");
    }

    #[test]
    fn parse_status_rejects_unknown_value() {
        let err = "blue".parse::<Light>().unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownStatus {
                domain: "light".to_string(),
                value: "blue".to_string(),
            }
        );
    }

    #[test]
    fn priority_parses_and_orders() {
        assert_eq!("critical".parse::<Priority>().unwrap(), Priority::Critical);
        assert!("urgent".parse::<Priority>().is_err());
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::Low < Priority::Medium);
    }

    // ── Selection ────────────────────────────────────────────────────────────

    #[test]
    fn selection_parses_all_sentinel() {
        let all: Selection<Light> = Selection::parse("all").unwrap();
        assert!(all.is_all());
        assert_eq!(all.as_only(), None);

        let red: Selection<Light> = Selection::parse("red").unwrap();
        assert_eq!(red, Selection::Only(Light::Red));
    }

    #[test]
    fn selection_propagates_parse_errors() {
        let result: Result<Selection<Light>, _> = Selection::parse("purple");
        assert!(matches!(result, Err(RegistryError::UnknownStatus { .. })));
    }

    #[test]
    fn default_criteria_select_everything() {
        let criteria: FilterCriteria<Light> = FilterCriteria::default();
        assert!(criteria.search_text.is_empty());
        assert!(criteria.status.is_all());
        assert!(criteria.category.is_all());
        assert!(criteria.priority.is_all());
    }

    #[test]
    fn criteria_builders_set_fields() {
        let criteria = FilterCriteria::default()
            .with_search("smith")
            .with_status(Selection::Only(Light::Red))
            .with_category(Selection::Only("ICU".to_string()))
            .with_priority(Selection::Only(Priority::High));

        assert_eq!(criteria.search_text, "smith");
        assert_eq!(criteria.status.as_only(), Some(&Light::Red));
        assert_eq!(criteria.category.as_only().map(String::as_str), Some("ICU"));
        assert_eq!(criteria.priority.as_only(), Some(&Priority::High));
    }

    // ── AggregateSummary ─────────────────────────────────────────────────────

    #[test]
    fn summary_count_defaults_to_zero_for_missing_status() {
        let summary = AggregateSummary {
            total_count: 2,
            by_status: vec![StatusCount { status: Light::Red, count: 2 }],
            derived_percentage: None,
        };
        assert_eq!(summary.count(&Light::Red), 2);
        assert_eq!(summary.count(&Light::Green), 0);
        assert_eq!(summary.counted_total(), 2);
    }

    // ── TransitionRecord ────────────────────────────────────────────────────

    #[test]
    fn transition_record_serializes_outcome_in_kebab_case() {
        let record = TransitionRecord {
            domain: "light".to_string(),
            record_id: "L1".to_string(),
            from: Some("red".to_string()),
            to: "green".to_string(),
            actor: "operator".to_string(),
            outcome: TransitionOutcome::Rejected {
                reason: "skips amber".to_string(),
            },
            timestamp: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["outcome"]["rejected"]["reason"], "skips amber");
        assert!(!record.is_applied());
    }

    #[test]
    fn trail_ids_are_unique() {
        let ids: std::collections::HashSet<String> =
            (0..50).map(|_| TrailId::new().0.to_string()).collect();
        assert_eq!(ids.len(), 50);
    }

    // ── RegistryError display messages ───────────────────────────────────────

    #[test]
    fn error_not_found_display() {
        let err = RegistryError::NotFound { id: "CF404".to_string() };
        assert!(err.to_string().contains("CF404"));
    }

    #[test]
    fn error_invalid_transition_display() {
        let err = RegistryError::InvalidTransition {
            id: "CF003".to_string(),
            from: "declined".to_string(),
            to: "signed".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("not permitted"));
        assert!(msg.contains("declined"));
        assert!(msg.contains("signed"));
    }

    #[test]
    fn error_config_display() {
        let err = RegistryError::ConfigError {
            reason: "missing rules".to_string(),
        };
        assert!(err.to_string().contains("configuration error"));
    }
}
