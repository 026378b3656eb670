//! # wardline-ref-hospital
//!
//! Hospital reference dashboards for the WARDLINE record registry.
//!
//! Four boards instantiate the shared store / filter / aggregate / dispatch
//! pattern with mock data:
//!
//! 1. **Consent status**: patients with consent forms; signing keeps each
//!    patient's required-form progress in step.
//! 2. **Ward patient status**: status header cards and live occupancy
//!    metrics refreshed on a timer.
//! 3. **Missed-visit alerts**: acknowledge, escalate, resolve and dismiss.
//! 4. **Bulk billing**: batch workflow with completion and processing totals.
//!
//! Every status change goes through a TOML transition table and lands in a
//! hash-chained audit trail. All data is hardcoded and fictional.

pub mod config;
pub mod domains;
pub mod mock_data;
pub mod refresh;
pub mod scenarios;

pub use config::DashboardConfig;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use wardline_contracts::{
        criteria::{FilterCriteria, Selection},
        error::RegistryError,
        record::{Priority, Status},
    };
    use wardline_core::traits::PermissivePolicy;

    use crate::{
        domains::{
            alerts::{AlertBoard, AlertStatus},
            billing::{BatchStatus, BillingBoard},
            consent::{ConsentBoard, ConsentStatus},
            ward::{PatientStatus, WardBoard},
        },
        mock_data,
        scenarios::{self, ViewFilters},
        DashboardConfig,
    };

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn consent_board() -> ConsentBoard {
        ConsentBoard::new(mock_data::consent_patients().unwrap()).unwrap()
    }

    fn ward_board() -> WardBoard {
        WardBoard::new(mock_data::ward_patients(), mock_data::ward_metrics()).unwrap()
    }

    fn alert_board() -> AlertBoard {
        AlertBoard::new(mock_data::missed_visit_alerts()).unwrap()
    }

    fn billing_board() -> BillingBoard {
        BillingBoard::new(mock_data::bulk_batches()).unwrap()
    }

    // ── Consent ──────────────────────────────────────────────────────────────

    #[test]
    fn seeded_consent_progress() {
        let board = consent_board();
        assert_eq!(board.patient("W001").unwrap().overall_progress(), Some(67));
        assert_eq!(board.patient("W002").unwrap().overall_progress(), Some(50));
    }

    #[test]
    fn signing_sets_dependent_fields_and_progress() {
        let mut board = consent_board();
        let form = board.sign_form("W001", "CF004").unwrap();

        assert_eq!(form.status, ConsentStatus::Signed);
        assert!(form.signed_date.is_some());
        assert_eq!(form.signed_by.as_deref(), Some("John Smith"));
        assert!(form
            .digital_signature
            .as_deref()
            .is_some_and(|s| s.starts_with("e-signature-")));
        assert_eq!(board.patient("W001").unwrap().overall_progress(), Some(100));
        assert!(board.patient("W001").unwrap().forms().get("CF004").unwrap().required);
    }

    #[test]
    fn signing_preserves_identity_of_other_forms() {
        let mut board = consent_board();
        let before: Vec<_> = board.patient("W001").unwrap().forms().get_all().to_vec();

        board.sign_form("W001", "CF004").unwrap();

        let after = board.patient("W001").unwrap().forms().get_all();
        for (old, new) in before.iter().zip(after) {
            if old.id == "CF004" {
                assert!(!Arc::ptr_eq(old, new));
            } else {
                assert!(Arc::ptr_eq(old, new), "{} was reallocated", old.id);
            }
        }
    }

    #[test]
    fn declined_form_cannot_be_signed() {
        let mut board = consent_board();
        let err = board.sign_form("W001", "CF003").unwrap_err();

        assert!(matches!(err, RegistryError::InvalidTransition { .. }));
        let form = board.patient("W001").unwrap().forms().get("CF003").unwrap();
        assert_eq!(form.status, ConsentStatus::Declined);
        assert!(form.signed_by.is_none());
        assert_eq!(board.patient("W001").unwrap().overall_progress(), Some(67));

        let history = board.audit().history("CF003");
        assert_eq!(history.len(), 1);
        assert!(!history[0].is_applied());
    }

    #[test]
    fn unknown_patient_or_form_is_not_found() {
        let mut board = consent_board();
        assert_eq!(
            board.sign_form("W999", "CF001").unwrap_err(),
            RegistryError::NotFound { id: "W999".to_string() }
        );
        assert_eq!(
            board.sign_form("W001", "CF999").unwrap_err(),
            RegistryError::NotFound { id: "CF999".to_string() }
        );
    }

    #[test]
    fn consent_filter_matches_ward_and_any_form_status() {
        let board = consent_board();

        let icu = FilterCriteria::default().with_category(Selection::Only("ICU".to_string()));
        let ids: Vec<&str> = board.filter(&icu).into_iter().map(|p| p.patient_id.as_str()).collect();
        assert_eq!(ids, vec!["W002"]);

        let declined = FilterCriteria::default().with_status(Selection::Only(ConsentStatus::Declined));
        let ids: Vec<&str> = board.filter(&declined).into_iter().map(|p| p.patient_id.as_str()).collect();
        assert_eq!(ids, vec!["W001"]);

        let pending_in_icu = icu.clone().with_status(Selection::Only(ConsentStatus::Pending));
        assert_eq!(board.filter(&pending_in_icu).len(), 1);

        let revoked = FilterCriteria::default().with_status(Selection::Only(ConsentStatus::Revoked));
        assert!(board.filter(&revoked).is_empty());
    }

    #[test]
    fn consent_search_is_case_insensitive() {
        let board = consent_board();
        let smith = FilterCriteria::default().with_search("smith");
        let names: Vec<&str> = board.filter(&smith).into_iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["John Smith"]);

        let by_bed = FilterCriteria::default().with_search("b-203");
        assert_eq!(board.filter(&by_bed)[0].patient_id, "W002");
    }

    #[test]
    fn form_summary_counts_every_patient() {
        let summary = consent_board().form_summary();
        assert_eq!(summary.total_count, 7);
        assert_eq!(summary.count(&ConsentStatus::Pending), 3);
        assert_eq!(summary.count(&ConsentStatus::Signed), 3);
        assert_eq!(summary.count(&ConsentStatus::Declined), 1);
        assert_eq!(summary.count(&ConsentStatus::Expired), 0);
        assert_eq!(summary.by_status.len(), ConsentStatus::DOMAIN.len());
        assert_eq!(summary.derived_percentage, Some(60));
    }

    #[test]
    fn revoke_then_resign_is_denied() {
        let mut board = consent_board();
        board
            .update_form_status("W001", "CF001", ConsentStatus::Revoked, "John Smith")
            .unwrap();
        assert_eq!(board.patient("W001").unwrap().overall_progress(), Some(33));

        let err = board.sign_form("W001", "CF001").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidTransition { .. }));
    }

    #[test]
    fn permissive_policy_allows_override_and_still_audits() {
        let mut board =
            ConsentBoard::with_policy(mock_data::consent_patients().unwrap(), Box::new(PermissivePolicy));
        board.sign_form("W001", "CF003").unwrap();

        let history = board.audit().history("CF003");
        assert_eq!(history.len(), 1);
        assert!(history[0].is_applied());
        assert_eq!(history[0].from.as_deref(), Some("declined"));
    }

    #[test]
    fn witness_signature_is_not_a_transition() {
        let mut board = consent_board();
        let form = board.witness_form("W002", "CF006", "Dr. Brown").unwrap();
        assert!(!form.awaiting_witness());
        assert_eq!(form.status, ConsentStatus::Pending);
        assert!(board.audit().is_empty());
    }

    #[test]
    fn expiry_monitoring() {
        let mut board = consent_board();

        let soon: Vec<&str> = board
            .expiring_within(day(2024, 1, 20), 7)
            .into_iter()
            .map(|(_, form)| form.id.as_str())
            .collect();
        assert_eq!(soon, vec!["CF004"]);

        board.sign_form("W001", "CF004").unwrap();
        assert!(board.expire_overdue(day(2024, 1, 22), "monitor").expired.is_empty());
        let sweep = board.expire_overdue(day(2024, 1, 23), "monitor");
        assert_eq!(sweep.expired, vec!["CF004".to_string()]);
        assert!(sweep.failed.is_empty());

        let patient = board.patient("W001").unwrap();
        assert_eq!(patient.forms().get("CF004").unwrap().status, ConsentStatus::Expired);
        assert_eq!(patient.overall_progress(), Some(67));
        assert!(board.audit().verify_integrity());
    }

    // ── Ward ─────────────────────────────────────────────────────────────────

    #[test]
    fn ward_summary_in_domain_order() {
        let summary = ward_board().summary();
        let counts: Vec<(PatientStatus, usize)> =
            summary.by_status.iter().map(|e| (e.status, e.count)).collect();
        assert_eq!(
            counts,
            vec![
                (PatientStatus::Critical, 1),
                (PatientStatus::Monitoring, 0),
                (PatientStatus::Stable, 1),
                (PatientStatus::Recovering, 0),
                (PatientStatus::DischargeReady, 1),
            ]
        );
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.derived_percentage, Some(58));
    }

    #[test]
    fn ward_filter_by_priority_and_ward() {
        let board = ward_board();
        let critical = FilterCriteria::default().with_priority(Selection::Only(Priority::Critical));
        let ids: Vec<&str> = board.filter(&critical).into_iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["W002"]);

        let ward_a = FilterCriteria::default()
            .with_category(Selection::Only("General Ward A".to_string()))
            .with_status(Selection::Only(PatientStatus::Stable));
        assert_eq!(board.filter(&ward_a).len(), 1);
    }

    #[test]
    fn ward_transition_stamps_actor() {
        let mut board = ward_board();
        let patient = board
            .update_status("W001", PatientStatus::Critical, "Nurse Johnson")
            .unwrap();
        assert_eq!(patient.priority, Priority::Critical);
        assert_eq!(patient.status_changed_by.as_deref(), Some("Nurse Johnson"));
        assert!(patient.status_changed_at.is_some());
        assert_eq!(board.summary().count(&PatientStatus::Critical), 2);
    }

    #[test]
    fn ward_next_statuses_follow_table() {
        let board = ward_board();
        assert_eq!(
            board.next_statuses("W003").unwrap(),
            vec![PatientStatus::Critical, PatientStatus::Recovering]
        );
        assert!(board.next_statuses("W404").is_err());
    }

    #[test]
    fn ward_tick_refreshes_metrics() {
        use rand::{rngs::StdRng, SeedableRng};

        let mut board = ward_board();
        let tick = crate::refresh::Tick {
            sequence: 1,
            at: chrono::Utc::now(),
        };
        board.on_tick(&tick, &mut StdRng::seed_from_u64(3), 5);
        assert_eq!(board.metrics().refreshed_at, Some(tick.at));
        assert!((0.0..=100.0).contains(&board.metrics().bed_occupancy_percent));
    }

    // ── Alerts ───────────────────────────────────────────────────────────────

    #[test]
    fn acknowledge_counts_a_contact_attempt() {
        let mut board = alert_board();
        let alert = board.acknowledge("MA003", "Dr. Lee").unwrap();
        assert_eq!(alert.status, AlertStatus::Acknowledged);
        assert_eq!(alert.contact_attempts, 1);
        assert_eq!(alert.handled_by.as_deref(), Some("Dr. Lee"));
    }

    #[test]
    fn escalate_raises_level_and_stamps_time() {
        let mut board = alert_board();
        let alert = board.escalate("MA002", "Charge Nurse").unwrap();
        assert_eq!(alert.status, AlertStatus::Escalated);
        assert_eq!(alert.escalation_level, 2);
        assert_eq!(alert.contact_attempts, 2);
        assert!(alert.last_escalation.is_some());
    }

    #[test]
    fn escalated_alert_can_only_be_resolved() {
        let mut board = alert_board();
        for attempt in [
            board.escalate("MA001", "Charge Nurse"),
            board.acknowledge("MA001", "Dr. Brown"),
        ] {
            assert!(matches!(
                attempt.unwrap_err(),
                RegistryError::InvalidTransition { .. }
            ));
        }
        let untouched = board.alerts().get("MA001").unwrap();
        assert_eq!(untouched.escalation_level, 2);
        assert_eq!(untouched.contact_attempts, 3);

        let resolved = board.resolve("MA001", "Dr. Brown").unwrap();
        assert_eq!(resolved.status, AlertStatus::Resolved);
    }

    #[test]
    fn active_alert_may_escalate_without_acknowledging() {
        let mut board = alert_board();
        let alert = board.escalate("MA003", "Charge Nurse").unwrap();
        assert_eq!(alert.escalation_level, 1);
    }

    #[test]
    fn resolved_alert_stays_resolved() {
        let mut board = alert_board();
        board.resolve("MA002", "Dr. Smith").unwrap();
        assert!(board.alerts().get("MA002").unwrap().resolved_at.is_some());

        for attempt in [
            board.acknowledge("MA002", "Dr. Smith"),
            board.escalate("MA002", "Dr. Smith"),
        ] {
            assert!(matches!(
                attempt.unwrap_err(),
                RegistryError::InvalidTransition { .. }
            ));
        }
        assert_eq!(board.open_count(), 2);
    }

    #[test]
    fn dismiss_is_idempotent() {
        let mut board = alert_board();
        assert!(board.dismiss("MA001"));
        assert!(!board.dismiss("MA001"));
        assert_eq!(board.alerts().len(), 2);
        assert!(board.critical_open().is_empty());
    }

    #[test]
    fn raised_alert_joins_board_and_rejects_duplicates() {
        let mut board = alert_board();
        let mut alert = mock_data::missed_visit_alerts()[2].clone();
        alert.id = "MA004".to_string();
        alert.overdue_minutes = 10;

        board.raise(alert.clone()).unwrap();
        assert_eq!(board.alerts().len(), 4);
        assert_eq!(board.summary().count(&AlertStatus::Active), 2);

        assert_eq!(
            board.raise(alert).unwrap_err(),
            RegistryError::DuplicateId { id: "MA004".to_string() }
        );
    }

    #[test]
    fn alert_filter_status_and_priority() {
        let board = alert_board();
        let criteria = FilterCriteria::default()
            .with_status(Selection::Only(AlertStatus::Active))
            .with_priority(Selection::Only(Priority::High));
        let ids: Vec<&str> = board.filter(&criteria).into_iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["MA003"]);

        let none = FilterCriteria::default()
            .with_status(Selection::Only(AlertStatus::Active))
            .with_priority(Selection::Only(Priority::Critical));
        assert!(board.filter(&none).is_empty());
    }

    // ── Billing ──────────────────────────────────────────────────────────────

    #[test]
    fn billing_summary_uses_mean_completion() {
        let summary = billing_board().summary();
        assert_eq!(summary.count(&BatchStatus::Approved), 1);
        assert_eq!(summary.count(&BatchStatus::Billed), 0);
        assert_eq!(summary.derived_percentage, Some(53));
    }

    #[test]
    fn processing_totals() {
        let totals = billing_board().processing_totals();
        assert_eq!(totals.batches, 1);
        assert_eq!(totals.patients, 85);
        assert_eq!(totals.amount, 127_500);
    }

    #[test]
    fn billing_cannot_skip_approval() {
        let mut board = billing_board();
        let err = board
            .advance("BB002", BatchStatus::Billed, "Billing Clerk")
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidTransition { .. }));

        let approved = board
            .advance("BB002", BatchStatus::Approved, "Billing Supervisor")
            .unwrap();
        assert_eq!(approved.completion, 100.0);
        assert_eq!(approved.approved_by.as_deref(), Some("Billing Supervisor"));
        assert_eq!(board.processing_totals().batches, 0);
    }

    #[test]
    fn net_amount_applies_discount() {
        let board = billing_board();
        assert_eq!(board.batches().get("BB001").unwrap().net_amount(), 191_250);
        assert_eq!(board.batches().get("BB002").unwrap().net_amount(), 102_000);
    }

    #[test]
    fn record_progress_is_clamped() {
        let mut board = billing_board();
        let batch = board.record_progress("BB002", 140.0).unwrap();
        assert_eq!(batch.completion, 100.0);
        assert_eq!(batch.status, BatchStatus::Processing);
        assert!(board.record_progress("BB404", 10.0).is_err());
    }

    #[test]
    fn non_finite_progress_is_rejected() {
        let mut board = billing_board();
        for value in [f64::NAN, f64::INFINITY] {
            assert!(matches!(
                board.record_progress("BB002", value).unwrap_err(),
                RegistryError::ConfigError { .. }
            ));
        }
        assert_eq!(board.batches().get("BB002").unwrap().completion, 60.0);
    }

    #[test]
    fn billing_category_is_the_client() {
        let board = billing_board();
        let techcorp =
            FilterCriteria::default().with_category(Selection::Only("TechCorp Industries".to_string()));
        assert_eq!(board.filter(&techcorp).len(), 1);
    }

    // ── Bundled transition tables ────────────────────────────────────────────

    #[test]
    fn consent_table_matches_documented_state_machine() {
        use wardline_transitions::TransitionTable;
        use ConsentStatus::*;

        let table =
            TransitionTable::<ConsentStatus>::from_toml_str(crate::domains::consent::CONSENT_TRANSITIONS)
                .unwrap();
        assert_eq!(table.targets(Pending), vec![Signed, Declined, Expired]);
        assert_eq!(table.targets(Signed), vec![Expired, Revoked]);
        for terminal in [Declined, Expired, Revoked] {
            assert!(table.targets(terminal).is_empty(), "{terminal} has exits");
        }
    }

    #[test]
    fn bundled_tables_compile() {
        use crate::domains::{alerts, billing, ward};
        use wardline_transitions::TransitionTable;

        assert!(TransitionTable::<PatientStatus>::from_toml_str(ward::WARD_TRANSITIONS).is_ok());
        assert!(TransitionTable::<AlertStatus>::from_toml_str(alerts::ALERT_TRANSITIONS).is_ok());
        assert!(TransitionTable::<BatchStatus>::from_toml_str(billing::BILLING_TRANSITIONS).is_ok());
    }

    // ── View filters and scenarios ───────────────────────────────────────────

    #[test]
    fn view_filters_parse_all_sentinel() {
        let filters = ViewFilters {
            search: "smith".to_string(),
            status: "all".to_string(),
            category: String::new(),
            priority: "high".to_string(),
        };
        let criteria = filters.criteria::<AlertStatus>().unwrap();
        assert_eq!(criteria.search_text, "smith");
        assert!(criteria.status.is_all());
        assert!(criteria.category.is_all());
        assert_eq!(criteria.priority, Selection::Only(Priority::High));
    }

    #[test]
    fn view_filters_reject_unknown_status() {
        let filters = ViewFilters {
            status: "sleeping".to_string(),
            ..ViewFilters::default()
        };
        let err = filters.criteria::<PatientStatus>().unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownStatus {
                domain: "ward-patient".to_string(),
                value: "sleeping".to_string(),
            }
        );
    }

    #[test]
    fn statuses_use_kebab_case_on_the_wire() {
        let patient = &mock_data::ward_patients()[2];
        let json = serde_json::to_value(patient).unwrap();
        assert_eq!(json["status"], "discharge-ready");
        assert_eq!(json["priority"], "low");

        let batch: crate::domains::billing::BulkBatch =
            serde_json::from_value(serde_json::to_value(&mock_data::bulk_batches()[0]).unwrap()).unwrap();
        assert_eq!(batch.event_type.as_str(), "corporate");
    }

    #[test]
    fn seed_data_has_no_duplicate_ids() {
        assert!(mock_data::consent_patients().is_ok());
        assert!(wardline_core::RecordStore::from_seed(mock_data::ward_patients()).is_ok());
        assert!(wardline_core::RecordStore::from_seed(mock_data::missed_visit_alerts()).is_ok());
        assert!(wardline_core::RecordStore::from_seed(mock_data::bulk_batches()).is_ok());
    }

    #[test]
    fn every_scenario_runs() {
        let config = DashboardConfig::default();
        let filters = ViewFilters::default();
        scenarios::consent_status::run_scenario(&config, &filters).unwrap();
        scenarios::ward_status::run_scenario(&config, &filters, 0).unwrap();
        scenarios::missed_visits::run_scenario(&config, &filters).unwrap();
        scenarios::bulk_billing::run_scenario(&config, &filters).unwrap();
    }
}
