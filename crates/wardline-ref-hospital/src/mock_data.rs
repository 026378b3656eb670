//! Simulated hospital data for the WARDLINE reference dashboards.
//!
//! All data in this module is hardcoded and fictional. It stands in for the
//! hospital information system a production deployment would read from.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use wardline_contracts::{error::RegistryResult, record::Priority};

use crate::{
    domains::{
        alerts::{AlertStatus, MissedVisitAlert, VisitKind},
        billing::{BatchStatus, BulkBatch, EventType},
        consent::{ConsentForm, ConsentKind, ConsentStatus, PatientConsent},
        ward::{PatientStatus, WardPatient},
    },
    refresh::WardMetrics,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or_default()
}

// ── Consent forms ─────────────────────────────────────────────────────────────

fn signed_form(
    id: &str,
    kind: ConsentKind,
    name: &str,
    signed_at: DateTime<Utc>,
    signer: &str,
    signature: &str,
) -> ConsentForm {
    ConsentForm {
        status: ConsentStatus::Signed,
        signed_date: Some(signed_at),
        signed_by: Some(signer.to_string()),
        digital_signature: Some(signature.to_string()),
        ..ConsentForm::pending(id, kind, name, true)
    }
}

/// Two admitted patients.
///
/// - W001 John Smith: two signed required forms, one pending required form
///   and a declined optional one (progress 67%)
/// - W002 Sarah Wilson: one signed and one pending required form plus an
///   optional research consent (progress 50%)
pub fn consent_patients() -> RegistryResult<Vec<PatientConsent>> {
    let john = PatientConsent::new(
        "W001",
        "John Smith",
        "A-101",
        "General Ward A",
        date(2024, 1, 15),
        vec![
            ConsentForm {
                expiry_date: Some(date(2024, 7, 15)),
                ..signed_form(
                    "CF001",
                    ConsentKind::Treatment,
                    "General Treatment Consent",
                    utc(2024, 1, 15, 10, 30),
                    "John Smith",
                    "e-signature-123",
                )
            },
            ConsentForm {
                witness_required: true,
                witness_signature: Some("Dr. Johnson".to_string()),
                ..signed_form(
                    "CF002",
                    ConsentKind::Anesthesia,
                    "Anesthesia Consent",
                    utc(2024, 1, 15, 11, 0),
                    "John Smith",
                    "e-signature-124",
                )
            },
            ConsentForm {
                status: ConsentStatus::Declined,
                ..ConsentForm::pending("CF003", ConsentKind::Photography, "Medical Photography", false)
            },
            ConsentForm {
                expiry_date: Some(date(2024, 1, 22)),
                ..ConsentForm::pending("CF004", ConsentKind::Discharge, "Discharge Planning Consent", true)
            },
        ],
    )?;

    let sarah = PatientConsent::new(
        "W002",
        "Sarah Wilson",
        "B-203",
        "ICU",
        date(2024, 1, 20),
        vec![
            ConsentForm {
                witness_required: true,
                witness_signature: Some("Dr. Brown".to_string()),
                ..signed_form(
                    "CF005",
                    ConsentKind::Treatment,
                    "Emergency Treatment Consent",
                    utc(2024, 1, 20, 8, 15),
                    "Sarah Wilson",
                    "e-signature-125",
                )
            },
            ConsentForm {
                witness_required: true,
                ..ConsentForm::pending("CF006", ConsentKind::Surgery, "Cardiac Procedure Consent", true)
            },
            ConsentForm::pending("CF007", ConsentKind::Research, "Clinical Research Participation", false),
        ],
    )?
    .with_guardian();

    Ok(vec![john, sarah])
}

// ── Ward patients ─────────────────────────────────────────────────────────────

fn ward_patient(
    id: &str,
    name: &str,
    bed: &str,
    ward: &str,
    status: PatientStatus,
    priority: Priority,
    recovery_progress: f64,
) -> WardPatient {
    WardPatient {
        id: id.to_string(),
        name: name.to_string(),
        bed: bed.to_string(),
        ward: ward.to_string(),
        admission_date: date(2024, 1, 15),
        diagnosis: String::new(),
        attending_physician: String::new(),
        status,
        priority,
        recovery_progress,
        status_changed_at: None,
        status_changed_by: None,
    }
}

/// Three patients: one stable, one critical, one ready for discharge.
pub fn ward_patients() -> Vec<WardPatient> {
    vec![
        WardPatient {
            diagnosis: "Community-acquired pneumonia".to_string(),
            attending_physician: "Dr. Johnson".to_string(),
            ..ward_patient(
                "W001",
                "John Smith",
                "A-101",
                "General Ward A",
                PatientStatus::Stable,
                Priority::Medium,
                60.0,
            )
        },
        WardPatient {
            admission_date: date(2024, 1, 20),
            diagnosis: "Acute myocardial infarction".to_string(),
            attending_physician: "Dr. Brown".to_string(),
            ..ward_patient(
                "W002",
                "Sarah Wilson",
                "B-203",
                "ICU",
                PatientStatus::Critical,
                Priority::Critical,
                15.0,
            )
        },
        WardPatient {
            admission_date: date(2024, 1, 12),
            diagnosis: "Post-operative care, appendectomy".to_string(),
            attending_physician: "Dr. Smith".to_string(),
            ..ward_patient(
                "W003",
                "Michael Brown",
                "A-105",
                "General Ward A",
                PatientStatus::DischargeReady,
                Priority::Low,
                100.0,
            )
        },
    ]
}

pub fn ward_metrics() -> WardMetrics {
    WardMetrics {
        bed_occupancy_percent: 87.0,
        average_stay_days: 4.6,
        nurse_patient_ratio: 0.25,
        pending_discharges: 12,
        refreshed_at: None,
    }
}

// ── Missed-visit alerts ───────────────────────────────────────────────────────

pub fn missed_visit_alerts() -> Vec<MissedVisitAlert> {
    vec![
        MissedVisitAlert {
            id: "MA001".to_string(),
            patient_id: "W002".to_string(),
            patient_name: "Sarah Wilson".to_string(),
            bed: "B-203".to_string(),
            ward: "ICU".to_string(),
            scheduled_time: time(14, 0),
            overdue_minutes: 45,
            visit_kind: VisitKind::Consultation,
            assigned_to: "Dr. Brown".to_string(),
            priority: Priority::Critical,
            status: AlertStatus::Escalated,
            escalation_level: 2,
            last_escalation: Some(utc(2024, 1, 20, 15, 30)),
            contact_attempts: 3,
            notes: Some("Critical patient in ICU - immediate attention required".to_string()),
            handled_by: None,
            resolved_at: None,
        },
        MissedVisitAlert {
            id: "MA002".to_string(),
            patient_id: "W004".to_string(),
            patient_name: "Robert Johnson".to_string(),
            bed: "A-108".to_string(),
            ward: "General Ward A".to_string(),
            scheduled_time: time(11, 0),
            overdue_minutes: 135,
            visit_kind: VisitKind::Rounds,
            assigned_to: "Dr. Smith".to_string(),
            priority: Priority::Medium,
            status: AlertStatus::Acknowledged,
            escalation_level: 1,
            last_escalation: None,
            contact_attempts: 1,
            notes: None,
            handled_by: Some("Dr. Smith".to_string()),
            resolved_at: None,
        },
        MissedVisitAlert {
            id: "MA003".to_string(),
            patient_id: "W005".to_string(),
            patient_name: "Emily Davis".to_string(),
            bed: "C-205".to_string(),
            ward: "Pediatrics".to_string(),
            scheduled_time: time(9, 30),
            overdue_minutes: 30,
            visit_kind: VisitKind::Medication,
            assigned_to: "Dr. Lee".to_string(),
            priority: Priority::High,
            status: AlertStatus::Active,
            escalation_level: 0,
            last_escalation: None,
            contact_attempts: 0,
            notes: None,
            handled_by: None,
            resolved_at: None,
        },
    ]
}

// ── Bulk billing ──────────────────────────────────────────────────────────────

pub fn bulk_batches() -> Vec<BulkBatch> {
    vec![
        BulkBatch {
            id: "BB001".to_string(),
            client_name: "TechCorp Industries".to_string(),
            event_type: EventType::Corporate,
            patient_count: 150,
            total_amount: 225_000,
            discount_percent: 15,
            status: BatchStatus::Approved,
            created_date: date(2024, 6, 1),
            completion: 100.0,
            approved_by: Some("Billing Supervisor".to_string()),
            billed_at: None,
        },
        BulkBatch {
            id: "BB002".to_string(),
            client_name: "Health Camp - Village A".to_string(),
            event_type: EventType::Camp,
            patient_count: 85,
            total_amount: 127_500,
            discount_percent: 20,
            status: BatchStatus::Processing,
            created_date: date(2024, 6, 3),
            completion: 60.0,
            approved_by: None,
            billed_at: None,
        },
        BulkBatch {
            id: "BB003".to_string(),
            client_name: "City School Screening".to_string(),
            event_type: EventType::Screening,
            patient_count: 40,
            total_amount: 32_000,
            discount_percent: 10,
            status: BatchStatus::Draft,
            created_date: date(2024, 6, 5),
            completion: 0.0,
            approved_by: None,
            billed_at: None,
        },
    ]
}
