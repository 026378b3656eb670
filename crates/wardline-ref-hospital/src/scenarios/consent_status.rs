//! Scenario 1: Consent Status
//!
//! Signing the last required form moves a patient to 100%; an attempt to
//! sign a declined form is rejected by the consent table; an expiry sweep
//! lapses forms past their date and the progress falls back.

use chrono::{Days, NaiveDate};

use wardline_contracts::{error::RegistryResult, record::Status};

use crate::{
    config::DashboardConfig,
    domains::consent::{ConsentBoard, ConsentStatus},
    mock_data::consent_patients,
};

use super::{print_audit, print_rejection, print_summary, ViewFilters};

pub fn run_scenario(_config: &DashboardConfig, filters: &ViewFilters) -> RegistryResult<()> {
    println!("=== Scenario 1: Consent Status ===");
    println!();

    let criteria = filters.criteria::<ConsentStatus>()?;
    let mut board = ConsentBoard::new(consent_patients()?)?;

    println!("  Wards: {}", board.wards().join(", "));
    let visible = board.filter(&criteria);
    println!("  Patients shown: {} of {}", visible.len(), board.patients().len());
    for patient in visible {
        println!(
            "    {} {:<14} {:<6} {:<15} progress {}",
            patient.patient_id,
            patient.name,
            patient.bed,
            patient.ward,
            progress_label(patient.overall_progress())
        );
        for form in patient.forms().iter() {
            let witness = if form.awaiting_witness() { " (awaiting witness)" } else { "" };
            println!(
                "      {} {:<32} {:<9} {}{}",
                form.id,
                form.name,
                form.status.as_str(),
                if form.required { "required" } else { "optional" },
                witness
            );
        }
    }
    print_summary(&board.form_summary(), "Required forms signed");
    println!();

    let signed = board.sign_form("W001", "CF004")?;
    println!(
        "  CF004 signed by {} ({})",
        signed.signed_by.as_deref().unwrap_or("-"),
        signed.digital_signature.as_deref().unwrap_or("-")
    );
    println!(
        "  W001 progress now {}",
        progress_label(board.patient("W001").and_then(|p| p.overall_progress()))
    );

    print_rejection("Sign declined CF003", board.sign_form("W001", "CF003"));

    board.witness_form("W002", "CF006", "Dr. Brown")?;
    println!("  CF006 witnessed by Dr. Brown");

    let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap_or_default();
    for (patient_id, form) in board.expiring_within(today, 7) {
        println!(
            "  Expiring soon: {} {} on {}",
            patient_id,
            form.id,
            form.expiry_date.map(|d| d.to_string()).unwrap_or_default()
        );
    }

    let sweep_day = today + Days::new(3);
    let sweep = board.expire_overdue(sweep_day, "consent-monitor");
    println!(
        "  Expiry sweep on {}: {} form(s) expired, {} refused",
        sweep_day,
        sweep.expired.len(),
        sweep.failed.len()
    );
    println!(
        "  W001 progress after sweep {}",
        progress_label(board.patient("W001").and_then(|p| p.overall_progress()))
    );

    print_audit(board.audit());
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}

fn progress_label(progress: Option<u32>) -> String {
    progress.map_or_else(|| "n/a".to_string(), |pct| format!("{}%", pct))
}
