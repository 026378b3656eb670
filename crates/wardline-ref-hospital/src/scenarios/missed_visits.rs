//! Scenario 3: Missed-Visit Alerts
//!
//! Acknowledge, escalate and resolve alerts; a resolved alert refuses to be
//! reopened; dismissing removes it from the board.

use wardline_contracts::{error::RegistryResult, record::Status};

use crate::{
    config::DashboardConfig,
    domains::alerts::{AlertBoard, AlertStatus, MissedVisitAlert},
    mock_data::missed_visit_alerts,
};

use super::{print_audit, print_rejection, print_summary, ViewFilters};

pub fn run_scenario(_config: &DashboardConfig, filters: &ViewFilters) -> RegistryResult<()> {
    println!("=== Scenario 3: Missed-Visit Alerts ===");
    println!();

    let criteria = filters.criteria::<AlertStatus>()?;
    let mut board = AlertBoard::new(missed_visit_alerts())?;

    let visible = board.filter(&criteria);
    println!("  Alerts shown: {} of {}", visible.len(), board.alerts().len());
    for alert in visible {
        print_alert(alert);
    }
    print_summary(&board.summary(), "Resolved");
    println!(
        "  Open: {} ({} critical)",
        board.open_count(),
        board.critical_open().len()
    );
    println!();

    let acked = board.acknowledge("MA003", "Dr. Lee")?;
    println!(
        "  MA003 acknowledged by {} ({} contact attempt(s))",
        acked.handled_by.as_deref().unwrap_or("-"),
        acked.contact_attempts
    );

    let escalated = board.escalate("MA002", "Charge Nurse")?;
    println!(
        "  MA002 escalated to level {} ({} contact attempt(s))",
        escalated.escalation_level, escalated.contact_attempts
    );

    board.resolve("MA001", "Dr. Brown")?;
    println!("  MA001 resolved");
    print_rejection("Reopen MA001", board.acknowledge("MA001", "Dr. Brown"));

    let dismissed = board.dismiss("MA001");
    println!("  MA001 dismissed: {}", dismissed);
    println!("  MA001 dismissed again: {}", board.dismiss("MA001"));

    print_summary(&board.summary(), "Resolved");
    print_audit(board.audit());
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}

fn print_alert(alert: &MissedVisitAlert) {
    println!(
        "    {} {:<14} {:<6} {:<12} {} overdue {:<7} {:<8} {:<12} level {} attempts {}",
        alert.id,
        alert.patient_name,
        alert.bed,
        alert.visit_kind.as_str(),
        alert.scheduled_time.format("%-I:%M %p"),
        alert.overdue_label(),
        alert.priority.as_str(),
        alert.status.as_str(),
        alert.escalation_level,
        alert.contact_attempts
    );
    if let Some(notes) = &alert.notes {
        println!("      note: {}", notes);
    }
}
