//! Scenario 2: Ward Patient Status
//!
//! Header cards per patient status, a recovery step through the ward table,
//! a discharge reversal the table does not allow, and live occupancy
//! metrics refreshed by a `RefreshTimer`.

use wardline_contracts::{error::RegistryResult, record::Status};

use crate::{
    config::DashboardConfig,
    domains::ward::{PatientStatus, WardBoard},
    mock_data::{ward_metrics, ward_patients},
    refresh::{RefreshTimer, WardMetrics},
};

use super::{print_audit, print_rejection, print_summary, ViewFilters};

/// Run the ward scenario. With `ticks > 0` the metrics card is refreshed
/// that many times at the configured cadence before the scenario ends.
pub fn run_scenario(config: &DashboardConfig, filters: &ViewFilters, ticks: u32) -> RegistryResult<()> {
    println!("=== Scenario 2: Ward Patient Status ===");
    println!();

    let criteria = filters.criteria::<PatientStatus>()?;
    let mut board = WardBoard::new(ward_patients(), ward_metrics())?;

    let visible = board.filter(&criteria);
    println!("  Patients shown: {} of {}", visible.len(), board.patients().len());
    for patient in visible {
        println!(
            "    {} {:<14} {:<6} {:<15} {:<16} {}",
            patient.id,
            patient.name,
            patient.bed,
            patient.ward,
            patient.status.as_str(),
            patient.priority
        );
    }
    print_summary(&board.summary(), "Mean recovery progress");
    println!(
        "  Discharge predictor confidence: {:.1}%",
        config.display.discharge_model_confidence
    );
    println!();

    let updated = board.update_status("W001", PatientStatus::Recovering, "Nurse Johnson")?;
    println!(
        "  W001 {} -> {} by {}",
        PatientStatus::Stable,
        updated.status,
        updated.status_changed_by.as_deref().unwrap_or("-")
    );
    print_rejection(
        "W003 discharge-ready -> monitoring",
        board.update_status("W003", PatientStatus::Monitoring, "Nurse Johnson"),
    );
    print_summary(&board.summary(), "Mean recovery progress");
    println!();

    print_metrics(board.metrics());
    if ticks > 0 {
        let mut rng = rand::thread_rng();
        let timer = RefreshTimer::start(config.refresh_interval());
        let wait = config.refresh_interval() * 2;
        for _ in 0..ticks {
            let Some(tick) = timer.recv_tick(wait) else {
                break;
            };
            board.on_tick(&tick, &mut rng, config.jitter_percent);
            print!("  Tick {}: ", tick.sequence);
            print_metrics(board.metrics());
        }
        timer.stop();
    }

    print_audit(board.audit());
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}

fn print_metrics(metrics: &WardMetrics) {
    println!(
        "  Occupancy {:.1}% | avg stay {:.1} d | nurse ratio 1:{:.0} | pending discharges {}",
        metrics.bed_occupancy_percent,
        metrics.average_stay_days,
        if metrics.nurse_patient_ratio > 0.0 {
            1.0 / metrics.nurse_patient_ratio
        } else {
            0.0
        },
        metrics.pending_discharges
    );
}
