//! Scenario 4: Bulk Billing
//!
//! Batch counts with mean completion, processing totals, and a batch moved
//! from draft to billed one legal step at a time. Skipping approval is
//! rejected.

use wardline_contracts::{error::RegistryResult, record::Status};

use crate::{
    config::DashboardConfig,
    domains::billing::{BatchStatus, BillingBoard},
    mock_data::bulk_batches,
};

use super::{print_audit, print_rejection, print_summary, ViewFilters};

pub fn run_scenario(config: &DashboardConfig, filters: &ViewFilters) -> RegistryResult<()> {
    println!("=== Scenario 4: Bulk Billing ===");
    println!();

    let criteria = filters.criteria::<BatchStatus>()?;
    let mut board = BillingBoard::new(bulk_batches())?;

    let visible = board.filter(&criteria);
    println!("  Batches shown: {} of {}", visible.len(), board.batches().len());
    for batch in visible {
        println!(
            "    {} {:<24} {:<10} {:>4} patients  gross {:>8}  net {:>8}  {:<10} {:.0}%",
            batch.id,
            batch.client_name,
            batch.event_type.as_str(),
            batch.patient_count,
            batch.total_amount,
            batch.net_amount(),
            batch.status.as_str(),
            batch.completion
        );
    }
    print_summary(&board.summary(), "Mean completion");
    print_processing(&board);
    println!(
        "  Claim predictor accuracy {:.1}% | missed-charge recovery {:.1}%",
        config.display.claim_model_accuracy, config.display.charge_recovery_rate
    );
    println!();

    print_rejection(
        "BB003 draft -> billed",
        board.advance("BB003", BatchStatus::Billed, "Billing Clerk"),
    );
    board.advance("BB003", BatchStatus::Processing, "Billing Clerk")?;
    board.record_progress("BB003", 40.0)?;
    print_processing(&board);

    board.advance("BB002", BatchStatus::Approved, "Billing Supervisor")?;
    let billed = board.advance("BB001", BatchStatus::Billed, "Billing Supervisor")?;
    println!(
        "  BB001 billed at {}",
        billed
            .billed_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    );

    print_summary(&board.summary(), "Mean completion");
    print_audit(board.audit());
    println!();
    println!("  Scenario 4 complete.");
    println!();

    Ok(())
}

fn print_processing(board: &BillingBoard) {
    let totals = board.processing_totals();
    println!(
        "  Processing: {} batch(es), {} patients, amount {}",
        totals.batches, totals.patients, totals.amount
    );
}
