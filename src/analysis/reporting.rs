use crate::config::units::{as_gw, as_gwh, as_kilotonnes, as_twh};
use crate::core::simulation::{SimulationResult, SimulationStatus};

pub fn print_simulation_summary(result: &SimulationResult) {
    let summary = &result.summary;

    println!("\nSimulation Summary");
    println!("----------------------------------------");
    match result.status {
        SimulationStatus::Converged => {
            println!("Status: CONVERGED after {} iterations", result.iterations)
        }
        SimulationStatus::Failed => println!(
            "Status: FAILED (iteration limit exceeded after {} iterations)",
            result.iterations
        ),
    }
    println!("Energy Balance:");
    println!(
        "  Renewable Production: {:.2} TWh",
        as_twh(summary.total_renewable_production_wh)
    );
    println!(
        "  Total Consumption: {:.2} TWh",
        as_twh(summary.total_consumption_wh)
    );
    println!("  Deficit: {:.2} TWh", as_twh(summary.deficit_wh));
    println!("Backup Production:");
    println!(
        "  Required Base Load Coverage: {:.2} TWh - {:.2} GWh/quarter",
        as_twh(summary.total_backup_wh),
        as_gwh(summary.total_backup_wh / result.series.len().max(1) as f64)
    );
    println!(
        "  Base Load Overproduction: {:.2} %",
        summary.backup_overshoot * 100.0
    );
    println!(
        "  Base Load Share (Consumption): {:.2} %",
        summary.backup_share_of_consumption * 100.0
    );
    println!("Storage:");
    println!(
        "  Initial Storage Energy: {:.2} TWh",
        as_twh(summary.initial_storage_wh)
    );
    println!(
        "  Remaining Storage Energy: {:.2} TWh",
        as_twh(summary.remaining_storage_wh)
    );
    println!("  Lowest Point: {:.2} TWh", as_twh(summary.lowest_point_wh));
    println!(
        "  Largest Charge: {:.2} GWh - {:.2} GW",
        as_gwh(summary.largest_charge_wh),
        as_gw(summary.largest_charge_power_w)
    );
    println!(
        "  Largest Discharge: {:.2} GWh - {:.2} GW",
        as_gwh(summary.largest_discharge_wh),
        as_gw(summary.largest_discharge_power_w)
    );
    if let Some(last) = result.series.last() {
        println!(
            "  Final Hydrogen Mass: {:.2} kt",
            as_kilotonnes(last.storage_kg)
        );
    }
    println!("----------------------------------------");
}
