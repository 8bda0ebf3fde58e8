use serde::Serialize;

use crate::config::constants::{ENERGY_TO_HYDROGEN_WH_PER_KG, HYDROGEN_TO_ENERGY_WH_PER_KG};
use crate::config::scenario::ScenarioParameters;
use crate::core::simulation::IntervalResult;

/// Summary scalars of one simulation run, for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub total_renewable_production_wh: f64,
    pub total_consumption_wh: f64,
    /// Annual energy deficit the backup term was sized for, in Wh.
    pub deficit_wh: f64,
    /// Total backup production of the final iteration, in Wh.
    pub total_backup_wh: f64,
    /// Backup share of total consumption, 0..1.
    pub backup_share_of_consumption: f64,
    /// Final backup total relative to the initial deficit estimate.
    pub backup_overshoot: f64,
    pub initial_storage_wh: f64,
    /// Stored-energy-equivalent at the end of the year, in Wh.
    pub remaining_storage_wh: f64,
    /// Minimum observed stored-energy-equivalent, in Wh.
    pub lowest_point_wh: f64,
    /// Largest single-interval storage intake, as charged energy in Wh.
    pub largest_charge_wh: f64,
    pub largest_charge_power_w: f64,
    /// Largest single-interval storage draw, as delivered energy in Wh.
    pub largest_discharge_wh: f64,
    pub largest_discharge_power_w: f64,
    pub iterations: u32,
}

/// Condenses the per-interval series into the summary scalars.
pub fn summarize(
    params: &ScenarioParameters,
    series: &[IntervalResult],
    total_renewable_production_wh: f64,
    total_consumption_wh: f64,
    deficit_wh: f64,
    lowest_point_wh: f64,
    iterations: u32,
) -> SimulationSummary {
    let total_backup_wh: f64 = series.iter().map(|r| r.backup_wh).sum();

    let backup_share_of_consumption = if total_consumption_wh > 0.0 {
        total_backup_wh / total_consumption_wh
    } else {
        0.0
    };
    let backup_overshoot = if deficit_wh > 0.0 {
        total_backup_wh / deficit_wh
    } else {
        0.0
    };

    let remaining_storage_wh =
        series.last().map_or(0.0, |r| r.storage_kg) * HYDROGEN_TO_ENERGY_WH_PER_KG;

    // Steepest storage swings, converted at the rate of the respective
    // direction; ×4 turns quarter-hour energy into power.
    let mut largest_charge_kg: f64 = 0.0;
    let mut largest_discharge_kg: f64 = 0.0;
    for pair in series.windows(2) {
        let diff = pair[1].storage_kg - pair[0].storage_kg;
        largest_charge_kg = largest_charge_kg.max(diff);
        largest_discharge_kg = largest_discharge_kg.max(-diff);
    }
    let largest_charge_wh = largest_charge_kg * ENERGY_TO_HYDROGEN_WH_PER_KG;
    let largest_discharge_wh = largest_discharge_kg * HYDROGEN_TO_ENERGY_WH_PER_KG;

    SimulationSummary {
        total_renewable_production_wh,
        total_consumption_wh,
        deficit_wh,
        total_backup_wh,
        backup_share_of_consumption,
        backup_overshoot,
        initial_storage_wh: params.initial_storage_wh,
        remaining_storage_wh,
        lowest_point_wh: if lowest_point_wh.is_finite() {
            lowest_point_wh
        } else {
            0.0
        },
        largest_charge_wh,
        largest_charge_power_w: largest_charge_wh * 4.0,
        largest_discharge_wh,
        largest_discharge_power_w: largest_discharge_wh * 4.0,
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn interval(i: i64, backup_wh: f64, storage_kg: f64) -> IntervalResult {
        IntervalResult {
            start: NaiveDate::from_ymd_opt(2030, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                + chrono::Duration::minutes(15 * i),
            renewables_wh: 0.0,
            backup_wh,
            load_wh: 100.0,
            net_balance_wh: 0.0,
            storage_kg,
            renewable_share: 0.0,
        }
    }

    #[test]
    fn test_storage_swings() {
        let series = vec![
            interval(0, 10.0, 100.0),
            interval(1, 10.0, 103.0), // +3 kg charged
            interval(2, 10.0, 98.0),  // -5 kg combusted
            interval(3, 10.0, 99.0),
        ];
        let params = ScenarioParameters::default();
        let summary = summarize(&params, &series, 0.0, 400.0, 40.0, 0.0, 7);

        assert_eq!(summary.largest_charge_wh, 3.0 * 39_000.0);
        assert_eq!(summary.largest_discharge_wh, 5.0 * 33_000.0);
        assert_eq!(summary.largest_charge_power_w, 3.0 * 39_000.0 * 4.0);
        assert_eq!(summary.total_backup_wh, 40.0);
        assert_eq!(summary.backup_overshoot, 1.0);
        assert_eq!(summary.backup_share_of_consumption, 0.1);
        assert_eq!(summary.remaining_storage_wh, 99.0 * 33_000.0);
        assert_eq!(summary.iterations, 7);
    }
}
