//! End-to-end pipeline tests: reference data -> calendar alignment ->
//! scaling -> convergence simulation.

use chrono::{Duration, NaiveDate, Timelike};

use stromwende::config::scenario::{CapacityTargets, ScenarioParameters};
use stromwende::core::scaling::project_year;
use stromwende::core::simulation::{run_simulation, SimulationStatus};
use stromwende::data::calendar::CalendarAligner;
use stromwende::data::store::TimeSeriesStore;
use stromwende::data::synthetic::synthesize_reference_year;
use stromwende::models::record::EnergyRecord;

/// Constant reference year shaped like a real SMARD export: the spring
/// daylight-saving hour is missing.
fn constant_reference_year(year: i32, renewables_wh: f64, load_wh: f64) -> TimeSeriesStore {
    let gap_day = CalendarAligner::spring_forward_day(year);
    let mut records = Vec::new();
    let mut start = NaiveDate::from_ymd_opt(year, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let end = NaiveDate::from_ymd_opt(year, 12, 31)
        .unwrap()
        .and_hms_opt(23, 45, 0)
        .unwrap();
    while start <= end {
        if !(start.date() == gap_day && start.hour() == 2) {
            let mut record = EnergyRecord::new(start);
            record.production.pv = renewables_wh;
            record.consumption.load = load_wh;
            record.power.pv = 1_000.0;
            record.power.wind_offshore = 1_000.0;
            record.power.wind_onshore = 1_000.0;
            record.power.biomass = 1_000.0;
            record.power.hydro = 1_000.0;
            records.push(record);
        }
        start += Duration::minutes(15);
    }
    TimeSeriesStore::from_records(records).unwrap()
}

fn identity_params(reference_year: i32, consumption_target_wh: f64) -> ScenarioParameters {
    ScenarioParameters {
        reference_year,
        target_year: 2030,
        consumption_target_wh,
        capacity_targets: CapacityTargets {
            pv: 1_000.0,
            wind_offshore: 1_000.0,
            wind_onshore: 1_000.0,
            biomass: 1_000.0,
            hydro: 1_000.0,
        },
        initial_storage_wh: 0.0,
        reserve_floor_wh: 0.0,
        summer_factor: None,
        ..ScenarioParameters::default()
    }
}

#[test]
fn balanced_pipeline_converges_immediately() {
    let mut store = constant_reference_year(2021, 100.0, 100.0);
    CalendarAligner::new(2021, 1).align(&mut store).unwrap();

    let params = identity_params(2021, 100.0 * 35_040.0);
    let projected = project_year(&store, &params, false).unwrap();
    assert_eq!(projected.len(), 35_040);

    let result = run_simulation(&projected, &params, false);
    assert_eq!(result.status, SimulationStatus::Converged);
    assert_eq!(result.iterations, 1);
    assert_eq!(result.summary.total_backup_wh, 0.0);
    assert!(result.series.iter().all(|r| r.storage_kg == 0.0));
    assert!(result
        .series
        .iter()
        .all(|r| (r.renewable_share - 1.0).abs() < 1e-12));
}

#[test]
fn renewable_free_pipeline_needs_full_backup() {
    let mut store = constant_reference_year(2021, 0.0, 100.0);
    CalendarAligner::new(2021, 1).align(&mut store).unwrap();

    let params = identity_params(2021, 100.0 * 35_040.0);
    let projected = project_year(&store, &params, false).unwrap();
    let result = run_simulation(&projected, &params, false);

    assert_eq!(result.status, SimulationStatus::Converged);
    let total_consumption = 100.0 * 35_040.0;
    assert!(result.summary.total_backup_wh > total_consumption);
    assert!(result.summary.total_backup_wh <= total_consumption * 1.011);
    assert!(result.summary.lowest_point_wh >= params.reserve_floor_wh);
}

#[test]
fn synthetic_year_runs_through_the_whole_pipeline() {
    let mut store = synthesize_reference_year(2021, 42).unwrap();
    CalendarAligner::new(2021, 1).align(&mut store).unwrap();
    assert_eq!(store.len(), 35_040);

    let last = store.last_of_year(2021).unwrap();
    let reference_load: f64 = store
        .year_records(2021)
        .unwrap()
        .iter()
        .map(|r| r.consumption.load)
        .sum();

    // Scale consumption up by 10% and grow the renewable fleet per the 2030
    // targets, relative to the synthetic installed capacities.
    let params = ScenarioParameters {
        reference_year: 2021,
        target_year: 2030,
        consumption_target_wh: reference_load * 1.1,
        capacity_targets: CapacityTargets {
            pv: last.power.pv * 3.5,
            wind_offshore: last.power.wind_offshore * 3.75,
            wind_onshore: last.power.wind_onshore * 2.0,
            biomass: last.power.biomass,
            hydro: last.power.hydro,
        },
        iteration_limit: 150,
        ..ScenarioParameters::default()
    };

    let projected = project_year(&store, &params, false).unwrap();
    assert_eq!(projected.len(), 35_040);

    let result = run_simulation(&projected, &params, false);
    assert_eq!(result.series.len(), 35_040);
    assert!(result.iterations >= 1);

    // The summary is internally consistent regardless of the terminal state.
    let summary = &result.summary;
    assert!(summary.total_backup_wh >= 0.0);
    assert!(summary.remaining_storage_wh >= 0.0);
    if result.converged() {
        // A converged trace never dips below the reserve floor, and its
        // minimum is bounded by the year-end level.
        assert!(summary.lowest_point_wh > params.reserve_floor_wh);
        assert!(summary.lowest_point_wh <= summary.remaining_storage_wh + 1e-6);
    }
}
