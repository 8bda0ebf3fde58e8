use serde::{Deserialize, Serialize};

use crate::config::constants::{
    DEFAULT_BASELOAD_GROWTH_FACTOR, DEFAULT_CONSUMPTION_TARGET_WH, DEFAULT_INITIAL_STORAGE_WH,
    DEFAULT_ITERATION_LIMIT, DEFAULT_RESERVE_FLOOR_WH, DEFAULT_SUMMER_FACTOR, STORAGE_CAPACITY_KG,
    TARGET_CAPACITY_BIOMASS_W, TARGET_CAPACITY_HYDRO_W, TARGET_CAPACITY_PV_W,
    TARGET_CAPACITY_WIND_OFFSHORE_W, TARGET_CAPACITY_WIND_ONSHORE_W, TARGET_YEAR,
};

/// Target installed capacity per renewable carrier, in watts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityTargets {
    pub pv: f64,
    pub wind_offshore: f64,
    pub wind_onshore: f64,
    pub biomass: f64,
    pub hydro: f64,
}

impl Default for CapacityTargets {
    fn default() -> Self {
        Self {
            pv: TARGET_CAPACITY_PV_W,
            wind_offshore: TARGET_CAPACITY_WIND_OFFSHORE_W,
            wind_onshore: TARGET_CAPACITY_WIND_ONSHORE_W,
            biomass: TARGET_CAPACITY_BIOMASS_W,
            hydro: TARGET_CAPACITY_HYDRO_W,
        }
    }
}

/// All inputs of one scenario run. Passed explicitly into the simulator
/// entry point; there is no ambient configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioParameters {
    /// Historical year the projection is based on.
    pub reference_year: i32,
    /// Calendar year of the projected grid (fixed 365-day layout).
    pub target_year: i32,
    /// Target total annual consumption in Wh.
    pub consumption_target_wh: f64,
    pub capacity_targets: CapacityTargets,
    /// Energy charged into the hydrogen storage before the walk starts, in Wh.
    pub initial_storage_wh: f64,
    /// Stored-energy-equivalent the trajectory must stay above, in Wh.
    pub reserve_floor_wh: f64,
    /// Hydrogen mass ceiling of the storage, in kg.
    pub storage_capacity_kg: f64,
    /// Multiplier applied to the baseload after each infeasible iteration.
    pub baseload_growth_factor: f64,
    pub iteration_limit: u32,
    /// Summer multiplier of the seasonal baseload skew. `None` keeps the
    /// baseload flat across the year.
    pub summer_factor: Option<f64>,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            reference_year: 2021,
            target_year: TARGET_YEAR,
            consumption_target_wh: DEFAULT_CONSUMPTION_TARGET_WH,
            capacity_targets: CapacityTargets::default(),
            initial_storage_wh: DEFAULT_INITIAL_STORAGE_WH,
            reserve_floor_wh: DEFAULT_RESERVE_FLOOR_WH,
            storage_capacity_kg: STORAGE_CAPACITY_KG,
            baseload_growth_factor: DEFAULT_BASELOAD_GROWTH_FACTOR,
            iteration_limit: DEFAULT_ITERATION_LIMIT,
            summer_factor: Some(DEFAULT_SUMMER_FACTOR),
        }
    }
}
