// Time Grid Constants
pub const QUARTER_HOUR_MINUTES: i64 = 15;
pub const QUARTERS_PER_HOUR: usize = 4;
pub const HOURS_PER_DAY: usize = 24;
pub const QUARTERS_PER_DAY: usize = QUARTERS_PER_HOUR * HOURS_PER_DAY; // 96
pub const MONTHS_PER_YEAR: usize = 12;
pub const MAX_DAYS_PER_MONTH: usize = 31;
pub const QUARTERS_PER_TARGET_YEAR: usize = 35_040; // fixed 365-day target year

// Historical Data Range
pub const HISTORY_BASE_YEAR: i32 = 2020;
pub const HISTORY_YEAR_COUNT: usize = 3; // 2020, 2021, 2022

// Scenario Target Year
pub const TARGET_YEAR: i32 = 2030;

// Hydrogen Storage Constants
pub const ENERGY_TO_HYDROGEN_WH_PER_KG: f64 = 39_000.0; // Wh consumed per kg H2 (electrolysis)
pub const HYDROGEN_TO_ENERGY_WH_PER_KG: f64 = 33_000.0; // Wh recovered per kg H2 (combustion)
pub const STORAGE_CAPACITY_KG: f64 = 400_000_000.0;     // 400 kt hydrogen ceiling

// Storage Policy Defaults
pub const DEFAULT_INITIAL_STORAGE_WH: f64 = 10_000_000_000_000.0; // 10 TWh initial charge
pub const DEFAULT_RESERVE_FLOOR_WH: f64 = 1_000_000_000_000.0;    // 1 TWh reserve floor

// Convergence Search Defaults
pub const DEFAULT_BASELOAD_GROWTH_FACTOR: f64 = 1.01; // 1% step per infeasible iteration
pub const DEFAULT_ITERATION_LIMIT: u32 = 200;

// Seasonal Baseload Shaping
pub const DEFAULT_SUMMER_FACTOR: f64 = 0.5;
pub const SUMMER_MONTH_WEIGHT: f64 = 7.0; // months weighted as summer in the redistribution formula
pub const WINTER_MONTH_WEIGHT: f64 = 5.0; // months weighted as winter

// 2030 Installed Capacity Targets (W)
pub const TARGET_CAPACITY_PV_W: f64 = 215_000_000_000.0;           // 215 GW
pub const TARGET_CAPACITY_WIND_OFFSHORE_W: f64 = 30_000_000_000.0; // 30 GW
pub const TARGET_CAPACITY_WIND_ONSHORE_W: f64 = 115_000_000_000.0; // 115 GW
pub const TARGET_CAPACITY_BIOMASS_W: f64 = 8_332_000_000.0;        // 8,332 MW
pub const TARGET_CAPACITY_HYDRO_W: f64 = 4_253_000_000.0;          // 4,253 MW

// 2030 Consumption Target (Wh)
pub const DEFAULT_CONSUMPTION_TARGET_WH: f64 = 500_000_000_000_000.0; // 500 TWh
