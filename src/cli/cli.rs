use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(short = 'r', long, default_value_t = 2021)]
    reference_year: i32,

    #[arg(long, help = "Target total annual consumption in TWh", default_value_t = 500.0)]
    consumption_twh: f64,

    #[arg(long, default_value_t = 215.0)]
    pv_gw: f64,

    #[arg(long, default_value_t = 30.0)]
    wind_offshore_gw: f64,

    #[arg(long, default_value_t = 115.0)]
    wind_onshore_gw: f64,

    #[arg(long, default_value_t = 8.332)]
    biomass_gw: f64,

    #[arg(long, default_value_t = 4.253)]
    hydro_gw: f64,

    #[arg(long, help = "Initial storage charge in TWh", default_value_t = 10.0)]
    initial_storage_twh: f64,

    #[arg(long, help = "Reserve floor in TWh", default_value_t = 1.0)]
    reserve_twh: f64,

    #[arg(short = 'n', long, default_value_t = 200)]
    iteration_limit: u32,

    #[arg(long, help = "Baseload growth per infeasible iteration in percent", default_value_t = 1.0)]
    growth_percent: f64,

    #[arg(long, help = "Summer multiplier of the seasonal baseload skew", default_value_t = 0.5)]
    summer_factor: f64,

    #[arg(long, help = "Disable the seasonal baseload skew", default_value_t = false)]
    flat_baseload: bool,

    #[arg(long, help = "JSON file with pre-parsed quarter-hour records")]
    records: Option<String>,

    #[arg(long, help = "Random seed for the synthetic demo year")]
    seed: Option<u64>,

    #[arg(short, long, default_value = "results")]
    output_dir: String,

    #[arg(long, default_value_t = false)]
    export_csv: bool,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,

    #[arg(short, long, default_value_t = true)]
    verbose: bool,
}

// Add getter methods for all fields
impl Args {
    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    pub fn consumption_twh(&self) -> f64 {
        self.consumption_twh
    }

    pub fn pv_gw(&self) -> f64 {
        self.pv_gw
    }

    pub fn wind_offshore_gw(&self) -> f64 {
        self.wind_offshore_gw
    }

    pub fn wind_onshore_gw(&self) -> f64 {
        self.wind_onshore_gw
    }

    pub fn biomass_gw(&self) -> f64 {
        self.biomass_gw
    }

    pub fn hydro_gw(&self) -> f64 {
        self.hydro_gw
    }

    pub fn initial_storage_twh(&self) -> f64 {
        self.initial_storage_twh
    }

    pub fn reserve_twh(&self) -> f64 {
        self.reserve_twh
    }

    pub fn iteration_limit(&self) -> u32 {
        self.iteration_limit
    }

    pub fn growth_percent(&self) -> f64 {
        self.growth_percent
    }

    pub fn summer_factor(&self) -> Option<f64> {
        if self.flat_baseload {
            None
        } else {
            Some(self.summer_factor)
        }
    }

    pub fn records(&self) -> Option<&str> {
        self.records.as_deref()
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }

    pub fn export_csv(&self) -> bool {
        self.export_csv
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
