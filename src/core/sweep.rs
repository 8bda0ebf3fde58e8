use rayon::prelude::*;

use crate::config::scenario::ScenarioParameters;
use crate::core::scaling::project_year;
use crate::core::simulation::{run_simulation, SimulationResult};
use crate::data::store::TimeSeriesStore;
use crate::errors::Result;

/// Runs several scenarios against the same reference year, one rayon task
/// per scenario. The chronological walk inside each scenario stays strictly
/// sequential; only whole scenarios fan out.
pub fn run_scenario_sweep(
    reference: &TimeSeriesStore,
    scenarios: &[ScenarioParameters],
) -> Vec<Result<SimulationResult>> {
    scenarios
        .par_iter()
        .map(|params| {
            let projected = project_year(reference, params, false)?;
            Ok(run_simulation(&projected, params, false))
        })
        .collect()
}
