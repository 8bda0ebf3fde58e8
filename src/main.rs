use anyhow::Context;
use chrono::Datelike;
use clap::Parser;

use stromwende::analysis::reporting::print_simulation_summary;
use stromwende::cli::cli::Args;
use stromwende::config::scenario::{CapacityTargets, ScenarioParameters};
use stromwende::config::units::{gw, twh};
use stromwende::core::scaling::project_year;
use stromwende::core::simulation::run_simulation;
use stromwende::data::calendar::CalendarAligner;
use stromwende::data::loader::load_records_json;
use stromwende::data::synthetic::synthesize_reference_year;
use stromwende::utils::csv_export::ResultExporter;
use stromwende::utils::logging;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    logging::init_logging(args.enable_timing());

    println!("Stromwende Energy Scenario Simulator");
    println!(
        "Reference year: {}, consumption target: {} TWh, records: {}",
        args.reference_year(),
        args.consumption_twh(),
        args.records().unwrap_or("synthetic demo year")
    );

    // Load the reference data; without a records file a seeded demo year
    // stands in.
    let mut store = match args.records() {
        Some(path) => load_records_json(path)?,
        None => synthesize_reference_year(args.reference_year(), args.seed().unwrap_or(42))
            .context("synthesizing demo reference year")?,
    };

    // Reshape onto the calendar grid and fill the daylight-saving gaps.
    let first_year = store
        .records()
        .first()
        .map(|r| r.start.year())
        .context("reference data is empty")?;
    let last_year = store
        .records()
        .last()
        .map(|r| r.start.year())
        .context("reference data is empty")?;
    let aligner = CalendarAligner::new(first_year, (last_year - first_year + 1) as usize);
    aligner
        .align(&mut store)
        .context("aligning reference data")?;

    let params = ScenarioParameters {
        reference_year: args.reference_year(),
        consumption_target_wh: twh(args.consumption_twh()),
        capacity_targets: CapacityTargets {
            pv: gw(args.pv_gw()),
            wind_offshore: gw(args.wind_offshore_gw()),
            wind_onshore: gw(args.wind_onshore_gw()),
            biomass: gw(args.biomass_gw()),
            hydro: gw(args.hydro_gw()),
        },
        initial_storage_wh: twh(args.initial_storage_twh()),
        reserve_floor_wh: twh(args.reserve_twh()),
        baseload_growth_factor: 1.0 + args.growth_percent() / 100.0,
        iteration_limit: args.iteration_limit(),
        summer_factor: args.summer_factor(),
        ..ScenarioParameters::default()
    };

    let projected = project_year(&store, &params, args.verbose())?;
    let result = run_simulation(&projected, &params, args.verbose());

    print_simulation_summary(&result);

    if args.export_csv() {
        let exporter = ResultExporter::new(args.output_dir(), args.verbose())?;
        exporter.export_simulation_results(&projected, &result)?;
    }

    logging::print_timing_report();

    Ok(())
}
