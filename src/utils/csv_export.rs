use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use serde::Serialize;

use crate::config::units::as_kilotonnes;
use crate::core::scaling::ProjectedYear;
use crate::core::simulation::{SimulationResult, SimulationStatus};
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// One row of the exported result series: production by carrier,
/// consumption, net balance, storage level and coverage per quarter hour.
#[derive(Debug, Serialize)]
struct SeriesRow {
    start: String,
    pv_wh: f64,
    wind_offshore_wh: f64,
    wind_onshore_wh: f64,
    biomass_wh: f64,
    hydro_wh: f64,
    backup_wh: f64,
    load_wh: f64,
    net_balance_wh: f64,
    storage_kt: f64,
    renewable_share: f64,
}

/// Main struct for handling CSV export
pub struct ResultExporter {
    output_dir: PathBuf,
    timestamp: String,
    verbose: bool,
}

impl ResultExporter {
    /// Creates an exporter writing into a timestamped directory below
    /// `output_dir`.
    pub fn new(output_dir: impl AsRef<Path>, verbose: bool) -> anyhow::Result<Self> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let full_path = Path::new(output_dir.as_ref()).join(&timestamp);
        std::fs::create_dir_all(&full_path)
            .with_context(|| format!("creating output directory {}", full_path.display()))?;

        Ok(Self {
            output_dir: full_path,
            timestamp,
            verbose,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export the interval series and the summary of one simulation run.
    pub fn export_simulation_results(
        &self,
        projected: &ProjectedYear,
        result: &SimulationResult,
    ) -> anyhow::Result<()> {
        let _timing = logging::start_timing(
            "export_simulation_results",
            OperationCategory::FileIO {
                subcategory: FileIOType::ResultsSave,
            },
        );

        self.export_series(projected, result)?;
        self.export_summary(result)?;

        if self.verbose {
            println!(
                "CSV export completed successfully to: {}",
                self.output_dir.display()
            );
        }
        Ok(())
    }

    fn export_series(
        &self,
        projected: &ProjectedYear,
        result: &SimulationResult,
    ) -> anyhow::Result<()> {
        let series_path = self.output_dir.join("result_series.csv");
        let mut writer = csv::Writer::from_path(&series_path)
            .with_context(|| format!("creating {}", series_path.display()))?;

        for (record, interval) in projected.records.iter().zip(&result.series) {
            writer.serialize(SeriesRow {
                start: interval.start.format("%Y-%m-%d %H:%M").to_string(),
                pv_wh: record.production.pv,
                wind_offshore_wh: record.production.wind_offshore,
                wind_onshore_wh: record.production.wind_onshore,
                biomass_wh: record.production.biomass,
                hydro_wh: record.production.hydro,
                backup_wh: interval.backup_wh,
                load_wh: interval.load_wh,
                net_balance_wh: interval.net_balance_wh,
                storage_kt: as_kilotonnes(interval.storage_kg),
                renewable_share: interval.renewable_share,
            })?;
        }
        writer.flush()?;

        if self.verbose {
            println!(
                "Exported {} intervals to: {}",
                result.series.len(),
                series_path.display()
            );
        }
        Ok(())
    }

    fn export_summary(&self, result: &SimulationResult) -> anyhow::Result<()> {
        let summary_path = self.output_dir.join("simulation_summary.csv");
        let mut summary_file = File::create(&summary_path)
            .with_context(|| format!("creating {}", summary_path.display()))?;
        let summary = &result.summary;

        writeln!(summary_file, "Simulation Summary")?;
        writeln!(summary_file, "Timestamp,{}", self.timestamp)?;
        writeln!(
            summary_file,
            "Status,{}",
            match result.status {
                SimulationStatus::Converged => "CONVERGED",
                SimulationStatus::Failed => "FAILED",
            }
        )?;
        writeln!(summary_file, "Iterations,{}", result.iterations)?;
        writeln!(summary_file)?;
        writeln!(
            summary_file,
            "Renewable Production (Wh),{:.2}",
            summary.total_renewable_production_wh
        )?;
        writeln!(
            summary_file,
            "Total Consumption (Wh),{:.2}",
            summary.total_consumption_wh
        )?;
        writeln!(summary_file, "Deficit (Wh),{:.2}", summary.deficit_wh)?;
        writeln!(
            summary_file,
            "Total Backup Production (Wh),{:.2}",
            summary.total_backup_wh
        )?;
        writeln!(
            summary_file,
            "Backup Share of Consumption (%),{:.2}",
            summary.backup_share_of_consumption * 100.0
        )?;
        writeln!(
            summary_file,
            "Backup Overproduction (%),{:.2}",
            summary.backup_overshoot * 100.0
        )?;
        writeln!(
            summary_file,
            "Initial Storage (Wh),{:.2}",
            summary.initial_storage_wh
        )?;
        writeln!(
            summary_file,
            "Remaining Storage (Wh),{:.2}",
            summary.remaining_storage_wh
        )?;
        writeln!(
            summary_file,
            "Lowest Point (Wh),{:.2}",
            summary.lowest_point_wh
        )?;
        writeln!(
            summary_file,
            "Largest Charge (Wh),{:.2}",
            summary.largest_charge_wh
        )?;
        writeln!(
            summary_file,
            "Largest Discharge (Wh),{:.2}",
            summary.largest_discharge_wh
        )?;

        Ok(())
    }
}
