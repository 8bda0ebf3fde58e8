use chrono::{Datelike, Duration, NaiveDate};
use indicatif::ProgressBar;

use crate::config::scenario::ScenarioParameters;
use crate::data::store::TimeSeriesStore;
use crate::errors::{Result, SimulationError};
use crate::models::record::EnergyRecord;
use crate::utils::logging::{self, OperationCategory};

/// Multiplicative factors projecting the reference year onto the scenario
/// targets.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingFactors {
    pub pv: f64,
    pub wind_offshore: f64,
    pub wind_onshore: f64,
    pub biomass: f64,
    pub hydro: f64,
    pub load: f64,
}

impl ScalingFactors {
    /// Reference capacities are taken from the last interval of the
    /// reference year (capacity is constant within a sampled year);
    /// reference consumption is the load summed over the whole year. A zero
    /// denominator is an error, never a silent zero or infinite factor.
    pub fn compute(reference: &TimeSeriesStore, params: &ScenarioParameters) -> Result<Self> {
        let _timing = logging::start_timing("compute_scaling_factors", OperationCategory::Scaling);

        let last = reference.last_of_year(params.reference_year)?;

        let reference_load: f64 = reference
            .year_records(params.reference_year)?
            .iter()
            .map(|r| r.consumption.load)
            .sum();

        let factor = |target: f64, current: f64, quantity: &'static str| -> Result<f64> {
            if current == 0.0 {
                return Err(SimulationError::DegenerateScaling { quantity });
            }
            Ok(target / current)
        };

        let targets = &params.capacity_targets;
        Ok(Self {
            pv: factor(targets.pv, last.power.pv, "installed PV capacity")?,
            wind_offshore: factor(
                targets.wind_offshore,
                last.power.wind_offshore,
                "installed offshore wind capacity",
            )?,
            wind_onshore: factor(
                targets.wind_onshore,
                last.power.wind_onshore,
                "installed onshore wind capacity",
            )?,
            biomass: factor(targets.biomass, last.power.biomass, "installed biomass capacity")?,
            hydro: factor(targets.hydro, last.power.hydro, "installed hydro capacity")?,
            load: factor(params.consumption_target_wh, reference_load, "total consumption")?,
        })
    }
}

/// The projected scenario year: one record per quarter hour of the target
/// year's calendar, renewables rescaled to the capacity targets,
/// conventional carriers zeroed (the simulator fills the backup term).
#[derive(Debug, Clone)]
pub struct ProjectedYear {
    pub year: i32,
    pub records: Vec<EnergyRecord>,
}

impl ProjectedYear {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_renewable_production(&self) -> f64 {
        self.records.iter().map(|r| r.total_renewables()).sum()
    }

    pub fn total_consumption(&self) -> f64 {
        self.records.iter().map(|r| r.consumption.load).sum()
    }
}

/// Copies the reference year onto the target year's calendar, applying the
/// scaling factors. The target grid drives the calendar position; the
/// reference stream is consumed exactly once per target slot, discarding
/// 29-February entries of leap reference years along the way.
pub fn project_year(
    reference: &TimeSeriesStore,
    params: &ScenarioParameters,
    show_progress: bool,
) -> Result<ProjectedYear> {
    let _timing = logging::start_timing("project_year", OperationCategory::Scaling);

    let factors = ScalingFactors::compute(reference, params)?;
    let reference_records = reference.year_records(params.reference_year)?;
    let mut stream = reference_records
        .iter()
        .filter(|r| !(r.start.month() == 2 && r.start.day() == 29));

    let targets = &params.capacity_targets;
    let mut records = Vec::new();

    let first = NaiveDate::from_ymd_opt(params.target_year, 1, 1)
        .expect("January 1st always exists")
        .and_hms_opt(0, 0, 0)
        .expect("valid time");
    let last = NaiveDate::from_ymd_opt(params.target_year, 12, 31)
        .expect("December 31st always exists")
        .and_hms_opt(23, 45, 0)
        .expect("valid time");

    let total_slots = ((last - first).num_minutes() / 15 + 1) as u64;
    let progress = if show_progress {
        ProgressBar::new(total_slots)
    } else {
        ProgressBar::hidden()
    };

    let mut start = first;
    while start <= last {
        let source = stream.next().ok_or_else(|| {
            SimulationError::CalendarInconsistency(format!(
                "reference year {} ran out of records at target slot {start}",
                params.reference_year
            ))
        })?;

        let mut record = EnergyRecord::new(start);
        record.production.pv = source.production.pv * factors.pv;
        record.production.wind_offshore = source.production.wind_offshore * factors.wind_offshore;
        record.production.wind_onshore = source.production.wind_onshore * factors.wind_onshore;
        record.production.biomass = source.production.biomass * factors.biomass;
        record.production.hydro = source.production.hydro * factors.hydro;

        record.power.pv = targets.pv;
        record.power.wind_offshore = targets.wind_offshore;
        record.power.wind_onshore = targets.wind_onshore;
        record.power.biomass = targets.biomass;
        record.power.hydro = targets.hydro;

        record.consumption.load = source.consumption.load * factors.load;
        record.consumption.residual = record.consumption.load - record.total_renewables();

        records.push(record);
        progress.inc(1);
        start += Duration::minutes(15);
    }
    progress.finish_and_clear();

    tracing::debug!(
        slots = records.len(),
        reference_year = params.reference_year,
        target_year = params.target_year,
        "projected reference year onto target calendar"
    );

    Ok(ProjectedYear {
        year: params.target_year,
        records,
    })
}
