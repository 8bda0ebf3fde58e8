use chrono::{Datelike, Duration, NaiveDate, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::units::{gw, gwh};
use crate::data::calendar::CalendarAligner;
use crate::data::store::TimeSeriesStore;
use crate::errors::Result;
use crate::models::record::EnergyRecord;

// Rough installed capacities of the early-2020s German grid (W).
const INSTALLED_PV_W: f64 = 60_000_000_000.0;
const INSTALLED_WIND_OFFSHORE_W: f64 = 8_000_000_000.0;
const INSTALLED_WIND_ONSHORE_W: f64 = 56_000_000_000.0;
const INSTALLED_BIOMASS_W: f64 = 8_332_000_000.0;
const INSTALLED_HYDRO_W: f64 = 4_253_000_000.0;

/// Generates a plausible reference year for demo runs and tests: seasonal
/// and diurnal PV, gusty wind, steady biomass/hydro, a day/night load curve.
/// The spring daylight-saving hour is absent, exactly as in real SMARD
/// exports, so the calendar aligner has its usual gap to fill.
pub fn synthesize_reference_year(year: i32, seed: u64) -> Result<TimeSeriesStore> {
    let mut rng = StdRng::seed_from_u64(seed);
    let gap_day = CalendarAligner::spring_forward_day(year);

    let mut records = Vec::new();
    let mut start = NaiveDate::from_ymd_opt(year, 1, 1)
        .expect("January 1st always exists")
        .and_hms_opt(0, 0, 0)
        .expect("valid time");
    let end = NaiveDate::from_ymd_opt(year, 12, 31)
        .expect("December 31st always exists")
        .and_hms_opt(23, 45, 0)
        .expect("valid time");

    // Slow-moving wind regime so calm and windy stretches span days.
    let mut wind_regime: f64 = 0.5;

    while start <= end {
        if start.date() == gap_day && start.hour() == 2 {
            start += Duration::minutes(15);
            continue;
        }

        let day_of_year = start.ordinal0() as f64;
        let hour = start.hour() as f64 + start.minute() as f64 / 60.0;

        // Season peaks mid-year for PV, mid-winter for load and wind.
        let season = (std::f64::consts::TAU * (day_of_year - 172.0) / 365.0).cos();

        // PV: daylight bell between ~6h and ~20h, stronger in summer.
        let daylight = ((hour - 13.0) / 4.5).powi(2);
        let pv_shape = (-daylight).exp() * (0.35 + 0.45 * (season + 1.0) / 2.0);
        let pv_wh = INSTALLED_PV_W * pv_shape * 0.25 * rng.gen_range(0.7..1.0);

        // Wind: persistent regime plus quarter-to-quarter gusts, more in
        // winter.
        wind_regime = (wind_regime + rng.gen_range(-0.02..0.02)).clamp(0.05, 0.95);
        let winter_boost = 0.75 - 0.25 * season;
        let wind_factor = (wind_regime * winter_boost).clamp(0.02, 1.0);
        let wind_onshore_wh =
            INSTALLED_WIND_ONSHORE_W * wind_factor * 0.25 * rng.gen_range(0.85..1.15);
        let wind_offshore_wh =
            INSTALLED_WIND_OFFSHORE_W * (wind_factor * 1.3).min(1.0) * 0.25 * rng.gen_range(0.9..1.1);

        // Dispatchables run close to flat.
        let biomass_wh = INSTALLED_BIOMASS_W * 0.65 * 0.25 * rng.gen_range(0.97..1.03);
        let hydro_wh = INSTALLED_HYDRO_W * 0.55 * 0.25 * rng.gen_range(0.9..1.1);

        // Load: ~57 GW average with a morning/evening hump and winter lift.
        let diurnal = 0.85 + 0.2 * (-((hour - 12.0) / 6.0).powi(2)).exp();
        let load_w = gw(57.0) * diurnal * (1.0 + 0.1 * season) * rng.gen_range(0.97..1.03);
        let load_wh = load_w * 0.25;

        let mut record = EnergyRecord::new(start);
        record.production.pv = pv_wh;
        record.production.wind_offshore = wind_offshore_wh;
        record.production.wind_onshore = wind_onshore_wh;
        record.production.biomass = biomass_wh;
        record.production.hydro = hydro_wh;
        // A sliver of conventional production so historical totals look real.
        record.production.gas = gwh(2.0) * rng.gen_range(0.8..1.2);
        record.production.lignite = gwh(2.5) * rng.gen_range(0.8..1.2);
        record.power.pv = INSTALLED_PV_W;
        record.power.wind_offshore = INSTALLED_WIND_OFFSHORE_W;
        record.power.wind_onshore = INSTALLED_WIND_ONSHORE_W;
        record.power.biomass = INSTALLED_BIOMASS_W;
        record.power.hydro = INSTALLED_HYDRO_W;
        record.consumption.load = load_wh;
        record.consumption.residual = load_wh - record.total_renewables();

        records.push(record);
        start += Duration::minutes(15);
    }

    TimeSeriesStore::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_year_has_dst_gap() {
        let store = synthesize_reference_year(2021, 42).unwrap();
        assert_eq!(store.len(), 365 * 96 - 4);

        let gap = CalendarAligner::spring_forward_day(2021)
            .and_hms_opt(2, 0, 0)
            .unwrap();
        assert!(store.get(gap).is_none());
    }

    #[test]
    fn test_synthetic_year_aligns_cleanly() {
        let mut store = synthesize_reference_year(2021, 7).unwrap();
        let grid = CalendarAligner::new(2021, 1).align(&mut store).unwrap();
        assert_eq!(grid.valid_cell_count(0), 35_040);
        assert_eq!(store.len(), 35_040);
    }

    #[test]
    fn test_synthetic_year_is_deterministic_per_seed() {
        let a = synthesize_reference_year(2022, 5).unwrap();
        let b = synthesize_reference_year(2022, 5).unwrap();
        assert_eq!(a.records()[1000], b.records()[1000]);
    }
}
