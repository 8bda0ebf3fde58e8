use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::constants::QUARTER_HOUR_MINUTES;

/// Generated energy per carrier for one quarter-hour interval, in Wh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Production {
    pub pv: f64,
    pub wind_offshore: f64,
    pub wind_onshore: f64,
    pub biomass: f64,
    pub hydro: f64,
    pub other_renewables: f64,
    pub nuclear: f64,
    pub lignite: f64,
    pub coal: f64,
    pub gas: f64,
    pub other_conventional: f64,
}

/// Installed capacity per renewable carrier valid at the interval, in W.
/// Constant across a day in the source data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstalledPower {
    pub pv: f64,
    pub wind_offshore: f64,
    pub wind_onshore: f64,
    pub biomass: f64,
    pub hydro: f64,
}

/// Grid demand for one quarter-hour interval, in Wh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Consumption {
    /// Total grid load.
    pub load: f64,
    /// Load minus non-dispatchable renewable production.
    pub residual: f64,
}

/// One quarter-hour of production, installed capacity and consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecord {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub production: Production,
    pub power: InstalledPower,
    pub consumption: Consumption,
}

impl EnergyRecord {
    /// Creates an empty record spanning the quarter hour beginning at `start`.
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: start + Duration::minutes(QUARTER_HOUR_MINUTES),
            production: Production::default(),
            power: InstalledPower::default(),
            consumption: Consumption::default(),
        }
    }

    pub fn spans_quarter_hour(&self) -> bool {
        self.end - self.start == Duration::minutes(QUARTER_HOUR_MINUTES)
    }

    /// Canonical renewable total. Every aggregation in the crate goes
    /// through this, never through ad-hoc sums.
    pub fn total_renewables(&self) -> f64 {
        let p = &self.production;
        p.pv + p.wind_offshore + p.wind_onshore + p.biomass + p.hydro + p.other_renewables
    }

    /// Canonical fossil total.
    pub fn total_fossil(&self) -> f64 {
        let p = &self.production;
        p.lignite + p.coal + p.gas + p.other_conventional
    }

    /// Canonical production total: renewables, nuclear and fossil carriers.
    pub fn total_production(&self) -> f64 {
        self.total_renewables() + self.production.nuclear + self.total_fossil()
    }

    /// Deep copy with both timestamps advanced by `minutes`. All non-time
    /// fields are carried over unchanged.
    pub fn clone_shifted(&self, minutes: i64) -> Self {
        let mut shifted = self.clone();
        shifted.start += Duration::minutes(minutes);
        shifted.end += Duration::minutes(minutes);
        shifted
    }
}

/// Field-by-field sum of two records. Timestamps are taken from `a`.
pub fn combine(a: &EnergyRecord, b: &EnergyRecord) -> EnergyRecord {
    EnergyRecord {
        start: a.start,
        end: a.end,
        production: Production {
            pv: a.production.pv + b.production.pv,
            wind_offshore: a.production.wind_offshore + b.production.wind_offshore,
            wind_onshore: a.production.wind_onshore + b.production.wind_onshore,
            biomass: a.production.biomass + b.production.biomass,
            hydro: a.production.hydro + b.production.hydro,
            other_renewables: a.production.other_renewables + b.production.other_renewables,
            nuclear: a.production.nuclear + b.production.nuclear,
            lignite: a.production.lignite + b.production.lignite,
            coal: a.production.coal + b.production.coal,
            gas: a.production.gas + b.production.gas,
            other_conventional: a.production.other_conventional + b.production.other_conventional,
        },
        power: InstalledPower {
            pv: a.power.pv + b.power.pv,
            wind_offshore: a.power.wind_offshore + b.power.wind_offshore,
            wind_onshore: a.power.wind_onshore + b.power.wind_onshore,
            biomass: a.power.biomass + b.power.biomass,
            hydro: a.power.hydro + b.power.hydro,
        },
        consumption: Consumption {
            load: a.consumption.load + b.consumption.load,
            residual: a.consumption.residual + b.consumption.residual,
        },
    }
}

/// Field-by-field multiplication of every energy, capacity and consumption
/// value. Timestamps are unchanged.
pub fn scale(a: &EnergyRecord, factor: f64) -> EnergyRecord {
    EnergyRecord {
        start: a.start,
        end: a.end,
        production: Production {
            pv: a.production.pv * factor,
            wind_offshore: a.production.wind_offshore * factor,
            wind_onshore: a.production.wind_onshore * factor,
            biomass: a.production.biomass * factor,
            hydro: a.production.hydro * factor,
            other_renewables: a.production.other_renewables * factor,
            nuclear: a.production.nuclear * factor,
            lignite: a.production.lignite * factor,
            coal: a.production.coal * factor,
            gas: a.production.gas * factor,
            other_conventional: a.production.other_conventional * factor,
        },
        power: InstalledPower {
            pv: a.power.pv * factor,
            wind_offshore: a.power.wind_offshore * factor,
            wind_onshore: a.power.wind_onshore * factor,
            biomass: a.power.biomass * factor,
            hydro: a.power.hydro * factor,
        },
        consumption: Consumption {
            load: a.consumption.load * factor,
            residual: a.consumption.residual * factor,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record_at(h: u32, m: u32) -> EnergyRecord {
        let start = NaiveDate::from_ymd_opt(2021, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap();
        EnergyRecord::new(start)
    }

    #[test]
    fn test_new_record_spans_quarter_hour() {
        let r = record_at(13, 45);
        assert!(r.spans_quarter_hour());
        assert_eq!(r.end - r.start, Duration::minutes(15));
    }

    #[test]
    fn test_canonical_totals() {
        let mut r = record_at(0, 0);
        r.production.pv = 10.0;
        r.production.wind_onshore = 20.0;
        r.production.other_renewables = 5.0;
        r.production.nuclear = 7.0;
        r.production.lignite = 3.0;
        r.production.gas = 4.0;

        assert_eq!(r.total_renewables(), 35.0);
        assert_eq!(r.total_fossil(), 7.0);
        assert_eq!(r.total_production(), 49.0);
    }

    #[test]
    fn test_combine_sums_field_by_field() {
        let mut a = record_at(0, 0);
        a.production.pv = 1.0;
        a.consumption.load = 100.0;
        let mut b = record_at(0, 15);
        b.production.pv = 2.0;
        b.consumption.load = 50.0;

        let c = combine(&a, &b);
        assert_eq!(c.production.pv, 3.0);
        assert_eq!(c.consumption.load, 150.0);
        assert_eq!(c.start, a.start);
    }

    #[test]
    fn test_scale_is_identity_at_one() {
        let mut a = record_at(0, 0);
        a.production.wind_offshore = 42.0;
        a.power.pv = 7.0;
        a.consumption.load = 13.0;

        let b = scale(&a, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_clone_shifted_keeps_values() {
        let mut a = record_at(1, 45);
        a.production.hydro = 9.0;

        let b = a.clone_shifted(30);
        assert_eq!(b.production.hydro, 9.0);
        assert_eq!(b.start - a.start, Duration::minutes(30));
        assert_eq!(b.end - a.end, Duration::minutes(30));
        assert!(b.spans_quarter_hour());
    }
}
