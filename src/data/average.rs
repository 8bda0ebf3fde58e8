use chrono::NaiveDate;

use crate::config::constants::{HOURS_PER_DAY, MAX_DAYS_PER_MONTH, MONTHS_PER_YEAR, QUARTERS_PER_HOUR};
use crate::data::calendar::CalendarGrid;
use crate::data::store::TimeSeriesStore;
use crate::errors::Result;
use crate::models::record::{combine, scale, EnergyRecord};

/// Averages all years of an aligned grid cell-by-cell into one synthetic
/// reference year laid out on `output_year`'s calendar.
///
/// A source year that has no matching calendar day (29 February outside leap
/// years) contributes nothing to that cell, but the divisor stays the number
/// of grid years.
pub fn average_reference_year(
    store: &TimeSeriesStore,
    grid: &CalendarGrid,
    output_year: i32,
) -> Result<TimeSeriesStore> {
    let year_count = grid.year_count();
    let mut averaged = Vec::new();

    for month0 in 0..MONTHS_PER_YEAR {
        for day0 in 0..MAX_DAYS_PER_MONTH {
            if !CalendarGrid::is_valid_day(output_year, month0, day0) {
                continue;
            }
            for hour in 0..HOURS_PER_DAY {
                for quarter in 0..QUARTERS_PER_HOUR {
                    let start = NaiveDate::from_ymd_opt(
                        output_year,
                        month0 as u32 + 1,
                        day0 as u32 + 1,
                    )
                    .expect("validated day")
                    .and_hms_opt(hour as u32, quarter as u32 * 15, 0)
                    .expect("valid time");

                    let mut cell = EnergyRecord::new(start);
                    for year_offset in 0..year_count {
                        if let Some(record) =
                            grid.record(store, year_offset, month0, day0, hour, quarter)
                        {
                            cell = combine(&cell, record);
                        }
                    }
                    averaged.push(scale(&cell, 1.0 / year_count as f64));
                }
            }
        }
    }

    TimeSeriesStore::from_records(averaged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::calendar::CalendarAligner;
    use chrono::{Duration, NaiveDateTime, Timelike};

    fn full_year(year: i32, load: f64) -> Vec<EnergyRecord> {
        let gap_day = CalendarAligner::spring_forward_day(year);
        let mut records = Vec::new();
        let mut start = NaiveDate::from_ymd_opt(year, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let end: NaiveDateTime = NaiveDate::from_ymd_opt(year, 12, 31)
            .unwrap()
            .and_hms_opt(23, 45, 0)
            .unwrap();
        while start <= end {
            if !(start.date() == gap_day && start.hour() == 2) {
                let mut record = EnergyRecord::new(start);
                record.consumption.load = load;
                record.production.pv = load / 2.0;
                records.push(record);
            }
            start += Duration::minutes(15);
        }
        records
    }

    #[test]
    fn test_average_of_two_years() {
        let mut records = full_year(2021, 100.0);
        records.extend(full_year(2022, 300.0));
        let mut store = TimeSeriesStore::from_records(records).unwrap();
        let grid = CalendarAligner::new(2021, 2).align(&mut store).unwrap();

        let averaged = average_reference_year(&store, &grid, 2030).unwrap();
        assert_eq!(averaged.len(), 35_040);

        let sample = averaged
            .get(
                NaiveDate::from_ymd_opt(2030, 5, 10)
                    .unwrap()
                    .and_hms_opt(8, 30, 0)
                    .unwrap(),
            )
            .unwrap();
        assert!((sample.consumption.load - 200.0).abs() < 1e-9);
        assert!((sample.production.pv - 100.0).abs() < 1e-9);
    }
}
