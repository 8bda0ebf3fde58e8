use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

use crate::config::constants::{
    HOURS_PER_DAY, MAX_DAYS_PER_MONTH, MONTHS_PER_YEAR, QUARTERS_PER_HOUR,
};
use crate::data::store::TimeSeriesStore;
use crate::errors::{Result, SimulationError};
use crate::models::record::EnergyRecord;

const SLOTS_PER_YEAR: usize = MONTHS_PER_YEAR * MAX_DAYS_PER_MONTH * HOURS_PER_DAY * QUARTERS_PER_HOUR;

/// Dense `(year, month, day, hour, quarter)` view over a store. Slots hold
/// indices into the store's record vector; whether a slot can hold a record
/// at all is answered by the calendar (`is_valid_day`), not by sentinel
/// records.
#[derive(Debug, Clone)]
pub struct CalendarGrid {
    base_year: i32,
    year_count: usize,
    slots: Vec<Option<usize>>,
}

impl CalendarGrid {
    fn empty(base_year: i32, year_count: usize) -> Self {
        Self {
            base_year,
            year_count,
            slots: vec![None; year_count * SLOTS_PER_YEAR],
        }
    }

    pub fn base_year(&self) -> i32 {
        self.base_year
    }

    pub fn year_count(&self) -> usize {
        self.year_count
    }

    fn offset(year_offset: usize, month0: usize, day0: usize, hour: usize, quarter: usize) -> usize {
        (((year_offset * MONTHS_PER_YEAR + month0) * MAX_DAYS_PER_MONTH + day0) * HOURS_PER_DAY
            + hour)
            * QUARTERS_PER_HOUR
            + quarter
    }

    /// Whether `(month0, day0)` names an existing calendar day of `year`.
    pub fn is_valid_day(year: i32, month0: usize, day0: usize) -> bool {
        NaiveDate::from_ymd_opt(year, month0 as u32 + 1, day0 as u32 + 1).is_some()
    }

    /// Store index of the record in the given cell, if the cell is valid and
    /// filled.
    pub fn slot(
        &self,
        year_offset: usize,
        month0: usize,
        day0: usize,
        hour: usize,
        quarter: usize,
    ) -> Option<usize> {
        self.slots[Self::offset(year_offset, month0, day0, hour, quarter)]
    }

    pub fn record<'a>(
        &self,
        store: &'a TimeSeriesStore,
        year_offset: usize,
        month0: usize,
        day0: usize,
        hour: usize,
        quarter: usize,
    ) -> Option<&'a EnergyRecord> {
        self.slot(year_offset, month0, day0, hour, quarter)
            .map(|i| &store.records()[i])
    }

    /// Number of cells of one year that lie on real calendar days.
    pub fn valid_cell_count(&self, year_offset: usize) -> usize {
        let year = self.base_year + year_offset as i32;
        let mut count = 0;
        for month0 in 0..MONTHS_PER_YEAR {
            for day0 in 0..MAX_DAYS_PER_MONTH {
                if Self::is_valid_day(year, month0, day0) {
                    count += HOURS_PER_DAY * QUARTERS_PER_HOUR;
                }
            }
        }
        count
    }

    fn place(&mut self, start: NaiveDateTime, record_index: usize) -> Result<()> {
        let year_offset = (start.year() - self.base_year) as usize;
        let cell = Self::offset(
            year_offset,
            start.month0() as usize,
            start.day0() as usize,
            start.hour() as usize,
            start.minute() as usize / 15,
        );
        if self.slots[cell].is_some() {
            return Err(SimulationError::CalendarInconsistency(format!(
                "two records map to the same grid cell at {start}"
            )));
        }
        self.slots[cell] = Some(record_index);
        Ok(())
    }
}

/// Reshapes a store into the dense calendar grid and fills the hour skipped
/// at each year's spring daylight-saving transition.
#[derive(Debug, Clone)]
pub struct CalendarAligner {
    base_year: i32,
    year_count: usize,
}

impl CalendarAligner {
    pub fn new(base_year: i32, year_count: usize) -> Self {
        Self {
            base_year,
            year_count,
        }
    }

    /// The day the clocks jump from 02:00 to 03:00: the last Sunday of
    /// March.
    pub fn spring_forward_day(year: i32) -> NaiveDate {
        let mut day = NaiveDate::from_ymd_opt(year, 3, 31).expect("March 31st always exists");
        while day.weekday() != Weekday::Sun {
            day = day.pred_opt().expect("March has a Sunday");
        }
        day
    }

    /// Aligns the store onto the grid. Synthesized daylight-saving records
    /// are inserted into the store in place; this is the only mutation the
    /// store sees after ingestion.
    pub fn align(&self, store: &mut TimeSeriesStore) -> Result<CalendarGrid> {
        for year_offset in 0..self.year_count {
            self.fill_dst_gap(store, self.base_year + year_offset as i32)?;
        }

        let mut grid = CalendarGrid::empty(self.base_year, self.year_count);
        for (index, record) in store.records().iter().enumerate() {
            let year = record.start.year();
            if year < self.base_year || year >= self.base_year + self.year_count as i32 {
                return Err(SimulationError::CalendarInconsistency(format!(
                    "record at {} lies outside the aligned range {}..={}",
                    record.start,
                    self.base_year,
                    self.base_year + self.year_count as i32 - 1
                )));
            }
            grid.place(record.start, index)?;
        }

        self.verify_complete(store, &grid)?;
        Ok(grid)
    }

    /// Synthesizes the four quarter-hours of the skipped hour by copying the
    /// last record before the gap and shifting its timestamps. This is a
    /// deliberate duplication, not an interpolation between the neighbors.
    fn fill_dst_gap(&self, store: &mut TimeSeriesStore, year: i32) -> Result<()> {
        let gap_day = Self::spring_forward_day(year);
        let before_start = gap_day.and_hms_opt(1, 45, 0).expect("valid time");
        let after_start = gap_day.and_hms_opt(3, 0, 0).expect("valid time");

        let before = store
            .get(before_start)
            .ok_or_else(|| SimulationError::DstGapMismatch {
                year,
                detail: format!("no record at {before_start}, the quarter before the gap"),
            })?
            .clone();
        if store.get(after_start).is_none() {
            return Err(SimulationError::DstGapMismatch {
                year,
                detail: format!("no record at {after_start}, the quarter after the gap"),
            });
        }
        for quarter in 0..4u32 {
            let slot_start = gap_day
                .and_hms_opt(2, quarter * 15, 0)
                .expect("valid time");
            if store.get(slot_start).is_some() {
                return Err(SimulationError::DstGapMismatch {
                    year,
                    detail: format!("record at {slot_start} exists; the gap hour is not empty"),
                });
            }
        }

        for step in 1..=4 {
            store.insert(before.clone_shifted(15 * step))?;
        }
        tracing::debug!(year, day = %gap_day, "synthesized daylight-saving gap hour");
        Ok(())
    }

    /// Every cell on a real calendar day must hold a record once alignment
    /// is done; a hole means the source was corrupt or differently aligned.
    fn verify_complete(&self, store: &TimeSeriesStore, grid: &CalendarGrid) -> Result<()> {
        for year_offset in 0..self.year_count {
            let year = self.base_year + year_offset as i32;
            for month0 in 0..MONTHS_PER_YEAR {
                for day0 in 0..MAX_DAYS_PER_MONTH {
                    if !CalendarGrid::is_valid_day(year, month0, day0) {
                        continue;
                    }
                    for hour in 0..HOURS_PER_DAY {
                        for quarter in 0..QUARTERS_PER_HOUR {
                            if grid
                                .record(store, year_offset, month0, day0, hour, quarter)
                                .is_none()
                            {
                                return Err(SimulationError::CalendarInconsistency(format!(
                                    "missing record for {year}-{:02}-{:02} {:02}:{:02}",
                                    month0 + 1,
                                    day0 + 1,
                                    hour,
                                    quarter * 15
                                )));
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
