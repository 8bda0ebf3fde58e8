use std::collections::HashMap;

use chrono::{Datelike, NaiveDateTime};

use crate::errors::{Result, SimulationError};
use crate::models::record::EnergyRecord;

/// Ordered, timestamp-indexed collection of quarter-hour records for one
/// data source. Populated once by an ingester; after that only the calendar
/// aligner inserts (the synthesized daylight-saving records).
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesStore {
    records: Vec<EnergyRecord>,
    index: HashMap<NaiveDateTime, usize>,
}

impl TimeSeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<EnergyRecord>) -> Result<Self> {
        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    /// Inserts a record at its chronological position. Rejects duplicate
    /// timestamps and records that do not span a quarter hour.
    pub fn insert(&mut self, record: EnergyRecord) -> Result<()> {
        if !record.spans_quarter_hour() {
            return Err(SimulationError::BrokenInterval {
                start: record.start,
                end: record.end,
            });
        }
        if self.index.contains_key(&record.start) {
            return Err(SimulationError::DuplicateTimestamp(record.start));
        }

        // Most inserts are append-only; the DST fix inserts mid-stream.
        let pos = self
            .records
            .partition_point(|existing| existing.start < record.start);
        self.records.insert(pos, record);
        if pos < self.records.len() - 1 {
            self.reindex_from(pos);
        } else {
            self.index.insert(self.records[pos].start, pos);
        }
        Ok(())
    }

    fn reindex_from(&mut self, pos: usize) {
        for (i, record) in self.records.iter().enumerate().skip(pos) {
            self.index.insert(record.start, i);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[EnergyRecord] {
        &self.records
    }

    pub fn get(&self, start: NaiveDateTime) -> Option<&EnergyRecord> {
        self.index.get(&start).map(|&i| &self.records[i])
    }

    pub(crate) fn get_mut(&mut self, start: NaiveDateTime) -> Option<&mut EnergyRecord> {
        let i = *self.index.get(&start)?;
        Some(&mut self.records[i])
    }

    /// Records whose start lies in `[from, to]`, in chronological order.
    pub fn range(&self, from: NaiveDateTime, to: NaiveDateTime) -> &[EnergyRecord] {
        let lo = self.records.partition_point(|r| r.start < from);
        let hi = self.records.partition_point(|r| r.start <= to);
        &self.records[lo..hi]
    }

    /// All records of one calendar year, in chronological order.
    pub fn year_records(&self, year: i32) -> Result<&[EnergyRecord]> {
        let lo = self.records.partition_point(|r| r.start.year() < year);
        let hi = self.records.partition_point(|r| r.start.year() <= year);
        if lo == hi {
            return Err(SimulationError::EmptyYear(year));
        }
        Ok(&self.records[lo..hi])
    }

    /// The last interval of a calendar year. The installed capacities read
    /// from it stand in for the whole reference year.
    pub fn last_of_year(&self, year: i32) -> Result<&EnergyRecord> {
        let records = self.year_records(year)?;
        Ok(records.last().expect("year_records is never empty"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn record_at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> EnergyRecord {
        let start = NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap();
        EnergyRecord::new(start)
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut store = TimeSeriesStore::new();
        store.insert(record_at(2021, 1, 1, 0, 0)).unwrap();
        let err = store.insert(record_at(2021, 1, 1, 0, 0)).unwrap_err();
        assert!(matches!(err, SimulationError::DuplicateTimestamp(_)));
    }

    #[test]
    fn test_insert_rejects_broken_interval() {
        let mut store = TimeSeriesStore::new();
        let mut record = record_at(2021, 1, 1, 0, 0);
        record.end = record.start + Duration::minutes(30);
        let err = store.insert(record).unwrap_err();
        assert!(matches!(err, SimulationError::BrokenInterval { .. }));
    }

    #[test]
    fn test_mid_stream_insert_keeps_order_and_index() {
        let mut store = TimeSeriesStore::new();
        store.insert(record_at(2021, 3, 28, 1, 45)).unwrap();
        store.insert(record_at(2021, 3, 28, 3, 0)).unwrap();
        // The DST fix inserts between the two.
        store.insert(record_at(2021, 3, 28, 2, 0)).unwrap();

        let starts: Vec<u32> = store
            .records()
            .iter()
            .map(|r| r.start.format("%H%M").to_string().parse().unwrap())
            .collect();
        assert_eq!(starts, vec![145, 200, 300]);

        let start = NaiveDate::from_ymd_opt(2021, 3, 28)
            .unwrap()
            .and_hms_opt(3, 0, 0)
            .unwrap();
        assert_eq!(store.get(start).unwrap().start, start);
    }

    #[test]
    fn test_year_lookup() {
        let mut store = TimeSeriesStore::new();
        store.insert(record_at(2020, 12, 31, 23, 45)).unwrap();
        store.insert(record_at(2021, 1, 1, 0, 0)).unwrap();
        store.insert(record_at(2021, 12, 31, 23, 45)).unwrap();

        assert_eq!(store.year_records(2021).unwrap().len(), 2);
        let last = store.last_of_year(2021).unwrap();
        assert_eq!(last.start.format("%m-%d %H:%M").to_string(), "12-31 23:45");
        assert!(matches!(
            store.year_records(2019),
            Err(SimulationError::EmptyYear(2019))
        ));
    }

    #[test]
    fn test_range_is_inclusive() {
        let mut store = TimeSeriesStore::new();
        for q in 0..4 {
            store.insert(record_at(2021, 6, 1, 12, q * 15)).unwrap();
        }
        let from = NaiveDate::from_ymd_opt(2021, 6, 1)
            .unwrap()
            .and_hms_opt(12, 15, 0)
            .unwrap();
        let to = NaiveDate::from_ymd_opt(2021, 6, 1)
            .unwrap()
            .and_hms_opt(12, 45, 0)
            .unwrap();
        assert_eq!(store.range(from, to).len(), 3);
    }
}
