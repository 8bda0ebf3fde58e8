//! Error types for the simulation core

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("duplicate timestamp in time series: {0}")]
    DuplicateTimestamp(NaiveDateTime),

    #[error("record at {start} does not span a quarter hour (ends at {end})")]
    BrokenInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("no records found for year {0}")]
    EmptyYear(i32),

    #[error("calendar inconsistency: {0}")]
    CalendarInconsistency(String),

    #[error("daylight-saving gap not where expected in {year}: {detail}")]
    DstGapMismatch { year: i32, detail: String },

    #[error("degenerate scaling input: reference {quantity} is zero")]
    DegenerateScaling { quantity: &'static str },
}

pub type Result<T> = std::result::Result<T, SimulationError>;
