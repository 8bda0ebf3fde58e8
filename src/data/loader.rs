use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::data::store::TimeSeriesStore;
use crate::models::record::EnergyRecord;
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// Loads already-parsed quarter-hour records from a JSON array. Unit
/// normalization and locale-specific CSV parsing happen upstream; this crate
/// only consumes finished numbers.
pub fn load_records_json(path: impl AsRef<Path>) -> anyhow::Result<TimeSeriesStore> {
    let _timing = logging::start_timing(
        "load_records_json",
        OperationCategory::FileIO {
            subcategory: FileIOType::DataLoad,
        },
    );

    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let records: Vec<EnergyRecord> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing records from {}", path.display()))?;

    tracing::info!(count = records.len(), path = %path.display(), "loaded records");

    let store = TimeSeriesStore::from_records(records)
        .with_context(|| format!("building time series from {}", path.display()))?;
    Ok(store)
}
