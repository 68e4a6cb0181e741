//! CSV output for scraped records.

use crate::error::Result;
use crate::types::WitnessSlipRecord;
use std::path::Path;

/// Write `records` to `path` as CSV: header row first, then one row per
/// record in sequence order. Overwrites any existing file. An empty
/// slice writes nothing at all, not even a header, and returns 0.
pub fn write_records(path: &Path, records: &[WitnessSlipRecord]) -> Result<usize> {
    if records.is_empty() {
        return Ok(0);
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(records.len())
}
