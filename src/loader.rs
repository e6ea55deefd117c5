//! Series loading
//!
//! Parses a comma-separated time series into a [`Series`]. The first row is a
//! header of column names; each subsequent row is one sample. The header
//! drives the column-to-field mapping, so column order in the file does not
//! matter as long as the expected names are present.
//!
//! Non-numeric fields are deliberately not rejected: they become `NAN` and
//! flow downstream unchanged. Consumers that care (the CLI `validate`
//! command) can count them after the fact.

use std::path::Path;

use log::warn;

use crate::error::ReplayError;
use crate::types::{Sample, Series, SAMPLE_COLUMNS};

/// Parse CSV text into a series.
///
/// Every data row must have the same number of fields as the header (the
/// reader rejects ragged rows). An input that is empty beyond the header
/// yields an empty series.
pub fn parse_csv(text: &str) -> Result<Series, ReplayError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(ReplayError::EmptyHeader);
    }

    let columns = resolve_columns(&headers)?;

    let mut samples = Vec::new();
    for record in reader.records() {
        let record = record?;
        samples.push(Sample {
            timestamp: field(&record, columns[0]),
            ax: field(&record, columns[1]),
            ay: field(&record, columns[2]),
            az: field(&record, columns[3]),
            gx: field(&record, columns[4]),
            gy: field(&record, columns[5]),
            gz: field(&record, columns[6]),
        });
    }

    Ok(Series::new(samples))
}

/// Load a series from a file on disk.
pub fn load_path(path: &Path) -> Result<Series, ReplayError> {
    let text = std::fs::read_to_string(path)?;
    parse_csv(&text)
}

/// Load a series from a file, falling back to an empty series on failure.
///
/// This is the mount-time behavior: an unreachable or unparsable source logs
/// a warning and leaves playback inert rather than surfacing an error.
pub fn load_path_or_empty(path: &Path) -> Series {
    match load_path(path) {
        Ok(series) => series,
        Err(e) => {
            warn!("series load failed, playback will be inert: {e}");
            Series::empty()
        }
    }
}

/// Resolve the position of each expected column in the header.
fn resolve_columns(headers: &csv::StringRecord) -> Result<[usize; 7], ReplayError> {
    let mut columns = [0usize; 7];
    for (slot, name) in columns.iter_mut().zip(SAMPLE_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReplayError::MissingColumn(name.to_string()))?;
    }
    Ok(columns)
}

/// Numeric value at a column, with non-numeric pass-through as `NAN`.
fn field(record: &csv::StringRecord, column: usize) -> f64 {
    record
        .get(column)
        .and_then(|raw| raw.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
