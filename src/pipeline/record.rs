//! Raw instrument records and the delimited-file reader.

use std::io::Read;

use serde::Deserialize;
use thiserror::Error;

/// Errors surfaced at the pipeline boundary.
///
/// The core linker and aggregator cannot fail; everything that can go wrong
/// happens while reading input or writing the report.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read input data: {0}")]
    Io(#[from] std::io::Error),
    /// A malformed or missing numeric field fails the whole run; there is
    /// no partial recovery.
    #[error("malformed detection record: {0}")]
    Malformed(#[from] csv::Error),
}

/// One row of the instrument export, in file column order.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawRecord {
    /// Particle image id.
    pub id: i64,
    /// Area in um^2.
    pub area: f64,
    /// Top-left x of the particle image, pixels.
    pub corner_x: f64,
    /// Top-left y of the particle image, pixels.
    pub corner_y: f64,
    /// Diameter in um.
    pub diameter: f64,
    /// Elapsed time in seconds. Rows must already be sorted by this field.
    pub elapsed_time: f64,
    /// Particle image height, pixels.
    pub image_height: f64,
    /// Particle image width, pixels.
    pub image_width: f64,
}

/// Read comma-delimited records, skipping `header_rows` leading rows.
///
/// Header rows are skipped before any field parsing, so arbitrary text is
/// fine there; every later row must parse completely.
pub fn read_records<R: Read>(
    reader: R,
    header_rows: usize,
) -> Result<Vec<RawRecord>, PipelineError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        let record = result?;
        if row < header_rows {
            continue;
        }
        records.push(record.deserialize(None)?);
    }
    Ok(records)
}
