//! Vertical field-of-view band filter.

use crate::linker::Detection;
use crate::pipeline::RawRecord;

/// Keeps only records whose vertical midpoint falls inside the usable band
/// of the imaging flow cell, and turns the survivors into [`Detection`]s
/// with sequence order assigned.
#[derive(Debug, Clone, Copy)]
pub struct BandFilter {
    /// Lowest accepted center-y, pixels (inclusive).
    pub y_min: f64,
    /// Highest accepted center-y, pixels (inclusive).
    pub y_max: f64,
}

impl Default for BandFilter {
    fn default() -> Self {
        Self {
            y_min: 50.0,
            y_max: 900.0,
        }
    }
}

impl BandFilter {
    pub fn new(y_min: f64, y_max: f64) -> Self {
        Self { y_min, y_max }
    }

    /// Filter the records, preserving order.
    pub fn filter(&self, records: &[RawRecord]) -> Vec<Detection> {
        let mut detections = Vec::with_capacity(records.len());
        for record in records {
            let center_y = record.corner_y + record.image_height / 2.0;
            if center_y < self.y_min || center_y > self.y_max {
                continue;
            }
            detections.push(Detection::new(
                detections.len(),
                record.id,
                record.area,
                record.corner_x,
                record.corner_y,
                record.diameter,
                record.elapsed_time,
                record.image_height,
                record.image_width,
            ));
        }
        detections
    }
}
