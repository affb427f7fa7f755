//! Particle detection record produced by the vertical band filter.

use std::f64::consts::PI;

/// One particle observation in one image frame.
///
/// Detections are immutable once built; the linker never touches them and
/// records its decisions in a separate [`TrackAssignments`] table instead.
///
/// [`TrackAssignments`]: crate::linker::TrackAssignments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// 0-based position in the filtered, time-ordered sequence.
    pub seq: usize,
    /// Particle image id from the instrument export. Not necessarily unique
    /// or sequential.
    pub source_id: i64,
    /// Particle area in um^2.
    pub area: f64,
    /// Top-left x of the particle image in pixels.
    pub corner_x: f64,
    /// Top-left y of the particle image in pixels.
    pub corner_y: f64,
    /// Instrument-reported diameter in um.
    pub diameter: f64,
    /// Elapsed time of the frame in seconds.
    pub elapsed_time: f64,
    /// Horizontal midpoint: corner_x + image_width / 2.
    pub center_x: f64,
    /// Vertical midpoint: corner_y + image_height / 2.
    pub center_y: f64,
    /// Area-based diameter: 2 * sqrt(area / pi).
    pub abd_diameter: f64,
}

impl Detection {
    /// Build a detection from raw instrument fields, deriving the center
    /// coordinates and the area-based diameter.
    pub fn new(
        seq: usize,
        source_id: i64,
        area: f64,
        corner_x: f64,
        corner_y: f64,
        diameter: f64,
        elapsed_time: f64,
        image_height: f64,
        image_width: f64,
    ) -> Self {
        Self {
            seq,
            source_id,
            area,
            corner_x,
            corner_y,
            diameter,
            elapsed_time,
            center_x: corner_x + image_width / 2.0,
            center_y: corner_y + image_height / 2.0,
            abd_diameter: 2.0 * (area / PI).sqrt(),
        }
    }
}
