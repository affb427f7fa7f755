//! Textual report writer.

use std::io::{self, Write};

use crate::linker::{Detection, Gate, TrackAssignments};
use crate::stats::AggregateReport;

/// Write the analysis report: input-name echo, threshold echo, one line per
/// qualifying track and the final qualifying-track count.
///
/// The count line is the particle number for 100% counting; it is smaller
/// than the highest track id whenever any track failed qualification. An
/// empty run still produces a well-formed report with a zero count.
pub fn write_report<W: Write>(
    out: &mut W,
    input_name: &str,
    gate: &Gate,
    report: &AggregateReport,
) -> io::Result<()> {
    writeln!(out, "Input file name: {input_name}")?;
    writeln!(out, "Delta x, Delta y, Delta d, time to look ahead:")?;
    writeln!(
        out,
        "{:3}, {:3}, {:7.3}, {:7.3}",
        gate.max_delta_x, gate.max_delta_y, gate.diameter_tolerance, gate.time_seek
    )?;
    writeln!(
        out,
        "Part. #, ID 1st image, # images, ave. time, ave. x, ave. dia., slope, rms residuals"
    )?;
    for s in &report.summaries {
        writeln!(
            out,
            "{:6}, {:8}, {:8}, {:12.4}, {:7.2}, {:7.2}, {:12.3}, {:14.3},",
            s.track_id,
            s.first_detection_id,
            s.member_count,
            s.avg_time,
            s.avg_x,
            s.avg_diameter,
            s.fit.slope(),
            s.fit.rms()
        )?;
    }
    writeln!(out, "Number of tracks with fits: {}", report.qualifying_count())
}

/// Write the optional per-detection dump with the track id attached.
///
/// Every detection appears, including members of non-qualifying tracks,
/// which carry their real (nonzero) track id.
pub fn write_detection_dump<W: Write>(
    out: &mut W,
    detections: &[Detection],
    assignments: &TrackAssignments,
) -> io::Result<()> {
    writeln!(
        out,
        "Image ID, dia, ABD dia, area, time, x, y, x_corner, y_corner, track #"
    )?;
    for det in detections {
        writeln!(
            out,
            "{:8}, {:7.2}, {:7.2}, {:12.4}, {:8.2}, {:8.2}, {:8.2}, {:8.2}, {:8.2}, {:5},",
            det.source_id,
            det.diameter,
            det.abd_diameter,
            det.area,
            det.elapsed_time,
            det.center_x,
            det.center_y,
            det.corner_x,
            det.corner_y,
            assignments.track_id(det.seq)
        )?;
    }
    Ok(())
}
