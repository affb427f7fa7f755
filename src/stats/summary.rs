//! Per-track aggregation and qualification.

use crate::linker::{Detection, TrackAssignments};
use crate::stats::fit::{LineFit, fit_line};

/// Thresholds a track must clear to count as a real particle.
#[derive(Debug, Clone, Copy)]
pub struct SummaryConfig {
    /// Minimum number of member detections.
    pub min_members: usize,
    /// Minimum vertical travel in pixels. The span must strictly exceed
    /// this value.
    pub min_y_span: f64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            min_members: 2,
            min_y_span: 10.0,
        }
    }
}

/// Summary of one qualifying track.
#[derive(Debug, Clone, Copy)]
pub struct TrackSummary {
    pub track_id: u32,
    /// Source id of the first detection linked into the track.
    pub first_detection_id: i64,
    pub member_count: usize,
    /// Mean elapsed time over the members, seconds.
    pub avg_time: f64,
    /// Mean center x over the members, pixels.
    pub avg_x: f64,
    /// Mean instrument diameter over the members, um.
    pub avg_diameter: f64,
    /// Fitted sedimentation velocity (center-y vs time).
    pub fit: LineFit,
    pub min_y: f64,
    pub max_y: f64,
}

impl TrackSummary {
    /// Vertical travel of the track in pixels.
    #[inline]
    pub fn y_span(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Aggregation result for a whole run.
///
/// `tracks_opened` is the highest track id the linker issued; the particle
/// count for 100% counting is [`AggregateReport::qualifying_count`], which
/// is smaller whenever any track failed qualification.
#[derive(Debug, Clone)]
pub struct AggregateReport {
    pub summaries: Vec<TrackSummary>,
    pub tracks_opened: u32,
}

impl AggregateReport {
    /// Number of tracks that passed qualification.
    #[inline]
    pub fn qualifying_count(&self) -> usize {
        self.summaries.len()
    }
}

/// Summarize every qualifying track.
///
/// Walks track ids 1 through the highest issued; a track qualifies when it
/// has at least `min_members` detections spread over strictly more than
/// `min_y_span` pixels of vertical travel. Non-qualifying tracks consume
/// their id but produce no summary.
pub fn summarize_tracks(
    detections: &[Detection],
    assignments: &TrackAssignments,
    config: &SummaryConfig,
) -> AggregateReport {
    let mut summaries = Vec::new();

    for track_id in 1..=assignments.tracks_opened() {
        let members: Vec<&Detection> = assignments
            .members(track_id)
            .map(|seq| &detections[seq])
            .collect();
        if members.len() < config.min_members {
            continue;
        }

        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut dia_sum = 0.0;
        let mut x_sum = 0.0;
        let mut time_sum = 0.0;
        for det in &members {
            dia_sum += det.diameter;
            x_sum += det.center_x;
            time_sum += det.elapsed_time;
            min_y = min_y.min(det.center_y);
            max_y = max_y.max(det.center_y);
        }
        if max_y - min_y <= config.min_y_span {
            continue;
        }

        let times: Vec<f64> = members.iter().map(|d| d.elapsed_time).collect();
        let ys: Vec<f64> = members.iter().map(|d| d.center_y).collect();
        let count = members.len() as f64;

        summaries.push(TrackSummary {
            track_id,
            first_detection_id: members[0].source_id,
            member_count: members.len(),
            avg_time: time_sum / count,
            avg_x: x_sum / count,
            avg_diameter: dia_sum / count,
            fit: fit_line(&times, &ys),
            min_y,
            max_y,
        });
    }

    AggregateReport {
        summaries,
        tracks_opened: assignments.tracks_opened(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linker::{Gate, TrackLinker};

    fn det(seq: usize, x: f64, y: f64, dia: f64, t: f64) -> Detection {
        Detection {
            seq,
            source_id: seq as i64 + 1000,
            area: 1.0,
            corner_x: x,
            corner_y: y,
            diameter: dia,
            elapsed_time: t,
            center_x: x,
            center_y: y,
            abd_diameter: dia,
        }
    }

    fn link(dets: &[Detection]) -> TrackAssignments {
        TrackLinker::new(Gate::new(2.0, 5.0, 100.0, 0.2)).link(dets)
    }

    #[test]
    fn test_empty_run() {
        let assignments = link(&[]);
        let report = summarize_tracks(&[], &assignments, &SummaryConfig::default());
        assert_eq!(report.qualifying_count(), 0);
        assert_eq!(report.tracks_opened, 0);
    }

    #[test]
    fn test_singletons_never_qualify() {
        let dets: Vec<Detection> = (0..3)
            .map(|i| det(i, i as f64 * 300.0, 100.0, 5.0, i as f64 * 0.1))
            .collect();
        let assignments = link(&dets);
        assert_eq!(assignments.tracks_opened(), 3);
        let report = summarize_tracks(&dets, &assignments, &SummaryConfig::default());
        assert_eq!(report.qualifying_count(), 0);
        assert!(report.tracks_opened > report.qualifying_count() as u32);
    }

    #[test]
    fn test_span_threshold_is_strict() {
        // Two members exactly min_y_span apart must not qualify.
        let dets = vec![det(0, 10.0, 100.0, 5.0, 0.0), det(1, 10.0, 110.0, 5.0, 1.0)];
        let assignments = link(&dets);
        assert_eq!(assignments.tracks_opened(), 1);
        let report = summarize_tracks(&dets, &assignments, &SummaryConfig::default());
        assert_eq!(report.qualifying_count(), 0);
    }

    #[test]
    fn test_qualifying_track_fields() {
        let dets = vec![
            det(0, 10.0, 100.0, 5.0, 0.0),
            det(1, 12.0, 150.0, 5.0, 1.0),
            det(2, 14.0, 200.0, 5.0, 2.0),
        ];
        let assignments = link(&dets);
        let report = summarize_tracks(&dets, &assignments, &SummaryConfig::default());
        assert_eq!(report.qualifying_count(), 1);

        let s = &report.summaries[0];
        assert_eq!(s.track_id, 1);
        assert_eq!(s.first_detection_id, 1000);
        assert_eq!(s.member_count, 3);
        assert!((s.avg_time - 1.0).abs() < 1e-12);
        assert!((s.avg_x - 12.0).abs() < 1e-12);
        assert!((s.avg_diameter - 5.0).abs() < 1e-12);
        assert!((s.y_span() - 100.0).abs() < 1e-12);
        assert!((s.fit.slope() - 50.0).abs() < 1e-9);
        assert!(s.fit.rms() < 1e-9);
    }

    #[test]
    fn test_qualifying_count_below_tracks_opened() {
        // Track 1: three members falling 50px/s. Track 2: two members with
        // only 5px of travel, which fails the span gate.
        let dets = vec![
            det(0, 10.0, 100.0, 5.0, 0.0),
            det(1, 10.0, 150.0, 5.0, 1.0),
            det(2, 10.0, 200.0, 5.0, 2.0),
            det(3, 10.0, 205.0, 5.0, 5.0),
            det(4, 10.0, 210.0, 5.0, 6.0),
        ];
        let assignments = link(&dets);
        assert_eq!(assignments.tracks_opened(), 2);
        let report = summarize_tracks(&dets, &assignments, &SummaryConfig::default());
        assert_eq!(report.qualifying_count(), 1);
        assert_eq!(report.summaries[0].track_id, 1);
    }
}
