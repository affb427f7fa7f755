//! End-to-end pipeline combining the band filter, linker and aggregator.

use crate::linker::{Detection, Gate, TrackAssignments, TrackLinker};
use crate::pipeline::{BandFilter, RawRecord};
use crate::stats::{AggregateReport, SummaryConfig, summarize_tracks};

/// Everything one run produces, kept separate so the report writer and the
/// optional detection dump can each consume the stage they need.
#[derive(Debug)]
pub struct RunOutput {
    pub detections: Vec<Detection>,
    pub assignments: TrackAssignments,
    pub report: AggregateReport,
}

/// Bundles the three stages of an analysis run.
///
/// Data flows one way: filter, then linker, then aggregator. Each run is
/// independent; the pipeline holds configuration only, no per-run state.
#[derive(Debug, Clone)]
pub struct TrackingPipeline {
    filter: BandFilter,
    linker: TrackLinker,
    summary: SummaryConfig,
}

impl TrackingPipeline {
    pub fn new(filter: BandFilter, gate: Gate, summary: SummaryConfig) -> Self {
        Self {
            filter,
            linker: TrackLinker::new(gate),
            summary,
        }
    }

    /// Run the full analysis over raw instrument records.
    ///
    /// Records must already be sorted by non-decreasing elapsed time.
    pub fn run(&self, records: &[RawRecord]) -> RunOutput {
        let detections = self.filter.filter(records);
        let assignments = self.linker.link(&detections);
        let report = summarize_tracks(&detections, &assignments, &self.summary);
        RunOutput {
            detections,
            assignments,
            report,
        }
    }

    pub fn gate(&self) -> &Gate {
        self.linker.gate()
    }

    pub fn filter(&self) -> &BandFilter {
        &self.filter
    }

    pub fn summary_config(&self) -> &SummaryConfig {
        &self.summary
    }
}
