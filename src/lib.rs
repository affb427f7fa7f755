//! Track linking and sedimentation statistics for flow imaging data.
//!
//! Per-frame particle detections are linked across time into tracks by a
//! greedy, windowed, gated sequential matcher; each qualifying track is then
//! summarized with position/size averages and a fitted sedimentation
//! velocity. The qualifying-track count is the corrected particle number for
//! 100% counting, which is deliberately distinct from the number of track
//! ids issued.

pub mod linker;
pub mod pipeline;
pub mod stats;

pub use linker::{Detection, Gate, LowerYBound, TrackAssignments, TrackLinker};
pub use pipeline::{
    BandFilter, PipelineError, RawRecord, RunOutput, TrackingPipeline, read_records,
    write_detection_dump, write_report,
};
pub use stats::{
    AggregateReport, DEGENERATE_RMS, DEGENERATE_SLOPE, LineFit, SummaryConfig, TrackSummary,
    fit_line, summarize_tracks,
};
