mod fit;
mod summary;

pub use fit::{DEGENERATE_RMS, DEGENERATE_SLOPE, LineFit, fit_line};
pub use summary::{AggregateReport, SummaryConfig, TrackSummary, summarize_tracks};
