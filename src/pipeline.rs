//! Boundary plumbing around the core: reading instrument exports, the
//! vertical band filter, the report writer and the end-to-end run.

mod filter;
mod record;
mod report;
mod run;

pub use filter::BandFilter;
pub use record::{PipelineError, RawRecord, read_records};
pub use report::{write_detection_dump, write_report};
pub use run::{RunOutput, TrackingPipeline};
