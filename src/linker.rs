mod detection;
mod gate;
mod track_linker;

pub use detection::Detection;
pub use gate::{Gate, LowerYBound};
pub use track_linker::{TrackAssignments, TrackLinker};
