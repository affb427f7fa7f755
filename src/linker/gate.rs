//! Gating predicate deciding whether a candidate detection can extend a track.

use crate::linker::Detection;

/// Source of the lower bound on the allowed upward y step.
///
/// The vertical gate is `lower < dy < max_delta_y`. Prior analysis runs
/// reused the *horizontal* threshold for the lower bound; whether that
/// asymmetry is intended is unresolved, so both behaviors are selectable.
/// [`LowerYBound::FromDeltaX`] keeps reports comparable with earlier ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LowerYBound {
    /// Lower bound is `-max_delta_x`.
    #[default]
    FromDeltaX,
    /// Lower bound is `-max_delta_y` (symmetric in y).
    FromDeltaY,
}

/// Gating thresholds for extending a track from its current anchor.
#[derive(Debug, Clone, Copy)]
pub struct Gate {
    /// Look-ahead window in seconds: candidates whose elapsed time exceeds
    /// the anchor's by more than this are out of reach.
    pub time_seek: f64,
    /// Maximum allowed |dx| between candidate and anchor centers, pixels.
    pub max_delta_x: f64,
    /// Maximum allowed downward dy between candidate and anchor, pixels.
    pub max_delta_y: f64,
    /// Fractional diameter tolerance: the ratio candidate/anchor must lie
    /// strictly inside (1 - tol, 1 + tol).
    pub diameter_tolerance: f64,
    /// Which threshold supplies the lower bound on dy.
    pub lower_y_bound: LowerYBound,
}

impl Gate {
    pub fn new(time_seek: f64, max_delta_x: f64, max_delta_y: f64, diameter_tolerance: f64) -> Self {
        Self {
            time_seek,
            max_delta_x,
            max_delta_y,
            diameter_tolerance,
            lower_y_bound: LowerYBound::default(),
        }
    }

    /// Select the lower-bound behavior for the vertical gate.
    pub fn with_lower_y_bound(mut self, bound: LowerYBound) -> Self {
        self.lower_y_bound = bound;
        self
    }

    /// True if `candidate` is still inside the look-ahead window opened at
    /// `anchor`.
    #[inline]
    pub fn in_window(&self, anchor: &Detection, candidate: &Detection) -> bool {
        candidate.elapsed_time <= anchor.elapsed_time + self.time_seek
    }

    /// Position/size gate: all three criteria must hold for `candidate` to
    /// extend a track anchored at `anchor`. Strict inequalities throughout.
    pub fn accepts(&self, anchor: &Detection, candidate: &Detection) -> bool {
        let dx = candidate.center_x - anchor.center_x;
        if dx.abs() >= self.max_delta_x {
            return false;
        }
        let ratio = candidate.diameter / anchor.diameter;
        if ratio >= 1.0 + self.diameter_tolerance || ratio <= 1.0 - self.diameter_tolerance {
            return false;
        }
        let dy = candidate.center_y - anchor.center_y;
        let lower = match self.lower_y_bound {
            LowerYBound::FromDeltaX => -self.max_delta_x,
            LowerYBound::FromDeltaY => -self.max_delta_y,
        };
        dy > lower && dy < self.max_delta_y
    }
}
