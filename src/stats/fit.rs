//! Linear fit of vertical position against elapsed time.

/// Slope reported for tracks whose fit is degenerate. Kept numerically
/// identical to the values earlier reports used, so downstream consumers can
/// still recognize degenerate tracks by magnitude.
pub const DEGENERATE_SLOPE: f64 = 1e9;
/// Residual value paired with [`DEGENERATE_SLOPE`].
pub const DEGENERATE_RMS: f64 = 1e10;

/// Outcome of fitting center-y as a linear function of elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineFit {
    /// A usable fit: sedimentation slope in pixels per second and the RMS
    /// deviation of the members from the fitted line.
    Regressed { slope: f64, rms: f64 },
    /// The member times carry no spread, so no slope exists.
    Degenerate,
}

impl LineFit {
    /// Slope, with the compatibility sentinel for degenerate fits.
    #[inline]
    pub fn slope(&self) -> f64 {
        match self {
            LineFit::Regressed { slope, .. } => *slope,
            LineFit::Degenerate => DEGENERATE_SLOPE,
        }
    }

    /// Residual RMS, with the compatibility sentinel for degenerate fits.
    #[inline]
    pub fn rms(&self) -> f64 {
        match self {
            LineFit::Regressed { rms, .. } => *rms,
            LineFit::Degenerate => DEGENERATE_RMS,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, LineFit::Degenerate)
    }
}

/// Fit a line y = a + b*t over paired samples.
///
/// Two points with distinct times give the exact two-point slope with zero
/// residual; two points at the same instant are degenerate. Three or more
/// points go through ordinary least squares, which is likewise degenerate
/// when every timestamp coincides.
///
/// Callers guarantee `times.len() == ys.len()`; fewer than two samples is
/// degenerate by definition.
pub fn fit_line(times: &[f64], ys: &[f64]) -> LineFit {
    debug_assert_eq!(times.len(), ys.len());

    if times.len() < 2 {
        return LineFit::Degenerate;
    }
    if times.len() == 2 {
        let dt = times[1] - times[0];
        if dt == 0.0 {
            return LineFit::Degenerate;
        }
        return LineFit::Regressed {
            slope: (ys[1] - ys[0]) / dt,
            rms: 0.0,
        };
    }

    let n = times.len() as f64;
    let mean_t = times.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut var_t = 0.0;
    let mut cov_ty = 0.0;
    for (&t, &y) in times.iter().zip(ys) {
        var_t += (t - mean_t) * (t - mean_t);
        cov_ty += (t - mean_t) * (y - mean_y);
    }
    if var_t == 0.0 {
        return LineFit::Degenerate;
    }

    let slope = cov_ty / var_t;
    let intercept = mean_y - slope * mean_t;
    let ss_res: f64 = times
        .iter()
        .zip(ys)
        .map(|(&t, &y)| {
            let r = y - (intercept + slope * t);
            r * r
        })
        .sum();
    LineFit::Regressed {
        slope,
        rms: (ss_res / n).sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_point_exact() {
        let fit = fit_line(&[0.0, 2.0], &[100.0, 200.0]);
        assert_eq!(fit.slope(), 50.0);
        assert_eq!(fit.rms(), 0.0);
    }

    #[test]
    fn test_two_point_degenerate_sentinels() {
        let fit = fit_line(&[5.0, 5.0], &[100.0, 150.0]);
        assert!(fit.is_degenerate());
        assert_eq!(fit.slope(), 1e9);
        assert_eq!(fit.rms(), 1e10);
    }

    #[test]
    fn test_three_point_perfect_line() {
        let fit = fit_line(&[0.0, 1.0, 2.0], &[100.0, 150.0, 200.0]);
        assert!((fit.slope() - 50.0).abs() < 1e-9);
        assert!(fit.rms() < 1e-9);
    }

    #[test]
    fn test_regression_with_scatter() {
        // y = 10t + noise {-1, +1, 0, -1, +1}
        let times = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [-1.0, 11.0, 20.0, 29.0, 41.0];
        let fit = fit_line(&times, &ys);
        let slope = fit.slope();
        assert!((slope - 10.0).abs() < 1.0, "slope was {slope}");
        assert!(fit.rms() > 0.0);
    }

    #[test]
    fn test_coincident_times_many_points() {
        let fit = fit_line(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]);
        assert!(fit.is_degenerate());
    }
}
