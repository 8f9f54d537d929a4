use thiserror::Error;

/// Configuration rejected before any grid is touched.
#[derive(Debug, Error)]
pub enum ParameterError {
    /// The stencil needs at least one interior point in each dimension.
    #[error("grid of {m}x{n} is too small for an interior update")]
    GridTooSmall { m: usize, n: usize },

    #[error("time step must be positive, got {dt}")]
    NonPositiveTimeStep { dt: f64 },

    #[error("end time {t1} must be after start time {t0}")]
    InvalidTimeRange { t0: f64, t1: f64 },

    #[error("expected a {expected_m}x{expected_n} grid, got {actual_m}x{actual_n}")]
    ShapeMismatch {
        expected_m: usize,
        expected_n: usize,
        actual_m: usize,
        actual_n: usize,
    },
}

/// Time range, step size, grid shape, and diffusivity for one solve.
///
/// No stability check is made. Divergence under large `nu * dt` is the
/// caller's responsibility.
#[derive(Clone, Copy, Debug)]
pub struct SolverParameters {
    pub t0: f64,
    pub t1: f64,
    pub dt: f64,

    /// Grid width, columns.
    pub n: usize,

    /// Grid height, rows.
    pub m: usize,

    pub nu: f64,
}

impl SolverParameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.t1 <= self.t0 {
            return Err(ParameterError::InvalidTimeRange {
                t0: self.t0,
                t1: self.t1,
            });
        }
        if self.dt <= 0.0 {
            return Err(ParameterError::NonPositiveTimeStep { dt: self.dt });
        }
        if self.m < 3 || self.n < 3 {
            return Err(ParameterError::GridTooSmall {
                m: self.m,
                n: self.n,
            });
        }
        Ok(())
    }

    /// Number of steps to the nearest multiple of `dt`.
    pub fn num_steps(&self) -> usize {
        ((self.t1 - self.t0) / self.dt).round() as usize
    }

    /// The time actually reached, `t0 + num_steps * dt`.
    /// Differs from the requested `t1` when `t1 - t0` is not a multiple
    /// of `dt`.
    pub fn end_time(&self) -> f64 {
        self.t0 + self.num_steps() as f64 * self.dt
    }

    pub fn check_shape(&self, shape: (usize, usize)) -> Result<(), ParameterError> {
        if shape != (self.m, self.n) {
            return Err(ParameterError::ShapeMismatch {
                expected_m: self.m,
                expected_n: self.n,
                actual_m: shape.0,
                actual_n: shape.1,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn validate_test() {
        let good = SolverParameters {
            t0: 0.0,
            t1: 10.0,
            dt: 0.1,
            n: 50,
            m: 100,
            nu: 1.0,
        };
        assert!(good.validate().is_ok());

        let bad_range = SolverParameters { t1: 0.0, ..good };
        assert!(matches!(
            bad_range.validate(),
            Err(ParameterError::InvalidTimeRange { .. })
        ));

        let bad_dt = SolverParameters { dt: 0.0, ..good };
        assert!(matches!(
            bad_dt.validate(),
            Err(ParameterError::NonPositiveTimeStep { .. })
        ));

        let bad_grid = SolverParameters { n: 2, ..good };
        assert!(matches!(
            bad_grid.validate(),
            Err(ParameterError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn step_count_test() {
        let params = SolverParameters {
            t0: 0.0,
            t1: 1000.0,
            dt: 0.1,
            n: 50,
            m: 100,
            nu: 1.0,
        };
        assert_eq!(params.num_steps(), 10000);
        assert_approx_eq!(f64, params.end_time(), 1000.0);
    }

    #[test]
    fn end_time_rounds_to_step_multiple() {
        let params = SolverParameters {
            t0: 0.0,
            t1: 1.0,
            dt: 0.3,
            n: 10,
            m: 10,
            nu: 1.0,
        };
        assert_eq!(params.num_steps(), 3);
        assert_approx_eq!(f64, params.end_time(), 0.9, epsilon = 1e-12);
        assert!(params.end_time() < params.t1);
    }

    #[test]
    fn check_shape_test() {
        let params = SolverParameters {
            t0: 0.0,
            t1: 1.0,
            dt: 0.1,
            n: 6,
            m: 4,
            nu: 1.0,
        };
        assert!(params.check_shape((4, 6)).is_ok());
        assert!(matches!(
            params.check_shape((6, 4)),
            Err(ParameterError::ShapeMismatch { .. })
        ));
    }
}
