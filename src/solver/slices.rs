use crate::grid::Grid;
use crate::params::{ParameterError, SolverParameters};
use crate::solver::{run_time_loop, validate_inputs, SolverInterface};
use crate::stencil::five_point;

/// Whole-row update built from zipped slice iterators.
pub struct SlicesSolver;

impl SlicesSolver {
    pub fn new() -> Self {
        SlicesSolver
    }
}

impl SolverInterface for SlicesSolver {
    fn name(&self) -> &'static str {
        "slices"
    }

    fn solve(
        &self,
        params: &SolverParameters,
        u: &mut Grid,
        f: &Grid,
        verbose: bool,
    ) -> Result<f64, ParameterError> {
        validate_inputs(params, u, f)?;
        let n = params.n;
        let m = params.m;
        let dt = params.dt;
        let nu = params.nu;
        let end_time = run_time_loop(params, u, f, verbose, |src, dst, source| {
            profiling::scope!("slices: step");
            for i in 1..m - 1 {
                let base = i * n;
                let above = &src[base - n..base];
                let center = &src[base..base + n];
                let below = &src[base + n..base + 2 * n];
                let row_source = &source[base..base + n];
                let row_out = &mut dst[base + 1..base + n - 1];
                let zipped = row_out
                    .iter_mut()
                    .zip(center.windows(3))
                    .zip(above[1..n - 1].iter().zip(below[1..n - 1].iter()))
                    .zip(row_source[1..n - 1].iter());
                for (((out, window), (&up, &down)), &heat) in zipped {
                    let left = window[0];
                    let middle = window[1];
                    let right = window[2];
                    *out = five_point(up, left, middle, right, down, heat, dt, nu);
                }
            }
        });
        Ok(end_time)
    }
}
