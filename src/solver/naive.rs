use crate::grid::Grid;
use crate::params::{ParameterError, SolverParameters};
use crate::solver::{run_time_loop, validate_inputs, SolverInterface};
use crate::stencil::five_point;

/// Nested loops over the interior linear indices.
pub struct NaiveSolver;

impl NaiveSolver {
    pub fn new() -> Self {
        NaiveSolver
    }
}

impl SolverInterface for NaiveSolver {
    fn name(&self) -> &'static str {
        "naive"
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
            profiling::scope!("naive: step");
            for i in 1..m - 1 {
                for j in 1..n - 1 {
                    let idx = i * n + j;
                    dst[idx] = five_point(
                        src[idx - n],
                        src[idx - 1],
                        src[idx],
                        src[idx + 1],
                        src[idx + n],
                        source[idx],
                        dt,
                        nu,
                    );
                }
            }
        });
        Ok(end_time)
    }
}
