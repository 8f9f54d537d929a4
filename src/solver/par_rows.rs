use crate::grid::Grid;
use crate::params::{ParameterError, SolverParameters};
use crate::solver::{run_time_loop, validate_inputs, SolverInterface};
use crate::stencil::five_point;
use rayon::prelude::*;

/// The nested-loop update with interior rows split into rayon tasks.
///
/// Each task owns `chunk_rows` contiguous output rows; the implicit join
/// at the end of the parallel iterator sits before the buffer swap.
pub struct ParRowsSolver {
    chunk_rows: usize,
}

impl ParRowsSolver {
    pub fn new(chunk_rows: usize) -> Self {
        ParRowsSolver {
            chunk_rows: chunk_rows.max(1),
        }
    }
}

impl SolverInterface for ParRowsSolver {
    fn name(&self) -> &'static str {
        "par rows"
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
        let chunk_rows = self.chunk_rows;
        let end_time = run_time_loop(params, u, f, verbose, |src, dst, source| {
            profiling::scope!("par_rows: step");
            let interior = &mut dst[n..(m - 1) * n];
            interior
                .par_chunks_mut(chunk_rows * n)
                .enumerate()
                .for_each(|(band, band_rows)| {
                    profiling::scope!("par_rows: band callback");
                    let first_row = 1 + band * chunk_rows;
                    for (k, row) in band_rows.chunks_mut(n).enumerate() {
                        let base = (first_row + k) * n;
                        for j in 1..n - 1 {
                            row[j] = five_point(
                                src[base - n + j],
                                src[base + j - 1],
                                src[base + j],
                                src[base + j + 1],
                                src[base + n + j],
                                source[base + j],
                                dt,
                                nu,
                            );
                        }
                    }
                });
        });
        Ok(end_time)
    }
}
