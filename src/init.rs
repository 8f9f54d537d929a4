//! Field initialization
//!
//! Utilities for common initial conditions.
//! Use `Grid::par_set_values` for custom needs.

use crate::grid::Grid;
use rand::prelude::*;
use rayon::prelude::*;

/// Random fill, one rng per chunk.
pub fn rand_ic(grid: &mut Grid, max_val: i32, chunk_size: usize) {
    grid.buffer_mut()
        .par_chunks_mut(chunk_size)
        .for_each(|chunk: &mut [f64]| {
            let mut rng = rand::thread_rng();
            for value_mut in chunk {
                *value_mut = (rng.gen::<i32>() % max_val) as f64;
            }
        });
}

/// Generate normal like distribution with a spike in the middle,
/// all values are in [0, 1].
pub fn normal_ic(grid: &mut Grid, chunk_size: usize) {
    let width_f = grid.cols() as f64;
    let height_f = grid.rows() as f64;
    let sigma_sq: f64 = (width_f / 25.0) * (width_f / 25.0);
    let ic_gen = move |row: usize, col: usize| {
        let x = (col as f64) - (width_f / 2.0);
        let y = (row as f64) - (height_f / 2.0);
        let r = (x * x + y * y).sqrt();
        let exp = -r * r / (2.0 * sigma_sq);
        exp.exp()
    };
    grid.par_set_values(ic_gen, chunk_size);
}
