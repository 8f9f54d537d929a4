use num_traits::Num;
use rayon::prelude::*;

pub trait NumTrait: Num + Copy + Send + Sync {}
impl<T: Num + Copy + Send + Sync> NumTrait for T {}

/// Row-major 2D field buffer.
#[derive(Clone, Debug)]
pub struct Grid<T = f64> {
    rows: usize,
    cols: usize,
    buffer: Vec<T>,
}

impl<T: NumTrait> Grid<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Grid::full(rows, cols, T::zero())
    }

    pub fn full(rows: usize, cols: usize, value: T) -> Self {
        Grid {
            rows,
            cols,
            buffer: vec![value; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.buffer[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.buffer[row * self.cols + col] = value;
    }

    pub fn buffer(&self) -> &[T] {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.buffer[row * self.cols..(row + 1) * self.cols]
    }

    /// Sets each element to the same value.
    /// `chunk_size` breaks the work into tasks for multi-threading.
    pub fn par_fill(&mut self, value: T, chunk_size: usize) {
        self.buffer
            .par_chunks_mut(chunk_size)
            .for_each(|chunk: &mut [T]| {
                for v in chunk {
                    *v = value;
                }
            });
    }

    /// Sets each cell from its `(row, col)` coordinate.
    pub fn par_set_values<F: Fn(usize, usize) -> T + Send + Sync>(
        &mut self,
        f: F,
        chunk_size: usize,
    ) {
        let cols = self.cols;
        self.buffer
            .par_chunks_mut(chunk_size)
            .enumerate()
            .for_each(|(chunk_index, chunk)| {
                let offset = chunk_index * chunk_size;
                for (k, value_mut) in chunk.iter_mut().enumerate() {
                    let linear = offset + k;
                    *value_mut = f(linear / cols, linear % cols);
                }
            });
    }
}

impl Grid<f64> {
    pub fn max_value(&self) -> f64 {
        self.buffer
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
