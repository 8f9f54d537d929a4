pub mod naive;
pub mod par_rows;
pub mod slices;
pub mod team;

pub use naive::*;
pub use par_rows::*;
pub use slices::*;
pub use team::*;

use crate::grid::Grid;
use crate::params::{ParameterError, SolverParameters};
use clap::ValueEnum;

/// All solvers implement this interface.
///
/// Strategies differ only in how they execute the update; for the same
/// inputs they produce the same field.
pub trait SolverInterface {
    fn name(&self) -> &'static str;

    /// Advance `u` to the end time, reading the source term from `f`.
    /// Returns the time actually reached.
    fn solve(
        &self,
        params: &SolverParameters,
        u: &mut Grid,
        f: &Grid,
        verbose: bool,
    ) -> Result<f64, ParameterError>;
}

/// Execution strategy selector for the solver binary.
#[derive(Copy, Clone, Debug, ValueEnum, Default)]
pub enum Strategy {
    /// Whole-row slice iterators
    Slices,

    /// Nested loops over interior indices
    #[default]
    Naive,

    /// Rayon tasks over row bands
    ParRows,

    /// Persistent worker team with barriers
    Team,
}

impl Strategy {
    pub fn solver(&self, threads: usize, chunk_rows: usize) -> Box<dyn SolverInterface> {
        match self {
            Strategy::Slices => Box::new(SlicesSolver::new()),
            Strategy::Naive => Box::new(NaiveSolver::new()),
            Strategy::ParRows => Box::new(ParRowsSolver::new(chunk_rows)),
            Strategy::Team => Box::new(TeamSolver::new(threads)),
        }
    }
}

/// Every in-process strategy, in the order the benchmark reports them.
pub fn registry(threads: usize, chunk_rows: usize) -> Vec<Box<dyn SolverInterface>> {
    vec![
        Box::new(SlicesSolver::new()),
        Box::new(NaiveSolver::new()),
        Box::new(ParRowsSolver::new(chunk_rows)),
        Box::new(TeamSolver::new(threads)),
    ]
}

pub(crate) fn validate_inputs(
    params: &SolverParameters,
    u: &Grid,
    f: &Grid,
) -> Result<(), ParameterError> {
    params.validate()?;
    params.check_shape(u.shape())?;
    params.check_shape(f.shape())
}

// stderr since it's unbuffered
pub(crate) fn report_progress(t0: f64, dt: f64, it: usize, num_steps: usize) {
    eprint!(
        "\rt = {:6.0} ({:3.0}%)",
        t0 + it as f64 * dt,
        it as f64 * 1E2 / num_steps as f64
    );
}

/// Shared time loop for the single-buffer-pair strategies.
///
/// `step` reads the whole previous field and writes the interior of the
/// next one. The two buffers swap roles each iteration; the caller's grid
/// always holds the final field on return.
pub(crate) fn run_time_loop<StepFn>(
    params: &SolverParameters,
    u: &mut Grid,
    f: &Grid,
    verbose: bool,
    mut step: StepFn,
) -> f64
where
    StepFn: FnMut(&[f64], &mut [f64], &[f64]),
{
    let num_steps = params.num_steps();
    if num_steps == 0 {
        return params.end_time();
    }

    // Borders are never written, the scratch clone carries them.
    let mut scratch = u.clone();
    let progress_interval = (num_steps / 100).max(1);
    let mut result_in_scratch = false;
    {
        let mut current: &mut [f64] = u.buffer_mut();
        let mut next: &mut [f64] = scratch.buffer_mut();
        for it in 1..=num_steps {
            step(&*current, &mut *next, f.buffer());
            std::mem::swap(&mut current, &mut next);
            result_in_scratch = !result_in_scratch;
            if verbose && it % progress_interval == 0 {
                report_progress(params.t0, params.dt, it, num_steps);
            }
        }
    }
    if result_in_scratch {
        u.buffer_mut().copy_from_slice(scratch.buffer());
    }
    if verbose {
        eprintln!();
    }
    params.end_time()
}
