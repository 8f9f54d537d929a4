pub mod external;

pub use external::*;

use crate::grid::Grid;
use crate::params::{ParameterError, SolverParameters};
use crate::solver::SolverInterface;
use std::fmt;
use std::time::Instant;
use thiserror::Error;

/// Benchmark failures are terminal; nothing is retried.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("build failed with {status}")]
    BuildFailed { status: std::process::ExitStatus },

    #[error("{name} exited with {status}")]
    ProgramFailed {
        name: String,
        status: std::process::ExitStatus,
    },

    /// The spawned program never printed its timing line.
    #[error("no timing line in output: {output:?}")]
    MissingTiming { output: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parameters(#[from] ParameterError),
}

/// One concrete benchmark configuration: solver parameters plus the
/// constants the initial and source grids are filled with.
#[derive(Clone, Copy, Debug)]
pub struct ParameterSet {
    pub params: SolverParameters,
    pub u_const: f64,
    pub f_const: f64,
}

impl ParameterSet {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        t0: f64,
        t1: f64,
        dt: f64,
        n: usize,
        m: usize,
        u_const: f64,
        f_const: f64,
        nu: f64,
    ) -> Self {
        ParameterSet {
            params: SolverParameters {
                t0,
                t1,
                dt,
                n,
                m,
                nu,
            },
            u_const,
            f_const,
        }
    }

    /// Fresh initial and source grids for one trial.
    pub fn grids(&self) -> (Grid, Grid) {
        (
            Grid::full(self.params.m, self.params.n, self.u_const),
            Grid::full(self.params.m, self.params.n, self.f_const),
        )
    }

    /// Positional arguments for the external program, in the fixed order
    /// `(t0, t1, dt, n, m, u_const, f_const, nu)`.
    pub fn command_args(&self) -> Vec<String> {
        vec![
            self.params.t0.to_string(),
            self.params.t1.to_string(),
            self.params.dt.to_string(),
            self.params.n.to_string(),
            self.params.m.to_string(),
            self.u_const.to_string(),
            self.f_const.to_string(),
            self.params.nu.to_string(),
        ]
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}, {}, {}, {}, {}]",
            self.params.t0,
            self.params.t1,
            self.params.dt,
            self.params.n,
            self.params.m,
            self.u_const,
            self.f_const,
            self.params.nu
        )
    }
}

/// The parameter matrix the original speed competition ran.
pub fn default_parameter_sets() -> Vec<ParameterSet> {
    vec![
        ParameterSet::new(0.0, 1000.0, 0.1, 50, 100, 0.0, 1.0, 1.0),
        ParameterSet::new(0.0, 5000.0, 0.1, 100, 200, 0.0, 1.0, 1.0),
    ]
}

/// Small matrix for smoke runs.
pub fn quick_parameter_sets() -> Vec<ParameterSet> {
    vec![ParameterSet::new(0.0, 10.0, 0.1, 50, 100, 0.0, 1.0, 1.0)]
}

/// implementation x parameter set x repetition table of elapsed seconds.
pub struct PerfMatrix {
    durations: Vec<f64>,
    sets: usize,
    repetitions: usize,
}

impl PerfMatrix {
    pub fn new(implementations: usize, sets: usize, repetitions: usize) -> Self {
        PerfMatrix {
            durations: vec![0.0; implementations * sets * repetitions],
            sets,
            repetitions,
        }
    }

    pub fn record(
        &mut self,
        implementation: usize,
        set: usize,
        repetition: usize,
        seconds: f64,
    ) {
        let index = (implementation * self.sets + set) * self.repetitions + repetition;
        self.durations[index] = seconds;
    }

    /// Minimum over repetitions. Optimistic, but least sensitive to
    /// scheduling jitter.
    pub fn min_time(&self, implementation: usize, set: usize) -> f64 {
        let start = (implementation * self.sets + set) * self.repetitions;
        self.durations[start..start + self.repetitions]
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min)
    }

    /// Fastest implementation for the set, the index point for relative
    /// times.
    pub fn global_min(&self, set: usize) -> f64 {
        (0..self.implementations())
            .map(|implementation| self.min_time(implementation, set))
            .fold(f64::INFINITY, f64::min)
    }

    fn implementations(&self) -> usize {
        self.durations.len() / (self.sets * self.repetitions)
    }
}

/// Anything the benchmark can time for one trial.
pub trait Implementation {
    fn name(&self) -> &str;

    fn run_trial(&mut self, set: &ParameterSet) -> Result<f64, BenchError>;
}

/// In-process solver timed around the solve call.
pub struct InProcess {
    solver: Box<dyn SolverInterface>,
}

impl InProcess {
    pub fn new(solver: Box<dyn SolverInterface>) -> Self {
        InProcess { solver }
    }
}

impl Implementation for InProcess {
    fn name(&self) -> &str {
        self.solver.name()
    }

    fn run_trial(&mut self, set: &ParameterSet) -> Result<f64, BenchError> {
        let (mut u, f) = set.grids();
        let pre = Instant::now();
        self.solver.solve(&set.params, &mut u, &f, false)?;
        Ok(pre.elapsed().as_secs_f64())
    }
}

/// Run every trial, strictly in sequence, and collect the timing table.
pub fn run_benchmark(
    implementations: &mut [Box<dyn Implementation>],
    sets: &[ParameterSet],
    repetitions: usize,
) -> Result<PerfMatrix, BenchError> {
    let mut perf = PerfMatrix::new(implementations.len(), sets.len(), repetitions);
    for (i, implementation) in implementations.iter_mut().enumerate() {
        println!("\nBenchmarking {}", implementation.name());
        for (j, set) in sets.iter().enumerate() {
            println!("  Running parameter set #{}", j + 1);
            for rep in 0..repetitions {
                let seconds = implementation.run_trial(set)?;
                perf.record(i, j, rep, seconds);
            }
        }
    }
    Ok(perf)
}

/// Per parameter set: absolute minimum and time relative to the fastest
/// implementation, rows in declaration order.
pub fn print_report(
    implementations: &[Box<dyn Implementation>],
    sets: &[ParameterSet],
    perf: &PerfMatrix,
) {
    for (j, set) in sets.iter().enumerate() {
        println!("\nResults for parameter set #{}: {}", j + 1, set);
        println!(
            "{:<25}  {:>10}  {:>10}",
            "implementation", "abs. time", "rel. time"
        );
        println!("{}", "-".repeat(49));
        let index_point = perf.global_min(j);
        for (i, implementation) in implementations.iter().enumerate() {
            let time = perf.min_time(i, j);
            println!(
                "{:<25}  {:>10.3}  {:>10.2}",
                implementation.name(),
                time,
                time / index_point
            );
        }
        println!();
    }
}
