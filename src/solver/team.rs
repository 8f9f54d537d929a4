use crate::grid::Grid;
use crate::params::{ParameterError, SolverParameters};
use crate::solver::{report_progress, validate_inputs, SolverInterface};
use crate::stencil::five_point;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;
use sync_ptr::SyncConstPtr;

/// A fixed team of persistent workers sharing the two field buffers.
///
/// Worker `w` of `P` owns interior rows `[1 + (m-2)*w/P, 1 + (m-2)*(w+1)/P)`.
/// Writes stay inside the band and reads touch only the previous step's
/// buffer, so no cell is read and written concurrently. The swap happens
/// once per step, on worker 0, between the two barriers.
pub struct TeamSolver {
    threads: usize,
}

impl TeamSolver {
    pub fn new(threads: usize) -> Self {
        TeamSolver {
            threads: threads.max(1),
        }
    }
}

impl SolverInterface for TeamSolver {
    fn name(&self) -> &'static str {
        "team"
    }

    fn solve(
        &self,
        params: &SolverParameters,
        u: &mut Grid,
        f: &Grid,
        verbose: bool,
    ) -> Result<f64, ParameterError> {
        validate_inputs(params, u, f)?;
        let num_steps = params.num_steps();
        if num_steps == 0 {
            return Ok(params.end_time());
        }

        let n = params.n;
        let m = params.m;
        let dt = params.dt;
        let nu = params.nu;
        let t0 = params.t0;
        let threads = self.threads;
        let len = m * n;
        let progress_interval = (num_steps / 100).max(1);

        let mut scratch = u.clone();
        let u_ptr =
            unsafe { SyncConstPtr::new(u.buffer_mut().as_mut_ptr() as *const f64) };
        let scratch_ptr = unsafe {
            SyncConstPtr::new(scratch.buffer_mut().as_mut_ptr() as *const f64)
        };
        let source_ptr = unsafe { SyncConstPtr::new(f.buffer().as_ptr()) };

        let barrier = Barrier::new(threads);
        // Index of the buffer holding the current field, flipped by worker 0
        // alone while the rest wait between the barriers.
        let current = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for worker in 0..threads {
                let barrier = &barrier;
                let current = &current;
                scope.spawn(move || {
                    profiling::scope!("team: worker");
                    let band_start = 1 + (m - 2) * worker / threads;
                    let band_end = 1 + (m - 2) * (worker + 1) / threads;
                    let source: &[f64] =
                        unsafe { std::slice::from_raw_parts(source_ptr.inner(), len) };
                    for it in 1..=num_steps {
                        let role = current.load(Ordering::Relaxed);
                        let (src_ptr, dst_ptr) = if role == 0 {
                            (u_ptr, scratch_ptr)
                        } else {
                            (scratch_ptr, u_ptr)
                        };
                        let src: &[f64] =
                            unsafe { std::slice::from_raw_parts(src_ptr.inner(), len) };
                        for i in band_start..band_end {
                            for j in 1..n - 1 {
                                let idx = i * n + j;
                                let value = five_point(
                                    src[idx - n],
                                    src[idx - 1],
                                    src[idx],
                                    src[idx + 1],
                                    src[idx + n],
                                    source[idx],
                                    dt,
                                    nu,
                                );
                                unsafe {
                                    let cell = dst_ptr.add(idx) as *mut f64;
                                    *cell = value;
                                }
                            }
                        }

                        barrier.wait();
                        if worker == 0 {
                            current.store(1 - role, Ordering::Relaxed);
                            if verbose && it % progress_interval == 0 {
                                report_progress(t0, dt, it, num_steps);
                            }
                        }
                        barrier.wait();
                    }
                });
            }
        });

        if current.load(Ordering::Relaxed) == 1 {
            u.buffer_mut().copy_from_slice(scratch.buffer());
        }
        if verbose {
            eprintln!();
        }
        Ok(params.end_time())
    }
}
