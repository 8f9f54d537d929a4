use clap::Parser;
use diffbench::grid::Grid;
use diffbench::image::grid_to_image;
use diffbench::params::SolverParameters;
use diffbench::solver::Strategy;
use std::path::PathBuf;
use std::time::Instant;

/// Stand-alone 2D heat-diffusion solver.
///
/// Prints the maximum of the final field and its own elapsed time, in the
/// format the benchmark harness parses.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Start time.
    #[arg(default_value_t = 0.0)]
    t0: f64,

    /// End time. Rounded down to the nearest multiple of dt.
    #[arg(default_value_t = 1000.0)]
    t1: f64,

    /// Time step.
    #[arg(default_value_t = 0.1)]
    dt: f64,

    /// Grid width, columns.
    #[arg(default_value_t = 50)]
    n: usize,

    /// Grid height, rows.
    #[arg(default_value_t = 100)]
    m: usize,

    /// Initial temperature fill.
    #[arg(default_value_t = 0.0)]
    u_const: f64,

    /// Source term fill.
    #[arg(default_value_t = 1.0)]
    f_const: f64,

    /// Diffusivity.
    #[arg(default_value_t = 1.0)]
    nu: f64,

    /// Execution strategy.
    #[arg(short, long, value_enum, default_value_t = Strategy::Naive)]
    strategy: Strategy,

    /// The number of threads to use.
    #[arg(short, long, default_value = "4")]
    threads: usize,

    /// Interior rows per rayon task for the par-rows strategy.
    #[arg(long, default_value = "16")]
    chunk_rows: usize,

    /// Report progress on stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Write the final field as a PNG heat map.
    #[arg(long)]
    image: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .thread_name(|i| format!("rayon_thread_{}", i))
        .build_global()
        .unwrap();

    let params = SolverParameters {
        t0: args.t0,
        t1: args.t1,
        dt: args.dt,
        n: args.n,
        m: args.m,
        nu: args.nu,
    };
    let mut u = Grid::full(args.m, args.n, args.u_const);
    let f = Grid::full(args.m, args.n, args.f_const);
    let solver = args.strategy.solver(args.threads, args.chunk_rows);

    let pre = Instant::now();
    let t = match solver.solve(&params, &mut u, &f, args.verbose) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let elapsed = pre.elapsed().as_secs_f64();

    println!("u_max = {:.15E}   @ t={}", u.max_value(), t);
    println!("The computation took {} s", elapsed);

    if let Some(ref path) = args.image {
        grid_to_image(&u, path);
    }
}
