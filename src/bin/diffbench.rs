use clap::Parser;
use diffbench::bench::{self, ExternalProgram, Implementation, InProcess};
use diffbench::build_info;
use diffbench::solver;

/// Cross-strategy benchmark for the 2D heat-diffusion solvers.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Trials per implementation and parameter set.
    #[arg(short, long, default_value = "5")]
    repetitions: usize,

    /// The number of threads to use.
    #[arg(short, long, default_value = "8")]
    threads: usize,

    /// Interior rows per rayon task in the par-rows solver.
    #[arg(long, default_value = "16")]
    chunk_rows: usize,

    /// Use a small parameter matrix for smoke runs.
    #[arg(short, long)]
    quick: bool,

    /// Skip the process-based implementations.
    #[arg(long)]
    no_external: bool,

    /// Print build information and quit.
    #[arg(long)]
    build_info: bool,
}

fn main() {
    let args = Args::parse();

    if args.build_info {
        build_info::print_report("diffbench");
        std::process::exit(0);
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .thread_name(|i| format!("rayon_thread_{}", i))
        .build_global()
        .unwrap();

    let mut implementations: Vec<Box<dyn Implementation>> =
        solver::registry(args.threads, args.chunk_rows)
            .into_iter()
            .map(|solver| Box::new(InProcess::new(solver)) as Box<dyn Implementation>)
            .collect();
    if !args.no_external {
        implementations.push(Box::new(ExternalProgram::new("external", &[])));
        implementations.push(Box::new(ExternalProgram::new(
            "external team",
            &["--strategy", "team", "--threads", &args.threads.to_string()],
        )));
    }

    let sets = if args.quick {
        bench::quick_parameter_sets()
    } else {
        bench::default_parameter_sets()
    };

    let perf = match bench::run_benchmark(&mut implementations, &sets, args.repetitions) {
        Ok(perf) => perf,
        Err(e) => {
            eprintln!("benchmark failed: {}", e);
            std::process::exit(1);
        }
    };
    bench::print_report(&implementations, &sets, &perf);
}
