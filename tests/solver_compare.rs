use diffbench::grid::Grid;
use diffbench::init::rand_ic;
use diffbench::params::SolverParameters;
use diffbench::solver::{NaiveSolver, ParRowsSolver, SlicesSolver, SolverInterface, TeamSolver};
use float_cmp::assert_approx_eq;

fn compare_with_naive(solver: &dyn SolverInterface) {
    // Params
    let params = SolverParameters {
        t0: 0.0,
        t1: 4.0,
        dt: 0.1,
        n: 23,
        m: 37,
        nu: 0.05,
    };
    let chunk_size = 100;

    // Create buffers
    let mut naive_u = Grid::zeros(params.m, params.n);
    let f = Grid::full(params.m, params.n, 0.5);

    // Setup ICs
    rand_ic(&mut naive_u, 1024, chunk_size);
    let mut other_u = naive_u.clone();

    // Naive
    let t_naive = NaiveSolver::new()
        .solve(&params, &mut naive_u, &f, false)
        .unwrap();

    // Other strategy
    let t_other = solver.solve(&params, &mut other_u, &f, false).unwrap();
    assert_approx_eq!(f64, t_naive, t_other);

    // Compare
    for i in 0..params.m * params.n {
        assert_approx_eq!(
            f64,
            naive_u.buffer()[i],
            other_u.buffer()[i],
            epsilon = 0.000000000000000001
        );
    }
}

#[test]
fn slices_naive_compare() {
    compare_with_naive(&SlicesSolver::new());
}

#[test]
fn par_rows_naive_compare() {
    // Small bands so the interior spans several tasks
    compare_with_naive(&ParRowsSolver::new(3));
}

#[test]
fn team_naive_compare() {
    // 35 interior rows over 4 workers
    compare_with_naive(&TeamSolver::new(4));
}

#[test]
fn team_more_workers_than_rows() {
    // Some bands come out empty, the result must not change
    let params = SolverParameters {
        t0: 0.0,
        t1: 1.0,
        dt: 0.1,
        n: 11,
        m: 5,
        nu: 0.1,
    };
    let chunk_size = 10;

    let mut naive_u = Grid::zeros(params.m, params.n);
    let f = Grid::full(params.m, params.n, 1.0);
    rand_ic(&mut naive_u, 64, chunk_size);
    let mut team_u = naive_u.clone();

    NaiveSolver::new()
        .solve(&params, &mut naive_u, &f, false)
        .unwrap();
    TeamSolver::new(8)
        .solve(&params, &mut team_u, &f, false)
        .unwrap();

    for i in 0..params.m * params.n {
        assert_approx_eq!(
            f64,
            naive_u.buffer()[i],
            team_u.buffer()[i],
            epsilon = 0.000000000000000001
        );
    }
}
