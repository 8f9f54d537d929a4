use diffbench::grid::Grid;
use diffbench::init::rand_ic;
use diffbench::params::{ParameterError, SolverParameters};
use diffbench::solver::{registry, NaiveSolver, SlicesSolver, SolverInterface};
use float_cmp::assert_approx_eq;

#[test]
fn single_step_unit_source() {
    // One step from a cold field with f = 1 puts dt in every interior cell
    let params = SolverParameters {
        t0: 0.0,
        t1: 0.1,
        dt: 0.1,
        n: 6,
        m: 5,
        nu: 1.0,
    };
    assert_eq!(params.num_steps(), 1);

    for solver in registry(2, 1) {
        let mut u = Grid::zeros(params.m, params.n);
        let f = Grid::full(params.m, params.n, 1.0);
        let t = solver.solve(&params, &mut u, &f, false).unwrap();
        assert_approx_eq!(f64, t, 0.1);

        for i in 0..params.m {
            for j in 0..params.n {
                let border =
                    i == 0 || i == params.m - 1 || j == 0 || j == params.n - 1;
                let expected = if border { 0.0 } else { 0.1 };
                assert_approx_eq!(f64, u.get(i, j), expected);
            }
        }
    }
}

#[test]
fn zero_steps_returns_input_unchanged() {
    let params = SolverParameters {
        t0: 2.0,
        t1: 2.04,
        dt: 0.1,
        n: 8,
        m: 8,
        nu: 1.0,
    };
    assert_eq!(params.num_steps(), 0);

    let mut u = Grid::zeros(params.m, params.n);
    rand_ic(&mut u, 256, 16);
    let before = u.clone();
    let f = Grid::full(params.m, params.n, 1.0);

    let t = NaiveSolver::new().solve(&params, &mut u, &f, false).unwrap();
    assert_approx_eq!(f64, t, params.t0);
    assert_eq!(u.buffer(), before.buffer());
}

#[test]
fn borders_stay_zero_at_every_step() {
    let m = 12;
    let n = 9;
    let dt = 0.1;
    let solver = NaiveSolver::new();

    let mut u = Grid::zeros(m, n);
    rand_ic(&mut u, 32, 16);
    for j in 0..n {
        u.set(0, j, 0.0);
        u.set(m - 1, j, 0.0);
    }
    for i in 0..m {
        u.set(i, 0, 0.0);
        u.set(i, n - 1, 0.0);
    }
    let f = Grid::full(m, n, 1.0);

    // Step one dt at a time and look at the borders after each step
    let mut t0 = 0.0;
    for _ in 0..5 {
        let params = SolverParameters {
            t0,
            t1: t0 + dt,
            dt,
            n,
            m,
            nu: 0.2,
        };
        t0 = solver.solve(&params, &mut u, &f, false).unwrap();

        for j in 0..n {
            assert_eq!(u.get(0, j), 0.0);
            assert_eq!(u.get(m - 1, j), 0.0);
        }
        for i in 0..m {
            assert_eq!(u.get(i, 0), 0.0);
            assert_eq!(u.get(i, n - 1), 0.0);
        }
    }
}

#[test]
fn solve_is_idempotent_over_inputs() {
    let params = SolverParameters {
        t0: 0.0,
        t1: 3.0,
        dt: 0.1,
        n: 14,
        m: 19,
        nu: 0.1,
    };

    let mut initial = Grid::zeros(params.m, params.n);
    rand_ic(&mut initial, 512, 32);
    let mut f = Grid::zeros(params.m, params.n);
    rand_ic(&mut f, 8, 32);

    let solver = SlicesSolver::new();
    let mut first = initial.clone();
    let mut second = initial.clone();
    solver.solve(&params, &mut first, &f, false).unwrap();
    solver.solve(&params, &mut second, &f, false).unwrap();

    assert_eq!(first.buffer(), second.buffer());
}

#[test]
fn end_time_is_a_step_multiple() {
    let params = SolverParameters {
        t0: 0.0,
        t1: 1.0,
        dt: 0.3,
        n: 6,
        m: 6,
        nu: 0.1,
    };
    let mut u = Grid::zeros(params.m, params.n);
    let f = Grid::full(params.m, params.n, 1.0);
    let t = NaiveSolver::new().solve(&params, &mut u, &f, false).unwrap();
    assert_approx_eq!(f64, t, 0.9, epsilon = 1e-12);
    assert!(t < params.t1);
}

#[test]
fn interior_heats_up_and_saturates() {
    // t0=0, t1=1000, dt=0.1, 100x50, nu=1: the competition's first set
    let n = 50;
    let m = 100;
    let dt = 0.1;
    let solver = SlicesSolver::new();

    let mut u = Grid::zeros(m, n);
    let f = Grid::full(m, n, 1.0);

    let mut maxima = Vec::new();
    let mut t0 = 0.0;
    for _ in 0..10 {
        let params = SolverParameters {
            t0,
            t1: t0 + 100.0,
            dt,
            n,
            m,
            nu: 1.0,
        };
        t0 = solver.solve(&params, &mut u, &f, false).unwrap();
        maxima.push(u.max_value());
    }

    for i in 1..m - 1 {
        for j in 1..n - 1 {
            assert!(u.get(i, j) > 0.0);
        }
    }
    for pair in maxima.windows(2) {
        assert!(pair[1] >= pair[0]);
    }
    // Close to steady state, the last checkpoint barely moves
    let last = maxima[maxima.len() - 1];
    let previous = maxima[maxima.len() - 2];
    assert!(last - previous < 0.01 * last);
}

#[test]
fn rejects_bad_parameters_before_touching_grids() {
    let mut u = Grid::zeros(6, 6);
    let f = Grid::zeros(6, 6);

    let bad_dt = SolverParameters {
        t0: 0.0,
        t1: 1.0,
        dt: 0.0,
        n: 6,
        m: 6,
        nu: 1.0,
    };
    assert!(matches!(
        NaiveSolver::new().solve(&bad_dt, &mut u, &f, false),
        Err(ParameterError::NonPositiveTimeStep { .. })
    ));

    let good = SolverParameters { dt: 0.1, ..bad_dt };
    let mut wrong_shape = Grid::zeros(4, 4);
    assert!(matches!(
        NaiveSolver::new().solve(&good, &mut wrong_shape, &f, false),
        Err(ParameterError::ShapeMismatch { .. })
    ));
}
