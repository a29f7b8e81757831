//! End-to-end tests of the time evolution: stability of the reference setup,
//! conservation, agreement with the exact translated solution and
//! reproducibility.

use approx::assert_abs_diff_eq;
use dg_wave::{
    DgError, ElementField, EvolutionState, QuadratureSpec, TimeEvolution, TimeStepping, WaveConfig,
    WaveProblem, WaveRhs, gaussian_pulse, max_amplitude, max_interface_jump, run_simulation,
    run_simulation_with_observer, total_mass,
};
use faer::Mat;

fn reference_problem() -> WaveProblem {
    WaveProblem::new(WaveConfig::new(8, 10)).unwrap()
}

/// Exact solution of the periodic problem on [-1, 1].
fn translated_pulse(x: f64, t: f64, c: f64) -> f64 {
    let shifted = (x - c * t + 1.0).rem_euclid(2.0) - 1.0;
    gaussian_pulse(shifted)
}

#[test]
fn test_single_step_stays_bounded() {
    let problem = reference_problem();
    let u0 = problem.initial_field(gaussian_pulse);
    let stepping = problem.stable_time_stepping().unwrap().with_slices(2).unwrap();

    let (history, result) = run_simulation(&problem, stepping, &u0).unwrap();
    let initial_max = max_amplitude(u0.view());
    let after = history.slice(1).unwrap();

    assert!(after.as_slice().iter().all(|v| v.is_finite()));
    assert!(max_amplitude(after) <= initial_max * (1.0 + 1e-3));
    assert_eq!(result.n_steps, 1);
}

#[test]
fn test_mass_is_conserved() {
    let problem = reference_problem();
    let u0 = problem.initial_field(gaussian_pulse);
    let stepping = problem.stable_time_stepping().unwrap().with_slices(60).unwrap();

    let (history, _) = run_simulation(&problem, stepping, &u0).unwrap();
    let m0 = total_mass(u0.view(), &problem.lgl_weights, problem.jacobian);
    for slice in history.iter() {
        let m = total_mass(slice, &problem.lgl_weights, problem.jacobian);
        assert_abs_diff_eq!(m, m0, epsilon = 1e-12);
    }
}

#[test]
fn test_pulse_follows_exact_translation() {
    let problem = reference_problem();
    let u0 = problem.initial_field(gaussian_pulse);
    let stepping = problem.stable_time_stepping().unwrap().with_slices(21).unwrap();

    let (history, result) = run_simulation(&problem, stepping, &u0).unwrap();
    let last = history.latest();
    for (&x, &u) in problem.physical_nodes().iter().zip(last.as_slice()) {
        let exact = translated_pulse(x, result.final_time, 1.0);
        assert_abs_diff_eq!(u, exact, epsilon = 1e-2);
    }
}

#[test]
fn test_negative_wave_speed_moves_left() {
    let problem = WaveProblem::new(WaveConfig::new(8, 10).with_wave_speed(-1.0)).unwrap();
    let u0 = problem.initial_field(gaussian_pulse);
    let stepping = problem.stable_time_stepping().unwrap().with_slices(21).unwrap();

    let (history, result) = run_simulation(&problem, stepping, &u0).unwrap();
    for (&x, &u) in problem.physical_nodes().iter().zip(history.latest().as_slice()) {
        let exact = translated_pulse(x, result.final_time, -1.0);
        assert_abs_diff_eq!(u, exact, epsilon = 1e-2);
    }
}

#[test]
fn test_interface_jump_shrinks_with_time_step() {
    let problem = WaveProblem::new(WaveConfig::new(4, 5)).unwrap();
    let u0 = problem.initial_field(gaussian_pulse);

    let jumps: Vec<f64> = [1e-2, 5e-3, 2.5e-3]
        .iter()
        .map(|&dt| {
            let stepping = TimeStepping::new(dt, 2).unwrap();
            let (history, _) = run_simulation(&problem, stepping, &u0).unwrap();
            max_interface_jump(history.latest(), &problem.mesh)
        })
        .collect();

    assert!(jumps[0] > 0.0);
    for pair in jumps.windows(2) {
        assert!(pair[1] < pair[0], "Jumps should shrink with dt: {:?}", jumps);
    }
}

#[test]
fn test_runs_are_reproducible() {
    let problem = reference_problem();
    let u0 = problem.initial_field(gaussian_pulse);
    let stepping = problem.stable_time_stepping().unwrap().with_slices(15).unwrap();

    let (first, _) = run_simulation(&problem, stepping, &u0).unwrap();
    let (second, _) = run_simulation(&problem, stepping, &u0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_high_order_pulse_stays_bounded() {
    for n_lgl in [12, 16, 20] {
        let problem = WaveProblem::new(WaveConfig::new(n_lgl, 4)).unwrap();
        let u0 = problem.initial_field(gaussian_pulse);
        let stepping = problem.stable_time_stepping().unwrap().with_slices(11).unwrap();

        let (history, result) = run_simulation(&problem, stepping, &u0).unwrap();
        assert!(result.is_finite(), "N = {} blew up", n_lgl);
        assert!(max_amplitude(history.latest()) <= 1.0 + 1e-3);
        assert_abs_diff_eq!(result.final_mass, result.initial_mass, epsilon = 1e-11);
    }
}

#[test]
fn test_configuration_errors() {
    assert_eq!(
        WaveProblem::new(WaveConfig::new(1, 10)).err(),
        Some(DgError::InvalidNodeCount(1))
    );
    assert_eq!(
        WaveProblem::new(WaveConfig::new(8, 0)).err(),
        Some(DgError::InvalidElementCount(0))
    );
    assert!(matches!(
        WaveProblem::new(WaveConfig::default().with_domain(2.0, -2.0)),
        Err(DgError::DegenerateDomain { .. })
    ));
    assert!(matches!(
        WaveProblem::new(WaveConfig::default().with_volume_quadrature(QuadratureSpec::gauss(0))),
        Err(DgError::InvalidQuadrature { .. })
    ));
    assert_eq!(TimeStepping::new(-0.1, 3), Err(DgError::InvalidTimeStep(-0.1)));
    assert!(matches!(
        WaveProblem::new(WaveConfig::default().with_total_time(f64::INFINITY)),
        Err(DgError::InvalidParameter { name: "total_time", .. })
    ));

    let err = WaveProblem::new(WaveConfig::new(1, 10)).unwrap_err();
    assert!(err.is_configuration_error());
}

#[test]
fn test_singular_operator_is_reported() {
    let problem = reference_problem();
    let u0 = problem.initial_field(gaussian_pulse);
    let mut singular = Mat::<f64>::zeros(8, 8);
    // Two identical rows
    for i in 0..8 {
        singular[(0, i)] = 1.0;
        singular[(1, i)] = 1.0;
    }
    let rhs = WaveRhs::from_problem(&problem, 1e-3);
    let mut evolution = TimeEvolution::new(rhs, &singular, &u0, 3).unwrap();

    let err = evolution.run().unwrap_err();
    assert!(matches!(err, DgError::SingularOperator { .. }));
    assert!(!err.is_configuration_error());
    assert_eq!(evolution.state(), EvolutionState::Initialized);
    assert_eq!(evolution.history().completed_slices(), 1);
}

#[test]
fn test_observer_sees_completed_levels_only() {
    let problem = WaveProblem::new(WaveConfig::new(5, 6)).unwrap();
    let u0 = problem.initial_field(gaussian_pulse);
    let stepping = TimeStepping::new(2e-3, 10).unwrap();

    let mut snapshots: Vec<(usize, ElementField)> = Vec::new();
    let (history, _) = run_simulation_with_observer(&problem, stepping, &u0, 4, |t, _, view| {
        snapshots.push((t, view.to_field()));
    })
    .unwrap();

    let levels: Vec<usize> = snapshots.iter().map(|(t, _)| *t).collect();
    assert_eq!(levels, vec![0, 4, 8, 9]);
    for (t, field) in &snapshots {
        assert_eq!(history.slice(*t).unwrap().to_field(), *field);
    }
    assert!(history.slice(10).is_none());
}

#[test]
fn test_step_by_step_matches_run() {
    let problem = WaveProblem::new(WaveConfig::new(5, 6)).unwrap();
    let u0 = problem.initial_field(gaussian_pulse);
    let stepping = TimeStepping::new(2e-3, 6).unwrap();

    let mut manual = TimeEvolution::from_problem(&problem, stepping, &u0).unwrap();
    manual.start().unwrap();
    while manual.state() == EvolutionState::Running {
        manual.step().unwrap();
    }

    let (history, _) = run_simulation(&problem, stepping, &u0).unwrap();
    assert_eq!(manual.into_history(), history);
}
