//! Simulation runner.
//!
//! Builds a [`TimeEvolution`] for a prepared problem, runs it to completion
//! and summarizes the run.

use std::time::Instant;

use crate::config::TimeStepping;
use crate::error::DgResult;
use crate::solver::{
    AmplitudeHistory, ElementField, ElementFieldView, history_max_amplitude, total_mass,
};
use crate::time::TimeEvolution;

use super::problem::WaveProblem;

// =============================================================================
// Simulation Result
// =============================================================================

/// Summary of a completed run.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// Simulated time of the last level.
    pub final_time: f64,
    /// Number of explicit updates.
    pub n_steps: usize,
    /// Time step used.
    pub dt: f64,
    /// Total wall-clock time in seconds.
    pub wall_time: f64,
    /// ∫ u dx of the initial condition.
    pub initial_mass: f64,
    /// ∫ u dx of the last level.
    pub final_mass: f64,
    /// max |u| over the whole history.
    pub max_amplitude: f64,
}

impl SimulationResult {
    /// Relative change of ∫ u dx over the run; absolute when the initial
    /// mass is zero.
    pub fn mass_drift(&self) -> f64 {
        let drift = self.final_mass - self.initial_mass;
        if self.initial_mass.abs() > 0.0 {
            drift / self.initial_mass.abs()
        } else {
            drift
        }
    }

    /// Whether every computed value stayed finite.
    pub fn is_finite(&self) -> bool {
        self.max_amplitude.is_finite() && self.final_mass.is_finite()
    }
}

// =============================================================================
// Simulation Runner
// =============================================================================

/// Run `problem` from `initial` for `stepping.n_slices` time levels.
pub fn run_simulation(
    problem: &WaveProblem,
    stepping: TimeStepping,
    initial: &ElementField,
) -> DgResult<(AmplitudeHistory, SimulationResult)> {
    run_simulation_with_observer(problem, stepping, initial, usize::MAX, |_, _, _| {})
}

/// Like [`run_simulation`], handing every `every`-th completed level to
/// `observer` as `(level, time, snapshot)`.
pub fn run_simulation_with_observer<F>(
    problem: &WaveProblem,
    stepping: TimeStepping,
    initial: &ElementField,
    every: usize,
    observer: F,
) -> DgResult<(AmplitudeHistory, SimulationResult)>
where
    F: FnMut(usize, f64, ElementFieldView<'_>),
{
    let start_wall = Instant::now();

    let mut evolution = TimeEvolution::from_problem(problem, stepping, initial)?
        .with_parallel(cfg!(feature = "parallel"));
    evolution.run_with_observer(every, observer)?;
    let history = evolution.into_history();

    let wall_time = start_wall.elapsed().as_secs_f64();
    let mass = |u: ElementFieldView<'_>| total_mass(u, &problem.lgl_weights, problem.jacobian);
    let result = SimulationResult {
        final_time: stepping.final_time(),
        n_steps: stepping.n_steps(),
        dt: stepping.dt,
        wall_time,
        initial_mass: mass(initial.view()),
        final_mass: mass(history.latest()),
        max_amplitude: history_max_amplitude(&history),
    };

    if !result.is_finite() {
        log::warn!("Solution is no longer finite; reduce the time step");
    }
    log::info!(
        "Simulation complete: {} steps to t = {:.4} in {:.3}s, mass drift {:.3e}",
        result.n_steps,
        result.final_time,
        result.wall_time,
        result.mass_drift()
    );

    Ok((history, result))
}
