//! Explicit time evolution of the DG system.
//!
//! Each step solves A du = rhs for every element with the precomputed inverse:
//!
//! u_{t+1} = u_t + A⁻¹ · Δt (volume_integral(u_t) - surface_term(u_t))
//!
//! Steps are strictly sequential; every time level is kept in an
//! [`AmplitudeHistory`].

use std::fmt;

use faer::Mat;

use crate::config::TimeStepping;
use crate::error::{DgError, DgResult};
use crate::operators::{apply_operator, invert_operator};
use crate::simulation::WaveProblem;
use crate::solver::{AmplitudeHistory, ElementField, ElementFieldView, WaveRhs};

/// Lifecycle of a [`TimeEvolution`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvolutionState {
    /// Built, A⁻¹ not yet computed
    Initialized,
    /// A⁻¹ available, time levels left to compute
    Running,
    /// Every time level written
    Complete,
}

impl EvolutionState {
    fn name(self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::Running => "running",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for EvolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Driver that advances the amplitude field one time level at a time.
pub struct TimeEvolution<'a> {
    rhs: WaveRhs<'a>,
    operator: &'a Mat<f64>,
    inverse: Option<Mat<f64>>,
    current: ElementField,
    history: AmplitudeHistory,
    state: EvolutionState,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel: bool,
}

impl<'a> TimeEvolution<'a> {
    /// Driver over explicit parts; `rhs.dt` is the time step.
    pub fn new(
        rhs: WaveRhs<'a>,
        operator: &'a Mat<f64>,
        initial: &ElementField,
        n_slices: usize,
    ) -> DgResult<Self> {
        if operator.nrows() != initial.n_nodes || operator.ncols() != initial.n_nodes {
            return Err(DgError::dimension_mismatch(
                format!("{n} x {n} operator", n = initial.n_nodes),
                format!("{} x {}", operator.nrows(), operator.ncols()),
            ));
        }
        if !(rhs.dt > 0.0) || !rhs.dt.is_finite() {
            return Err(DgError::InvalidTimeStep(rhs.dt));
        }
        let history = AmplitudeHistory::new(initial, n_slices)?;

        Ok(Self {
            rhs,
            operator,
            inverse: None,
            current: initial.clone(),
            history,
            state: EvolutionState::Initialized,
            parallel: false,
        })
    }

    /// Driver for a prepared problem.
    pub fn from_problem(
        problem: &'a WaveProblem,
        stepping: TimeStepping,
        initial: &ElementField,
    ) -> DgResult<Self> {
        if initial.n_elements != problem.n_elements() || initial.n_nodes != problem.n_nodes() {
            return Err(DgError::dimension_mismatch(
                format!("{} x {} field", problem.n_nodes(), problem.n_elements()),
                format!("{} x {}", initial.n_nodes, initial.n_elements),
            ));
        }
        let rhs = WaveRhs::from_problem(problem, stepping.dt);
        Self::new(rhs, &problem.operator, initial, stepping.n_slices)
    }

    /// Evaluate the right-hand side with rayon when the `parallel` feature
    /// is enabled. Ignored otherwise.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EvolutionState {
        self.state
    }

    /// Time step Δt.
    pub fn dt(&self) -> f64 {
        self.rhs.dt
    }

    /// Index of the most recently computed time level.
    pub fn current_level(&self) -> usize {
        self.history.completed_slices() - 1
    }

    /// Simulated time of the most recently computed level.
    pub fn current_time(&self) -> f64 {
        self.current_level() as f64 * self.rhs.dt
    }

    /// Read-only view of the most recent time level.
    pub fn current(&self) -> ElementFieldView<'_> {
        self.current.view()
    }

    /// Levels written so far.
    pub fn history(&self) -> &AmplitudeHistory {
        &self.history
    }

    /// Release the history. Call after [`Self::run`] for the full record.
    pub fn into_history(self) -> AmplitudeHistory {
        self.history
    }

    /// Invert the operator and move to [`EvolutionState::Running`].
    ///
    /// A single-level history has nothing to compute and goes straight to
    /// [`EvolutionState::Complete`].
    pub fn start(&mut self) -> DgResult<()> {
        if self.state != EvolutionState::Initialized {
            return Err(DgError::InvalidState {
                action: "start",
                state: self.state.name(),
            });
        }

        self.inverse = Some(invert_operator(self.operator)?);
        self.state = if self.history.is_complete() {
            EvolutionState::Complete
        } else {
            EvolutionState::Running
        };

        log::info!(
            "Starting time evolution: {} levels, dt = {:.4e}, {} elements x {} nodes",
            self.history.n_slices(),
            self.rhs.dt,
            self.current.n_elements,
            self.current.n_nodes
        );
        Ok(())
    }

    /// Compute the next time level and return its index.
    pub fn step(&mut self) -> DgResult<usize> {
        let inverse = match (self.state, &self.inverse) {
            (EvolutionState::Running, Some(inverse)) => inverse,
            _ => {
                return Err(DgError::InvalidState {
                    action: "step",
                    state: self.state.name(),
                });
            }
        };

        let rhs = self.evaluate_rhs();
        let du = apply_operator(inverse, &rhs);
        self.current.axpy(1.0, &du);
        let t = self.history.push(&self.current)?;
        log::trace!("Computed level {} (t = {:.6})", t, t as f64 * self.rhs.dt);

        if self.history.is_complete() {
            self.state = EvolutionState::Complete;
            log::info!(
                "Time evolution complete after {} steps (t = {:.6})",
                t,
                t as f64 * self.rhs.dt
            );
        }
        Ok(t)
    }

    /// Start if needed, then step until every level is written.
    pub fn run(&mut self) -> DgResult<()> {
        self.run_with_observer(usize::MAX, |_, _, _| {})
    }

    /// Like [`Self::run`], handing level t to `observer` when t is a
    /// multiple of `every` and for the final level.
    ///
    /// The observer receives `(level, time, snapshot)` and only ever sees
    /// completed levels.
    pub fn run_with_observer<F>(&mut self, every: usize, mut observer: F) -> DgResult<()>
    where
        F: FnMut(usize, f64, ElementFieldView<'_>),
    {
        if every == 0 {
            return Err(DgError::invalid_parameter("every", "must be at least 1"));
        }

        if self.state == EvolutionState::Initialized {
            self.start()?;
            observer(0, 0.0, self.current.view());
        }

        while self.state == EvolutionState::Running {
            let t = self.step()?;
            if t % every == 0 || self.state == EvolutionState::Complete {
                log::debug!("Snapshot of level {}", t);
                observer(t, t as f64 * self.rhs.dt, self.current.view());
            }
        }
        Ok(())
    }

    #[cfg(feature = "parallel")]
    fn evaluate_rhs(&self) -> ElementField {
        if self.parallel {
            self.rhs.rhs_vector_parallel(self.current.view())
        } else {
            self.rhs.rhs_vector(self.current.view())
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_rhs(&self) -> ElementField {
        self.rhs.rhs_vector(self.current.view())
    }
}
