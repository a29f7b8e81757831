//! Problem setup and simulation runner.
//!
//! [`WaveProblem::new`] performs every one-time computation (mesh, basis,
//! quadrature, operator). [`run_simulation`] drives a prepared problem
//! through time and reports a [`SimulationResult`].
//!
//! # Example
//! ```
//! use dg_wave::config::{WaveConfig, gaussian_pulse};
//! use dg_wave::simulation::{WaveProblem, run_simulation};
//!
//! let problem = WaveProblem::new(WaveConfig::new(6, 8))?;
//! let stepping = problem.stable_time_stepping()?.with_slices(5)?;
//! let u0 = problem.initial_field(gaussian_pulse);
//!
//! let (history, result) = run_simulation(&problem, stepping, &u0)?;
//! assert_eq!(history.completed_slices(), 5);
//! assert!(result.is_finite());
//! # Ok::<(), dg_wave::DgError>(())
//! ```

mod problem;
mod runner;

pub use problem::WaveProblem;
pub use runner::{SimulationResult, run_simulation, run_simulation_with_observer};
