//! # dg-wave
//!
//! A Discontinuous Galerkin spectral element (DG-SEM) solver for the 1D
//! linear advection (one-way wave) equation on a periodic domain:
//!
//! ∂u/∂t + c ∂u/∂x = 0
//!
//! This crate provides:
//! - Polynomial algebra and Legendre polynomials
//! - Quadrature rules (Gauss, Gauss-Lobatto-Legendre)
//! - Lagrange basis on the LGL nodes
//! - Periodic 1D mesh with reference-to-physical mapping
//! - The elemental operator A and its inverse
//! - Lax-Friedrichs flux, volume integral and surface term
//! - Explicit time evolution with full history
//!
//! # Example
//! ```
//! use dg_wave::{TimeStepping, WaveConfig, WaveProblem, gaussian_pulse, run_simulation};
//!
//! let problem = WaveProblem::new(WaveConfig::default())?;
//! let stepping = TimeStepping::new(1e-3, 4)?;
//! let u0 = problem.initial_field(gaussian_pulse);
//! let (history, _) = run_simulation(&problem, stepping, &u0)?;
//! assert!(history.is_complete());
//! # Ok::<(), dg_wave::DgError>(())
//! ```

pub mod basis;
pub mod config;
pub mod error;
pub mod flux;
pub mod mesh;
pub mod operators;
pub mod polynomial;
pub mod quadrature;
pub mod simulation;
pub mod solver;
pub mod time;

// Re-export main types for convenience
pub use basis::{BasisTable, LagrangeBasis};
pub use config::{JacobianMethod, QuadratureSpec, TimeStepping, WaveConfig, gaussian_pulse};
pub use error::{DgError, DgResult, QuadratureOrderWarning};
pub use flux::{lax_friedrichs_flux, physical_flux};
pub use mesh::Mesh1D;
pub use operators::{apply_operator, assemble_operator, invert_operator};
pub use polynomial::Polynomial;
pub use quadrature::{QuadratureRule, QuadratureScheme, gauss_nodes, lgl_nodes};
pub use simulation::{SimulationResult, WaveProblem, run_simulation, run_simulation_with_observer};
pub use solver::{
    AmplitudeHistory, ElementField, ElementFieldView, WaveRhs, history_max_amplitude,
    max_amplitude, max_interface_jump, total_mass,
};
pub use time::{EvolutionState, TimeEvolution};
