//! DG solver for the 1D wave equation.
//!
//! This module contains:
//! - Nodal field storage for one time level and for the full history
//! - Right-hand side: volume integral, interface flux, surface term
//! - Diagnostics (mass, amplitude bounds, interface jumps)

mod diagnostics;
mod field;
mod history;
mod rhs;

pub use diagnostics::{history_max_amplitude, max_amplitude, max_interface_jump, total_mass};
pub use field::{ElementField, ElementFieldView};
pub use history::AmplitudeHistory;
pub use rhs::WaveRhs;
