//! Time integration of the semi-discrete DG system.

mod evolution;

pub use evolution::{EvolutionState, TimeEvolution};
