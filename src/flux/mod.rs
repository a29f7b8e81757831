//! Numerical flux functions.
//!
//! The wave equation uses the linear physical flux F(u) = c u and the
//! Lax-Friedrichs interface flux.

mod lax_friedrichs;

pub use lax_friedrichs::{lax_friedrichs_flux, physical_flux};
