//! Mesh representation.
//!
//! Uniform periodic 1D mesh plus the affine reference-to-physical mapping
//! and its Jacobian.

mod mesh1d;

pub use mesh1d::{
    JACOBIAN_FD_STEP, Mesh1D, jacobian_analytical, jacobian_numerical, map_to_physical,
};
