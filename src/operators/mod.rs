//! DG operators.
//!
//! The elemental operator A (mass matrix scaled by the Jacobian), its
//! inverse, and the helper that applies a nodal matrix element by element.

mod mass;

pub use mass::{apply_operator, assemble_operator, invert_operator};
