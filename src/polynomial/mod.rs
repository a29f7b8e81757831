//! Polynomial evaluation and algebra.
//!
//! This module provides:
//! - 1D Legendre polynomials and their derivatives
//! - Dense coefficient polynomials with exact products and derivatives

mod legendre;
mod poly;

pub use legendre::{legendre, legendre_and_derivative, legendre_derivative};
pub use poly::Polynomial;
