//! Legendre-Gauss-Lobatto nodes and weights.
//!
//! The n LGL nodes are the roots of (1-ξ²)P'_{n-1}(ξ), which includes the
//! endpoints ξ = ±1. They serve both as interpolation nodes of the Lagrange
//! basis and as a quadrature rule exact up to degree 2n-3.

use crate::error::{DgError, DgResult};
use crate::polynomial::{legendre, legendre_and_derivative};
use std::f64::consts::PI;

const NEWTON_MAX_ITER: usize = 100;
const NEWTON_TOL: f64 = 1e-15;

/// Compute `n` LGL nodes in [-1, 1], strictly increasing.
///
/// Interior nodes are found with Newton iteration on (1-ξ²)P'_{N}(ξ),
/// N = n - 1, starting from Chebyshev-Lobatto nodes. Using
/// d/dξ [(1-ξ²)P'_N] = -N(N+1) P_N the update reduces to
/// ξ ← ξ + (1-ξ²) P'_N / (N(N+1) P_N).
pub fn lgl_nodes(n: usize) -> DgResult<Vec<f64>> {
    if n < 2 {
        return Err(DgError::InvalidNodeCount(n));
    }

    let order = n - 1;
    let scale = (order * (order + 1)) as f64;

    let mut nodes: Vec<f64> = (0..n)
        .map(|j| -(PI * j as f64 / order as f64).cos())
        .collect();

    // Endpoints are exact
    nodes[0] = -1.0;
    nodes[order] = 1.0;

    for node in nodes.iter_mut().take(order).skip(1) {
        let mut x = *node;
        for _ in 0..NEWTON_MAX_ITER {
            let (p_n, dp_n) = legendre_and_derivative(order, x);
            let update = (1.0 - x * x) * dp_n / (scale * p_n);
            x += update;
            if update.abs() < NEWTON_TOL {
                break;
            }
        }
        *node = x;
    }

    // Mirror the left half so the set is exactly symmetric
    for j in 0..n / 2 {
        let avg = 0.5 * (nodes[n - 1 - j] - nodes[j]);
        nodes[j] = -avg;
        nodes[n - 1 - j] = avg;
    }
    if n % 2 == 1 {
        nodes[n / 2] = 0.0;
    }

    Ok(nodes)
}

/// LGL quadrature weights: w_i = 2 / (n(n-1) [P_{n-1}(ξ_i)]²).
///
/// Only meaningful for node sets produced by [`lgl_nodes`] with the same `n`.
/// For n < 2 the formula is undefined and every node gets weight 2, the
/// length of [-1, 1]. One weight is returned per node in every case.
pub fn lobatto_weights(n: usize, nodes: &[f64]) -> Vec<f64> {
    if n < 2 {
        return vec![2.0; nodes.len()];
    }

    let order = n - 1;
    let denom = (n * order) as f64;

    nodes
        .iter()
        .map(|&x| {
            let p = legendre(order, x);
            2.0 / (denom * p * p)
        })
        .collect()
}
