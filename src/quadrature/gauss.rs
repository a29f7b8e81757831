//! Gauss-Legendre nodes and weights.
//!
//! The n-point rule uses the roots of P_n, excludes the endpoints and
//! integrates polynomials up to degree 2n-1 exactly.

use crate::error::{DgError, DgResult};
use crate::polynomial::legendre_and_derivative;
use std::f64::consts::PI;

const NEWTON_MAX_ITER: usize = 100;
const NEWTON_TOL: f64 = 1e-15;

/// Compute the `n` Gauss-Legendre nodes in ascending order.
///
/// Newton iteration on P_n from the asymptotic guess
/// ξ_i ≈ -cos(π (i + 3/4) / (n + 1/2)).
pub fn gauss_nodes(n: usize) -> DgResult<Vec<f64>> {
    if n == 0 {
        return Err(DgError::InvalidNodeCount(n));
    }

    let mut nodes: Vec<f64> = (0..n)
        .map(|i| {
            let mut x = -(PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
            for _ in 0..NEWTON_MAX_ITER {
                let (p, dp) = legendre_and_derivative(n, x);
                let update = p / dp;
                x -= update;
                if update.abs() < NEWTON_TOL {
                    break;
                }
            }
            x
        })
        .collect();

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

/// Weight of the `i`-th node of the `n`-point Gauss-Legendre rule:
/// w_i = 2 / ((1 - ξ_i²) [P'_n(ξ_i)]²).
pub fn gauss_weight(n: usize, i: usize) -> DgResult<f64> {
    let nodes = gauss_nodes(n)?;
    let x = *nodes.get(i).ok_or_else(|| {
        DgError::invalid_parameter("i", format!("node index {i} out of range for {n} points"))
    })?;
    Ok(weight_at(n, x))
}

/// All weights of the `n`-point rule for an already computed node set.
pub fn gauss_weights(n: usize, nodes: &[f64]) -> Vec<f64> {
    nodes.iter().map(|&x| weight_at(n, x)).collect()
}

fn weight_at(n: usize, x: f64) -> f64 {
    let (_, dp) = legendre_and_derivative(n, x);
    2.0 / ((1.0 - x * x) * dp * dp)
}
