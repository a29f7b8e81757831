//! Quadrature rules on the reference interval [-1, 1].
//!
//! Two families are provided:
//! - Gauss-Legendre: n interior points, exact up to degree 2n-1
//! - Gauss-Lobatto-Legendre (LGL): n points including ±1, exact up to degree 2n-3
//!
//! A [`QuadratureRule`] bundles the nodes and weights of one rule so they are
//! computed once during setup and reused for every integral.

mod gauss;
mod lobatto;

pub use gauss::{gauss_nodes, gauss_weight, gauss_weights};
pub use lobatto::{lgl_nodes, lobatto_weights};

use std::fmt;

use crate::error::{DgError, DgResult, QuadratureOrderWarning};
use crate::polynomial::Polynomial;

/// Quadrature family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuadratureScheme {
    /// Gauss-Legendre (roots of P_n).
    Gauss,
    /// Gauss-Lobatto-Legendre (endpoints and roots of P'_{n-1}).
    GaussLobatto,
}

impl QuadratureScheme {
    /// Smallest number of points for which the scheme is defined.
    pub fn min_points(self) -> usize {
        match self {
            Self::Gauss => 1,
            Self::GaussLobatto => 2,
        }
    }

    /// Highest polynomial degree integrated exactly with `points` points.
    pub fn exact_degree(self, points: usize) -> usize {
        match self {
            Self::Gauss => (2 * points).saturating_sub(1),
            Self::GaussLobatto => (2 * points).saturating_sub(3),
        }
    }
}

impl fmt::Display for QuadratureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gauss => write!(f, "Gauss"),
            Self::GaussLobatto => write!(f, "Gauss-Lobatto"),
        }
    }
}

/// Precomputed nodes and weights of a single rule.
#[derive(Clone, Debug)]
pub struct QuadratureRule {
    /// Quadrature family
    pub scheme: QuadratureScheme,
    /// Nodes in [-1, 1], ascending
    pub nodes: Vec<f64>,
    /// Weights matching `nodes`
    pub weights: Vec<f64>,
}

impl QuadratureRule {
    /// Build the `points`-point rule of the given scheme.
    pub fn new(scheme: QuadratureScheme, points: usize) -> DgResult<Self> {
        if points < scheme.min_points() {
            return Err(DgError::InvalidQuadrature {
                scheme,
                points,
                min: scheme.min_points(),
            });
        }

        let (nodes, weights) = match scheme {
            QuadratureScheme::Gauss => {
                let nodes = gauss_nodes(points)?;
                let weights = gauss_weights(points, &nodes);
                (nodes, weights)
            }
            QuadratureScheme::GaussLobatto => {
                let nodes = lgl_nodes(points)?;
                let weights = lobatto_weights(points, &nodes);
                (nodes, weights)
            }
        };

        Ok(Self {
            scheme,
            nodes,
            weights,
        })
    }

    /// Number of points.
    pub fn points(&self) -> usize {
        self.nodes.len()
    }

    /// Highest polynomial degree this rule integrates exactly.
    pub fn exact_degree(&self) -> usize {
        self.scheme.exact_degree(self.points())
    }

    /// Weighted sum of `f` over the nodes.
    pub fn integrate_fn<F>(&self, f: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        self.nodes
            .iter()
            .zip(&self.weights)
            .map(|(&x, &w)| w * f(x))
            .sum()
    }

    /// Approximate ∫_{-1}^{1} poly(ξ) dξ.
    ///
    /// Under-integration is not detected here; see [`Self::check_degree`].
    pub fn integrate(&self, poly: &Polynomial) -> f64 {
        self.integrate_fn(|x| poly.eval(x))
    }

    /// Report whether an integrand of `degree` exceeds this rule's exactness.
    pub fn check_degree(
        &self,
        degree: usize,
        context: &'static str,
    ) -> Option<QuadratureOrderWarning> {
        let exact_degree = self.exact_degree();
        (degree > exact_degree).then_some(QuadratureOrderWarning {
            context,
            scheme: self.scheme,
            points: self.points(),
            exact_degree,
            required_degree: degree,
        })
    }
}

/// Approximate ∫_{-1}^{1} poly(ξ) dξ with an `order`-point rule of `scheme`.
///
/// Exact for degree ≤ 2·order-1 (Gauss) or ≤ 2·order-3 (Gauss-Lobatto).
/// A too-low order yields an inaccurate value rather than an error.
pub fn integrate(poly: &Polynomial, order: usize, scheme: QuadratureScheme) -> DgResult<f64> {
    let rule = QuadratureRule::new(scheme, order)?;
    Ok(rule.integrate(poly))
}
