//! Basis values tabulated at the points of a quadrature rule.
//!
//! Every integral the solver needs has the form Σ_k w_k f(ξ_k) with f built
//! from L_p(ξ_k) and dL_p/dξ(ξ_k). Tabulating those once with the
//! barycentric formula keeps high-order runs free of the cancellation that
//! Horner evaluation of the expanded coefficients suffers from.

use crate::quadrature::QuadratureRule;

use super::lagrange::LagrangeBasis;

/// L_p and dL_p/dξ at the points of one quadrature rule.
///
/// Entries are stored point-major: index k * n_basis + p.
#[derive(Clone, Debug)]
pub struct BasisTable {
    /// Quadrature points ξ_k
    pub points: Vec<f64>,
    /// Quadrature weights w_k
    pub weights: Vec<f64>,
    /// Number of basis functions
    pub n_basis: usize,
    values: Vec<f64>,
    derivatives: Vec<f64>,
}

impl BasisTable {
    /// Tabulate `basis` at the points of `rule`.
    pub fn new(basis: &LagrangeBasis, rule: &QuadratureRule) -> Self {
        let n_basis = basis.n_nodes();
        let mut values = Vec::with_capacity(rule.points() * n_basis);
        let mut derivatives = Vec::with_capacity(rule.points() * n_basis);

        for &xi in &rule.nodes {
            for p in 0..n_basis {
                values.push(basis.evaluate(p, xi));
                derivatives.push(basis.evaluate_derivative(p, xi));
            }
        }

        Self {
            points: rule.nodes.clone(),
            weights: rule.weights.clone(),
            n_basis,
            values,
            derivatives,
        }
    }

    /// Number of quadrature points.
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    /// L_p(ξ_k).
    #[inline]
    pub fn value(&self, k: usize, p: usize) -> f64 {
        self.values[k * self.n_basis + p]
    }

    /// dL_p/dξ(ξ_k).
    #[inline]
    pub fn derivative(&self, k: usize, p: usize) -> f64 {
        self.derivatives[k * self.n_basis + p]
    }

    /// Σ_p nodal[p] L_p(ξ_k).
    pub fn interpolate(&self, k: usize, nodal: &[f64]) -> f64 {
        debug_assert_eq!(nodal.len(), self.n_basis);
        let row = &self.values[k * self.n_basis..(k + 1) * self.n_basis];
        row.iter().zip(nodal).map(|(&l, &u)| l * u).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrature::{QuadratureScheme, lgl_nodes};

    fn table(n: usize, scheme: QuadratureScheme, points: usize) -> (LagrangeBasis, BasisTable) {
        let basis = LagrangeBasis::new(&lgl_nodes(n).unwrap()).unwrap();
        let rule = QuadratureRule::new(scheme, points).unwrap();
        let table = BasisTable::new(&basis, &rule);
        (basis, table)
    }

    #[test]
    fn test_matches_coefficient_form_at_low_order() {
        let (basis, table) = table(6, QuadratureScheme::Gauss, 7);
        for k in 0..table.n_points() {
            let xi = table.points[k];
            for p in 0..6 {
                assert!((table.value(k, p) - basis.polynomials[p].eval(xi)).abs() < 1e-12);
                assert!((table.derivative(k, p) - basis.derivatives[p].eval(xi)).abs() < 1e-11);
            }
        }
    }

    #[test]
    fn test_derivatives_at_collocated_points() {
        // Lobatto rule with the basis' own nodes hits the node branch
        let (basis, table) = table(5, QuadratureScheme::GaussLobatto, 5);
        for k in 0..5 {
            let xi = table.points[k];
            for p in 0..5 {
                assert_eq!(table.value(k, p), if k == p { 1.0 } else { 0.0 });
                assert!((table.derivative(k, p) - basis.derivatives[p].eval(xi)).abs() < 1e-11);
            }
        }
    }

    #[test]
    fn test_rows_sum_to_partition_of_unity_at_high_order() {
        let (_, table) = table(24, QuadratureScheme::Gauss, 25);
        for k in 0..table.n_points() {
            let values: f64 = (0..24).map(|p| table.value(k, p)).sum();
            let slopes: f64 = (0..24).map(|p| table.derivative(k, p)).sum();
            assert!((values - 1.0).abs() < 1e-13);
            assert!(slopes.abs() < 1e-9, "Σ L_p' = {} at point {}", slopes, k);
        }
    }

    #[test]
    fn test_interpolate_linear_data() {
        let (basis, table) = table(20, QuadratureScheme::Gauss, 21);
        let nodal = basis.nodes.clone();
        for k in 0..table.n_points() {
            assert!((table.interpolate(k, &nodal) - table.points[k]).abs() < 1e-13);
        }
    }
}
