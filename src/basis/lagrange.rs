//! Lagrange interpolating basis on a nodal set.
//!
//! For nodes ξ_0 < ... < ξ_{N-1} the basis polynomial
//! L_p(ξ) = w_p Π_{m≠p} (ξ - ξ_m), with barycentric weight
//! w_p = 1 / Π_{m≠p} (ξ_p - ξ_m), satisfies L_p(ξ_i) = δ_{pi}.
//!
//! Coefficient arrays lose accuracy as N grows, so point evaluation goes
//! through the barycentric formula instead of Horner on the expanded form.

use crate::error::{DgError, DgResult};
use crate::polynomial::Polynomial;

/// Lagrange basis with its derived lookup tables.
#[derive(Clone, Debug)]
pub struct LagrangeBasis {
    /// Interpolation nodes in [-1, 1]
    pub nodes: Vec<f64>,
    /// Basis polynomials L_p
    pub polynomials: Vec<Polynomial>,
    /// Derivatives dL_p/dξ
    pub derivatives: Vec<Polynomial>,
    /// Products L_p L_i stored at index p * n + i
    pub products: Vec<Polynomial>,
    /// L_p(-1)
    pub left_values: Vec<f64>,
    /// L_p(1)
    pub right_values: Vec<f64>,
    /// Barycentric weights w_p
    pub barycentric_weights: Vec<f64>,
}

impl LagrangeBasis {
    /// Build the basis and every derived table for `nodes`.
    pub fn new(nodes: &[f64]) -> DgResult<Self> {
        let barycentric_weights = barycentric_weights(nodes)?;
        let polynomials = build_polynomials(nodes, &barycentric_weights);
        let derivatives = polynomials.iter().map(Polynomial::derivative).collect();
        let products = products_of(&polynomials);

        let mut basis = Self {
            nodes: nodes.to_vec(),
            polynomials,
            derivatives,
            products,
            left_values: Vec::new(),
            right_values: Vec::new(),
            barycentric_weights,
        };

        let n = basis.n_nodes();
        basis.left_values = (0..n).map(|p| basis.evaluate(p, -1.0)).collect();
        basis.right_values = (0..n).map(|p| basis.evaluate(p, 1.0)).collect();

        Ok(basis)
    }

    /// Number of nodes (and basis functions).
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Polynomial degree of each basis function.
    pub fn degree(&self) -> usize {
        self.n_nodes() - 1
    }

    /// Product L_p L_i.
    pub fn product(&self, p: usize, i: usize) -> &Polynomial {
        &self.products[p * self.n_nodes() + i]
    }

    /// Evaluate L_p(ξ) with the barycentric formula.
    pub fn evaluate(&self, p: usize, xi: f64) -> f64 {
        if let Some(j) = self.node_index(xi) {
            return if j == p { 1.0 } else { 0.0 };
        }
        let denom: f64 = self
            .nodes
            .iter()
            .zip(&self.barycentric_weights)
            .map(|(&x, &w)| w / (xi - x))
            .sum();
        self.barycentric_weights[p] / (xi - self.nodes[p]) / denom
    }

    /// Evaluate dL_p/dξ without going through the coefficient form.
    ///
    /// Off the nodes L_p'(ξ) = L_p(ξ) Σ_{m≠p} 1/(ξ - ξ_m). At a node the
    /// differentiation-matrix entries are used instead:
    /// L_p'(ξ_j) = (w_p / w_j) / (ξ_j - ξ_p) for j ≠ p, and
    /// L_p'(ξ_p) = -Σ_{m≠p} L_m'(ξ_p).
    pub fn evaluate_derivative(&self, p: usize, xi: f64) -> f64 {
        let w = &self.barycentric_weights;
        match self.node_index(xi) {
            Some(j) if j == p => (0..self.n_nodes())
                .filter(|&m| m != p)
                .map(|m| -(w[m] / w[p]) / (self.nodes[p] - self.nodes[m]))
                .sum(),
            Some(j) => (w[p] / w[j]) / (self.nodes[j] - self.nodes[p]),
            None => {
                let sum: f64 = self
                    .nodes
                    .iter()
                    .enumerate()
                    .filter(|&(m, _)| m != p)
                    .map(|(_, &x)| 1.0 / (xi - x))
                    .sum();
                self.evaluate(p, xi) * sum
            }
        }
    }

    /// Evaluate the interpolant Σ_p values[p] L_p(ξ).
    pub fn interpolate(&self, values: &[f64], xi: f64) -> f64 {
        debug_assert_eq!(values.len(), self.n_nodes());

        if let Some(j) = self.node_index(xi) {
            return values[j];
        }

        let mut num = 0.0;
        let mut denom = 0.0;
        for ((&x, &w), &v) in self.nodes.iter().zip(&self.barycentric_weights).zip(values) {
            let t = w / (xi - x);
            num += t * v;
            denom += t;
        }
        num / denom
    }

    /// Express nodal values as the polynomial Σ_p values[p] L_p.
    pub fn expand(&self, values: &[f64]) -> Polynomial {
        debug_assert_eq!(values.len(), self.n_nodes());

        let mut poly = Polynomial::zero();
        for (l_p, &v) in self.polynomials.iter().zip(values) {
            poly.axpy(v, l_p);
        }
        poly
    }

    fn node_index(&self, xi: f64) -> Option<usize> {
        self.nodes.iter().position(|&x| x == xi)
    }
}

/// Build the Lagrange polynomials for `nodes`.
///
/// Returns the polynomials together with their ascending coefficient vectors,
/// each padded to `nodes.len()` entries.
pub fn lagrange_polynomials(nodes: &[f64]) -> DgResult<(Vec<Polynomial>, Vec<Vec<f64>>)> {
    let weights = barycentric_weights(nodes)?;
    let polynomials = build_polynomials(nodes, &weights);
    let coeffs = polynomials
        .iter()
        .map(|p| p.coeffs_padded(nodes.len()))
        .collect();
    Ok((polynomials, coeffs))
}

/// Coefficient vector of the first derivative of `poly`.
pub fn derivative(poly: &Polynomial) -> Vec<f64> {
    poly.derivative().into_coeffs()
}

/// All ordered products L_p L_i, flattened with index p * n + i.
pub fn product_table(nodes: &[f64]) -> DgResult<Vec<Polynomial>> {
    let (polynomials, _) = lagrange_polynomials(nodes)?;
    Ok(products_of(&polynomials))
}

fn barycentric_weights(nodes: &[f64]) -> DgResult<Vec<f64>> {
    if nodes.is_empty() {
        return Err(DgError::InvalidNodeCount(0));
    }

    let mut weights = Vec::with_capacity(nodes.len());
    for (j, &xj) in nodes.iter().enumerate() {
        let mut prod = 1.0;
        for (m, &xm) in nodes.iter().enumerate() {
            if m == j {
                continue;
            }
            let diff = xj - xm;
            if diff == 0.0 {
                return Err(DgError::DuplicateNodes(j.min(m), j.max(m)));
            }
            prod *= diff;
        }
        weights.push(1.0 / prod);
    }
    Ok(weights)
}

fn build_polynomials(nodes: &[f64], weights: &[f64]) -> Vec<Polynomial> {
    (0..nodes.len())
        .map(|p| {
            let others: Vec<f64> = nodes
                .iter()
                .enumerate()
                .filter(|&(m, _)| m != p)
                .map(|(_, &x)| x)
                .collect();
            Polynomial::from_roots(&others).scale(weights[p])
        })
        .collect()
}

fn products_of(polynomials: &[Polynomial]) -> Vec<Polynomial> {
    let mut products = Vec::with_capacity(polynomials.len() * polynomials.len());
    for l_p in polynomials {
        for l_i in polynomials {
            products.push(l_p * l_i);
        }
    }
    products
}
