//! Elemental mass-like operator.
//!
//! A_{pi} = ∫_{-1}^{1} L_p(ξ) L_i(ξ) (dx/dξ) dξ
//!
//! On a uniform mesh the Jacobian is the same constant on every element, so a
//! single N x N matrix serves the whole mesh. The integrand L_p L_i has degree
//! 2N-2, which an (N+1)-point Gauss-Lobatto rule integrates exactly. With only
//! N Lobatto points the quadrature collapses onto the nodes and A becomes the
//! diagonal (lumped) mass matrix.

use faer::{Mat, linalg::solvers::Solve};

use crate::basis::{BasisTable, LagrangeBasis};
use crate::error::{DgError, DgResult};
use crate::quadrature::QuadratureRule;
use crate::solver::ElementField;

/// Condition number ‖A‖∞‖A⁻¹‖∞ above which A is treated as singular.
const MAX_CONDITION: f64 = 1e12;

/// Slack on the rounding bound n·ε·κ(A) for the residual of A A⁻¹ - I.
const RESIDUAL_SAFETY: f64 = 1e3;

/// Assemble A by quadrature over barycentric basis values, scaled by `jacobian`.
///
/// A_pi = J Σ_k w_k L_p(ξ_k) L_i(ξ_k), which is symmetric by construction.
pub fn assemble_operator(basis: &LagrangeBasis, rule: &QuadratureRule, jacobian: f64) -> Mat<f64> {
    let n = basis.n_nodes();
    let table = BasisTable::new(basis, rule);
    let mut a = Mat::zeros(n, n);

    for p in 0..n {
        for i in p..n {
            let integral: f64 = (0..table.n_points())
                .map(|k| table.weights[k] * table.value(k, p) * table.value(k, i))
                .sum();
            a[(p, i)] = jacobian * integral;
            a[(i, p)] = jacobian * integral;
        }
    }

    log::debug!(
        "Assembled {}x{} operator with {}-point {} rule, J = {:.6e}",
        n,
        n,
        rule.points(),
        rule.scheme,
        jacobian
    );
    a
}

/// Invert A with a partial-pivot LU factorization.
///
/// The factorization itself never fails, so singularity is detected after
/// the fact, relative to the scale of A:
/// - a non-finite inverse
/// - a condition number ‖A‖∞‖A⁻¹‖∞ above 1e12
/// - a residual ||A A⁻¹ - I||_max above the rounding bound of the solve
///
/// Each of these is reported as [`DgError::SingularOperator`].
pub fn invert_operator(a: &Mat<f64>) -> DgResult<Mat<f64>> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(DgError::dimension_mismatch(
            format!("{n} x {n}"),
            format!("{} x {}", a.nrows(), a.ncols()),
        ));
    }

    let lu = a.as_ref().partial_piv_lu();
    let mut a_inv = Mat::zeros(n, n);

    // Solve A * A_inv = I column by column
    for j in 0..n {
        let mut rhs = Mat::zeros(n, 1);
        rhs[(j, 0)] = 1.0;
        let col = lu.solve(&rhs);
        for i in 0..n {
            a_inv[(i, j)] = col[(i, 0)];
        }
    }

    let residual = identity_residual(a, &a_inv);
    let condition = norm_inf(a) * norm_inf(&a_inv);
    if !residual.is_finite() || !condition.is_finite() || condition > MAX_CONDITION {
        return Err(DgError::SingularOperator { residual });
    }

    let tolerance = RESIDUAL_SAFETY * n as f64 * f64::EPSILON * condition;
    if residual > tolerance {
        return Err(DgError::SingularOperator { residual });
    }

    log::debug!(
        "Inverted {}x{} operator: condition {:.3e}, residual {:.3e}",
        n,
        n,
        condition,
        residual
    );
    Ok(a_inv)
}

/// Apply a nodal matrix to every element column: out[:, e] = m * field[:, e].
pub fn apply_operator(m: &Mat<f64>, field: &ElementField) -> ElementField {
    let n = field.n_nodes;
    debug_assert_eq!(m.nrows(), n);
    debug_assert_eq!(m.ncols(), n);

    let mut out = ElementField::new(field.n_elements, n);
    for e in 0..field.n_elements {
        let u_e = field.element(e);
        let out_e = out.element_mut(e);
        for p in 0..n {
            let mut sum = 0.0;
            for i in 0..n {
                sum += m[(p, i)] * u_e[i];
            }
            out_e[p] = sum;
        }
    }
    out
}

/// max_{ij} |(A B - I)_{ij}|; NaN anywhere propagates as infinity.
fn identity_residual(a: &Mat<f64>, b: &Mat<f64>) -> f64 {
    let n = a.nrows();
    let mut residual: f64 = 0.0;
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                sum += a[(i, k)] * b[(k, j)];
            }
            let expected = if i == j { 1.0 } else { 0.0 };
            let diff = (sum - expected).abs();
            if !diff.is_finite() {
                return f64::INFINITY;
            }
            residual = residual.max(diff);
        }
    }
    residual
}

/// Maximum absolute row sum; infinite if any entry is not finite.
fn norm_inf(m: &Mat<f64>) -> f64 {
    let mut norm: f64 = 0.0;
    for i in 0..m.nrows() {
        let row: f64 = (0..m.ncols()).map(|j| m[(i, j)].abs()).sum();
        if !row.is_finite() {
            return f64::INFINITY;
        }
        norm = norm.max(row);
    }
    norm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrature::{QuadratureScheme, lgl_nodes, lobatto_weights};

    fn setup(n: usize, points: usize) -> (LagrangeBasis, QuadratureRule) {
        let nodes = lgl_nodes(n).unwrap();
        let basis = LagrangeBasis::new(&nodes).unwrap();
        let rule = QuadratureRule::new(QuadratureScheme::GaussLobatto, points).unwrap();
        (basis, rule)
    }

    #[test]
    fn test_operator_symmetric() {
        let (basis, rule) = setup(8, 9);
        let a = assemble_operator(&basis, &rule, 0.1);
        for p in 0..8 {
            for i in 0..8 {
                assert!((a[(p, i)] - a[(i, p)]).abs() < 1e-13);
            }
        }
    }

    #[test]
    fn test_operator_positive_definite() {
        // Cholesky-free check: x^T A x > 0 for a handful of vectors
        let (basis, rule) = setup(6, 7);
        let a = assemble_operator(&basis, &rule, 0.5);
        let vectors = [
            vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            vec![1.0, -1.0, 1.0, -1.0, 1.0, -1.0],
            vec![0.3, 2.0, -0.7, 0.1, 0.0, 5.0],
        ];
        for x in &vectors {
            let mut quad = 0.0;
            for p in 0..6 {
                for i in 0..6 {
                    quad += x[p] * a[(p, i)] * x[i];
                }
            }
            assert!(quad > 0.0);
        }
    }

    #[test]
    fn test_row_sums_are_lobatto_weights() {
        // Σ_i L_i = 1, so Σ_i A_pi = J ∫ L_p = J w_p
        let (basis, rule) = setup(5, 6);
        let a = assemble_operator(&basis, &rule, 1.0);
        let weights = lobatto_weights(5, &basis.nodes);
        for p in 0..5 {
            let row: f64 = (0..5).map(|i| a[(p, i)]).sum();
            assert!((row - weights[p]).abs() < 1e-13);
        }
    }

    #[test]
    fn test_lumped_operator_with_collocated_rule() {
        let (basis, rule) = setup(5, 5);
        let a = assemble_operator(&basis, &rule, 1.0);
        for p in 0..5 {
            for i in 0..5 {
                if p != i {
                    assert!(a[(p, i)].abs() < 1e-13, "Off-diagonal should vanish");
                }
            }
        }
    }

    #[test]
    fn test_inverse() {
        let (basis, rule) = setup(8, 9);
        let a = assemble_operator(&basis, &rule, 0.1);
        let a_inv = invert_operator(&a).unwrap();
        assert!(identity_residual(&a, &a_inv) < 1e-10);
        assert!(identity_residual(&a_inv, &a) < 1e-10);
    }

    #[test]
    fn test_singular_operator_rejected() {
        let mut a = Mat::zeros(3, 3);
        a[(0, 0)] = 1.0;
        a[(1, 1)] = 1.0;
        // Row 2 is zero
        assert!(matches!(invert_operator(&a), Err(DgError::SingularOperator { .. })));
    }

    #[test]
    fn test_operator_exactly_symmetric_at_high_order() {
        let (basis, rule) = setup(20, 21);
        let a = assemble_operator(&basis, &rule, 0.05);
        let weights = lobatto_weights(20, &basis.nodes);
        for p in 0..20 {
            for i in 0..20 {
                assert_eq!(a[(p, i)], a[(i, p)]);
            }
            let row: f64 = (0..20).map(|i| a[(p, i)]).sum();
            assert!((row - 0.05 * weights[p]).abs() < 1e-13);
        }
    }

    #[test]
    fn test_inverse_at_high_order() {
        for n in 12..=20 {
            let (basis, rule) = setup(n, n + 1);
            let a = assemble_operator(&basis, &rule, 0.125);
            let a_inv = invert_operator(&a)
                .unwrap_or_else(|e| panic!("N = {n} rejected: {e}"));
            assert!(identity_residual(&a, &a_inv) < 1e-9);
        }
    }

    #[test]
    fn test_singularity_is_relative_to_scale() {
        let mut a = Mat::zeros(3, 3);
        for i in 0..3 {
            a[(i, i)] = 1e-12;
        }
        let a_inv = invert_operator(&a).unwrap();
        assert!((a_inv[(1, 1)] - 1e12).abs() < 1e-3);
    }

    #[test]
    fn test_ill_conditioned_operator_rejected() {
        let mut a = Mat::zeros(2, 2);
        a[(0, 0)] = 1.0;
        a[(0, 1)] = 1.0;
        a[(1, 0)] = 1.0;
        a[(1, 1)] = 1.0 + 1e-14;
        assert!(matches!(invert_operator(&a), Err(DgError::SingularOperator { .. })));
    }

    #[test]
    fn test_apply_operator() {
        let mut m = Mat::zeros(2, 2);
        m[(0, 0)] = 2.0;
        m[(0, 1)] = 1.0;
        m[(1, 1)] = -1.0;
        let mut field = ElementField::new(2, 2);
        field.data.copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let out = apply_operator(&m, &field);
        assert_eq!(out.element(0), &[4.0, -2.0]);
        assert_eq!(out.element(1), &[10.0, -4.0]);
    }
}
