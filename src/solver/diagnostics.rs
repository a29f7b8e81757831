//! Runtime diagnostics for the amplitude field.
//!
//! - Total mass ∫ u dx via LGL quadrature on each element
//! - Maximum amplitude (blow-up detection)
//! - Jump between coincident boundary nodes of neighbouring elements

use crate::mesh::Mesh1D;

use super::field::ElementFieldView;
use super::history::AmplitudeHistory;

/// ∫ u dx = Σ_e Σ_p w_p J u_{pe}.
pub fn total_mass(u: ElementFieldView<'_>, weights: &[f64], jacobian: f64) -> f64 {
    debug_assert_eq!(weights.len(), u.n_nodes);
    (0..u.n_elements)
        .map(|e| {
            u.element(e)
                .iter()
                .zip(weights)
                .map(|(&v, &w)| w * v)
                .sum::<f64>()
        })
        .sum::<f64>()
        * jacobian
}

/// max |u| over all nodes; NaN if any value is NaN.
pub fn max_amplitude(u: ElementFieldView<'_>) -> f64 {
    fold_abs_max(u.as_slice().iter().copied())
}

/// max |u| over every completed time level; NaN if any value is NaN.
pub fn history_max_amplitude(history: &AmplitudeHistory) -> f64 {
    fold_abs_max(history.iter().map(max_amplitude))
}

/// `f64::max` drops NaN, so it is carried through explicitly.
fn fold_abs_max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0_f64, |acc, v| {
        if v.is_nan() || acc.is_nan() { f64::NAN } else { acc.max(v.abs()) }
    })
}

/// max_e |u_{N-1, e} - u_{0, e+1}| over all (periodic) interfaces.
pub fn max_interface_jump(u: ElementFieldView<'_>, mesh: &Mesh1D) -> f64 {
    let last = u.n_nodes - 1;
    (0..u.n_elements)
        .map(|e| (u.value(last, e) - u.value(0, mesh.right_neighbor(e))).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrature::{lgl_nodes, lobatto_weights};
    use crate::solver::ElementField;

    #[test]
    fn test_total_mass_of_polynomial() {
        // ∫_0^2 x dx = 2
        let mesh = Mesh1D::uniform_periodic(0.0, 2.0, 4).unwrap();
        let nodes = lgl_nodes(3).unwrap();
        let weights = lobatto_weights(3, &nodes);
        let u = ElementField::from_function(&mesh, &nodes, |x| x);
        let mass = total_mass(u.view(), &weights, mesh.jacobian(0));
        assert!((mass - 2.0).abs() < 1e-13);
    }

    #[test]
    fn test_max_amplitude() {
        let u = ElementField::from_data(vec![0.5, -3.0, 1.0, 2.0], 2, 2).unwrap();
        assert_eq!(max_amplitude(u.view()), 3.0);

        let bad = ElementField::from_data(vec![0.5, f64::NAN], 1, 2).unwrap();
        assert!(max_amplitude(bad.view()).is_nan());
    }

    #[test]
    fn test_history_max_amplitude_spans_all_levels() {
        let initial = ElementField::from_data(vec![0.5, -1.0], 1, 2).unwrap();
        let mut history = AmplitudeHistory::new(&initial, 3).unwrap();
        history.push(&ElementField::from_data(vec![-4.0, 2.0], 1, 2).unwrap()).unwrap();
        assert_eq!(history_max_amplitude(&history), 4.0);

        // A NaN at the newest level wins over larger finite values
        history.push(&ElementField::from_data(vec![f64::NAN, 0.0], 1, 2).unwrap()).unwrap();
        assert!(history_max_amplitude(&history).is_nan());
    }

    #[test]
    fn test_continuous_field_has_no_jump() {
        let mesh = Mesh1D::uniform_periodic(0.0, 1.0, 5).unwrap();
        let nodes = lgl_nodes(4).unwrap();
        // Periodic function so the wrap-around interface also matches
        let wave = |x: f64| (2.0 * std::f64::consts::PI * x).sin();
        let u = ElementField::from_function(&mesh, &nodes, wave);
        assert!(max_interface_jump(u.view(), &mesh) < 1e-12);
    }

    #[test]
    fn test_jump_detects_discontinuity() {
        let mesh = Mesh1D::uniform_periodic(0.0, 1.0, 2).unwrap();
        let u = ElementField::from_data(vec![0.0, 1.0, 1.5, 0.0], 2, 2).unwrap();
        assert!((max_interface_jump(u.view(), &mesh) - 0.5).abs() < 1e-15);
    }
}
