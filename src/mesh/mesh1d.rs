//! 1D periodic mesh and the reference-to-physical element map.
//!
//! A mesh partitions [x_left, x_right] into elements of equal width. Element
//! k covers [vertices[k], vertices[k+1]]. Neighbours wrap around: the right
//! neighbour of the last element is element 0, and vice versa.

use crate::error::{DgError, DgResult};

/// Step used by [`jacobian_numerical`].
pub const JACOBIAN_FD_STEP: f64 = 1e-7;

/// Map ξ in [-1, 1] to x in the element [x0, x1]:
/// x = (1-ξ)/2 · x0 + (1+ξ)/2 · x1.
pub fn map_to_physical(x_nodes: [f64; 2], xi: f64) -> f64 {
    let n0 = (1.0 - xi) / 2.0;
    let n1 = (1.0 + xi) / 2.0;
    n0 * x_nodes[0] + n1 * x_nodes[1]
}

/// Exact dx/dξ = (x1 - x0) / 2 of the affine map.
pub fn jacobian_analytical(x_nodes: [f64; 2]) -> f64 {
    (x_nodes[1] - x_nodes[0]) / 2.0
}

/// Central-difference estimate of dx/dξ at ξ.
///
/// Cross-check for [`jacobian_analytical`]; subject to cancellation error of
/// order ε·|x| / step.
pub fn jacobian_numerical(x_nodes: [f64; 2], xi: f64) -> f64 {
    let x2 = map_to_physical(x_nodes, xi + JACOBIAN_FD_STEP);
    let x1 = map_to_physical(x_nodes, xi - JACOBIAN_FD_STEP);
    (x2 - x1) / (2.0 * JACOBIAN_FD_STEP)
}

/// Uniform periodic 1D mesh.
#[derive(Clone, Debug)]
pub struct Mesh1D {
    /// Left endpoint of domain
    pub x_left: f64,
    /// Right endpoint of domain
    pub x_right: f64,
    /// Number of elements
    pub n_elements: usize,
    /// Element vertices, length n_elements + 1
    pub vertices: Vec<f64>,
    /// Width shared by every element
    pub element_size: f64,
}

impl Mesh1D {
    /// Create a uniform periodic mesh of [x_left, x_right].
    pub fn uniform_periodic(x_left: f64, x_right: f64, n_elements: usize) -> DgResult<Self> {
        if n_elements == 0 {
            return Err(DgError::InvalidElementCount(n_elements));
        }
        if !(x_right > x_left) || !x_left.is_finite() || !x_right.is_finite() {
            return Err(DgError::DegenerateDomain { x_left, x_right });
        }

        let h = (x_right - x_left) / n_elements as f64;
        let mut vertices: Vec<f64> = (0..=n_elements).map(|i| x_left + i as f64 * h).collect();
        // Pin the last vertex so rounding cannot shift the right boundary
        vertices[n_elements] = x_right;

        Ok(Self {
            x_left,
            x_right,
            n_elements,
            vertices,
            element_size: h,
        })
    }

    /// Endpoints [x0, x1] of element k.
    pub fn element_nodes(&self, k: usize) -> [f64; 2] {
        [self.vertices[k], self.vertices[k + 1]]
    }

    /// Element to the left of k, wrapping from 0 to n_elements - 1.
    pub fn left_neighbor(&self, k: usize) -> usize {
        (k + self.n_elements - 1) % self.n_elements
    }

    /// Element to the right of k, wrapping from n_elements - 1 to 0.
    pub fn right_neighbor(&self, k: usize) -> usize {
        (k + 1) % self.n_elements
    }

    /// Physical coordinate of reference point ξ in element k.
    pub fn reference_to_physical(&self, k: usize, xi: f64) -> f64 {
        map_to_physical(self.element_nodes(k), xi)
    }

    /// Jacobian dx/dξ of element k.
    pub fn jacobian(&self, k: usize) -> f64 {
        jacobian_analytical(self.element_nodes(k))
    }

    /// Physical coordinates of reference nodes in every element.
    ///
    /// Layout matches the solution storage: x[k * n_nodes + i].
    pub fn physical_nodes(&self, reference_nodes: &[f64]) -> Vec<f64> {
        let mut x = Vec::with_capacity(self.n_elements * reference_nodes.len());
        for k in 0..self.n_elements {
            x.extend(reference_nodes.iter().map(|&xi| self.reference_to_physical(k, xi)));
        }
        x
    }

    /// Smallest physical distance between consecutive nodes inside an element.
    pub fn min_node_spacing(&self, reference_nodes: &[f64]) -> f64 {
        (0..self.n_elements)
            .flat_map(|k| {
                reference_nodes.windows(2).map(move |w| {
                    self.reference_to_physical(k, w[1]) - self.reference_to_physical(k, w[0])
                })
            })
            .fold(f64::INFINITY, f64::min)
    }

    /// Total domain length.
    pub fn length(&self) -> f64 {
        self.x_right - self.x_left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_mesh() {
        let mesh = Mesh1D::uniform_periodic(-1.0, 1.0, 10).unwrap();
        assert_eq!(mesh.vertices.len(), 11);
        assert!((mesh.element_size - 0.2).abs() < 1e-15);
        assert_eq!(mesh.vertices[0], -1.0);
        assert_eq!(mesh.vertices[10], 1.0);
        assert!((mesh.length() - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_invalid_meshes() {
        assert_eq!(
            Mesh1D::uniform_periodic(0.0, 1.0, 0).err(),
            Some(DgError::InvalidElementCount(0))
        );
        assert!(matches!(
            Mesh1D::uniform_periodic(1.0, 1.0, 4),
            Err(DgError::DegenerateDomain { .. })
        ));
        assert!(Mesh1D::uniform_periodic(2.0, 1.0, 4).is_err());
        assert!(Mesh1D::uniform_periodic(0.0, f64::NAN, 4).is_err());
    }

    #[test]
    fn test_map_to_physical() {
        let x_nodes = [0.5, 0.75];
        assert!((map_to_physical(x_nodes, -1.0) - 0.5).abs() < 1e-15);
        assert!((map_to_physical(x_nodes, 1.0) - 0.75).abs() < 1e-15);
        assert!((map_to_physical(x_nodes, 0.0) - 0.625).abs() < 1e-15);
    }

    #[test]
    fn test_jacobians_agree() {
        let mesh = Mesh1D::uniform_periodic(-1.0, 1.0, 10).unwrap();
        for k in 0..mesh.n_elements {
            let x_nodes = mesh.element_nodes(k);
            let exact = jacobian_analytical(x_nodes);
            assert!((exact - 0.1).abs() < 1e-14);
            for &xi in &[-1.0, -0.3, 0.0, 0.6, 1.0] {
                let fd = jacobian_numerical(x_nodes, xi);
                assert!((fd - exact).abs() < 1e-7, "fd {} vs exact {}", fd, exact);
            }
        }
    }

    #[test]
    fn test_periodic_neighbors() {
        let mesh = Mesh1D::uniform_periodic(0.0, 1.0, 4).unwrap();
        assert_eq!(mesh.left_neighbor(0), 3);
        assert_eq!(mesh.right_neighbor(3), 0);
        for k in 0..4 {
            assert_eq!(mesh.left_neighbor(mesh.right_neighbor(k)), k);
        }

        let single = Mesh1D::uniform_periodic(0.0, 1.0, 1).unwrap();
        assert_eq!(single.left_neighbor(0), 0);
        assert_eq!(single.right_neighbor(0), 0);
    }

    #[test]
    fn test_physical_nodes_layout() {
        let mesh = Mesh1D::uniform_periodic(0.0, 2.0, 2).unwrap();
        let x = mesh.physical_nodes(&[-1.0, 0.0, 1.0]);
        assert_eq!(x.len(), 6);
        let expected = [0.0, 0.5, 1.0, 1.0, 1.5, 2.0];
        for (a, b) in x.iter().zip(expected) {
            assert!((a - b).abs() < 1e-15);
        }
        assert!((mesh.min_node_spacing(&[-1.0, 0.0, 1.0]) - 0.5).abs() < 1e-15);
    }
}
