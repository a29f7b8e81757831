//! Nodal field storage for one time level.

use crate::error::{DgError, DgResult};
use crate::mesh::Mesh1D;

/// Owned nodal values of a single time level.
///
/// Stores values in a contiguous array with layout [n_elements, n_nodes]:
/// node p of element e lives at data[e * n_nodes + p].
#[derive(Clone, Debug, PartialEq)]
pub struct ElementField {
    /// Nodal values
    pub data: Vec<f64>,
    /// Number of elements
    pub n_elements: usize,
    /// Number of nodes per element
    pub n_nodes: usize,
}

impl ElementField {
    /// Zero-initialised field.
    pub fn new(n_elements: usize, n_nodes: usize) -> Self {
        Self {
            data: vec![0.0; n_elements * n_nodes],
            n_elements,
            n_nodes,
        }
    }

    /// Wrap existing values, checking the length.
    pub fn from_data(data: Vec<f64>, n_elements: usize, n_nodes: usize) -> DgResult<Self> {
        let expected = n_elements * n_nodes;
        if data.len() != expected {
            return Err(DgError::dimension_mismatch(
                format!("{expected} values ({n_elements} elements x {n_nodes} nodes)"),
                format!("{} values", data.len()),
            ));
        }
        Ok(Self {
            data,
            n_elements,
            n_nodes,
        })
    }

    /// Sample `f` at the physical position of every node.
    pub fn from_function<F>(mesh: &Mesh1D, reference_nodes: &[f64], f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        let data = mesh
            .physical_nodes(reference_nodes)
            .into_iter()
            .map(f)
            .collect();
        Self {
            data,
            n_elements: mesh.n_elements,
            n_nodes: reference_nodes.len(),
        }
    }

    /// Nodal values of element e.
    pub fn element(&self, e: usize) -> &[f64] {
        let start = e * self.n_nodes;
        &self.data[start..start + self.n_nodes]
    }

    /// Mutable nodal values of element e.
    pub fn element_mut(&mut self, e: usize) -> &mut [f64] {
        let start = e * self.n_nodes;
        &mut self.data[start..start + self.n_nodes]
    }

    /// Borrow as a read-only view.
    pub fn view(&self) -> ElementFieldView<'_> {
        ElementFieldView {
            data: &self.data,
            n_elements: self.n_elements,
            n_nodes: self.n_nodes,
        }
    }

    /// Scale all values by a constant.
    pub fn scale(&mut self, c: f64) {
        for v in &mut self.data {
            *v *= c;
        }
    }

    /// Add c * other to self.
    pub fn axpy(&mut self, c: f64, other: &ElementField) {
        debug_assert_eq!(self.data.len(), other.data.len());
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a += c * b;
        }
    }
}

/// Borrowed nodal values of one time level, same layout as [`ElementField`].
#[derive(Clone, Copy, Debug)]
pub struct ElementFieldView<'a> {
    data: &'a [f64],
    /// Number of elements
    pub n_elements: usize,
    /// Number of nodes per element
    pub n_nodes: usize,
}

impl<'a> ElementFieldView<'a> {
    pub(crate) fn new(data: &'a [f64], n_elements: usize, n_nodes: usize) -> Self {
        debug_assert_eq!(data.len(), n_elements * n_nodes);
        Self {
            data,
            n_elements,
            n_nodes,
        }
    }

    /// Nodal values of element e.
    pub fn element(&self, e: usize) -> &'a [f64] {
        let start = e * self.n_nodes;
        &self.data[start..start + self.n_nodes]
    }

    /// Value at node p of element e.
    pub fn value(&self, p: usize, e: usize) -> f64 {
        self.data[e * self.n_nodes + p]
    }

    /// All values, element-major.
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    /// Copy into an owned field.
    pub fn to_field(&self) -> ElementField {
        ElementField {
            data: self.data.to_vec(),
            n_elements: self.n_elements,
            n_nodes: self.n_nodes,
        }
    }
}
