//! Full time history of the amplitude field.
//!
//! One preallocated buffer holds every time level. Slices are written in
//! order, each exactly once; slice 0 is the initial condition. Only slices
//! that have been written can be read, so a consumer never observes a
//! partially computed time level.

use crate::error::{DgError, DgResult};

use super::field::{ElementField, ElementFieldView};

/// Amplitude u indexed by (node p, element e, time level t).
#[derive(Clone, Debug, PartialEq)]
pub struct AmplitudeHistory {
    data: Vec<f64>,
    n_nodes: usize,
    n_elements: usize,
    n_slices: usize,
    completed: usize,
}

impl AmplitudeHistory {
    /// Allocate `n_slices` time levels and store `initial` as level 0.
    pub fn new(initial: &ElementField, n_slices: usize) -> DgResult<Self> {
        if n_slices == 0 {
            return Err(DgError::invalid_parameter("n_slices", "need at least one time level"));
        }

        let slice_len = initial.data.len();
        let too_large = || {
            DgError::invalid_parameter(
                "n_slices",
                format!("{n_slices} time levels of {slice_len} values do not fit in memory"),
            )
        };
        let total = slice_len.checked_mul(n_slices).ok_or_else(too_large)?;
        let mut data = Vec::new();
        data.try_reserve_exact(total).map_err(|_| too_large())?;
        data.extend_from_slice(&initial.data);
        data.resize(total, 0.0);

        Ok(Self {
            data,
            n_nodes: initial.n_nodes,
            n_elements: initial.n_elements,
            n_slices,
            completed: 1,
        })
    }

    /// Nodes per element.
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Number of elements.
    pub fn n_elements(&self) -> usize {
        self.n_elements
    }

    /// Allocated time levels.
    pub fn n_slices(&self) -> usize {
        self.n_slices
    }

    /// Time levels written so far (at least 1).
    pub fn completed_slices(&self) -> usize {
        self.completed
    }

    /// Whether every allocated time level has been written.
    pub fn is_complete(&self) -> bool {
        self.completed == self.n_slices
    }

    /// Read-only view of time level t, if already written.
    pub fn slice(&self, t: usize) -> Option<ElementFieldView<'_>> {
        (t < self.completed).then(|| self.view(t))
    }

    /// Most recently written time level.
    pub fn latest(&self) -> ElementFieldView<'_> {
        self.view(self.completed - 1)
    }

    /// Value u[p, e, t], if time level t has been written.
    pub fn get(&self, p: usize, e: usize, t: usize) -> Option<f64> {
        if p >= self.n_nodes || e >= self.n_elements {
            return None;
        }
        self.slice(t).map(|s| s.value(p, e))
    }

    /// Iterate over written time levels in order.
    pub fn iter(&self) -> impl Iterator<Item = ElementFieldView<'_>> + '_ {
        (0..self.completed).map(move |t| self.view(t))
    }

    /// Write the next time level and return its index.
    pub(crate) fn push(&mut self, next: &ElementField) -> DgResult<usize> {
        if self.is_complete() {
            return Err(DgError::InvalidState {
                action: "write a time level",
                state: "the history is full",
            });
        }
        let len = self.slice_len();
        if next.data.len() != len {
            return Err(DgError::dimension_mismatch(
                format!("{len} values"),
                format!("{} values", next.data.len()),
            ));
        }

        let t = self.completed;
        self.data[t * len..(t + 1) * len].copy_from_slice(&next.data);
        self.completed += 1;
        Ok(t)
    }

    fn slice_len(&self) -> usize {
        self.n_nodes * self.n_elements
    }

    fn view(&self, t: usize) -> ElementFieldView<'_> {
        let len = self.slice_len();
        ElementFieldView::new(&self.data[t * len..(t + 1) * len], self.n_elements, self.n_nodes)
    }
}
