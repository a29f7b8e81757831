//! Polynomial basis representations.
//!
//! Nodal Lagrange basis anchored at the LGL nodes, together with the lookup
//! tables (derivatives, pairwise products, endpoint values) the DG operators
//! are assembled from.

mod lagrange;
mod table;

pub use lagrange::{LagrangeBasis, derivative, lagrange_polynomials, product_table};
pub use table::BasisTable;
