//! Right-hand side of the DG weak form for linear advection.
//!
//! Multiplying ∂u/∂t + ∂F(u)/∂x = 0 by L_p and integrating by parts over
//! element e gives
//!
//! Σ_i A_{pi} du_{ie}/dt = ∫ F(u_e) dL_p/dξ dξ - [L_p(1) f_e - L_p(-1) f_{e-1}]
//!
//! where f_e is the Lax-Friedrichs flux through the right face of element e.
//! The first term is the volume integral, the bracket the surface term.
//! Neighbour indices wrap modulo the element count (periodic domain).

use crate::basis::{BasisTable, LagrangeBasis};
use crate::flux::lax_friedrichs_flux;
use crate::mesh::Mesh1D;
use crate::simulation::WaveProblem;

use super::field::{ElementField, ElementFieldView};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evaluator for the volume integral, interface flux, surface term and the
/// explicit update vector of one time step.
#[derive(Clone, Copy)]
pub struct WaveRhs<'a> {
    basis: &'a LagrangeBasis,
    mesh: &'a Mesh1D,
    volume: &'a BasisTable,
    /// Advection speed c
    pub wave_speed: f64,
    /// Lax-Friedrichs dissipation coefficient
    pub c_lax: f64,
    /// Time step Δt
    pub dt: f64,
}

impl<'a> WaveRhs<'a> {
    /// Create an evaluator from precomputed tables.
    pub fn new(
        basis: &'a LagrangeBasis,
        mesh: &'a Mesh1D,
        volume: &'a BasisTable,
        wave_speed: f64,
        c_lax: f64,
        dt: f64,
    ) -> Self {
        Self {
            basis,
            mesh,
            volume,
            wave_speed,
            c_lax,
            dt,
        }
    }

    /// Create an evaluator for a prepared problem and time step.
    pub fn from_problem(problem: &'a WaveProblem, dt: f64) -> Self {
        Self::new(
            &problem.basis,
            &problem.mesh,
            &problem.volume_table,
            problem.config.wave_speed,
            problem.config.c_lax,
            dt,
        )
    }

    /// Physical flux c u applied to every nodal value.
    pub fn physical_flux(&self, u: ElementFieldView<'_>) -> ElementField {
        let mut flux = u.to_field();
        flux.scale(self.wave_speed);
        flux
    }

    /// ∫ F(u_e) dL_p/dξ dξ for every (p, e).
    pub fn volume_integral(&self, u: ElementFieldView<'_>) -> ElementField {
        let mut out = ElementField::new(u.n_elements, u.n_nodes);
        for e in 0..u.n_elements {
            let values = self.element_volume_integral(u.element(e));
            out.element_mut(e).copy_from_slice(&values);
        }
        out
    }

    /// Lax-Friedrichs flux through the right face of every element.
    ///
    /// Entry e couples the last node of element e with the first node of
    /// element (e + 1) mod n_elements.
    pub fn interface_flux(&self, u: ElementFieldView<'_>) -> Vec<f64> {
        let last = u.n_nodes - 1;
        (0..u.n_elements)
            .map(|e| {
                let right = self.mesh.right_neighbor(e);
                lax_friedrichs_flux(
                    u.value(last, e),
                    u.value(0, right),
                    self.wave_speed,
                    self.c_lax,
                )
            })
            .collect()
    }

    /// L_p(1) f_e - L_p(-1) f_{e-1} for every (p, e).
    pub fn surface_term(&self, u: ElementFieldView<'_>) -> ElementField {
        let fluxes = self.interface_flux(u);
        let mut out = ElementField::new(u.n_elements, u.n_nodes);
        for e in 0..u.n_elements {
            let values = self.element_surface_term(&fluxes, e);
            out.element_mut(e).copy_from_slice(&values);
        }
        out
    }

    /// Δt (volume_integral - surface_term).
    pub fn rhs_vector(&self, u: ElementFieldView<'_>) -> ElementField {
        let fluxes = self.interface_flux(u);
        let mut out = ElementField::new(u.n_elements, u.n_nodes);
        for e in 0..u.n_elements {
            let values = self.element_rhs(u, &fluxes, e);
            out.element_mut(e).copy_from_slice(&values);
        }
        out
    }

    /// Parallel version of [`Self::rhs_vector`], one rayon task per element.
    ///
    /// Each element runs the same arithmetic as the serial path, so the
    /// result is bit-identical.
    #[cfg(feature = "parallel")]
    pub fn rhs_vector_parallel(&self, u: ElementFieldView<'_>) -> ElementField {
        let fluxes = self.interface_flux(u);
        let data: Vec<f64> = (0..u.n_elements)
            .into_par_iter()
            .flat_map_iter(|e| self.element_rhs(u, &fluxes, e))
            .collect();

        ElementField {
            data,
            n_elements: u.n_elements,
            n_nodes: u.n_nodes,
        }
    }

    fn element_rhs(&self, u: ElementFieldView<'_>, fluxes: &[f64], e: usize) -> Vec<f64> {
        let volume = self.element_volume_integral(u.element(e));
        let surface = self.element_surface_term(fluxes, e);
        volume
            .iter()
            .zip(&surface)
            .map(|(&v, &s)| self.dt * (v - s))
            .collect()
    }

    /// Interpolate the element's state to the volume points, apply the
    /// flux, and integrate against each basis derivative.
    fn element_volume_integral(&self, u_e: &[f64]) -> Vec<f64> {
        let table = self.volume;
        let mut out = vec![0.0; table.n_basis];
        for k in 0..table.n_points() {
            let weighted_flux = table.weights[k] * self.wave_speed * table.interpolate(k, u_e);
            for (p, v) in out.iter_mut().enumerate() {
                *v += weighted_flux * table.derivative(k, p);
            }
        }
        out
    }

    fn element_surface_term(&self, fluxes: &[f64], e: usize) -> Vec<f64> {
        let f_right = fluxes[e];
        let f_left = fluxes[self.mesh.left_neighbor(e)];
        self.basis
            .right_values
            .iter()
            .zip(&self.basis.left_values)
            .map(|(&l_right, &l_left)| l_right * f_right - l_left * f_left)
            .collect()
    }
}
