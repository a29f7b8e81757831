//! Physical and Lax-Friedrichs numerical flux for linear advection.
//!
//! For ∂u/∂t + ∂F(u)/∂x = 0 with F(u) = c u, the flux through the interface
//! between a left state u⁻ and a right state u⁺ is
//!
//! F* = (F(u⁺) + F(u⁻)) / 2 - c_lax / 2 · (u⁺ - u⁻)
//!
//! Choosing c_lax = |c| recovers the upwind flux for linear advection.

/// Physical flux F(u) = c u.
#[inline]
pub fn physical_flux(wave_speed: f64, u: f64) -> f64 {
    wave_speed * u
}

/// Lax-Friedrichs flux at an interface.
///
/// # Arguments
/// * `u_minus` - State on the left side (right node of the left element)
/// * `u_plus` - State on the right side (left node of the right element)
/// * `wave_speed` - Advection speed c
/// * `c_lax` - Dissipation coefficient
#[inline]
pub fn lax_friedrichs_flux(u_minus: f64, u_plus: f64, wave_speed: f64, c_lax: f64) -> f64 {
    let f_minus = physical_flux(wave_speed, u_minus);
    let f_plus = physical_flux(wave_speed, u_plus);
    0.5 * (f_plus + f_minus) - 0.5 * c_lax * (u_plus - u_minus)
}
