//! Simulation configuration.
//!
//! [`WaveConfig`] holds every physical and discretization parameter and is
//! handed to [`crate::simulation::WaveProblem::new`] once. [`TimeStepping`]
//! holds the resolved time step and number of time levels.

use crate::error::{DgError, DgResult};
use crate::quadrature::QuadratureScheme;

/// Width parameter of the default Gaussian pulse.
pub const GAUSSIAN_WIDTH: f64 = 0.4;

/// Divisor of the stability heuristic Δt = Δx_min / (20 c).
pub const CFL_DIVISOR: f64 = 20.0;

/// Default initial condition u0(x) = exp(-x² / 0.4²).
pub fn gaussian_pulse(x: f64) -> f64 {
    (-(x * x) / (GAUSSIAN_WIDTH * GAUSSIAN_WIDTH)).exp()
}

/// Quadrature scheme and point count for one kind of integral.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadratureSpec {
    /// Quadrature family
    pub scheme: QuadratureScheme,
    /// Number of points
    pub points: usize,
}

impl QuadratureSpec {
    /// Gauss-Legendre with `points` points.
    pub fn gauss(points: usize) -> Self {
        Self {
            scheme: QuadratureScheme::Gauss,
            points,
        }
    }

    /// Gauss-Lobatto-Legendre with `points` points.
    pub fn lobatto(points: usize) -> Self {
        Self {
            scheme: QuadratureScheme::GaussLobatto,
            points,
        }
    }
}

/// How dx/dξ is obtained when assembling the operator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JacobianMethod {
    /// Closed form (x1 - x0) / 2.
    #[default]
    Analytical,
    /// Central difference averaged over the LGL nodes.
    Numerical,
}

/// Parameters of a wave simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveConfig {
    /// Left end of the domain
    pub x_left: f64,
    /// Right end of the domain
    pub x_right: f64,
    /// Number of elements
    pub n_elements: usize,
    /// LGL nodes per element
    pub n_lgl: usize,
    /// Wave speed c in F(u) = c u
    pub wave_speed: f64,
    /// Lax-Friedrichs dissipation coefficient
    pub c_lax: f64,
    /// Total simulated time
    pub total_time: f64,
    /// Rule for the operator A
    pub operator_quadrature: QuadratureSpec,
    /// Rule for the volume integral
    pub volume_quadrature: QuadratureSpec,
    /// Jacobian used to scale A
    pub jacobian: JacobianMethod,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self::new(8, 10)
    }
}

impl WaveConfig {
    /// Configuration on [-1, 1] with c = c_lax = 1 and total time 10.
    ///
    /// Both quadrature rules use n_lgl + 1 points: Gauss-Lobatto for A,
    /// Gauss for the volume integral.
    pub fn new(n_lgl: usize, n_elements: usize) -> Self {
        Self {
            x_left: -1.0,
            x_right: 1.0,
            n_elements,
            n_lgl,
            wave_speed: 1.0,
            c_lax: 1.0,
            total_time: 10.0,
            operator_quadrature: QuadratureSpec::lobatto(n_lgl + 1),
            volume_quadrature: QuadratureSpec::gauss(n_lgl + 1),
            jacobian: JacobianMethod::Analytical,
        }
    }

    /// Set the domain bounds.
    pub fn with_domain(mut self, x_left: f64, x_right: f64) -> Self {
        self.x_left = x_left;
        self.x_right = x_right;
        self
    }

    /// Set the wave speed.
    pub fn with_wave_speed(mut self, wave_speed: f64) -> Self {
        self.wave_speed = wave_speed;
        self
    }

    /// Set the Lax-Friedrichs coefficient.
    pub fn with_c_lax(mut self, c_lax: f64) -> Self {
        self.c_lax = c_lax;
        self
    }

    /// Set the total simulated time.
    pub fn with_total_time(mut self, total_time: f64) -> Self {
        self.total_time = total_time;
        self
    }

    /// Set the operator quadrature rule.
    pub fn with_operator_quadrature(mut self, spec: QuadratureSpec) -> Self {
        self.operator_quadrature = spec;
        self
    }

    /// Set the volume integral quadrature rule.
    pub fn with_volume_quadrature(mut self, spec: QuadratureSpec) -> Self {
        self.volume_quadrature = spec;
        self
    }

    /// Set the Jacobian method.
    pub fn with_jacobian(mut self, jacobian: JacobianMethod) -> Self {
        self.jacobian = jacobian;
        self
    }

    /// Check the parameters the solver depends on.
    pub fn validate(&self) -> DgResult<()> {
        if self.n_lgl < 2 {
            return Err(DgError::InvalidNodeCount(self.n_lgl));
        }
        if self.n_elements == 0 {
            return Err(DgError::InvalidElementCount(self.n_elements));
        }
        let finite_domain = self.x_left.is_finite() && self.x_right.is_finite();
        if !finite_domain || !(self.x_right > self.x_left) {
            return Err(DgError::DegenerateDomain {
                x_left: self.x_left,
                x_right: self.x_right,
            });
        }
        if !self.wave_speed.is_finite() {
            return Err(DgError::invalid_parameter("wave_speed", "must be finite"));
        }
        if !self.c_lax.is_finite() {
            return Err(DgError::invalid_parameter("c_lax", "must be finite"));
        }
        if !self.total_time.is_finite() || self.total_time < 0.0 {
            return Err(DgError::invalid_parameter("total_time", "must be finite and non-negative"));
        }
        for spec in [self.operator_quadrature, self.volume_quadrature] {
            if spec.points < spec.scheme.min_points() {
                return Err(DgError::InvalidQuadrature {
                    scheme: spec.scheme,
                    points: spec.points,
                    min: spec.scheme.min_points(),
                });
            }
        }
        Ok(())
    }
}

/// Resolved time-step inputs of the driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeStepping {
    /// Time step Δt
    pub dt: f64,
    /// Number of time levels, including the initial condition
    pub n_slices: usize,
}

impl TimeStepping {
    /// Validate and wrap explicit values.
    pub fn new(dt: f64, n_slices: usize) -> DgResult<Self> {
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(DgError::InvalidTimeStep(dt));
        }
        if n_slices == 0 {
            return Err(DgError::invalid_parameter("n_slices", "need at least one time level"));
        }
        Ok(Self { dt, n_slices })
    }

    /// Δt = dx_min / (20 |c|), n_slices = ⌊total_time / Δt⌋ (at least 1).
    pub fn from_stability_heuristic(
        dx_min: f64,
        wave_speed: f64,
        total_time: f64,
    ) -> DgResult<Self> {
        let speed = wave_speed.abs();
        if !(speed > 0.0) {
            return Err(DgError::invalid_parameter(
                "wave_speed",
                "stability heuristic needs a non-zero wave speed",
            ));
        }
        if !total_time.is_finite() || total_time < 0.0 {
            return Err(DgError::invalid_parameter("total_time", "must be finite and non-negative"));
        }

        let dt = dx_min / (CFL_DIVISOR * speed);
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(DgError::InvalidTimeStep(dt));
        }
        let n_slices = ((total_time / dt).floor() as usize).max(1);
        Self::new(dt, n_slices)
    }

    /// Number of explicit updates (n_slices - 1).
    pub fn n_steps(&self) -> usize {
        self.n_slices - 1
    }

    /// Simulated time reached after the last step.
    pub fn final_time(&self) -> f64 {
        self.n_steps() as f64 * self.dt
    }

    /// Same Δt, different number of time levels.
    pub fn with_slices(self, n_slices: usize) -> DgResult<Self> {
        Self::new(self.dt, n_slices)
    }
}
