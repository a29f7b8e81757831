//! Error and warning types.
//!
//! Every failure in this crate is fatal for the run it belongs to: there is no
//! retry path, since the computation is deterministic. Quadrature order
//! problems are not failures; they are reported as [`QuadratureOrderWarning`]
//! values so callers can inspect them.

use std::fmt;

use thiserror::Error;

use crate::quadrature::QuadratureScheme;

/// Errors raised while setting up or running a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DgError {
    /// Fewer than two LGL nodes were requested.
    #[error("Invalid node count: need at least 2 LGL nodes, got {0}")]
    InvalidNodeCount(usize),

    /// The mesh must contain at least one element.
    #[error("Invalid element count: need at least 1 element, got {0}")]
    InvalidElementCount(usize),

    /// Time step must be strictly positive and finite.
    #[error("Invalid time step: dt must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    /// Domain has zero or negative length.
    #[error("Degenerate domain: [{x_left}, {x_right}] has no positive length")]
    DegenerateDomain { x_left: f64, x_right: f64 },

    /// A quadrature rule was requested with too few points.
    #[error("Invalid quadrature: {scheme} needs at least {min} points, got {points}")]
    InvalidQuadrature {
        scheme: QuadratureScheme,
        points: usize,
        min: usize,
    },

    /// Two interpolation nodes coincide, so no Lagrange basis exists.
    #[error("Duplicate interpolation nodes at indices {0} and {1}")]
    DuplicateNodes(usize, usize),

    /// A physical parameter is out of range.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Array shapes do not agree.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// The assembled operator could not be inverted.
    #[error("Singular operator: A * A^-1 deviates from identity by {residual:e}")]
    SingularOperator { residual: f64 },

    /// A driver operation was called in the wrong lifecycle state.
    #[error("Invalid state: cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },
}

impl DgError {
    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Whether this error stems from the configuration rather than the numerics.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::SingularOperator { .. } | Self::InvalidState { .. })
    }
}

/// Result alias used throughout the crate.
pub type DgResult<T> = Result<T, DgError>;

/// A quadrature rule too coarse to integrate its integrand exactly.
///
/// The computation still proceeds, but the integral carries a truncation
/// error.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureOrderWarning {
    /// Which integral the rule was used for.
    pub context: &'static str,
    /// Quadrature scheme.
    pub scheme: QuadratureScheme,
    /// Number of quadrature points.
    pub points: usize,
    /// Highest polynomial degree the rule integrates exactly.
    pub exact_degree: usize,
    /// Degree of the integrand.
    pub required_degree: usize,
}

impl fmt::Display for QuadratureOrderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} rule with {} points is exact up to degree {}, integrand has degree {}",
            self.context, self.scheme, self.points, self.exact_degree, self.required_degree
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        assert!(DgError::InvalidNodeCount(1).is_configuration_error());
        assert!(DgError::InvalidTimeStep(0.0).is_configuration_error());
        assert!(!DgError::SingularOperator { residual: 1.0 }.is_configuration_error());
        assert!(
            !DgError::InvalidState {
                action: "step",
                state: "initialized"
            }
            .is_configuration_error()
        );
    }

    #[test]
    fn test_error_messages() {
        let err = DgError::DegenerateDomain {
            x_left: 1.0,
            x_right: 1.0,
        };
        assert!(err.to_string().contains("[1, 1]"));

        let err = DgError::dimension_mismatch("8 x 10", "8 x 9");
        assert_eq!(err.to_string(), "Dimension mismatch: expected 8 x 10, got 8 x 9");
    }

    #[test]
    fn test_warning_display() {
        let warning = QuadratureOrderWarning {
            context: "volume integral",
            scheme: QuadratureScheme::Gauss,
            points: 3,
            exact_degree: 5,
            required_degree: 13,
        };
        let text = warning.to_string();
        assert!(text.starts_with("volume integral"));
        assert!(text.contains("degree 13"));
    }
}
