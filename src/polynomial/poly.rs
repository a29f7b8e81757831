//! Dense polynomials in coefficient form.
//!
//! Coefficients are stored in ascending powers: `coeffs[k]` multiplies ξ^k.
//! The basis builder, operator assembler and volume integral all work on this
//! representation, so products and derivatives stay exact polynomial algebra
//! rather than pointwise approximations.

use std::ops::{Add, Mul, Neg, Sub};

/// Polynomial with real coefficients in ascending powers.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from ascending coefficients.
    ///
    /// Trailing zeros are stripped so that `degree` is meaningful.
    pub fn new(coeffs: Vec<f64>) -> Self {
        let mut poly = Self { coeffs };
        poly.trim();
        poly
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// A constant polynomial.
    pub fn constant(c: f64) -> Self {
        Self::new(vec![c])
    }

    /// The monic polynomial Π (ξ - r) over the given roots.
    pub fn from_roots(roots: &[f64]) -> Self {
        let mut coeffs = Vec::with_capacity(roots.len() + 1);
        coeffs.push(1.0);

        for &r in roots {
            // Multiply by (ξ - r) in place
            coeffs.push(0.0);
            for k in (1..coeffs.len()).rev() {
                coeffs[k] = coeffs[k - 1] - r * coeffs[k];
            }
            coeffs[0] *= -r;
        }

        Self::new(coeffs)
    }

    /// Ascending coefficients.
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Consume the polynomial and return its coefficients.
    pub fn into_coeffs(self) -> Vec<f64> {
        self.coeffs
    }

    /// Coefficients padded with zeros to `len` entries.
    pub fn coeffs_padded(&self, len: usize) -> Vec<f64> {
        let mut out = self.coeffs.clone();
        out.resize(len.max(out.len()), 0.0);
        out
    }

    /// Polynomial degree. The zero polynomial reports degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Whether all coefficients are zero.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Evaluate with Horner's scheme.
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    /// First derivative.
    pub fn derivative(&self) -> Self {
        if self.coeffs.len() <= 1 {
            return Self::zero();
        }
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(k, &c)| k as f64 * c)
            .collect();
        Self::new(coeffs)
    }

    /// Multiply every coefficient by `s`.
    pub fn scale(&self, s: f64) -> Self {
        Self::new(self.coeffs.iter().map(|&c| c * s).collect())
    }

    /// Add `s * other` to self in place.
    pub fn axpy(&mut self, s: f64, other: &Polynomial) {
        if other.coeffs.len() > self.coeffs.len() {
            self.coeffs.resize(other.coeffs.len(), 0.0);
        }
        for (a, &b) in self.coeffs.iter_mut().zip(&other.coeffs) {
            *a += s * b;
        }
        self.trim();
    }

    /// Exact integral over [-1, 1].
    pub fn integral_reference(&self) -> f64 {
        // ∫ ξ^k = 2/(k+1) for even k, 0 for odd k
        self.coeffs
            .iter()
            .enumerate()
            .step_by(2)
            .map(|(k, &c)| 2.0 * c / (k + 1) as f64)
            .sum()
    }

    fn trim(&mut self) {
        while self.coeffs.last() == Some(&0.0) {
            self.coeffs.pop();
        }
    }
}

impl From<Vec<f64>> for Polynomial {
    fn from(coeffs: Vec<f64>) -> Self {
        Self::new(coeffs)
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        let mut out = self.clone();
        out.axpy(1.0, rhs);
        out
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        let mut out = self.clone();
        out.axpy(-1.0, rhs);
        out
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(-1.0)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        if self.is_zero() || rhs.is_zero() {
            return Polynomial::zero();
        }
        let mut coeffs = vec![0.0; self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Polynomial::new(coeffs)
    }
}

impl Mul<f64> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: f64) -> Polynomial {
        self.scale(rhs)
    }
}
