//! Legendre polynomial evaluation.
//!
//! Legendre polynomials P_n(x) are orthogonal on [-1, 1] with weight 1.
//! Both quadrature families in this crate are built from them: Gauss nodes
//! are the roots of P_n, Gauss-Lobatto nodes are the roots of (1-x²)P'_{n-1}.

/// Distance from ±1 below which the closed-form endpoint derivative is used.
const ENDPOINT_TOL: f64 = 1e-14;

/// Evaluate P_n(x) with the three-term recurrence
/// (k+1) P_{k+1}(x) = (2k+1) x P_k(x) - k P_{k-1}(x).
pub fn legendre(n: usize, x: f64) -> f64 {
    recurrence(n, x).0
}

/// Evaluate P'_n(x).
pub fn legendre_derivative(n: usize, x: f64) -> f64 {
    legendre_and_derivative(n, x).1
}

/// Evaluate P_n(x) and P'_n(x) from a single recurrence sweep.
///
/// The derivative uses P'_n(x) = n (x P_n(x) - P_{n-1}(x)) / (x² - 1) in the
/// interior and P'_n(±1) = (±1)^{n+1} n(n+1)/2 at the endpoints.
pub fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }

    let (p_n, p_n_minus_1) = recurrence(n, x);
    let endpoint = (n * (n + 1)) as f64 / 2.0;

    let dp_n = if (x - 1.0).abs() < ENDPOINT_TOL {
        endpoint
    } else if (x + 1.0).abs() < ENDPOINT_TOL {
        if n % 2 == 0 { -endpoint } else { endpoint }
    } else {
        n as f64 * (x * p_n - p_n_minus_1) / (x * x - 1.0)
    };

    (p_n, dp_n)
}

/// Returns (P_n(x), P_{n-1}(x)); P_{-1} is taken as 0.
fn recurrence(n: usize, x: f64) -> (f64, f64) {
    let mut p_prev = 0.0;
    let mut p_curr = 1.0;

    for k in 0..n {
        let p_next = ((2 * k + 1) as f64 * x * p_curr - k as f64 * p_prev) / (k + 1) as f64;
        p_prev = p_curr;
        p_curr = p_next;
    }

    (p_curr, p_prev)
}
