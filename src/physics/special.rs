//! Special functions used by the analytical solutions
//!
//! # Mathematical Background
//!
//! Two families of special functions carry essentially all the analytical
//! hydrogeology in this crate:
//!
//! - The **exponential integral** E₁(u), known in well hydraulics as the
//!   *Theis well function* W(u):
//!
//!   ```text
//!   W(u) = E₁(u) = ∫_u^∞ e^(-t)/t dt,   u > 0
//!   ```
//!
//!   It diverges logarithmically as u → 0⁺ (W(u) ≈ -γ - ln u) and decays
//!   like e^(-u)/u for large u.
//!
//! - The **error function** erf(x) and its complement erfc(x), which carry
//!   the advection-dispersion (Ogata-Banks) and conduction solutions.
//!
//! # Implementation
//!
//! erf/erfc delegate to `libm` (C99 implementations, accurate to full double
//! precision). E₁ uses the standard split every numerical library applies:
//! a convergent power series for u ≤ 1 and a modified Lentz continued
//! fraction for u > 1. Both converge to machine precision well within the
//! iteration caps; hand-tuned approximations are deliberately avoided.
//!
//! # Contract
//!
//! - `well_function(u)`: +∞ as u → 0 (and for u = 0), NaN for u < 0.
//!   Callers must guard the r → 0 / t → 0 cases *before* calling — the
//!   superposition engine does this by flooring the radius at the well
//!   radius.
//! - `erf`, `erfc`: total functions on ℝ, no side effects.

/// Euler-Mascheroni constant γ.
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Iteration cap for the series / continued fraction.
///
/// Both expansions reach f64 precision in well under 40 terms over their
/// respective domains; 100 leaves a wide margin.
const MAX_TERMS: usize = 100;

/// Smallest representable pivot for the Lentz continued fraction.
const FPMIN: f64 = f64::MIN_POSITIVE / f64::EPSILON;

// =================================================================================================
// Theis well function W(u) = E1(u)
// =================================================================================================

/// Theis well function W(u) = E₁(u), the exponential integral.
///
/// # Domain
///
/// - `u > 0`: finite positive value
/// - `u == 0`: `+∞` (the Theis solution is singular at r = 0 / t = ∞)
/// - `u < 0`: `NaN` (outside the physical domain of the drawdown solution)
///
/// # Accuracy
///
/// Relative error below 1e-14 across the physically relevant range
/// (u from ~1e-15 up to ~700, beyond which the result underflows to 0).
///
/// # Example
///
/// ```rust
/// use hydrogeo_rs::physics::special::well_function;
///
/// // Tabulated value: W(1) = 0.2193839...
/// assert!((well_function(1.0) - 0.219_383_934).abs() < 1e-8);
///
/// // Logarithmic divergence near zero
/// assert!(well_function(1e-10) > 22.0);
/// ```
pub fn well_function(u: f64) -> f64 {
    if u.is_nan() || u < 0.0 {
        return f64::NAN;
    }
    if u == 0.0 {
        return f64::INFINITY;
    }

    if u <= 1.0 {
        e1_series(u)
    } else {
        e1_continued_fraction(u)
    }
}

/// Power series for E₁(u), u ∈ (0, 1]:
///
/// ```text
/// E₁(u) = -γ - ln u + Σ_{k≥1} (-1)^{k+1} u^k / (k · k!)
/// ```
///
/// Alternating and rapidly convergent on this interval.
fn e1_series(u: f64) -> f64 {
    let mut sum = -EULER_GAMMA - u.ln();
    let mut factor = 1.0; // (-u)^k / k!

    for k in 1..=MAX_TERMS {
        factor *= -u / k as f64;
        let term = -factor / k as f64;
        sum += term;
        if term.abs() < sum.abs() * f64::EPSILON {
            break;
        }
    }

    sum
}

/// Modified Lentz continued fraction for E₁(u), u > 1:
///
/// ```text
/// E₁(u) = e^(-u) · ( 1/(u+1-) 1/(u+3-) 4/(u+5-) 9/(u+7-) ... )
/// ```
///
/// Converges in a handful of terms for u > 1 and stays accurate into the
/// underflow regime.
fn e1_continued_fraction(u: f64) -> f64 {
    let mut b = u + 1.0;
    let mut c = 1.0 / FPMIN;
    let mut d = 1.0 / b;
    let mut h = d;

    for i in 1..=MAX_TERMS {
        let a = -((i * i) as f64);
        b += 2.0;
        d = 1.0 / (a * d + b);
        c = b + a / c;
        let delta = c * d;
        h *= delta;
        if (delta - 1.0).abs() < f64::EPSILON {
            break;
        }
    }

    h * (-u).exp()
}

// =================================================================================================
// Error functions
// =================================================================================================

/// Error function erf(x). Total on ℝ, delegates to `libm`.
#[inline]
pub fn erf(x: f64) -> f64 {
    libm::erf(x)
}

/// Complementary error function erfc(x) = 1 - erf(x). Total on ℝ.
///
/// Prefer this over `1.0 - erf(x)` for large positive x, where the direct
/// subtraction loses all significant digits.
#[inline]
pub fn erfc(x: f64) -> f64 {
    libm::erfc(x)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Reference values computed with scipy.special.exp1 / erf.

    #[test]
    fn test_well_function_tabulated_values() {
        assert_relative_eq!(well_function(0.01), 4.037_929_576_538_113, max_relative = 1e-12);
        assert_relative_eq!(well_function(0.1), 1.822_923_958_119_390, max_relative = 1e-12);
        assert_relative_eq!(well_function(1.0), 0.219_383_934_395_520_3, max_relative = 1e-12);
        assert_relative_eq!(well_function(5.0), 1.148_295_591_275_326e-3, max_relative = 1e-12);
        assert_relative_eq!(well_function(10.0), 4.156_968_929_685_325e-6, max_relative = 1e-12);
    }

    #[test]
    fn test_well_function_logarithmic_limit() {
        // W(u) -> -gamma - ln(u) as u -> 0
        for u in [1e-6, 1e-9, 1e-12] {
            let expected = -EULER_GAMMA - f64::ln(u);
            assert_relative_eq!(well_function(u), expected, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_well_function_is_monotonically_decreasing() {
        let us = [1e-8, 1e-4, 0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 20.0];
        for pair in us.windows(2) {
            assert!(
                well_function(pair[0]) > well_function(pair[1]),
                "W(u) must decrease: W({}) vs W({})",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_well_function_edge_cases() {
        assert!(well_function(0.0).is_infinite());
        assert!(well_function(-1.0).is_nan());
        assert!(well_function(f64::NAN).is_nan());
        // Deep in the exponential tail the value underflows cleanly to zero.
        assert_eq!(well_function(800.0), 0.0);
    }

    #[test]
    fn test_series_and_fraction_agree_at_the_seam() {
        // Both branches must produce the same value at u = 1.
        assert_relative_eq!(e1_series(1.0), e1_continued_fraction(1.0), max_relative = 1e-12);
    }

    #[test]
    fn test_erf_tabulated_values() {
        assert_relative_eq!(erf(1.0), 0.842_700_792_949_714_9, max_relative = 1e-14);
        assert_relative_eq!(erfc(2.0), 4.677_734_981_063_133e-3, max_relative = 1e-12);
        assert_relative_eq!(erf(0.0), 0.0);
        assert_relative_eq!(erfc(0.0), 1.0);
    }

    #[test]
    fn test_erf_symmetry_and_complement() {
        for x in [-3.0, -1.0, -0.2, 0.4, 1.7, 4.0] {
            assert_relative_eq!(erf(-x), -erf(x), max_relative = 1e-14);
            assert_relative_eq!(erf(x) + erfc(x), 1.0, max_relative = 1e-12);
        }
    }
}
