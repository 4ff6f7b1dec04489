//! Implicit-equation solvers
//!
//! # Why this module exists
//!
//! Several analytical aquifer quantities are defined implicitly:
//!
//! - the Thiem/Sichardt **radius of influence** R depends on the drawdown
//!   at the well, which itself depends on R,
//! - the **MNW well-loss equation** Q = Δh/(A + B + C·Q^(P-1)) defines the
//!   discharge Q through its own nonlinear loss term,
//! - the **unconfined correction** couples drawdown to the remaining
//!   saturated thickness.
//!
//! The interactive tools this crate grew out of solved each of these with
//! its own ad hoc `while` loop and hard-coded break conditions. Here they
//! share one abstraction with an explicit, tested convergence contract.
//!
//! # State machine
//!
//! ```text
//! Seed ──► Iterate ──► Converged
//!               │
//!               ├─────► MaxIterExceeded   (budget spent; last iterate kept)
//!               └─────► DomainInvalid     (iterate left the physical domain)
//! ```
//!
//! The three right-hand states are terminal. None of them is an `Err`:
//! non-convergence and domain exits are expected outcomes of exploring
//! parameter space, and the caller decides whether to warn, annotate, or
//! accept. Only programmer errors (zero tolerance, zero iteration budget)
//! fail fast with a panic at construction.

use log::warn;

// =================================================================================================
// Solve outcome
// =================================================================================================

/// Terminal state of an iterative solve.
///
/// Carries the last iterate in every variant that has one, so a caller can
/// choose to accept an approximate result after `MaxIterExceeded`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolveOutcome {
    /// |x_{k+1} - x_k| dropped below the tolerance.
    Converged {
        /// Final iterate
        value: f64,
        /// Number of iterations actually performed
        iterations: usize,
    },

    /// The iteration budget was spent without meeting the tolerance.
    MaxIterExceeded {
        /// Last iterate (approximate result)
        last: f64,
    },

    /// An iterate left the physical domain (e.g. the saturated thickness
    /// went negative: the well runs dry). No value is meaningful.
    DomainInvalid,
}

impl SolveOutcome {
    /// The final or last iterate, if the solve stayed in-domain.
    pub fn value(&self) -> Option<f64> {
        match self {
            SolveOutcome::Converged { value, .. } => Some(*value),
            SolveOutcome::MaxIterExceeded { last } => Some(*last),
            SolveOutcome::DomainInvalid => None,
        }
    }

    /// Whether the solve converged within its budget.
    pub fn converged(&self) -> bool {
        matches!(self, SolveOutcome::Converged { .. })
    }
}

// =================================================================================================
// Fixed-point iteration
// =================================================================================================

/// Fixed-point iteration x_{k+1} = g(x_k) with tolerance and iteration cap.
///
/// # Contract
///
/// - Stops as soon as |x_{k+1} - x_k| < tolerance → `Converged`.
/// - Stops after `max_iterations` steps → `MaxIterExceeded` with the last
///   iterate (the caller may warn and still use it).
/// - A step function may signal that the iterate left the physical domain
///   by returning `None` (see [`FixedPointSolver::solve_guarded`]) →
///   `DomainInvalid`.
///
/// # Example
///
/// ```rust
/// use hydrogeo_rs::solver::FixedPointSolver;
///
/// // x = cos(x) has the Dottie fixed point 0.739085...
/// let solver = FixedPointSolver::new(1e-12, 1000);
/// let outcome = solver.solve(1.0, |x| x.cos());
///
/// assert!(outcome.converged());
/// assert!((outcome.value().unwrap() - 0.739_085_133_2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedPointSolver {
    tolerance: f64,
    max_iterations: usize,
}

impl FixedPointSolver {
    /// Creates a fixed-point solver.
    ///
    /// # Panics
    ///
    /// Panics when `tolerance` is not strictly positive or
    /// `max_iterations` is zero. Both are programmer errors, not physical
    /// edge cases.
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        assert!(
            tolerance > 0.0,
            "tolerance must be strictly positive, got {}",
            tolerance
        );
        assert!(max_iterations > 0, "iteration budget must be at least 1");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Convergence tolerance on |x_{k+1} - x_k|
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Iteration cap
    #[inline]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Iterate x_{k+1} = g(x_k) from `seed`.
    pub fn solve<G>(&self, seed: f64, step: G) -> SolveOutcome
    where
        G: Fn(f64) -> f64,
    {
        self.solve_guarded(seed, |x| Some(step(x)))
    }

    /// Iterate with a step that may leave the physical domain.
    ///
    /// `step` returns `None` to signal a physically invalid iterate
    /// (negative saturated thickness, log of a non-positive ratio, ...);
    /// the solve then terminates in `DomainInvalid`.
    pub fn solve_guarded<G>(&self, seed: f64, step: G) -> SolveOutcome
    where
        G: Fn(f64) -> Option<f64>,
    {
        let mut current = seed;

        for iteration in 1..=self.max_iterations {
            let next = match step(current) {
                Some(x) => x,
                None => return SolveOutcome::DomainInvalid,
            };

            if (next - current).abs() < self.tolerance {
                return SolveOutcome::Converged {
                    value: next,
                    iterations: iteration,
                };
            }

            current = next;
        }

        warn!(
            "fixed-point iteration spent its budget of {} steps (tol {:.1e}); returning last iterate {:.6e}",
            self.max_iterations, self.tolerance, current
        );
        SolveOutcome::MaxIterExceeded { last: current }
    }
}

// =================================================================================================
// Newton and bisection for monotonic residuals
// =================================================================================================

/// Newton iteration for f(x) = 0, for residuals that are monotonic over the
/// physically valid range (the MNW discharge equation is the main client).
///
/// Falls back to `MaxIterExceeded` rather than diverging: a vanishing
/// derivative terminates the solve as `DomainInvalid` since Newton cannot
/// proceed from there.
pub fn newton<F, D>(f: F, df: D, seed: f64, tolerance: f64, max_iterations: usize) -> SolveOutcome
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    assert!(tolerance > 0.0, "tolerance must be strictly positive");
    assert!(max_iterations > 0, "iteration budget must be at least 1");

    let mut current = seed;

    for iteration in 1..=max_iterations {
        let residual = f(current);
        let slope = df(current);

        if slope == 0.0 || !slope.is_finite() || !residual.is_finite() {
            return SolveOutcome::DomainInvalid;
        }

        let next = current - residual / slope;

        if (next - current).abs() < tolerance {
            return SolveOutcome::Converged {
                value: next,
                iterations: iteration,
            };
        }

        current = next;
    }

    warn!(
        "Newton iteration spent its budget of {} steps (tol {:.1e}); returning last iterate {:.6e}",
        max_iterations, tolerance, current
    );
    SolveOutcome::MaxIterExceeded { last: current }
}

/// Bisection for f(x) = 0 on a bracketing interval [lo, hi].
///
/// Robust fallback for monotonic residuals when no derivative is at hand.
/// Requires f(lo) and f(hi) to have opposite signs; otherwise the bracket
/// does not contain a root and the solve is `DomainInvalid`.
pub fn bisection<F>(f: F, lo: f64, hi: f64, tolerance: f64, max_iterations: usize) -> SolveOutcome
where
    F: Fn(f64) -> f64,
{
    assert!(tolerance > 0.0, "tolerance must be strictly positive");
    assert!(max_iterations > 0, "iteration budget must be at least 1");
    assert!(lo < hi, "bracket must satisfy lo < hi, got [{}, {}]", lo, hi);

    let mut lo = lo;
    let mut hi = hi;
    let f_lo = f(lo);
    let f_hi = f(hi);

    if !f_lo.is_finite() || !f_hi.is_finite() || f_lo * f_hi > 0.0 {
        return SolveOutcome::DomainInvalid;
    }

    for iteration in 1..=max_iterations {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);

        if !f_mid.is_finite() {
            return SolveOutcome::DomainInvalid;
        }

        if (hi - lo) < tolerance {
            return SolveOutcome::Converged {
                value: mid,
                iterations: iteration,
            };
        }

        if f_lo * f_mid <= 0.0 {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    SolveOutcome::MaxIterExceeded {
        last: 0.5 * (lo + hi),
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_point_converges_to_dottie_number() {
        let solver = FixedPointSolver::new(1e-12, 1000);
        let outcome = solver.solve(0.5, |x| x.cos());

        match outcome {
            SolveOutcome::Converged { value, iterations } => {
                assert_relative_eq!(value, 0.739_085_133_215_160_6, max_relative = 1e-9);
                assert!(iterations < 200);
            }
            other => panic!("expected convergence, got {:?}", other),
        }
    }

    #[test]
    fn test_fixed_point_reports_budget_exhaustion() {
        // x -> x + 1 never converges; the last iterate is still reported.
        let solver = FixedPointSolver::new(1e-9, 10);
        let outcome = solver.solve(0.0, |x| x + 1.0);

        assert_eq!(outcome, SolveOutcome::MaxIterExceeded { last: 10.0 });
        assert!(!outcome.converged());
        assert_eq!(outcome.value(), Some(10.0));
    }

    #[test]
    fn test_fixed_point_guarded_domain_exit() {
        // Iterates shrink below zero -> domain exit on the next step.
        let solver = FixedPointSolver::new(1e-9, 100);
        let outcome = solver.solve_guarded(1.0, |x| {
            let next = x - 0.3;
            (next > 0.0).then_some(next)
        });

        assert_eq!(outcome, SolveOutcome::DomainInvalid);
        assert_eq!(outcome.value(), None);
    }

    #[test]
    #[should_panic(expected = "tolerance must be strictly positive")]
    fn test_zero_tolerance_is_a_programmer_error() {
        FixedPointSolver::new(0.0, 100);
    }

    #[test]
    #[should_panic(expected = "iteration budget must be at least 1")]
    fn test_zero_budget_is_a_programmer_error() {
        FixedPointSolver::new(1e-6, 0);
    }

    #[test]
    fn test_newton_on_square_root() {
        // f(x) = x^2 - 2 has the root sqrt(2).
        let outcome = newton(|x| x * x - 2.0, |x| 2.0 * x, 1.0, 1e-14, 100);
        assert_relative_eq!(
            outcome.value().unwrap(),
            std::f64::consts::SQRT_2,
            max_relative = 1e-12
        );
        assert!(outcome.converged());
    }

    #[test]
    fn test_newton_flat_slope_is_domain_invalid() {
        let outcome = newton(|_| 1.0, |_| 0.0, 1.0, 1e-9, 100);
        assert_eq!(outcome, SolveOutcome::DomainInvalid);
    }

    #[test]
    fn test_bisection_on_cubic() {
        let outcome = bisection(|x| x * x * x - 8.0, 0.0, 10.0, 1e-10, 200);
        assert_relative_eq!(outcome.value().unwrap(), 2.0, max_relative = 1e-8);
    }

    #[test]
    fn test_bisection_rejects_non_bracketing_interval() {
        let outcome = bisection(|x| x * x + 1.0, -1.0, 1.0, 1e-10, 100);
        assert_eq!(outcome, SolveOutcome::DomainInvalid);
    }
}
