//! Multi-node well head-discharge relation
//!
//! # Mathematical Background
//!
//! Head loss between aquifer and well bore is modelled MNW-style as the sum
//! of a linear aquifer/skin term and a turbulent well-loss term:
//!
//! ```text
//! Δh = (A + B)·Q + C·Q^P
//! ```
//!
//! with A the cell-to-well (aquifer) loss coefficient, B the linear skin
//! loss, and C, P the nonlinear well-bore loss (P is typically between 1.5
//! and 3.5). Going the other way — what discharge a given available head
//! difference sustains — requires inverting the relation, which has no
//! closed form for C > 0. The residual
//!
//! ```text
//! f(Q) = (A + B)·Q + C·Q^P - Δh
//! ```
//!
//! is strictly increasing for Q ≥ 0, so Newton from the linear-loss seed
//! Q₀ = Δh/(A+B) converges rapidly ([`MnwWell::discharge`]).

use crate::physics::error::DomainError;
use crate::solver::{newton, SolveOutcome};

/// Newton tolerance on Q [m³/s].
const DISCHARGE_TOLERANCE: f64 = 1e-12;

/// Newton budget; the residual is convex and monotone, so convergence is
/// typically reached in well under 10 steps.
const DISCHARGE_MAX_ITERATIONS: usize = 100;

// =================================================================================================
// MNW well
// =================================================================================================

/// Well with MNW-style linear and turbulent head losses.
///
/// # Example
///
/// ```rust
/// use hydrogeo_rs::models::MnwWell;
///
/// let well = MnwWell::new(5.0, 2.0, 50.0, 2.0).unwrap();
///
/// // Losses for 10 L/s: (5+2)·0.01 + 50·0.01² = 0.075 m
/// assert!((well.head_loss(0.01) - 0.075).abs() < 1e-12);
///
/// // Inverting recovers the discharge.
/// let q = well.discharge(0.075).value().unwrap();
/// assert!((q - 0.01).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MnwWell {
    /// Aquifer (cell-to-well) loss coefficient A [s/m²]
    aquifer_loss: f64,

    /// Linear skin loss coefficient B [s/m²]
    skin_loss: f64,

    /// Turbulent well-loss coefficient C [s^P/m^(3P-1)]
    turbulent_loss: f64,

    /// Turbulent loss exponent P [-], ≥ 1
    exponent: f64,
}

impl MnwWell {
    /// Creates the well-loss relation.
    ///
    /// # Errors
    ///
    /// Fails when any coefficient is negative or non-finite, when the
    /// linear part A + B vanishes (the Newton seed would be undefined), or
    /// when P < 1.
    pub fn new(
        aquifer_loss: f64,
        skin_loss: f64,
        turbulent_loss: f64,
        exponent: f64,
    ) -> Result<Self, DomainError> {
        for (name, value) in [
            ("aquifer loss A", aquifer_loss),
            ("skin loss B", skin_loss),
            ("turbulent loss C", turbulent_loss),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::NotPositive { name, value });
            }
        }
        DomainError::require_positive("linear loss A + B", aquifer_loss + skin_loss)?;
        if !exponent.is_finite() || exponent < 1.0 {
            return Err(DomainError::OutOfRange {
                name: "loss exponent P",
                value: exponent,
                low: 1.0,
                high: f64::INFINITY,
            });
        }

        Ok(Self {
            aquifer_loss,
            skin_loss,
            turbulent_loss,
            exponent,
        })
    }

    /// Combined linear loss coefficient A + B [s/m²].
    #[inline]
    pub fn linear_loss(&self) -> f64 {
        self.aquifer_loss + self.skin_loss
    }

    /// Head loss Δh [m] across the well for discharge Q ≥ 0 [m³/s].
    pub fn head_loss(&self, discharge: f64) -> f64 {
        self.linear_loss() * discharge + self.turbulent_loss * discharge.powf(self.exponent)
    }

    /// Discharge Q [m³/s] sustained by an available head difference
    /// Δh ≥ 0 [m].
    ///
    /// Δh = 0 trivially yields Q = 0; a negative head difference has no
    /// meaning in this relation and terminates as
    /// [`SolveOutcome::DomainInvalid`].
    pub fn discharge(&self, head_difference: f64) -> SolveOutcome {
        if head_difference < 0.0 || !head_difference.is_finite() {
            return SolveOutcome::DomainInvalid;
        }
        if head_difference == 0.0 {
            return SolveOutcome::Converged {
                value: 0.0,
                iterations: 0,
            };
        }

        let linear = self.linear_loss();
        let seed = head_difference / linear;

        newton(
            |q| linear * q + self.turbulent_loss * q.powf(self.exponent) - head_difference,
            |q| linear + self.turbulent_loss * self.exponent * q.powf(self.exponent - 1.0),
            seed,
            DISCHARGE_TOLERANCE,
            DISCHARGE_MAX_ITERATIONS,
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn turbulent_well() -> MnwWell {
        MnwWell::new(5.0, 2.0, 50.0, 2.5).unwrap()
    }

    #[test]
    fn test_discharge_inverts_head_loss() {
        let well = turbulent_well();
        for q in [1e-4, 1e-3, 0.01, 0.05, 0.2] {
            let dh = well.head_loss(q);
            let outcome = well.discharge(dh);
            assert!(outcome.converged());
            assert_relative_eq!(outcome.value().unwrap(), q, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_purely_linear_well_matches_closed_form() {
        let well = MnwWell::new(4.0, 1.0, 0.0, 1.0).unwrap();
        let outcome = well.discharge(0.5);
        assert_relative_eq!(outcome.value().unwrap(), 0.1, max_relative = 1e-12);
    }

    #[test]
    fn test_discharge_grows_sublinearly_with_head() {
        // The turbulent term makes each extra metre of head buy less
        // additional discharge.
        let well = turbulent_well();
        let q1 = well.discharge(1.0).value().unwrap();
        let q2 = well.discharge(2.0).value().unwrap();
        assert!(q2 > q1);
        assert!(q2 < 2.0 * q1);
    }

    #[test]
    fn test_zero_head_difference_yields_zero_discharge() {
        let outcome = turbulent_well().discharge(0.0);
        assert_eq!(outcome.value(), Some(0.0));
        assert!(outcome.converged());
    }

    #[test]
    fn test_negative_head_difference_is_domain_invalid() {
        assert_eq!(
            turbulent_well().discharge(-0.5),
            SolveOutcome::DomainInvalid
        );
    }

    #[test]
    fn test_constructor_invariants() {
        assert!(MnwWell::new(-1.0, 2.0, 50.0, 2.0).is_err());
        assert!(MnwWell::new(0.0, 0.0, 50.0, 2.0).is_err()); // no linear part
        assert!(MnwWell::new(5.0, 2.0, 50.0, 0.5).is_err()); // P < 1
        assert!(MnwWell::new(5.0, 0.0, 0.0, 1.0).is_ok());
    }
}
