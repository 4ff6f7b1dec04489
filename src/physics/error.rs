//! Domain-error taxonomy
//!
//! # Design
//!
//! The engine distinguishes three kinds of unusual outcome:
//!
//! 1. **`DomainError`** (this module) — a precondition on the physical
//!    parameters is violated *before* any computation (K ≤ 0, R ≤ r,
//!    negative value under a square root forced by inconsistent inputs).
//!    The call is aborted; the caller shows the message instead of a plot.
//!
//! 2. **Physical boundary states** — expected outcomes of a valid
//!    computation (well running dry, aquifer turning unconfined). These are
//!    ordinary enum values in the model results, see e.g.
//!    [`crate::models::theis::CorrectedDrawdown`] and
//!    [`crate::models::thiem::WellState`].
//!
//! 3. **Numeric non-convergence** — an iterative solver exceeded its
//!    iteration budget. Reported through
//!    [`crate::solver::SolveOutcome::MaxIterExceeded`] together with the
//!    last iterate.
//!
//! Only the first category is an `Err`. The other two are part of normal
//! results because they are common, expected states when exploring
//! parameter space in a teaching tool.

use thiserror::Error;

/// A physical precondition was violated before computation started.
///
/// Messages are written to be shown directly to a user adjusting sliders,
/// so they name the offending quantity and the constraint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A strictly positive quantity (K, T, b, Q magnitude, distance, ...)
    /// was zero or negative.
    #[error("{name} must be positive, got {value:.3e}")]
    NotPositive { name: &'static str, value: f64 },

    /// A dimensionless fraction (storativity, porosity, saturation) fell
    /// outside its admissible interval.
    #[error("{name} must lie between {low} and {high}, got {value:.3e}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        low: f64,
        high: f64,
    },

    /// A parameter range is empty: its lower bound does not lie below its
    /// upper bound, so no value could ever be admissible.
    #[error("{name}: range [{min}, {max}] is empty - min must lie below max")]
    EmptyRange {
        name: &'static str,
        min: f64,
        max: f64,
    },

    /// A quantity that must be finite was NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    /// Residual water content must stay below saturated water content.
    #[error("residual water content ({theta_r}) must be below saturated water content ({theta_s})")]
    RetentionOrdering { theta_r: f64, theta_s: f64 },

    /// Van Genuchten shape parameter n must exceed 1 so that m = 1 - 1/n
    /// lies in (0, 1).
    #[error("van Genuchten shape parameter n must exceed 1, got {0}")]
    ShapeParameter(f64),

    /// The Thiem solution takes log(R/r): the radius of influence must
    /// exceed the observation distance.
    #[error("radius of influence ({radius:.1} m) must exceed the observation distance ({distance:.1} m) - adjust parameters")]
    RadiusOfInfluence { radius: f64, distance: f64 },

    /// Freshwater must be lighter than saltwater for an interface to form.
    #[error("freshwater density ({fresh} kg/m3) must be below saltwater density ({saline} kg/m3)")]
    DensityOrdering { fresh: f64, saline: f64 },

    /// An axis specification cannot build a grid (start >= stop, < 2 points).
    #[error("axis [{start}, {stop}] with {points} points cannot form a grid")]
    InvalidAxis { start: f64, stop: f64, points: usize },
}

impl DomainError {
    /// Check that `value` is strictly positive and finite.
    pub fn require_positive(name: &'static str, value: f64) -> Result<f64, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::NotFinite { name, value });
        }
        if value <= 0.0 {
            return Err(DomainError::NotPositive { name, value });
        }
        Ok(value)
    }

    /// Check that `value` lies in the half-open interval `(low, high]`.
    pub fn require_fraction(
        name: &'static str,
        value: f64,
        low: f64,
        high: f64,
    ) -> Result<f64, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::NotFinite { name, value });
        }
        if value <= low || value > high {
            return Err(DomainError::OutOfRange {
                name,
                value,
                low,
                high,
            });
        }
        Ok(value)
    }

    /// Check that `value` lies in the open interval `(low, high)`.
    ///
    /// For quantities like storativity, where both endpoints are physically
    /// inadmissible (S = 1 would mean the aquifer releases its entire pore
    /// volume per metre of head drop).
    pub fn require_open_fraction(
        name: &'static str,
        value: f64,
        low: f64,
        high: f64,
    ) -> Result<f64, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::NotFinite { name, value });
        }
        if value <= low || value >= high {
            return Err(DomainError::OutOfRange {
                name,
                value,
                low,
                high,
            });
        }
        Ok(value)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive_accepts_positive() {
        assert_eq!(DomainError::require_positive("K", 1e-4).unwrap(), 1e-4);
    }

    #[test]
    fn test_require_positive_rejects_zero_and_negative() {
        assert!(DomainError::require_positive("K", 0.0).is_err());
        assert!(DomainError::require_positive("K", -1.0).is_err());
    }

    #[test]
    fn test_require_positive_rejects_nan() {
        let err = DomainError::require_positive("K", f64::NAN).unwrap_err();
        assert!(matches!(err, DomainError::NotFinite { name: "K", .. }));
    }

    #[test]
    fn test_require_fraction_bounds() {
        assert!(DomainError::require_fraction("S", 0.5, 0.0, 1.0).is_ok());
        assert!(DomainError::require_fraction("S", 1.0, 0.0, 1.0).is_ok());
        assert!(DomainError::require_fraction("S", 0.0, 0.0, 1.0).is_err());
        assert!(DomainError::require_fraction("S", 1.5, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_require_open_fraction_excludes_both_endpoints() {
        assert!(DomainError::require_open_fraction("S", 0.5, 0.0, 1.0).is_ok());
        assert!(DomainError::require_open_fraction("S", 0.0, 0.0, 1.0).is_err());
        assert!(DomainError::require_open_fraction("S", 1.0, 0.0, 1.0).is_err());
        assert!(DomainError::require_open_fraction("S", f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_empty_range_message_names_both_bounds() {
        let err = DomainError::EmptyRange {
            name: "pumping rate Q",
            min: 5.0,
            max: 1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("pumping rate Q"));
        assert!(msg.contains("[5, 1]"));
        assert!(msg.contains("empty"));
    }

    #[test]
    fn test_messages_name_the_quantity() {
        let err = DomainError::require_positive("hydraulic conductivity K", -2.0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("hydraulic conductivity K"));
        assert!(msg.contains("positive"));
    }

    #[test]
    fn test_radius_of_influence_message_is_actionable() {
        let err = DomainError::RadiusOfInfluence {
            radius: 10.0,
            distance: 100.0,
        };
        assert!(err.to_string().contains("adjust parameters"));
    }
}
