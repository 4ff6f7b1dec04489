//! Steady-state radial flow (Thiem) and well capture zones
//!
//! # Mathematical Background
//!
//! Once a pumped aquifer reaches equilibrium, the head distribution around
//! the well follows the Thiem solution:
//!
//! ```text
//! confined:    h(r) = H - Q / (2πKm) · ln(R/r)
//! unconfined:  h(r) = √( H² - Q / (πK) · ln(R/r) )
//! ```
//!
//! Both depend on the **radius of influence** R, the distance at which
//! drawdown vanishes. R is not a free parameter: the Sichardt relation ties
//! it to the drawdown at the well,
//!
//! ```text
//! R = 3000 · s_w · √K     (R, s_w in m, K in m/s)
//! ```
//!
//! and s_w in turn depends on R through the head equation. The pair is
//! solved by fixed-point iteration ([`ThiemWell::radius_of_influence`]).
//!
//! # Physical boundary states
//!
//! In an unconfined aquifer the argument of the square root can go
//! negative: the demanded discharge would dewater the well. That outcome is
//! reported as [`WellState::Dry`], not as an error. Equally,
//! non-convergence within the iteration budget yields
//! [`WellState::MaxIterExceeded`] carrying the last iterate.

use std::cell::Cell;
use std::f64::consts::PI;

use crate::physics::error::DomainError;
use crate::solver::{FixedPointSolver, SolveOutcome};

/// Empirical Sichardt coefficient relating drawdown and radius of
/// influence: R = 3000 · s_w · √K, with all quantities in SI units.
pub const SICHARDT_COEFFICIENT: f64 = 3000.0;

/// Convergence tolerance on R [m] for the Sichardt fixed point.
const RADIUS_TOLERANCE: f64 = 1e-6;

/// Iteration budget for the Sichardt fixed point. The iteration is strongly
/// contracting for realistic parameters and usually converges in under 20
/// steps.
const RADIUS_MAX_ITERATIONS: usize = 100;

// =================================================================================================
// Well state
// =================================================================================================

/// Terminal state of the coupled radius-of-influence / well-head solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WellState {
    /// The fixed point converged.
    Converged {
        /// Radius of influence R [m]
        radius: f64,
        /// Head at the well face h(r_w) [m]
        well_head: f64,
        /// Iterations spent
        iterations: usize,
    },

    /// The iteration budget was spent; the last iterate is approximate.
    MaxIterExceeded {
        /// Last radius iterate [m]
        radius: f64,
        /// Head at the well face for that radius [m]
        well_head: f64,
    },

    /// The demanded discharge dewaters the well (unconfined only). The
    /// radius of the iterate that went dry is kept for diagnostics; the
    /// well head is physically zero.
    Dry {
        /// Radius iterate at which the saturated column vanished [m]
        radius: f64,
    },
}

impl WellState {
    /// Radius of influence of the final iterate [m].
    pub fn radius(&self) -> f64 {
        match self {
            WellState::Converged { radius, .. }
            | WellState::MaxIterExceeded { radius, .. }
            | WellState::Dry { radius } => *radius,
        }
    }

    /// Head at the well face, unless the well ran dry.
    pub fn well_head(&self) -> Option<f64> {
        match self {
            WellState::Converged { well_head, .. }
            | WellState::MaxIterExceeded { well_head, .. } => Some(*well_head),
            WellState::Dry { .. } => None,
        }
    }

    /// Whether the solve converged within its budget.
    pub fn converged(&self) -> bool {
        matches!(self, WellState::Converged { .. })
    }
}

// =================================================================================================
// Thiem well
// =================================================================================================

/// Confined or unconfined flow regime of a steady pumped well.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Regime {
    Confined {
        /// Aquifer thickness m [m]
        thickness: f64,
    },
    Unconfined,
}

/// Steady-state pumped well with a Sichardt-coupled radius of influence.
///
/// # Example
///
/// ```rust
/// use hydrogeo_rs::models::ThiemWell;
///
/// let well = ThiemWell::unconfined(1e-3, 50.0, 0.3).unwrap();
/// let state = well.radius_of_influence(0.05);
///
/// assert!(state.converged());
/// assert!(state.radius() > well.well_radius());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThiemWell {
    /// Hydraulic conductivity K [m/s]
    hydraulic_conductivity: f64,

    /// Undisturbed head H [m above aquifer base]
    initial_head: f64,

    /// Well radius r_w [m]
    well_radius: f64,

    regime: Regime,
}

impl ThiemWell {
    /// Creates an unconfined (water-table) well.
    ///
    /// # Errors
    ///
    /// Fails when K, H, or r_w is not strictly positive, or when the well
    /// radius is not smaller than the initial head would allow a cone at
    /// all (r_w ≥ H is accepted; only positivity is checked here).
    pub fn unconfined(
        hydraulic_conductivity: f64,
        initial_head: f64,
        well_radius: f64,
    ) -> Result<Self, DomainError> {
        DomainError::require_positive("hydraulic conductivity K", hydraulic_conductivity)?;
        DomainError::require_positive("initial head H", initial_head)?;
        DomainError::require_positive("well radius r_w", well_radius)?;

        Ok(Self {
            hydraulic_conductivity,
            initial_head,
            well_radius,
            regime: Regime::Unconfined,
        })
    }

    /// Creates a confined well in an aquifer of thickness `thickness`.
    pub fn confined(
        hydraulic_conductivity: f64,
        thickness: f64,
        initial_head: f64,
        well_radius: f64,
    ) -> Result<Self, DomainError> {
        DomainError::require_positive("hydraulic conductivity K", hydraulic_conductivity)?;
        DomainError::require_positive("aquifer thickness m", thickness)?;
        DomainError::require_positive("initial head H", initial_head)?;
        DomainError::require_positive("well radius r_w", well_radius)?;

        Ok(Self {
            hydraulic_conductivity,
            initial_head,
            well_radius,
            regime: Regime::Confined { thickness },
        })
    }

    /// Well radius r_w [m]
    #[inline]
    pub fn well_radius(&self) -> f64 {
        self.well_radius
    }

    /// Undisturbed head H [m]
    #[inline]
    pub fn initial_head(&self) -> f64 {
        self.initial_head
    }

    /// Head at the well face for a given radius of influence, or `None`
    /// when the unconfined column vanishes.
    fn well_head_for(&self, discharge: f64, radius_of_influence: f64) -> Option<f64> {
        let log_ratio = (radius_of_influence / self.well_radius).ln();
        match self.regime {
            Regime::Confined { thickness } => Some(
                self.initial_head
                    - discharge / (2.0 * PI * self.hydraulic_conductivity * thickness) * log_ratio,
            ),
            Regime::Unconfined => {
                let discriminant = self.initial_head * self.initial_head
                    - discharge / (PI * self.hydraulic_conductivity) * log_ratio;
                (discriminant >= 0.0).then(|| discriminant.sqrt())
            }
        }
    }

    /// Solves the coupled Sichardt / Thiem system for the radius of
    /// influence at discharge Q [m³/s].
    ///
    /// Seeded with the drawdown s = H/2; iterates
    /// R ← 3000 · (H - h_w(R)) · √K to the tolerance of 1e-6 m.
    pub fn radius_of_influence(&self, discharge: f64) -> WellState {
        let sqrt_k = self.hydraulic_conductivity.sqrt();
        let seed = SICHARDT_COEFFICIENT * (self.initial_head / 2.0) * sqrt_k;

        // solve_guarded reports a domain exit without a value; remember the
        // iterate that went dry so WellState::Dry can carry it.
        let last_radius = Cell::new(seed);

        let solver = FixedPointSolver::new(RADIUS_TOLERANCE, RADIUS_MAX_ITERATIONS);
        let outcome = solver.solve_guarded(seed, |radius| {
            last_radius.set(radius);
            let well_head = self.well_head_for(discharge, radius)?;
            let drawdown = self.initial_head - well_head;
            if drawdown <= 0.0 {
                // Injection or zero discharge has no cone; the fixed point
                // would collapse to a non-positive radius.
                return None;
            }
            Some(SICHARDT_COEFFICIENT * drawdown * sqrt_k)
        });

        match outcome {
            SolveOutcome::Converged { value, iterations } => {
                match self.well_head_for(discharge, value) {
                    Some(well_head) => WellState::Converged {
                        radius: value,
                        well_head,
                        iterations,
                    },
                    None => WellState::Dry { radius: value },
                }
            }
            SolveOutcome::MaxIterExceeded { last } => {
                match self.well_head_for(discharge, last) {
                    Some(well_head) => WellState::MaxIterExceeded {
                        radius: last,
                        well_head,
                    },
                    None => WellState::Dry { radius: last },
                }
            }
            SolveOutcome::DomainInvalid => WellState::Dry {
                radius: last_radius.get(),
            },
        }
    }

    /// Head h(r) [m] at distance r from the well, given a radius of
    /// influence.
    ///
    /// The distance is floored at the well radius (heads inside the casing
    /// equal the well-face head). In the unconfined regime a locally
    /// dewatered point returns a head of 0.
    ///
    /// # Errors
    ///
    /// Fails with [`DomainError::RadiusOfInfluence`] when r ≥ R; the Thiem
    /// solution is only defined inside the cone of depression. Use
    /// [`ThiemWell::head_clamped`] for profile evaluation across R.
    pub fn head(
        &self,
        discharge: f64,
        distance: f64,
        radius_of_influence: f64,
    ) -> Result<f64, DomainError> {
        let r = distance.max(self.well_radius);
        if r >= radius_of_influence {
            return Err(DomainError::RadiusOfInfluence {
                radius: radius_of_influence,
                distance: r,
            });
        }

        let log_ratio = (radius_of_influence / r).ln();
        let head = match self.regime {
            Regime::Confined { thickness } => {
                self.initial_head
                    - discharge / (2.0 * PI * self.hydraulic_conductivity * thickness) * log_ratio
            }
            Regime::Unconfined => {
                let discriminant = self.initial_head * self.initial_head
                    - discharge / (PI * self.hydraulic_conductivity) * log_ratio;
                if discriminant < 0.0 {
                    0.0
                } else {
                    discriminant.sqrt()
                }
            }
        };
        Ok(head)
    }

    /// Head h(r), returning the undisturbed head H outside the radius of
    /// influence instead of an error. Intended for grid evaluation of full
    /// cone-of-depression profiles.
    pub fn head_clamped(&self, discharge: f64, distance: f64, radius_of_influence: f64) -> f64 {
        match self.head(discharge, distance, radius_of_influence) {
            Ok(head) => head,
            Err(_) => self.initial_head,
        }
    }
}

// =================================================================================================
// Capture zone of a well in uniform regional flow
// =================================================================================================

/// Capture zone geometry of a well superposed on uniform regional flow.
///
/// Coordinates: the well sits at the origin and regional flow moves in the
/// -x direction, so captured water arrives from +x. The stagnation point
/// lies downstream of the well at
///
/// ```text
/// x₀ = -Q / (2πKib)
/// ```
///
/// and the capture zone widens upstream to an asymptotic width Q/(Kib).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureZone {
    /// Pumping rate Q [m³/s]
    discharge: f64,

    /// Darcy flux of the regional flow q = K·i [m/s]
    unit_flux: f64,

    /// Aquifer thickness b [m]
    thickness: f64,
}

impl CaptureZone {
    /// Creates the capture-zone geometry for a well pumping Q against a
    /// regional gradient i in an aquifer of conductivity K and thickness b.
    pub fn new(
        discharge: f64,
        hydraulic_conductivity: f64,
        gradient: f64,
        thickness: f64,
    ) -> Result<Self, DomainError> {
        DomainError::require_positive("pumping rate Q", discharge)?;
        DomainError::require_positive("hydraulic conductivity K", hydraulic_conductivity)?;
        DomainError::require_positive("hydraulic gradient i", gradient)?;
        DomainError::require_positive("aquifer thickness b", thickness)?;

        Ok(Self {
            discharge,
            unit_flux: hydraulic_conductivity * gradient,
            thickness,
        })
    }

    /// Downstream stagnation point x₀ = -Q/(2πKib) [m]. Always negative in
    /// this coordinate frame.
    pub fn stagnation_point(&self) -> f64 {
        -self.discharge / (2.0 * PI * self.unit_flux * self.thickness)
    }

    /// Asymptotic capture width far upstream, Q/(Kib) [m].
    pub fn max_width(&self) -> f64 {
        self.discharge / (self.unit_flux * self.thickness)
    }

    /// Capture width on the transverse line through the well, Q/(2Kib) [m].
    pub fn width_at_well(&self) -> f64 {
        0.5 * self.max_width()
    }

    /// x-coordinate of the capture-zone boundary at transverse offset y:
    ///
    /// ```text
    /// x(y) = -y / tan(2πKib·y / Q),    |y| < Q/(2Kib)
    /// ```
    ///
    /// Returns `None` at y = 0 (the boundary passes through the stagnation
    /// point, use [`CaptureZone::stagnation_point`]) and outside the
    /// asymptotic half-width.
    pub fn boundary_x(&self, y: f64) -> Option<f64> {
        if y == 0.0 || y.abs() >= 0.5 * self.max_width() {
            return None;
        }
        let argument = 2.0 * PI * self.unit_flux * self.thickness * y / self.discharge;
        Some(-y / argument.tan())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dewatering_well() -> ThiemWell {
        ThiemWell::unconfined(1e-3, 50.0, 0.3).unwrap()
    }

    #[test]
    fn test_radius_of_influence_converges() {
        let well = dewatering_well();
        let state = well.radius_of_influence(0.05);

        match state {
            WellState::Converged {
                radius,
                well_head,
                iterations,
            } => {
                // Self-consistency: R = 3000 · (H - h_w) · sqrt(K)
                let expected =
                    SICHARDT_COEFFICIENT * (well.initial_head() - well_head) * 1e-3_f64.sqrt();
                assert_relative_eq!(radius, expected, max_relative = 1e-4);
                assert!(radius > 10.0 && radius < 1000.0);
                assert!(well_head < well.initial_head());
                assert!(iterations < RADIUS_MAX_ITERATIONS);
            }
            other => panic!("expected convergence, got {:?}", other),
        }
    }

    #[test]
    fn test_excessive_discharge_runs_the_well_dry() {
        let well = dewatering_well();
        let state = well.radius_of_influence(5.0);

        assert!(matches!(state, WellState::Dry { .. }));
        assert_eq!(state.well_head(), None);
        assert!(state.radius() > 0.0);
    }

    #[test]
    fn test_head_profile_is_monotonic_inside_the_cone() {
        let well = dewatering_well();
        let state = well.radius_of_influence(0.05);
        let radius = state.radius();

        let mut previous = 0.0;
        for r in [0.3, 1.0, 5.0, 20.0, 0.9 * radius] {
            let head = well.head(0.05, r, radius).unwrap();
            assert!(head > previous, "head must rise with distance");
            assert!(head <= well.initial_head());
            previous = head;
        }
    }

    #[test]
    fn test_head_outside_the_cone_is_a_domain_error() {
        let well = dewatering_well();
        let err = well.head(0.05, 500.0, 100.0).unwrap_err();
        assert!(matches!(err, DomainError::RadiusOfInfluence { .. }));

        // The clamped variant returns the undisturbed head instead.
        assert_eq!(well.head_clamped(0.05, 500.0, 100.0), 50.0);
    }

    #[test]
    fn test_head_is_floored_at_the_well_radius() {
        let well = dewatering_well();
        let state = well.radius_of_influence(0.05);
        let radius = state.radius();

        let at_face = well.head(0.05, 0.3, radius).unwrap();
        let inside_casing = well.head(0.05, 0.01, radius).unwrap();
        assert_relative_eq!(at_face, inside_casing, max_relative = 1e-12);
    }

    #[test]
    fn test_confined_well_head_matches_closed_form() {
        let well = ThiemWell::confined(1e-3, 20.0, 50.0, 0.3).unwrap();
        let q = 0.05;
        let radius = 200.0;

        let head = well.head(q, 10.0, radius).unwrap();
        let expected = 50.0 - q / (2.0 * PI * 1e-3 * 20.0) * (radius / 10.0_f64).ln();
        assert_relative_eq!(head, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_confined_radius_of_influence_converges() {
        let well = ThiemWell::confined(1e-3, 20.0, 50.0, 0.3).unwrap();
        let state = well.radius_of_influence(0.05);
        assert!(state.converged());
        assert!(state.well_head().unwrap() < 50.0);
    }

    #[test]
    fn test_capture_zone_geometry() {
        // Q = 0.02 m3/s, K = 1e-3 m/s, i = 0.002, b = 20 m
        let zone = CaptureZone::new(0.02, 1e-3, 0.002, 20.0).unwrap();

        assert_relative_eq!(zone.max_width(), 500.0, max_relative = 1e-12);
        assert_relative_eq!(zone.width_at_well(), 250.0, max_relative = 1e-12);
        assert_relative_eq!(
            zone.stagnation_point(),
            -500.0 / (2.0 * PI),
            max_relative = 1e-12
        );
        assert!(zone.stagnation_point() < 0.0);
    }

    #[test]
    fn test_capture_boundary_approaches_stagnation_point() {
        let zone = CaptureZone::new(0.02, 1e-3, 0.002, 20.0).unwrap();
        // x(y) -> x0 as y -> 0
        let near_axis = zone.boundary_x(1e-4).unwrap();
        assert_relative_eq!(near_axis, zone.stagnation_point(), max_relative = 1e-6);

        assert_eq!(zone.boundary_x(0.0), None);
        assert_eq!(zone.boundary_x(260.0), None); // beyond the half-width
    }
}
