//! Transient radial drawdown (Theis solution)
//!
//! # Mathematical Background
//!
//! A fully penetrating well pumping at constant rate Q from a homogeneous,
//! isotropic, confined aquifer of infinite extent produces the drawdown
//!
//! ```text
//! s(r, t) = Q / (4πT) · W(u),     u = r²S / (4Tt)
//! ```
//!
//! where W(u) is the exponential integral E₁(u)
//! ([`crate::physics::special::well_function`]). Drawdown is zero before
//! pumping starts and grows without bound at the well axis as t → ∞; the
//! logarithmic singularity at r = 0 is a property of the line-sink
//! idealization, not a numerical defect.
//!
//! # Unconfined use
//!
//! For water-table aquifers the Theis solution is evaluated with the
//! specific yield Sy in place of S and the result mapped through the Jacob
//! correction ([`unconfined_drawdown`]), which accounts for the reduction
//! in saturated thickness. The correction is applied *after* any
//! superposition of sources, because superposition is only linear in the
//! equivalent confined space.
//!
//! # Physical Interpretation
//!
//! Small u (late time, close range) means the cone of depression is well
//! developed and W(u) ≈ -γ - ln u grows logarithmically; large u (early
//! time, far range) means the pressure pulse has not yet arrived and
//! drawdown is exponentially small.

use crate::physics::error::DomainError;
use crate::physics::parameters::AquiferParameters;
use crate::physics::special::well_function;

// =================================================================================================
// Theis well
// =================================================================================================

/// Transient radial drawdown solution for a single constant-rate well.
///
/// # Example
///
/// ```rust
/// use hydrogeo_rs::models::TheisWell;
///
/// let well = TheisWell::new(2e-3, 1e-4).unwrap(); // T [m²/s], S [-]
///
/// // One day of pumping at 10 L/s, observed 50 m away:
/// let s = well.drawdown(0.01, 50.0, 86_400.0);
/// assert!(s > 0.0);
///
/// // Before pumping starts there is no drawdown.
/// assert_eq!(well.drawdown(0.01, 50.0, 0.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TheisWell {
    /// Transmissivity T [m²/s]
    transmissivity: f64,

    /// Storativity S (confined) or specific yield Sy (unconfined) [-]
    storativity: f64,
}

impl TheisWell {
    /// Creates a Theis solution for the given transmissivity and storage
    /// coefficient.
    ///
    /// # Errors
    ///
    /// Fails when T ≤ 0 or S lies outside (0, 1).
    pub fn new(transmissivity: f64, storativity: f64) -> Result<Self, DomainError> {
        DomainError::require_positive("transmissivity T", transmissivity)?;
        DomainError::require_open_fraction("storativity S", storativity, 0.0, 1.0)?;

        Ok(Self {
            transmissivity,
            storativity,
        })
    }

    /// Builds the solution from a validated aquifer parameter set,
    /// using T = K·b and the stored storage coefficient.
    pub fn from_aquifer(aquifer: &AquiferParameters) -> Self {
        // AquiferParameters already guarantees T > 0 and S in (0, 1).
        Self {
            transmissivity: aquifer.transmissivity(),
            storativity: aquifer.storativity(),
        }
    }

    /// Transmissivity T [m²/s]
    #[inline]
    pub fn transmissivity(&self) -> f64 {
        self.transmissivity
    }

    /// Storage coefficient [-]
    #[inline]
    pub fn storativity(&self) -> f64 {
        self.storativity
    }

    /// Dimensionless time argument u = r²S / (4Tt).
    ///
    /// Infinite for t ≤ 0 by convention, so that W(u) vanishes and the
    /// drawdown is exactly zero before pumping starts.
    #[inline]
    pub fn theis_u(&self, radius: f64, time: f64) -> f64 {
        if time <= 0.0 {
            return f64::INFINITY;
        }
        radius * radius * self.storativity / (4.0 * self.transmissivity * time)
    }

    /// Drawdown s(r, t) [m] caused by pumping at rate `discharge` [m³/s].
    ///
    /// A negative discharge models injection and yields negative drawdown
    /// (mounding). Times t ≤ 0 return exactly 0. The result diverges as
    /// r → 0; callers that evaluate at a well axis floor the radius at the
    /// well radius first.
    pub fn drawdown(&self, discharge: f64, radius: f64, time: f64) -> f64 {
        if time <= 0.0 {
            return 0.0;
        }
        let u = self.theis_u(radius, time);
        discharge / (4.0 * std::f64::consts::PI * self.transmissivity) * well_function(u)
    }

    /// Residual drawdown after pumping stops (Theis recovery).
    ///
    /// A well pumped from t = 0 to t = `duration` is superposed with an
    /// injection well of equal rate switched on at shutdown:
    ///
    /// ```text
    /// s(r, t) = s_pump(r, t) - s_pump(r, t - duration)
    /// ```
    pub fn residual_drawdown(
        &self,
        discharge: f64,
        radius: f64,
        time: f64,
        duration: f64,
    ) -> f64 {
        self.drawdown(discharge, radius, time) - self.drawdown(discharge, radius, time - duration)
    }
}

// =================================================================================================
// Jacob correction for unconfined conditions
// =================================================================================================

/// Result of mapping an equivalent confined drawdown to water-table
/// conditions.
///
/// `Dry` is a physical boundary state, not an error: the corrected drawdown
/// would exceed the saturated thickness, meaning the water table drops to
/// the aquifer base at that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CorrectedDrawdown {
    /// Water-table drawdown [m], at most the saturated thickness
    Drawdown(f64),

    /// The correction has no real solution; the aquifer is dewatered here
    Dry,
}

impl CorrectedDrawdown {
    /// The corrected drawdown, unless the point is dry.
    pub fn value(&self) -> Option<f64> {
        match self {
            CorrectedDrawdown::Drawdown(s) => Some(*s),
            CorrectedDrawdown::Dry => None,
        }
    }

    /// Whether the water table reached the aquifer base.
    pub fn is_dry(&self) -> bool {
        matches!(self, CorrectedDrawdown::Dry)
    }
}

/// Maps an equivalent confined drawdown s' to the water-table drawdown s:
///
/// ```text
/// s = b · (1 - √(1 - 2s'/b))
/// ```
///
/// Real only for s' ≤ b/2; beyond that the point is [`CorrectedDrawdown::Dry`].
/// Non-positive s' (mounding from injection) passes through uncorrected,
/// matching the small-drawdown limit where the correction vanishes.
pub fn unconfined_drawdown(confined: f64, thickness: f64) -> CorrectedDrawdown {
    debug_assert!(thickness > 0.0);

    if confined <= 0.0 {
        return CorrectedDrawdown::Drawdown(confined);
    }

    let discriminant = 1.0 - 2.0 * confined / thickness;
    if discriminant < 0.0 {
        return CorrectedDrawdown::Dry;
    }

    CorrectedDrawdown::Drawdown(thickness * (1.0 - discriminant.sqrt()))
}

/// Inverse of [`unconfined_drawdown`]: maps an observed water-table
/// drawdown s to the equivalent confined drawdown s' = s - s²/(2b).
pub fn confined_equivalent(unconfined: f64, thickness: f64) -> f64 {
    debug_assert!(thickness > 0.0);
    unconfined - unconfined * unconfined / (2.0 * thickness)
}

// =================================================================================================
// Tests
// =================================================================================================
