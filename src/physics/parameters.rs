//! Validated parameter value objects
//!
//! # Design
//!
//! Every UI interaction in the surrounding tools produces a fresh snapshot
//! of parameter values. This module turns those snapshots into immutable
//! value objects whose physical invariants are checked exactly once, at
//! construction:
//!
//! - [`AquiferParameters`]: hydraulic properties of a confined/unconfined
//!   aquifer (K, b, S, n); transmissivity T = K·b is derived and cached.
//! - [`RetentionCurveParameters`]: van Genuchten soil-water retention
//!   parameters (θr, θs, α, n); m = 1 - 1/n is derived.
//! - [`ParameterSpec`]: a typed description of one user-facing parameter
//!   (name, unit, range, default) consumed uniformly by validation and by
//!   whatever UI layer sits on top.
//!
//! All values are plain SI floats: conductivity in m/s, transmissivity in
//! m²/s, distances in m, time in s. Logarithmic UI sliders convert to
//! linear values *before* entering the core; nothing here deals in log
//! space.

use crate::physics::error::DomainError;

// =================================================================================================
// Aquifer parameters
// =================================================================================================

/// Hydraulic properties of a homogeneous, isotropic aquifer.
///
/// # Invariants (checked at construction)
///
/// - K > 0, b > 0 (hence T = K·b > 0)
/// - storativity S ∈ (0, 1)
/// - porosity n ∈ (0, 1]
///
/// # Example
///
/// ```rust
/// use hydrogeo_rs::physics::AquiferParameters;
///
/// let aquifer = AquiferParameters::new(
///     1e-4,  // K  [m/s]
///     20.0,  // b  [m]
///     1e-4,  // S  [-]
///     0.25,  // n  [-]
/// ).unwrap();
///
/// assert!((aquifer.transmissivity() - 2e-3).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AquiferParameters {
    /// Hydraulic conductivity K [m/s]
    hydraulic_conductivity: f64,

    /// Saturated thickness b [m]
    thickness: f64,

    /// Storativity S (confined) or specific yield Sy (unconfined) [-]
    storativity: f64,

    /// Effective porosity n [-]
    porosity: f64,

    /// Transmissivity T = K·b [m²/s], cached at construction
    transmissivity: f64,
}

impl AquiferParameters {
    /// Creates a validated aquifer parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when any invariant is violated; the message
    /// names the offending quantity so it can be shown to the user directly.
    pub fn new(
        hydraulic_conductivity: f64,
        thickness: f64,
        storativity: f64,
        porosity: f64,
    ) -> Result<Self, DomainError> {
        DomainError::require_positive("hydraulic conductivity K", hydraulic_conductivity)?;
        DomainError::require_positive("aquifer thickness b", thickness)?;
        DomainError::require_open_fraction("storativity S", storativity, 0.0, 1.0)?;
        DomainError::require_fraction("porosity n", porosity, 0.0, 1.0)?;

        Ok(Self {
            hydraulic_conductivity,
            thickness,
            storativity,
            porosity,
            transmissivity: hydraulic_conductivity * thickness,
        })
    }

    /// Hydraulic conductivity K [m/s]
    #[inline]
    pub fn hydraulic_conductivity(&self) -> f64 {
        self.hydraulic_conductivity
    }

    /// Saturated thickness b [m]
    #[inline]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Storativity S (or specific yield Sy) [-]
    #[inline]
    pub fn storativity(&self) -> f64 {
        self.storativity
    }

    /// Effective porosity n [-]
    #[inline]
    pub fn porosity(&self) -> f64 {
        self.porosity
    }

    /// Transmissivity T = K·b [m²/s]
    #[inline]
    pub fn transmissivity(&self) -> f64 {
        self.transmissivity
    }
}

// =================================================================================================
// Van Genuchten retention parameters
// =================================================================================================

/// Parameters of the van Genuchten–Mualem retention model.
///
/// # Invariants (checked at construction)
///
/// - 0 ≤ θr < θs ≤ 1
/// - α > 0 [1/L]
/// - n > 1, so the derived m = 1 - 1/n lies in (0, 1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetentionCurveParameters {
    /// Residual water content θr [-]
    theta_r: f64,

    /// Saturated water content θs [-]
    theta_s: f64,

    /// Inverse air-entry pressure α [1/cm]
    alpha: f64,

    /// Shape parameter n [-], > 1
    n_shape: f64,

    /// Derived Mualem parameter m = 1 - 1/n, cached
    m_shape: f64,
}

impl RetentionCurveParameters {
    /// Creates a validated retention parameter set.
    pub fn new(theta_r: f64, theta_s: f64, alpha: f64, n_shape: f64) -> Result<Self, DomainError> {
        DomainError::require_fraction("saturated water content theta_s", theta_s, 0.0, 1.0)?;
        if !(0.0..1.0).contains(&theta_r) || !theta_r.is_finite() {
            return Err(DomainError::OutOfRange {
                name: "residual water content theta_r",
                value: theta_r,
                low: 0.0,
                high: 1.0,
            });
        }
        if theta_r >= theta_s {
            return Err(DomainError::RetentionOrdering { theta_r, theta_s });
        }
        DomainError::require_positive("alpha", alpha)?;
        if !n_shape.is_finite() || n_shape <= 1.0 {
            return Err(DomainError::ShapeParameter(n_shape));
        }

        Ok(Self {
            theta_r,
            theta_s,
            alpha,
            n_shape,
            m_shape: 1.0 - 1.0 / n_shape,
        })
    }

    /// Residual water content θr [-]
    #[inline]
    pub fn theta_r(&self) -> f64 {
        self.theta_r
    }

    /// Saturated water content θs [-]
    #[inline]
    pub fn theta_s(&self) -> f64 {
        self.theta_s
    }

    /// Inverse air-entry pressure α [1/cm]
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Shape parameter n [-]
    #[inline]
    pub fn n_shape(&self) -> f64 {
        self.n_shape
    }

    /// Derived Mualem parameter m = 1 - 1/n ∈ (0, 1)
    #[inline]
    pub fn m_shape(&self) -> f64 {
        self.m_shape
    }
}

// =================================================================================================
// Typed parameter specification
// =================================================================================================

/// Typed description of one user-facing parameter.
///
/// The interactive tools describe each slider ad hoc (label, min, max,
/// default scattered through UI calls). This record centralizes that
/// description so validation and presentation consume the same source of
/// truth.
///
/// # Example
///
/// ```rust
/// use hydrogeo_rs::physics::ParameterSpec;
///
/// let spec = ParameterSpec::new("pumping rate Q", "m3/s", 0.001, 0.2, 0.05).unwrap();
/// assert_eq!(spec.clamp(0.5), 0.2);
/// assert!(spec.contains(0.05));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    /// Human-readable parameter name
    pub name: &'static str,

    /// Physical unit, SI unless stated otherwise
    pub unit: &'static str,

    /// Smallest admissible value
    pub min: f64,

    /// Largest admissible value
    pub max: f64,

    /// Default value presented to the user
    pub default: f64,
}

impl ParameterSpec {
    /// Creates a parameter specification.
    ///
    /// # Errors
    ///
    /// Fails when the range is empty or the default falls outside it.
    pub fn new(
        name: &'static str,
        unit: &'static str,
        min: f64,
        max: f64,
        default: f64,
    ) -> Result<Self, DomainError> {
        if !(min < max) {
            return Err(DomainError::EmptyRange { name, min, max });
        }
        if !(min..=max).contains(&default) {
            return Err(DomainError::OutOfRange {
                name,
                value: default,
                low: min,
                high: max,
            });
        }
        Ok(Self {
            name,
            unit,
            min,
            max,
            default,
        })
    }

    /// Clamp a raw value into the admissible range.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Whether `value` lies within the admissible range.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
