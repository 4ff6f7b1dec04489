//! Conservative solute transport in uniform flow
//!
//! # Mathematical Background
//!
//! Advective-dispersive transport of a conservative tracer in uniform flow
//! along x is governed by
//!
//! ```text
//! ∂C/∂t = D ∂²C/∂x² - v ∂C/∂x,     D = α_L·v + D_m
//! ```
//!
//! with seepage velocity v, longitudinal dispersivity α_L and molecular
//! diffusion D_m. Three classic closed forms are implemented:
//!
//! - [`OgataBanks`]: continuous injection at x = 0 with inlet concentration
//!   C₀ (step input), plus a finite-duration pulse by superposition in time.
//! - [`GaussianPulse`]: instantaneous injection of mass M, which spreads as
//!   a Gaussian travelling at v.
//! - [`DomenicoPlume`]: continuous injection from a source of finite width
//!   (and optionally finite thickness), where lateral spreading multiplies
//!   the longitudinal front by error-function factors — the Domenico
//!   product-form plume in plan view (2D) or as a block (3D).
//!
//! # Numerical note
//!
//! The second Ogata-Banks term `exp(vx/D)·erfc((x+vt)/(2√(Dt)))` is a
//! product of a huge exponential and a vanishing erfc. The exponential
//! overflows f64 near vx/D ≈ 709 while the product itself tends to zero, so
//! the term is dropped once the exponent passes that threshold.

use crate::physics::error::DomainError;
use crate::physics::special::{erf, erfc};

/// Exponent beyond which `exp(vx/D)` overflows f64; the full second-term
/// product is already far below resolvable concentration there.
const EXP_OVERFLOW_GUARD: f64 = 700.0;

// =================================================================================================
// Ogata-Banks step input
// =================================================================================================

/// Continuous-injection (step input) solution of Ogata & Banks.
///
/// ```text
/// C(x,t) = C₀/2 · [ erfc((x - vt)/(2√(Dt))) + e^(vx/D) · erfc((x + vt)/(2√(Dt))) ]
/// ```
///
/// # Example
///
/// ```rust
/// use hydrogeo_rs::models::OgataBanks;
///
/// let column = OgataBanks::new(1e-5, 1.0, 1e-9, 1.0).unwrap();
///
/// // At the inlet the concentration equals the source immediately.
/// let c = column.concentration(0.0, 3600.0);
/// assert!((c - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OgataBanks {
    /// Seepage velocity v [m/s]
    velocity: f64,

    /// Inlet concentration C₀ [kg/m³]
    inlet_concentration: f64,

    /// Hydrodynamic dispersion D = α_L·v + D_m [m²/s], cached
    dispersion: f64,
}

impl OgataBanks {
    /// Creates the step-input solution.
    ///
    /// # Errors
    ///
    /// Fails when v ≤ 0 or C₀ ≤ 0, when the dispersivity or diffusion
    /// coefficient is negative, or when both vanish (the equation would
    /// degenerate to pure advection).
    pub fn new(
        velocity: f64,
        dispersivity: f64,
        diffusion: f64,
        inlet_concentration: f64,
    ) -> Result<Self, DomainError> {
        DomainError::require_positive("seepage velocity v", velocity)?;
        DomainError::require_positive("inlet concentration C0", inlet_concentration)?;
        if !dispersivity.is_finite() || dispersivity < 0.0 {
            return Err(DomainError::NotPositive {
                name: "dispersivity alpha_L",
                value: dispersivity,
            });
        }
        if !diffusion.is_finite() || diffusion < 0.0 {
            return Err(DomainError::NotPositive {
                name: "molecular diffusion D_m",
                value: diffusion,
            });
        }

        let dispersion = dispersivity * velocity + diffusion;
        DomainError::require_positive("hydrodynamic dispersion D", dispersion)?;

        Ok(Self {
            velocity,
            inlet_concentration,
            dispersion,
        })
    }

    /// Seepage velocity v [m/s]
    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Hydrodynamic dispersion D [m²/s]
    #[inline]
    pub fn dispersion(&self) -> f64 {
        self.dispersion
    }

    /// Concentration C(x, t) [kg/m³] downstream of a continuous source.
    ///
    /// Zero for t ≤ 0; bounded by [0, C₀] everywhere.
    pub fn concentration(&self, x: f64, time: f64) -> f64 {
        if time <= 0.0 {
            return 0.0;
        }

        let spread = 2.0 * (self.dispersion * time).sqrt();
        let advected = self.velocity * time;

        let first = erfc((x - advected) / spread);

        let exponent = self.velocity * x / self.dispersion;
        let second = if exponent > EXP_OVERFLOW_GUARD {
            0.0
        } else {
            exponent.exp() * erfc((x + advected) / spread)
        };

        0.5 * self.inlet_concentration * (first + second)
    }

    /// Concentration from a source active only for `duration` seconds,
    /// by superposing a negative step at shutdown:
    ///
    /// ```text
    /// C_pulse(x, t) = C(x, t) - C(x, t - duration)
    /// ```
    pub fn pulse_concentration(&self, x: f64, time: f64, duration: f64) -> f64 {
        self.concentration(x, time) - self.concentration(x, time - duration)
    }
}

// =================================================================================================
// Gaussian (instantaneous) pulse
// =================================================================================================

/// Instantaneous injection of tracer mass M into a 1D column.
///
/// ```text
/// C(x,t) = M / (A·n·√(4πDt)) · exp( -(x - vt)² / (4Dt) )
/// ```
///
/// The plume centre travels at v and the spread grows like √(Dt); the total
/// mass A·n·∫C dx stays M for all t.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianPulse {
    /// Injected mass M [kg]
    mass: f64,

    /// Column cross-section area A [m²]
    area: f64,

    /// Effective porosity n [-]
    porosity: f64,

    /// Seepage velocity v [m/s]
    velocity: f64,

    /// Hydrodynamic dispersion D [m²/s]
    dispersion: f64,
}

impl GaussianPulse {
    /// Creates the instantaneous-injection solution.
    pub fn new(
        mass: f64,
        area: f64,
        porosity: f64,
        velocity: f64,
        dispersion: f64,
    ) -> Result<Self, DomainError> {
        DomainError::require_positive("injected mass M", mass)?;
        DomainError::require_positive("cross-section area A", area)?;
        DomainError::require_fraction("porosity n", porosity, 0.0, 1.0)?;
        DomainError::require_positive("seepage velocity v", velocity)?;
        DomainError::require_positive("dispersion D", dispersion)?;

        Ok(Self {
            mass,
            area,
            porosity,
            velocity,
            dispersion,
        })
    }

    /// Concentration C(x, t) [kg/m³]. Zero for t ≤ 0 (the delta-function
    /// initial condition itself is not representable).
    pub fn concentration(&self, x: f64, time: f64) -> f64 {
        if time <= 0.0 {
            return 0.0;
        }

        let variance = 4.0 * self.dispersion * time;
        let offset = x - self.velocity * time;
        let amplitude =
            self.mass / (self.area * self.porosity * (std::f64::consts::PI * variance).sqrt());

        amplitude * (-offset * offset / variance).exp()
    }

    /// Position of the concentration peak at time t: x = v·t.
    #[inline]
    pub fn peak_position(&self, time: f64) -> f64 {
        self.velocity * time
    }
}

// =================================================================================================
// Domenico product-form plume (2D / 3D)
// =================================================================================================

/// Vertical extent of a block source: dispersion and source thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
struct VerticalExtent {
    /// Vertical dispersion D_z = α_V·v [m²/s]
    dispersion: f64,

    /// Source thickness Z [m]
    thickness: f64,
}

/// Continuous plume from a source of finite width, after Domenico.
///
/// The longitudinal front of [`OgataBanks`] (leading term) is multiplied by
/// an error-function factor describing the transverse spreading of a source
/// of width Y centred on the flow axis:
///
/// ```text
/// C(x,y,t) = C₀/4 · erfc((x - vt)/(2√(Dx·t)))
///                 · [ erf((y + Y/2)/(2√(Dy·x/v))) - erf((y - Y/2)/(2√(Dy·x/v))) ]
/// ```
///
/// with Dx = α_L·v and Dy = α_T·v. A plume built with
/// [`with_vertical_extent`](Self::with_vertical_extent) carries the analogous
/// factor in z for a source of thickness Z, and the coefficient becomes C₀/8.
///
/// The solution is defined downgradient of the source plane: the transverse
/// spread grows with travel distance (√(Dy·x/v)), so x ≤ 0 evaluates to 0.
///
/// # Example
///
/// ```rust
/// use hydrogeo_rs::models::DomenicoPlume;
///
/// // v = 1e-5 m/s, alpha_L = 1 m, alpha_T = 0.1 m, C0 = 10 g/m³, Y = 10 m
/// let plume = DomenicoPlume::new(1e-5, 1.0, 0.1, 10.0, 10.0).unwrap();
///
/// // On the centerline the plume never exceeds the source concentration.
/// let c = plume.concentration(50.0, 0.0, 1e7);
/// assert!(c > 0.0 && c <= 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomenicoPlume {
    /// Seepage velocity v [m/s]
    velocity: f64,

    /// Source concentration C₀ [kg/m³]
    inlet_concentration: f64,

    /// Longitudinal dispersion Dx = α_L·v [m²/s], cached
    longitudinal_dispersion: f64,

    /// Transverse dispersion Dy = α_T·v [m²/s], cached
    transverse_dispersion: f64,

    /// Source width Y [m]
    source_width: f64,

    /// Vertical spreading for a block (3D) source; `None` keeps the plume
    /// two-dimensional (the source spans the full saturated thickness).
    vertical: Option<VerticalExtent>,
}

impl DomenicoPlume {
    /// Creates a plan-view (2D) plume for a source of width Y.
    ///
    /// # Errors
    ///
    /// Fails when v, α_L, α_T, C₀ or Y is not strictly positive: both
    /// dispersions appear under square roots in denominators, so unlike
    /// [`OgataBanks`] the dispersivities cannot vanish here.
    pub fn new(
        velocity: f64,
        longitudinal_dispersivity: f64,
        transverse_dispersivity: f64,
        inlet_concentration: f64,
        source_width: f64,
    ) -> Result<Self, DomainError> {
        DomainError::require_positive("seepage velocity v", velocity)?;
        DomainError::require_positive("dispersivity alpha_L", longitudinal_dispersivity)?;
        DomainError::require_positive("dispersivity alpha_T", transverse_dispersivity)?;
        DomainError::require_positive("inlet concentration C0", inlet_concentration)?;
        DomainError::require_positive("source width Y", source_width)?;

        Ok(Self {
            velocity,
            inlet_concentration,
            longitudinal_dispersion: longitudinal_dispersivity * velocity,
            transverse_dispersion: transverse_dispersivity * velocity,
            source_width,
            vertical: None,
        })
    }

    /// Upgrades the plume to a block (3D) source of thickness Z spreading
    /// vertically with dispersivity α_V.
    pub fn with_vertical_extent(
        mut self,
        vertical_dispersivity: f64,
        source_thickness: f64,
    ) -> Result<Self, DomainError> {
        DomainError::require_positive("dispersivity alpha_V", vertical_dispersivity)?;
        DomainError::require_positive("source thickness Z", source_thickness)?;

        self.vertical = Some(VerticalExtent {
            dispersion: vertical_dispersivity * self.velocity,
            thickness: source_thickness,
        });
        Ok(self)
    }

    /// Seepage velocity v [m/s]
    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Source width Y [m]
    #[inline]
    pub fn source_width(&self) -> f64 {
        self.source_width
    }

    /// Concentration C(x, y, t) [kg/m³] on the source midplane (z = 0).
    ///
    /// Zero for t ≤ 0 and for x ≤ 0 (upgradient of the source plane);
    /// bounded by [0, C₀] everywhere.
    pub fn concentration(&self, x: f64, y: f64, time: f64) -> f64 {
        self.concentration_at_depth(x, y, 0.0, time)
    }

    /// Concentration C(x, y, z, t) [kg/m³], with z measured from the source
    /// midplane.
    ///
    /// For a plume without a vertical extent the source spans the full
    /// thickness and the concentration is uniform in z.
    pub fn concentration_at_depth(&self, x: f64, y: f64, z: f64, time: f64) -> f64 {
        if time <= 0.0 || x <= 0.0 {
            return 0.0;
        }

        let front_spread = 2.0 * (self.longitudinal_dispersion * time).sqrt();
        let front = erfc((x - self.velocity * time) / front_spread);
        let lateral = self.spreading_factor(y, self.source_width, self.transverse_dispersion, x);

        match self.vertical {
            None => 0.25 * self.inlet_concentration * front * lateral,
            Some(extent) => {
                let vertical = self.spreading_factor(z, extent.thickness, extent.dispersion, x);
                0.125 * self.inlet_concentration * front * lateral * vertical
            }
        }
    }

    /// Error-function spreading factor transverse to the flow axis:
    /// erf((s + E/2)/σ) - erf((s - E/2)/σ) with σ = 2√(D·x/v). The spread
    /// grows with travel distance x, not with time.
    fn spreading_factor(&self, offset: f64, extent: f64, dispersion: f64, x: f64) -> f64 {
        let spread = 2.0 * (dispersion * x / self.velocity).sqrt();
        let half = 0.5 * extent;
        erf((offset + half) / spread) - erf((offset - half) / spread)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
