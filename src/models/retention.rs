//! Van Genuchten–Mualem soil-water retention
//!
//! # Mathematical Background
//!
//! The van Genuchten model relates suction head ψ (positive in the
//! unsaturated zone, in cm of water) to effective saturation:
//!
//! ```text
//! Se(ψ) = (1 + (α·ψ)^n)^(-m),     m = 1 - 1/n
//! θ(ψ)  = θr + (θs - θr) · Se
//! ```
//!
//! The Mualem closure gives the relative hydraulic conductivity from the
//! same parameters:
//!
//! ```text
//! kr(Se) = √Se · (1 - (1 - Se^(1/m))^m)²
//! ```
//!
//! All retention quantities are dimensionless except ψ [cm] and α [1/cm];
//! the cm convention follows the soil-physics literature the parameter
//! tables are published in.
//!
//! # Agronomic reference points
//!
//! Field capacity and permanent wilting point are evaluated at the
//! conventional suctions pF 1.8 and pF 4.2 (ψ = 10^1.8 and 10^4.2 cm);
//! their water-content difference is the plant-available water.

use crate::physics::error::DomainError;
use crate::physics::parameters::RetentionCurveParameters;

/// Suction head at field capacity, pF 1.8 [cm].
pub const FIELD_CAPACITY_SUCTION: f64 = 63.095_734_448_019_32; // 10^1.8

/// Suction head at the permanent wilting point, pF 4.2 [cm].
pub const WILTING_POINT_SUCTION: f64 = 15_848.931_924_611_14; // 10^4.2

// =================================================================================================
// Van Genuchten model
// =================================================================================================

/// Van Genuchten–Mualem retention and relative-conductivity model.
///
/// # Example
///
/// ```rust
/// use hydrogeo_rs::models::VanGenuchten;
///
/// let loam = VanGenuchten::loam();
///
/// // Saturated at zero suction, draining toward θr with rising suction.
/// assert!((loam.effective_saturation(0.0) - 1.0).abs() < 1e-15);
/// assert!(loam.water_content(1e5) < loam.water_content(10.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanGenuchten {
    parameters: RetentionCurveParameters,
}

impl VanGenuchten {
    /// Creates the model from raw parameters (θr, θs, α [1/cm], n).
    ///
    /// # Errors
    ///
    /// Fails when 0 ≤ θr < θs ≤ 1 is violated, α ≤ 0, or n ≤ 1.
    pub fn new(theta_r: f64, theta_s: f64, alpha: f64, n_shape: f64) -> Result<Self, DomainError> {
        Ok(Self {
            parameters: RetentionCurveParameters::new(theta_r, theta_s, alpha, n_shape)?,
        })
    }

    /// Creates the model from an already validated parameter set.
    pub fn from_parameters(parameters: RetentionCurveParameters) -> Self {
        Self { parameters }
    }

    // Carsel & Parrish (1988) class-average parameters, α in 1/cm.

    /// Typical sand.
    pub fn sand() -> Self {
        Self::preset(0.045, 0.43, 0.145, 2.68)
    }

    /// Typical loam.
    pub fn loam() -> Self {
        Self::preset(0.078, 0.43, 0.036, 1.56)
    }

    /// Typical silt loam.
    pub fn silt_loam() -> Self {
        Self::preset(0.067, 0.45, 0.020, 1.41)
    }

    /// Typical clay.
    pub fn clay() -> Self {
        Self::preset(0.068, 0.38, 0.008, 1.09)
    }

    fn preset(theta_r: f64, theta_s: f64, alpha: f64, n_shape: f64) -> Self {
        // Literature values satisfy the constructor invariants.
        match Self::new(theta_r, theta_s, alpha, n_shape) {
            Ok(model) => model,
            Err(_) => unreachable!("preset retention parameters are valid"),
        }
    }

    /// The validated parameter set.
    #[inline]
    pub fn parameters(&self) -> &RetentionCurveParameters {
        &self.parameters
    }

    /// Effective saturation Se(ψ) ∈ (0, 1].
    ///
    /// Non-positive suction (saturated or ponded conditions) returns
    /// exactly 1. The value approaches but never reaches 0 as ψ → ∞.
    pub fn effective_saturation(&self, suction: f64) -> f64 {
        if suction <= 0.0 {
            return 1.0;
        }
        let p = &self.parameters;
        (1.0 + (p.alpha() * suction).powf(p.n_shape())).powf(-p.m_shape())
    }

    /// Volumetric water content θ(ψ) ∈ [θr, θs].
    pub fn water_content(&self, suction: f64) -> f64 {
        let p = &self.parameters;
        p.theta_r() + (p.theta_s() - p.theta_r()) * self.effective_saturation(suction)
    }

    /// Mualem relative hydraulic conductivity kr(ψ) ∈ [0, 1].
    pub fn relative_conductivity(&self, suction: f64) -> f64 {
        let se = self.effective_saturation(suction);
        let m = self.parameters.m_shape();
        let term = 1.0 - (1.0 - se.powf(1.0 / m)).powf(m);
        se.sqrt() * term * term
    }

    /// Inverse retention curve: the suction ψ [cm] at which the effective
    /// saturation equals `se`.
    ///
    /// ```text
    /// ψ(Se) = (Se^(-1/m) - 1)^(1/n) / α
    /// ```
    ///
    /// # Errors
    ///
    /// Fails for `se` outside (0, 1]; Se = 1 maps to ψ = 0.
    pub fn suction_head(&self, se: f64) -> Result<f64, DomainError> {
        DomainError::require_fraction("effective saturation Se", se, 0.0, 1.0)?;
        if se == 1.0 {
            return Ok(0.0);
        }
        let p = &self.parameters;
        Ok((se.powf(-1.0 / p.m_shape()) - 1.0).powf(1.0 / p.n_shape()) / p.alpha())
    }

    /// Water content at field capacity (pF 1.8).
    pub fn field_capacity(&self) -> f64 {
        self.water_content(FIELD_CAPACITY_SUCTION)
    }

    /// Water content at the permanent wilting point (pF 4.2).
    pub fn wilting_point(&self) -> f64 {
        self.water_content(WILTING_POINT_SUCTION)
    }

    /// Plant-available water: θ(FC) - θ(PWP) > 0 for any valid parameter
    /// set, since θ decreases strictly with suction.
    pub fn plant_available_water(&self) -> f64 {
        self.field_capacity() - self.wilting_point()
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
    fn test_saturation_at_zero_suction() {
        for soil in [VanGenuchten::sand(), VanGenuchten::loam(), VanGenuchten::clay()] {
            assert_eq!(soil.effective_saturation(0.0), 1.0);
            assert_eq!(soil.effective_saturation(-5.0), 1.0);
            assert_relative_eq!(
                soil.water_content(0.0),
                soil.parameters().theta_s(),
                max_relative = 1e-14
            );
            assert_relative_eq!(soil.relative_conductivity(0.0), 1.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_retention_curve_is_monotonically_draining() {
        let soil = VanGenuchten::loam();
        let suctions = [0.1, 1.0, 10.0, 100.0, 1e3, 1e4, 1e5];
        for pair in suctions.windows(2) {
            assert!(soil.effective_saturation(pair[0]) > soil.effective_saturation(pair[1]));
            assert!(soil.water_content(pair[0]) > soil.water_content(pair[1]));
            assert!(soil.relative_conductivity(pair[0]) >= soil.relative_conductivity(pair[1]));
        }
    }

    #[test]
    fn test_bounds_hold_over_extreme_suctions() {
        let soil = VanGenuchten::clay();
        let p = soil.parameters();
        let mut suction = 1e-6;
        while suction <= 1e18 {
            let se = soil.effective_saturation(suction);
            let theta = soil.water_content(suction);
            let kr = soil.relative_conductivity(suction);

            assert!(se > 0.0 && se <= 1.0, "Se out of bounds at psi = {suction}");
            assert!(theta >= p.theta_r() && theta <= p.theta_s());
            assert!((0.0..=1.0).contains(&kr));

            suction *= 100.0;
        }
    }

    #[test]
    fn test_retention_inverse_round_trip() {
        let soil = VanGenuchten::loam();
        for suction in [1e-2, 1.0, 50.0, 1e3, 1e4] {
            let se = soil.effective_saturation(suction);
            let back = soil.suction_head(se).unwrap();
            assert_relative_eq!(back, suction, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_inverse_rejects_saturations_outside_unit_interval() {
        let soil = VanGenuchten::sand();
        assert!(soil.suction_head(0.0).is_err());
        assert!(soil.suction_head(-0.1).is_err());
        assert!(soil.suction_head(1.1).is_err());
        assert_eq!(soil.suction_head(1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_plant_available_water_is_positive() {
        for soil in [
            VanGenuchten::sand(),
            VanGenuchten::loam(),
            VanGenuchten::silt_loam(),
            VanGenuchten::clay(),
        ] {
            let paw = soil.plant_available_water();
            assert!(paw > 0.0);
            assert!(paw < soil.parameters().theta_s());
        }
    }

    #[test]
    fn test_sand_drains_faster_than_clay() {
        // At moderate suction sand has shed most of its water while clay
        // has barely started draining.
        let suction = 100.0;
        let se_sand = VanGenuchten::sand().effective_saturation(suction);
        let se_clay = VanGenuchten::clay().effective_saturation(suction);
        assert!(se_sand < 0.2);
        assert!(se_clay > 0.7);
    }
}
