//! Ghyben-Herzberg fresh/saltwater interface
//!
//! # Mathematical Background
//!
//! Under hydrostatic equilibrium, a column of fresh water standing h metres
//! above sea level balances a saltwater column reaching down to
//!
//! ```text
//! z = ρf / (ρs - ρf) · h
//! ```
//!
//! below sea level. For standard densities (ρf = 1000, ρs = 1025 kg/m³)
//! the ratio is 40: every metre of freshwater head above sea level presses
//! the interface forty metres down. The total freshwater lens thickness is
//! therefore (1 + ρf/(ρs - ρf)) · h ≈ 41·h.
//!
//! The relation is a sharp-interface, hydrostatic idealization; it is
//! linear in h, so it composes directly with any head field produced by the
//! flow models in this crate.

use crate::physics::error::DomainError;

/// Sharp-interface position from the Ghyben-Herzberg relation.
///
/// # Example
///
/// ```rust
/// use hydrogeo_rs::models::GhybenHerzberg;
///
/// let island = GhybenHerzberg::seawater();
/// assert!((island.density_ratio() - 40.0).abs() < 1e-12);
///
/// // 0.5 m of head above sea level -> interface 20 m below it.
/// assert!((island.interface_depth(0.5) - 20.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhybenHerzberg {
    /// Freshwater density ρf [kg/m³]
    fresh_density: f64,

    /// Saltwater density ρs [kg/m³]
    saline_density: f64,
}

impl GhybenHerzberg {
    /// Creates the relation for the given densities.
    ///
    /// # Errors
    ///
    /// Fails when either density is not strictly positive or when
    /// ρf ≥ ρs — a non-positive density contrast has no stable interface.
    pub fn new(fresh_density: f64, saline_density: f64) -> Result<Self, DomainError> {
        DomainError::require_positive("freshwater density rho_f", fresh_density)?;
        DomainError::require_positive("saltwater density rho_s", saline_density)?;
        if fresh_density >= saline_density {
            return Err(DomainError::DensityOrdering {
                fresh: fresh_density,
                saline: saline_density,
            });
        }

        Ok(Self {
            fresh_density,
            saline_density,
        })
    }

    /// Standard seawater contrast: ρf = 1000, ρs = 1025 kg/m³ (ratio 40).
    pub fn seawater() -> Self {
        Self {
            fresh_density: 1000.0,
            saline_density: 1025.0,
        }
    }

    /// Density ratio ρf / (ρs - ρf).
    #[inline]
    pub fn density_ratio(&self) -> f64 {
        self.fresh_density / (self.saline_density - self.fresh_density)
    }

    /// Interface depth below sea level [m] for a freshwater head `head` [m]
    /// above sea level.
    ///
    /// Negative head (head below sea level) yields a negative depth: the
    /// interface rises above sea level, i.e. full saltwater intrusion at
    /// that point.
    #[inline]
    pub fn interface_depth(&self, head: f64) -> f64 {
        self.density_ratio() * head
    }

    /// Total thickness of the freshwater lens [m]: head above sea level
    /// plus interface depth below it.
    #[inline]
    pub fn lens_thickness(&self, head: f64) -> f64 {
        (1.0 + self.density_ratio()) * head
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
    fn test_seawater_ratio_is_forty() {
        let relation = GhybenHerzberg::seawater();
        assert_relative_eq!(relation.density_ratio(), 40.0, max_relative = 1e-12);
        assert_relative_eq!(relation.interface_depth(1.5), 60.0, max_relative = 1e-12);
        assert_relative_eq!(relation.lens_thickness(1.5), 61.5, max_relative = 1e-12);
    }

    #[test]
    fn test_interface_is_linear_in_head() {
        let relation = GhybenHerzberg::seawater();
        let z1 = relation.interface_depth(0.3);
        let z2 = relation.interface_depth(0.6);
        assert_relative_eq!(z2, 2.0 * z1, max_relative = 1e-12);
    }

    #[test]
    fn test_brackish_contrast_deepens_interface() {
        // A weaker density contrast pushes the interface further down for
        // the same head.
        let brackish = GhybenHerzberg::new(1000.0, 1010.0).unwrap();
        let seawater = GhybenHerzberg::seawater();
        assert!(brackish.interface_depth(1.0) > seawater.interface_depth(1.0));
    }

    #[test]
    fn test_negative_head_signals_intrusion() {
        let relation = GhybenHerzberg::seawater();
        assert!(relation.interface_depth(-0.2) < 0.0);
    }

    #[test]
    fn test_density_ordering_is_enforced() {
        let err = GhybenHerzberg::new(1025.0, 1000.0).unwrap_err();
        assert!(matches!(err, DomainError::DensityOrdering { .. }));
        assert!(GhybenHerzberg::new(1000.0, 1000.0).is_err());
        assert!(GhybenHerzberg::new(0.0, 1025.0).is_err());
    }
}
