//! Shared fixtures for integration tests

#![allow(dead_code)] // each integration binary uses its own subset

use hydrogeo_rs::models::TheisWell;
use hydrogeo_rs::superposition::{SourceTerm, SuperpositionEngine};

/// One day in seconds.
pub const DAY: f64 = 86_400.0;

/// Relative error |computed - expected| / |expected|, absolute when the
/// expected value is zero.
pub fn relative_error(computed: f64, expected: f64) -> f64 {
    if expected == 0.0 {
        computed.abs()
    } else {
        ((computed - expected) / expected).abs()
    }
}

/// The aquifer used throughout the integration tests:
/// T = 1e-3 m²/s, S = 1e-4.
pub fn standard_kernel() -> TheisWell {
    TheisWell::new(1e-3, 1e-4).expect("standard test aquifer is valid")
}

/// A two-well doublet straddling the origin: withdrawal at (-250, 0) and a
/// stronger withdrawal at (250, 0).
pub fn doublet_engine() -> SuperpositionEngine {
    SuperpositionEngine::new(vec![
        SourceTerm::pumping((-250.0, 0.0), 0.01),
        SourceTerm::pumping((250.0, 0.0), 0.02),
    ])
}
