//! hydrogeo-rs: Analytical Groundwater Computation Engine
//!
//! A reusable computational core for interactive hydrogeology tools:
//! well hydraulics, solute transport, soil-water retention, and
//! saltwater-interface estimation from closed-form analytical solutions.
//!
//! # Architecture
//!
//! hydrogeo-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Analytical models define the closed-form laws (what to evaluate)
//!    - Solvers and the superposition engine drive the evaluation (how)
//!
//! 2. **Explicit Inputs, Explicit Outcomes**
//!    - Immutable parameter structs validated at construction
//!    - Expected physical edge states (dry well, unconfined conditions,
//!      non-convergence) are values, never panics
//!
//! # Quick Start
//!
//! ```rust
//! use hydrogeo_rs::models::TheisWell;
//! use hydrogeo_rs::superposition::{SourceTerm, SuperpositionEngine};
//! use hydrogeo_rs::grid::AxisSpec;
//!
//! # fn main() -> Result<(), hydrogeo_rs::physics::DomainError> {
//! // 1. Describe the aquifer
//! let well = TheisWell::new(1e-3, 1e-4)?; // T [m2/s], S [-]
//!
//! // 2. Place two pumping wells
//! let engine = SuperpositionEngine::new(vec![
//!     SourceTerm::pumping((-250.0, 0.0), 0.01),
//!     SourceTerm::pumping((250.0, 0.0), 0.02),
//! ]);
//!
//! // 3. Evaluate the drawdown profile one day into the test
//! let axis = AxisSpec::new(-1000.0, 1000.0, 401)?;
//! let profile = engine.drawdown_profile(&well, &axis, 0.0, 86_400.0);
//!
//! assert_eq!(profile.len(), 401);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: special functions, parameter types, domain validation
//! - [`models`]: closed-form analytical solutions (Theis, Thiem, Ogata-Banks,
//!   Gaussian pulse, Domenico plume, van Genuchten, Ghyben-Herzberg, MNW
//!   well loss)
//! - [`solver`]: implicit-equation solvers with explicit convergence contracts
//! - [`superposition`]: multi-source and image-well superposition
//! - [`grid`]: coordinate grids and vectorized evaluation
//! - [`output`]: CSV export and head-observation statistics

pub mod physics;

pub mod models;
pub mod solver;
pub mod superposition;
pub mod grid;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use hydrogeo_rs::prelude::*;
    //! ```
    pub use crate::physics::{special, DomainError};
    pub use crate::models::{DomenicoPlume,
                            GaussianPulse,
                            GhybenHerzberg,
                            MnwWell,
                            OgataBanks,
                            TheisWell,
                            ThiemWell,
                            VanGenuchten};
    pub use crate::solver::{FixedPointSolver, SolveOutcome};
    pub use crate::superposition::{PlanarBoundary,
                                   SourceTerm,
                                   SuperpositionEngine};
    pub use crate::grid::AxisSpec;
}
