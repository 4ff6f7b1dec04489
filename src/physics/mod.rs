//! Physical foundations of the analytical engine
//!
//! This module gathers everything the analytical models in [`crate::models`]
//! build on:
//!
//! - [`special`]: numerically vetted special functions (exponential integral
//!   / Theis well function, error functions)
//! - [`error`]: the domain-error taxonomy returned when physical
//!   preconditions are violated
//! - [`parameters`]: immutable, validated parameter value objects
//!   (aquifer, retention curve, UI-facing parameter specifications)
//!
//! # Design
//!
//! Every public constructor validates its physical domain and returns
//! `Result<_, DomainError>`; once constructed, a parameter object is
//! immutable and can be shared freely between evaluations. Expected
//! physical edge states (dry well, unconfined conditions) are *not* errors
//! and never appear in this module — they are ordinary result values of the
//! models that produce them.

pub mod error;
pub mod parameters;
pub mod special;

pub use error::DomainError;
pub use parameters::{AquiferParameters, ParameterSpec, RetentionCurveParameters};
