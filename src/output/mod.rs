//! Result export and observation post-processing
//!
//! Everything downstream of the physics: writing computed profiles and
//! fields to CSV ([`csv`]) and scoring simulated heads against field
//! observations ([`observations`]). Failures here are I/O and format
//! problems, not physics, so they carry their own error type instead of
//! [`crate::physics::error::DomainError`].

use thiserror::Error;

pub mod csv;
pub mod observations;

pub use observations::{ObservationRecord, ObservationStatistics};

/// Errors raised while exporting results or reading observation files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Underlying I/O failure
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of an observation file could not be parsed
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number in the input
        line: usize,
        /// What went wrong on that line
        message: String,
    },

    /// Column lengths disagree, or an observation set is empty
    #[error("inconsistent data: {0}")]
    Inconsistent(String),
}
