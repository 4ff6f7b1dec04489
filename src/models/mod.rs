//! Analytical solution models
//!
//! Each submodule implements one closed-form (or implicitly defined)
//! solution family as a small value type: validated construction, then
//! pure evaluation methods. The models know nothing about grids,
//! superposition, or presentation; they map physical inputs to physical
//! outputs and report boundary states through their return types.
//!
//! | Module | Solution family |
//! |--------|-----------------|
//! | [`theis`] | Transient radial drawdown (Theis), Jacob unconfined correction |
//! | [`thiem`] | Steady radial flow, Sichardt radius of influence, capture zones |
//! | [`transport`] | Advection-dispersion: Ogata-Banks, Gaussian pulse, Domenico plume |
//! | [`retention`] | Van Genuchten–Mualem soil-water retention |
//! | [`mnw`] | Multi-node well head/discharge relation with well loss |
//! | [`interface`] | Ghyben-Herzberg fresh/saltwater interface |

pub mod interface;
pub mod mnw;
pub mod retention;
pub mod theis;
pub mod thiem;
pub mod transport;

pub use interface::GhybenHerzberg;
pub use mnw::MnwWell;
pub use retention::VanGenuchten;
pub use theis::{CorrectedDrawdown, TheisWell};
pub use thiem::{ThiemWell, WellState};
pub use transport::{DomenicoPlume, GaussianPulse, OgataBanks};
