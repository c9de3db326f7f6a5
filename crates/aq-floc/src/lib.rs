//! aq-floc: hydraulic sizing of a baffled flocculation unit.
//!
//! Sizes channel and baffle geometry from a target collision potential (Gt),
//! the allotted head loss, and the plant-wide flow rate and temperature read
//! through the shared configuration record. All outputs are one-shot
//! algebraic computations.

pub mod error;
pub mod flocculator;

pub use error::{FlocError, FlocResult};
pub use flocculator::Flocculator;
