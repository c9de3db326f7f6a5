//! aq-physchem: physical-chemistry formula library for hydraulic design.
//!
//! Pure functions, no state:
//! - water properties vs. temperature (density, viscosity)
//! - pipe flow relations (Reynolds number, friction factor, head loss,
//!   and the inverse problem of flow from head loss)
//! - reference material roughness values
//!
//! All quantities are unit-checked at the API boundary; internally the
//! formulas work on SI `f64` values.

pub mod error;
pub mod flow;
pub mod materials;
pub mod water;

pub use error::{PhyschemError, PhyschemResult};
pub use flow::{
    flow_pipe, friction_factor, headloss, headloss_fric, headloss_minor, reynolds_pipe,
};
pub use water::{density, viscosity_dynamic, viscosity_kinematic};
