//! aq-pipeline: composition and solving of treatment-plant piping chains.
//!
//! A pipeline is a forward-linked chain of typed components (pipes, elbows,
//! tees). Each component resolves its dimensions against the parts catalog at
//! construction, reads plant-wide inputs (flow rate, temperature) through a
//! shared configuration record, and knows its own head loss. Chains support
//! aggregate head loss and the inverse problem: the flow rate that produces a
//! target head loss.
//!
//! # Example
//!
//! ```
//! use aq_core::units::{cm, inch, m};
//! use aq_pipeline::{Component, Elbow, Pipe};
//!
//! # fn main() -> Result<(), aq_pipeline::PipelineError> {
//! let tail = Pipe::builder().size(inch(1.0)).length(m(2.0)).build()?;
//! let elbow = Elbow::builder().size(inch(1.0)).next(tail).build()?;
//! let head = Pipe::builder().size(inch(1.0)).length(m(1.0)).next(elbow).build()?;
//!
//! let chain = Component::Pipe(head);
//! let flow = chain.solve_flow_for_head_loss(cm(40.0))?;
//! println!("{chain}");
//! println!("flow: {} m³/s", flow.value);
//! # Ok(())
//! # }
//! ```

pub mod component;
pub mod config;
pub mod elbow;
pub mod error;
pub mod pipe;
pub mod solver;
pub mod tee;

// Re-exports
pub use component::{Component, Kind};
pub use config::{Configured, PlantConfig, PlantContext};
pub use elbow::{Elbow, ElbowAngle};
pub use error::{PipelineError, PipelineResult};
pub use pipe::{Pipe, PipeStandard};
pub use tee::{Tee, TeeOutlet, TeePath};
