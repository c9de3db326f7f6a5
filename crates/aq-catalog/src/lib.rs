//! aq-catalog: reference tables of real-world pipe and fitting dimensions.
//!
//! The tables are compiled in and read-only; rows carry an availability flag
//! marking which sizes are currently stocked. Lookups resolve a requested
//! nominal size or inner diameter to the nearest available real-world entry:
//! pipes round up to the next stocked size, fittings match by smallest
//! absolute difference.

pub mod error;
pub mod fittings;
pub mod pipes;

pub use error::{CatalogError, CatalogResult};
pub use fittings::{FittingRow, nearest_fitting_by_id, nearest_fitting_by_size};
pub use pipes::{PipeRow, nearest_sch40_by_id, next_available_size, sch40_row_for_size};
