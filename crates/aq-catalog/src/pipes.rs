//! PVC pipe dimension table, US nominal sizes.

use crate::error::{CatalogError, CatalogResult};
use aq_core::units::{Length, inch};

/// One row of the pipe dimension table. All dimensions in inches, matching
/// the reference data this table was taken from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeRow {
    /// Nominal diameter
    pub nominal_in: f64,
    /// Outer diameter
    pub od_in: f64,
    /// Schedule-40 inner diameter
    pub id_sch40_in: f64,
    /// Whether this size is currently stocked
    pub available: bool,
}

const PIPE_TABLE: [PipeRow; 13] = [
    PipeRow {
        nominal_in: 0.5,
        od_in: 0.840,
        id_sch40_in: 0.622,
        available: true,
    },
    PipeRow {
        nominal_in: 0.75,
        od_in: 1.050,
        id_sch40_in: 0.824,
        available: true,
    },
    PipeRow {
        nominal_in: 1.0,
        od_in: 1.315,
        id_sch40_in: 1.049,
        available: true,
    },
    PipeRow {
        nominal_in: 1.25,
        od_in: 1.660,
        id_sch40_in: 1.380,
        available: false,
    },
    PipeRow {
        nominal_in: 1.5,
        od_in: 1.900,
        id_sch40_in: 1.610,
        available: true,
    },
    PipeRow {
        nominal_in: 2.0,
        od_in: 2.375,
        id_sch40_in: 2.067,
        available: true,
    },
    PipeRow {
        nominal_in: 2.5,
        od_in: 2.875,
        id_sch40_in: 2.469,
        available: false,
    },
    PipeRow {
        nominal_in: 3.0,
        od_in: 3.500,
        id_sch40_in: 3.068,
        available: true,
    },
    PipeRow {
        nominal_in: 4.0,
        od_in: 4.500,
        id_sch40_in: 4.026,
        available: true,
    },
    PipeRow {
        nominal_in: 6.0,
        od_in: 6.625,
        id_sch40_in: 6.065,
        available: true,
    },
    PipeRow {
        nominal_in: 8.0,
        od_in: 8.625,
        id_sch40_in: 7.981,
        available: true,
    },
    PipeRow {
        nominal_in: 10.0,
        od_in: 10.750,
        id_sch40_in: 10.020,
        available: true,
    },
    PipeRow {
        nominal_in: 12.0,
        od_in: 12.750,
        id_sch40_in: 11.938,
        available: false,
    },
];

pub fn rows() -> &'static [PipeRow] {
    &PIPE_TABLE
}

fn available_rows() -> impl Iterator<Item = &'static PipeRow> {
    PIPE_TABLE.iter().filter(|row| row.available)
}

/// Smallest available nominal size at or above `target`.
pub fn next_available_size(target: Length) -> CatalogResult<Length> {
    let target_in = target.get::<uom::si::length::inch>();
    available_rows()
        .find(|row| row.nominal_in >= target_in - 1e-9)
        .map(|row| inch(row.nominal_in))
        .ok_or_else(|| CatalogError::OutOfRange {
            requested_in: target_in,
            largest_in: available_rows()
                .map(|row| row.nominal_in)
                .fold(0.0, f64::max),
        })
}

/// Table row whose nominal size is nearest to `size`.
pub fn sch40_row_for_size(size: Length) -> &'static PipeRow {
    let size_in = size.get::<uom::si::length::inch>();
    nearest_by(|row| (row.nominal_in - size_in).abs())
}

/// Available row whose schedule-40 inner diameter is nearest to `id`.
pub fn nearest_sch40_by_id(id: Length) -> &'static PipeRow {
    let id_in = id.get::<uom::si::length::inch>();
    nearest_by(|row| (row.id_sch40_in - id_in).abs())
}

fn nearest_by(distance: impl Fn(&PipeRow) -> f64) -> &'static PipeRow {
    available_rows()
        .min_by(|a, b| {
            distance(a)
                .partial_cmp(&distance(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("pipe table has available rows")
}
