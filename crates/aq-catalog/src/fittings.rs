//! PVC fitting dimension table (elbows and tees), US nominal sizes.

use aq_core::units::Length;

/// One row of the fitting dimension table, dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittingRow {
    /// Nominal fitting size
    pub size_in: f64,
    /// Socket inner diameter
    pub id_in: f64,
    /// Whether this size is currently stocked
    pub available: bool,
}

const FITTING_TABLE: [FittingRow; 11] = [
    FittingRow {
        size_in: 0.5,
        id_in: 0.848,
        available: true,
    },
    FittingRow {
        size_in: 0.75,
        id_in: 1.058,
        available: true,
    },
    FittingRow {
        size_in: 1.0,
        id_in: 1.325,
        available: true,
    },
    FittingRow {
        size_in: 1.25,
        id_in: 1.670,
        available: false,
    },
    FittingRow {
        size_in: 1.5,
        id_in: 1.912,
        available: true,
    },
    FittingRow {
        size_in: 2.0,
        id_in: 2.387,
        available: true,
    },
    FittingRow {
        size_in: 2.5,
        id_in: 2.889,
        available: false,
    },
    FittingRow {
        size_in: 3.0,
        id_in: 3.516,
        available: true,
    },
    FittingRow {
        size_in: 4.0,
        id_in: 4.518,
        available: true,
    },
    FittingRow {
        size_in: 6.0,
        id_in: 6.647,
        available: true,
    },
    FittingRow {
        size_in: 8.0,
        id_in: 8.655,
        available: true,
    },
];

pub fn rows() -> &'static [FittingRow] {
    &FITTING_TABLE
}

fn nearest_by(distance: impl Fn(&FittingRow) -> f64) -> &'static FittingRow {
    FITTING_TABLE
        .iter()
        .filter(|row| row.available)
        .min_by(|a, b| {
            distance(a)
                .partial_cmp(&distance(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("fitting table has available rows")
}

/// Available fitting nearest to the requested nominal size.
pub fn nearest_fitting_by_size(size: Length) -> &'static FittingRow {
    let size_in = size.get::<uom::si::length::inch>();
    nearest_by(|row| (row.size_in - size_in).abs())
}

/// Available fitting whose socket inner diameter is nearest to `id`.
pub fn nearest_fitting_by_id(id: Length) -> &'static FittingRow {
    let id_in = id.get::<uom::si::length::inch>();
    nearest_by(|row| (row.id_in - id_in).abs())
}
