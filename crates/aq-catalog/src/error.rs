use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("No available size at or above {requested_in} in (largest is {largest_in} in)")]
    OutOfRange { requested_in: f64, largest_in: f64 },
}
