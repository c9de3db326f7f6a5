use aq_physchem::PhyschemError;
use thiserror::Error;

pub type FlocResult<T> = Result<T, FlocError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlocError {
    #[error("Non-physical design input: {what}")]
    NonPhysical { what: &'static str },

    #[error(transparent)]
    Physchem(#[from] PhyschemError),
}
