//! Error types for pipeline assembly and solving.

use aq_catalog::CatalogError;
use aq_physchem::PhyschemError;
use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Mutually exclusive options both given, or a required input missing.
    #[error("Invalid configuration: {what}")]
    InvalidConfiguration { what: &'static str },

    /// The assembled chain violates a structural rule.
    #[error("Structural error: {what}")]
    Structure { what: String },

    /// The flow solve exhausted its iteration budget.
    #[error("Flow solve did not converge within {iterations} iterations")]
    Convergence { iterations: usize },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Physchem(#[from] PhyschemError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PipelineError::InvalidConfiguration {
            what: "size and inner diameter",
        };
        assert!(err.to_string().contains("size and inner diameter"));
    }

    #[test]
    fn physchem_errors_convert() {
        let err: PipelineError = PhyschemError::NonPhysical { what: "diameter" }.into();
        assert!(matches!(err, PipelineError::Physchem(_)));
    }
}
