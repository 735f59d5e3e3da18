//! # Fertility Prognosis
//!
//! Estimates the per-cycle probability of spontaneous pregnancy from
//! clinical inputs and produces a report with a category, a benchmark
//! comparison and ordered recommendations.
//!
//! This crate provides:
//! - Per-factor evaluators turning raw values into multipliers in [0, 1]
//! - Odds-space combination of an age baseline with every multiplier
//! - What-if simulation normalizing one or all sub-optimal factors
//! - An optional bounded result cache
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Input, evaluators, combination and report types
//! - `ports`: Trait definitions for the result cache
//! - `adapters`: Concrete implementations (moka cache, log redaction)
//! - `application`: Prognosis service and simulation use cases

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use application::{PrognosisService, ServiceConfig};
pub use domain::{
    Category, ClinicalInput, Evaluation, FactorName, FactorSet, Report, SimulationResult,
    ValidationError,
};

/// Result type for prognosis operations
pub type Result<T> = std::result::Result<T, PrognosisError>;

/// Main error type for the prognosis engine
#[derive(Debug, thiserror::Error)]
pub enum PrognosisError {
    #[error("Invalid clinical input: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<domain::InputError> for PrognosisError {
    fn from(err: domain::InputError) -> Self {
        match err {
            domain::InputError::Json(e) => Self::Serialization(e),
            domain::InputError::Invalid(e) => Self::Validation(e),
        }
    }
}
