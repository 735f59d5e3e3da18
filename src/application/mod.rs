//! Application layer: Use cases and services.
//!
//! Orchestrates the domain pipeline with the cache port and exposes the
//! what-if simulation operations.

mod config;
mod prognosis;
pub mod simulation;

pub use config::ServiceConfig;
pub use prognosis::PrognosisService;
