//! Prognosis service: validates input, runs the pipeline through the cache
//! and exposes the simulation operations.

use std::sync::Arc;

use crate::domain::{ClinicalInput, Evaluation, FactorName, SimulationResult};
use crate::ports::{InputFingerprint, ReportCache};
use crate::Result;

use super::config::ServiceConfig;
use super::simulation;

/// Service for evaluating clinical inputs.
///
/// The cache is owned by the service: it is built on construction and
/// cleared on demand with [`PrognosisService::clear_cache`].
pub struct PrognosisService<C: ReportCache + ?Sized = dyn ReportCache> {
    cache: Arc<C>,
    cycles_per_year: u32,
}

impl PrognosisService {
    /// Build a service whose cache is described by `config`.
    #[must_use]
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(Arc::from(config.cache.build()), config.cycles_per_year)
    }

    /// Build a service from environment overrides.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_config(&ServiceConfig::from_env_or_default())
    }
}

impl<C: ReportCache + ?Sized> PrognosisService<C> {
    /// Create a new prognosis service.
    pub fn new(cache: Arc<C>, cycles_per_year: u32) -> Self {
        Self {
            cache,
            cycles_per_year: cycles_per_year.max(1),
        }
    }

    #[must_use]
    pub fn cycles_per_year(&self) -> u32 {
        self.cycles_per_year
    }

    /// Validate `input` and evaluate it, reusing a cached evaluation for an
    /// identical input.
    ///
    /// # Errors
    /// Returns `PrognosisError::Validation` for structurally invalid input.
    pub fn evaluate(&self, input: &ClinicalInput) -> Result<Evaluation> {
        input.validate()?;

        let key = InputFingerprint::of(input, self.cycles_per_year)?;
        tracing::info!("Evaluating input {}", key.short());

        let cycles = self.cycles_per_year;
        let evaluation = self
            .cache
            .get_or_insert_with(key.clone(), &mut || Evaluation::run(input, cycles));

        tracing::info!(
            "Input {} evaluated: {} ({} recommendations)",
            key.short(),
            evaluation.report.category,
            evaluation.report.recommendations.len()
        );

        Ok(evaluation)
    }

    /// Parse a JSON `ClinicalInput` and evaluate it.
    ///
    /// # Errors
    /// Returns `PrognosisError::Serialization` for malformed JSON and
    /// `PrognosisError::Validation` for unknown categories, out-of-range
    /// counts or invalid numbers.
    pub fn evaluate_json(&self, json: &str) -> Result<Evaluation> {
        let input = ClinicalInput::from_json(json)?;
        self.evaluate(&input)
    }

    /// Simulate normalizing a single factor.
    #[must_use]
    pub fn simulate_factor(
        &self,
        evaluation: &Evaluation,
        name: FactorName,
        label: &str,
    ) -> SimulationResult {
        simulation::simulate_factor(evaluation, name, label)
    }

    /// Simulate normalizing a factor given by its key (e.g. `"amh"`).
    ///
    /// # Errors
    /// Returns `PrognosisError::Validation` for an unknown factor name.
    pub fn simulate_factor_by_key(
        &self,
        evaluation: &Evaluation,
        key: &str,
        label: &str,
    ) -> Result<SimulationResult> {
        let name: FactorName = key.parse()?;
        Ok(self.simulate_factor(evaluation, name, label))
    }

    /// Simulate normalizing every sub-optimal factor.
    #[must_use]
    pub fn simulate_all_improvements(&self, evaluation: &Evaluation) -> SimulationResult {
        simulation::simulate_all_improvements(evaluation)
    }

    /// Sub-optimal factors ranked by achievable gain.
    #[must_use]
    pub fn improvement_candidates(&self, evaluation: &Evaluation) -> Vec<(FactorName, f64)> {
        simulation::improvement_candidates(evaluation)
    }

    #[must_use]
    pub fn can_simulate_all(&self, evaluation: &Evaluation) -> bool {
        simulation::can_simulate_all(evaluation)
    }

    /// Drop every cached evaluation.
    pub fn clear_cache(&self) {
        self.cache.invalidate_all();
        tracing::info!("Result cache cleared");
    }

    #[must_use]
    pub fn cached_entries(&self) -> u64 {
        self.cache.entry_count()
    }
}
