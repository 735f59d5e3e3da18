//! Full pipeline for one input: evaluators, combination and report.

use serde::{Deserialize, Serialize};

use super::combination::{self, Prognosis};
use super::evaluators;
use super::factors::{DiagnosticSet, FactorSet};
use super::input::ClinicalInput;
use super::report::Report;

/// Everything derived from one `ClinicalInput`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub age: f64,
    pub cycles_per_year: u32,
    pub factors: FactorSet,
    pub diagnostics: DiagnosticSet,
    pub prognosis: Prognosis,
    pub report: Report,
}

impl Evaluation {
    /// Run the whole pipeline. The input is assumed to be validated.
    #[must_use]
    pub fn run(input: &ClinicalInput, cycles_per_year: u32) -> Self {
        let evaluated = evaluators::evaluate(input);
        let prognosis = combination::combine(
            evaluated.baseline.annual,
            &evaluated.factors,
            cycles_per_year,
        );
        let report = Report::generate(
            input.age,
            &prognosis,
            &evaluated.factors,
            &evaluated.diagnostics,
        );

        Self {
            age: input.age,
            cycles_per_year,
            factors: evaluated.factors,
            diagnostics: evaluated.diagnostics,
            prognosis,
            report,
        }
    }

    /// Re-run combination and reporting with a different factor set,
    /// keeping the baseline and diagnostics. `self` is left untouched.
    #[must_use]
    pub fn with_factors(&self, factors: FactorSet) -> Self {
        let prognosis =
            combination::combine(self.prognosis.baseline_annual, &factors, self.cycles_per_year);
        let report = Report::generate(self.age, &prognosis, &factors, &self.diagnostics);

        Self {
            age: self.age,
            cycles_per_year: self.cycles_per_year,
            factors,
            diagnostics: self.diagnostics.clone(),
            prognosis,
            report,
        }
    }
}
