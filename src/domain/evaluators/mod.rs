//! Per-factor clinical evaluators.
//!
//! Each evaluator maps a narrow slice of `ClinicalInput` to an `Assessment`:
//! an optional multiplier in [0, 1], optional commentary and an optional
//! missing-data notice. `evaluate` runs them all over the fixed factor list.

pub mod age;
pub mod history;
pub mod hormonal;
pub mod male;
pub mod metabolic;
pub mod tubal;
pub mod uterine;

use super::factors::{DiagnosticSet, FactorName, FactorSet};
use super::input::ClinicalInput;

pub use age::{AgeBaseline, CLINICAL_AGE_RANGE};
pub use male::{MaleFinding, MaleParameter};

/// Output of a single evaluator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Assessment {
    pub factor: Option<f64>,
    pub diagnostic: Option<String>,
    pub missing: Option<String>,
}

impl Assessment {
    /// A multiplier with commentary.
    #[must_use]
    pub fn scored(factor: f64, diagnostic: impl Into<String>) -> Self {
        Self {
            factor: Some(factor),
            diagnostic: Some(diagnostic.into()),
            missing: None,
        }
    }

    /// A multiplier without commentary.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            factor: Some(1.0),
            ..Self::default()
        }
    }

    /// No multiplier; the input needed for this factor was not provided.
    #[must_use]
    pub fn missing(notice: impl Into<String>) -> Self {
        Self {
            missing: Some(notice.into()),
            ..Self::default()
        }
    }

    /// No multiplier and nothing to report.
    #[must_use]
    pub fn skipped() -> Self {
        Self::default()
    }
}

/// Result of running every evaluator over one input.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorEvaluation {
    pub baseline: AgeBaseline,
    pub factors: FactorSet,
    pub diagnostics: DiagnosticSet,
}

/// Run the evaluator owning `name`.
#[must_use]
pub fn evaluate_factor(name: FactorName, input: &ClinicalInput) -> Assessment {
    match name {
        FactorName::Bmi => metabolic::bmi(input.bmi),
        FactorName::Cycle => metabolic::cycle(input.cycle_length),
        FactorName::Pcos => metabolic::pcos(input.has_pcos, input.bmi, input.cycle_length),
        FactorName::Endometriosis => uterine::endometriosis(input.endometriosis_grade),
        FactorName::Myoma => uterine::myoma(input.myoma_type),
        FactorName::Adenomyosis => uterine::adenomyosis(input.adenomyosis_type),
        FactorName::Polyp => uterine::polyp(input.polyp_type),
        FactorName::Hsg => tubal::hsg(input.hsg_result),
        FactorName::Otb => tubal::otb(input.has_otb),
        FactorName::Amh => hormonal::amh(input.amh),
        FactorName::Prolactin => hormonal::prolactin(input.prolactin),
        FactorName::Tsh => hormonal::tsh(input.tsh),
        FactorName::Homa => metabolic::homa(input.homa_ir()),
        FactorName::InfertilityDuration => history::infertility_duration(input.infertility_years),
        FactorName::PelvicSurgery => history::pelvic_surgeries(input.pelvic_surgeries),
        FactorName::Male => male::evaluate(
            input.sperm_concentration,
            input.sperm_motility,
            input.sperm_morphology,
        )
        .into(),
    }
}

/// Evaluate the age baseline and every factor.
///
/// Each evaluator contributes at most one factor entry and one diagnostic
/// entry; missing-data notices keep evaluation order.
#[must_use]
pub fn evaluate(input: &ClinicalInput) -> FactorEvaluation {
    let baseline = age::baseline(input.age);

    let mut factors = FactorSet::new();
    let mut diagnostics = DiagnosticSet {
        age: Some(baseline.diagnostic.clone()),
        ..DiagnosticSet::default()
    };

    for name in FactorName::ALL {
        let assessment = evaluate_factor(name, input);

        if let Some(value) = assessment.factor {
            factors = factors.with(name, value);
        }
        if let Some(text) = assessment.diagnostic {
            diagnostics.factors.insert(name, text);
        }
        if let Some(notice) = assessment.missing {
            diagnostics.missing.push(notice);
        }
    }

    tracing::debug!(
        "Evaluated {} factors ({} sub-optimal, {} missing)",
        factors.len(),
        factors.suboptimal().len(),
        diagnostics.missing.len()
    );

    FactorEvaluation {
        baseline,
        factors,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::input::{HsgResult, MyomaType};

    #[test]
    fn test_age_only_input() {
        let result = evaluate(&ClinicalInput::new(32.0));

        assert!((result.baseline.annual - 0.175).abs() < 1e-12);
        assert!(result.factors.suboptimal().is_empty());
        assert!(!result.factors.contains(FactorName::Bmi));
        assert!(!result.factors.contains(FactorName::Homa));
        assert!(result.factors.contains(FactorName::Otb));

        let missing = result.diagnostics.missing.join(" | ");
        for lab in ["BMI", "cycle", "HSG", "AMH", "Prolactin", "TSH", "Semen"] {
            assert!(missing.contains(lab), "missing notice for {lab}: {missing}");
        }
        assert!(!missing.contains("HOMA"));
    }

    #[test]
    fn test_each_evaluator_contributes_once() {
        let input = ClinicalInput {
            bmi: Some(27.0),
            cycle_length: Some(40.0),
            has_pcos: true,
            myoma_type: MyomaType::Submucosal,
            hsg_result: HsgResult::Unilateral,
            amh: Some(0.8),
            ..ClinicalInput::new(36.0)
        };
        let result = evaluate(&input);

        assert!((result.factors.get(FactorName::Bmi) - 0.85).abs() < 1e-12);
        assert!((result.factors.get(FactorName::Cycle) - 0.7).abs() < 1e-12);
        assert!((result.factors.get(FactorName::Pcos) - 0.9 * 0.85).abs() < 1e-12);
        assert!((result.factors.get(FactorName::Myoma) - 0.3).abs() < 1e-12);
        assert!((result.factors.get(FactorName::Hsg) - 0.7).abs() < 1e-12);
        assert!((result.factors.get(FactorName::Amh) - 0.6).abs() < 1e-12);
        assert_eq!(
            result.factors.suboptimal(),
            vec![
                FactorName::Bmi,
                FactorName::Cycle,
                FactorName::Pcos,
                FactorName::Myoma,
                FactorName::Hsg,
                FactorName::Amh,
            ]
        );
    }
}
