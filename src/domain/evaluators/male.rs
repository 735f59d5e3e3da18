//! Semen analysis (male factor).
//!
//! Concentration, motility and morphology are checked independently. The
//! reported factor is the worst score; commentary lists every abnormality in
//! evaluation order.

use serde::{Deserialize, Serialize};

use super::Assessment;

/// Semen parameter, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaleParameter {
    Concentration,
    Motility,
    Morphology,
}

/// A single abnormal semen parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaleFinding {
    pub parameter: MaleParameter,
    pub score: f64,
    pub label: &'static str,
}

/// Outcome of the semen analysis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaleEvaluation {
    pub findings: Vec<MaleFinding>,
    /// Worst finding; the first evaluated wins exact ties
    pub worst: Option<MaleFinding>,
    pub all_missing: bool,
}

impl MaleEvaluation {
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.worst.as_ref().map_or(1.0, |f| f.score)
    }
}

impl From<MaleEvaluation> for Assessment {
    fn from(eval: MaleEvaluation) -> Self {
        if eval.all_missing {
            return Self {
                factor: Some(1.0),
                diagnostic: None,
                missing: Some("Semen analysis not provided".to_string()),
            };
        }

        let diagnostic = if eval.findings.is_empty() {
            "normal parameters".to_string()
        } else {
            eval.findings
                .iter()
                .map(|f| f.label)
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self::scored(eval.factor(), diagnostic)
    }
}

fn concentration(value: f64) -> Option<MaleFinding> {
    let (score, label) = if value < 5.0 {
        (0.25, "severe oligozoospermia")
    } else if value < 16.0 {
        (0.7, "oligozoospermia")
    } else {
        return None;
    };
    Some(MaleFinding {
        parameter: MaleParameter::Concentration,
        score,
        label,
    })
}

fn motility(value: f64) -> Option<MaleFinding> {
    let (score, label) = if value < 20.0 {
        (0.4, "severe asthenozoospermia")
    } else if value < 30.0 {
        (0.85, "asthenozoospermia")
    } else {
        return None;
    };
    Some(MaleFinding {
        parameter: MaleParameter::Motility,
        score,
        label,
    })
}

fn morphology(value: f64) -> Option<MaleFinding> {
    (value < 4.0).then_some(MaleFinding {
        parameter: MaleParameter::Morphology,
        score: 0.5,
        label: "teratozoospermia",
    })
}

/// Lowest-scoring finding; on exact ties the earlier one is kept.
fn worst_of(findings: &[MaleFinding]) -> Option<&MaleFinding> {
    findings.iter().fold(None, |worst, finding| match worst {
        Some(w) if w.score <= finding.score => Some(w),
        _ => Some(finding),
    })
}

/// Evaluate the three semen parameters.
#[must_use]
pub fn evaluate(
    concentration_m_ml: Option<f64>,
    motility_pct: Option<f64>,
    morphology_pct: Option<f64>,
) -> MaleEvaluation {
    let checks: [(Option<f64>, fn(f64) -> Option<MaleFinding>); 3] = [
        (concentration_m_ml, concentration),
        (motility_pct, motility),
        (morphology_pct, morphology),
    ];

    if checks.iter().all(|(value, _)| value.is_none()) {
        return MaleEvaluation {
            all_missing: true,
            ..MaleEvaluation::default()
        };
    }

    let findings: Vec<MaleFinding> = checks
        .iter()
        .filter_map(|(value, check)| (*value).and_then(*check))
        .collect();

    MaleEvaluation {
        worst: worst_of(&findings).cloned(),
        findings,
        all_missing: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_abnormality() {
        let eval = evaluate(Some(3.0), Some(50.0), Some(6.0));
        assert!((eval.factor() - 0.25).abs() < 1e-12);

        let assessment: Assessment = eval.into();
        assert_eq!(assessment.factor, Some(0.25));
        assert_eq!(assessment.diagnostic.as_deref(), Some("severe oligozoospermia"));
    }

    #[test]
    fn test_multiple_abnormalities_take_minimum() {
        let eval = evaluate(Some(10.0), Some(15.0), Some(2.0));
        assert_eq!(eval.findings.len(), 3);
        assert!((eval.factor() - 0.4).abs() < 1e-12);
        assert_eq!(
            eval.worst.as_ref().map(|f| f.parameter),
            Some(MaleParameter::Motility)
        );

        let assessment: Assessment = eval.into();
        assert_eq!(
            assessment.diagnostic.as_deref(),
            Some("oligozoospermia, severe asthenozoospermia, teratozoospermia")
        );
    }

    #[test]
    fn test_tie_keeps_first_evaluated() {
        // Concentration 0.7 vs motility 0.85 vs none: pick concentration.
        let eval = evaluate(Some(10.0), Some(25.0), None);
        assert_eq!(
            eval.worst.as_ref().map(|f| f.parameter),
            Some(MaleParameter::Concentration)
        );

        let tie = [
            MaleFinding {
                parameter: MaleParameter::Motility,
                score: 0.5,
                label: "a",
            },
            MaleFinding {
                parameter: MaleParameter::Morphology,
                score: 0.5,
                label: "b",
            },
        ];
        assert_eq!(
            worst_of(&tie).map(|f| f.parameter),
            Some(MaleParameter::Motility)
        );
    }

    #[test]
    fn test_all_missing() {
        let assessment: Assessment = evaluate(None, None, None).into();
        assert_eq!(assessment.factor, Some(1.0));
        assert!(assessment.missing.is_some());
        assert!(assessment.diagnostic.is_none());
    }

    #[test]
    fn test_normal_parameters() {
        let assessment: Assessment = evaluate(Some(40.0), Some(45.0), Some(7.0)).into();
        assert_eq!(assessment.factor, Some(1.0));
        assert_eq!(assessment.diagnostic.as_deref(), Some("normal parameters"));
    }
}
