//! Prognosis report: category, narrative, benchmark and recommendations.

use serde::{Deserialize, Serialize};

use super::combination::Prognosis;
use super::factors::{DiagnosticSet, FactorName, FactorSet};
use super::recommendations;

/// Prognosis classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Good,
    Moderate,
    Low,
    /// Spontaneous conception ruled out by an absolute blocker
    RequiresTreatment,
}

impl Category {
    /// Classify a per-cycle percentage. Blockers win regardless of value.
    #[must_use]
    pub fn classify(percent: f64, blocked: bool) -> Self {
        if blocked {
            Self::RequiresTreatment
        } else if percent >= 15.0 {
            Self::Good
        } else if percent >= 5.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Good => "🟢",
            Self::Moderate => "🟡",
            Self::Low => "🟠",
            Self::RequiresTreatment => "🔴",
        }
    }

    /// Narrative phrase with the value rendered to one decimal.
    #[must_use]
    pub fn phrase(self, percent: f64) -> String {
        match self {
            Self::Good => format!(
                "Good prognosis: an estimated {percent:.1}% chance of spontaneous pregnancy per cycle."
            ),
            Self::Moderate => format!(
                "Moderate prognosis: an estimated {percent:.1}% chance per cycle. Some factors are worth addressing."
            ),
            Self::Low => format!(
                "Low prognosis: an estimated {percent:.1}% chance per cycle. A specialist evaluation is advisable."
            ),
            Self::RequiresTreatment => format!(
                "Spontaneous pregnancy is not expected ({percent:.1}% per cycle). Medical treatment is required to conceive."
            ),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => write!(f, "GOOD"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::Low => write!(f, "LOW"),
            Self::RequiresTreatment => write!(f, "REQUIRES_TREATMENT"),
        }
    }
}

/// Published per-cycle benchmark (%) for an age.
#[must_use]
pub fn benchmark_percent(age: f64) -> f64 {
    if age < 30.0 {
        25.0
    } else if age < 35.0 {
        20.0
    } else if age < 38.0 {
        15.0
    } else if age <= 40.0 {
        10.0
    } else {
        5.0
    }
}

/// Position of a result relative to its age benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkComparison {
    Above,
    Similar,
    Below,
}

impl BenchmarkComparison {
    /// Threshold in percentage points.
    pub const MARGIN: f64 = 2.0;

    #[must_use]
    pub fn compare(percent: f64, benchmark: f64) -> Self {
        let diff = percent - benchmark;
        if diff > Self::MARGIN {
            Self::Above
        } else if diff < -Self::MARGIN {
            Self::Below
        } else {
            Self::Similar
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Above => "notably above",
            Self::Similar => "similar to",
            Self::Below => "notably below",
        }
    }
}

/// Benchmark sentence for a result.
#[must_use]
pub fn benchmark_phrase(age: f64, percent: f64) -> String {
    let benchmark = benchmark_percent(age);
    let comparison = BenchmarkComparison::compare(percent, benchmark);
    format!(
        "Your estimated {percent:.1}% per cycle is {} the average for your age group ({benchmark:.1}%).",
        comparison.label()
    )
}

/// Output record consumed by presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Per-cycle probability, percent in [0, 100]
    pub numeric_prognosis: f64,
    pub category: Category,
    pub emoji: String,
    pub phrase: String,
    pub benchmark_phrase: String,
    pub recommendations: Vec<String>,
}

impl Report {
    /// Build the report for a combined prognosis.
    #[must_use]
    pub fn generate(
        age: f64,
        prognosis: &Prognosis,
        factors: &FactorSet,
        diagnostics: &DiagnosticSet,
    ) -> Self {
        let percent = prognosis.percent();
        let category = Category::classify(percent, prognosis.is_blocked());

        Self {
            numeric_prognosis: percent,
            category,
            emoji: category.emoji().to_string(),
            phrase: category.phrase(percent),
            benchmark_phrase: benchmark_phrase(age, percent),
            recommendations: recommendations::collect(factors, diagnostics),
        }
    }
}

/// What a simulation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationTarget {
    Factor(FactorName),
    All,
}

impl SimulationTarget {
    /// `"ALL"` or the factor key.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Factor(name) => name.key(),
            Self::All => "ALL",
        }
    }
}

/// Counterfactual report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    #[serde(serialize_with = "serialize_target")]
    pub factor_name: SimulationTarget,
    pub report: Report,
    pub explanation: String,
}

fn serialize_target<S: serde::Serializer>(
    target: &SimulationTarget,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(target.key())
}
