//! What-if simulation over a finished evaluation.
//!
//! Every function here is pure: the evaluation passed in is never modified,
//! a new `FactorSet` is built for each counterfactual.

use crate::domain::{Evaluation, FactorName, SimulationResult, SimulationTarget};

fn describe_change(before: f64, after: f64) -> String {
    format!(
        "from {before:.1}% to {after:.1}% per cycle ({:+.1} points)",
        after - before
    )
}

/// Re-run the pipeline with `name` forced to its optimal value (1.0).
///
/// `label` names the factor in the explanation; an empty label falls back
/// to the factor's own label.
#[must_use]
pub fn simulate_factor(evaluation: &Evaluation, name: FactorName, label: &str) -> SimulationResult {
    let label = if label.trim().is_empty() {
        name.label()
    } else {
        label
    };

    let simulated = evaluation.with_factors(evaluation.factors.with(name, 1.0));
    let before = evaluation.report.numeric_prognosis;
    let after = simulated.report.numeric_prognosis;

    let explanation = if evaluation.factors.get(name) < 1.0 {
        format!(
            "If {label} were normalized, the prognosis would change {}.",
            describe_change(before, after)
        )
    } else {
        format!("{label} is already at its optimal value; the prognosis stays at {before:.1}% per cycle.")
    };

    tracing::debug!(
        "Simulated {}: {:.3} -> {:.3}",
        name.key(),
        evaluation.factors.get(name),
        1.0
    );

    SimulationResult {
        factor_name: SimulationTarget::Factor(name),
        report: simulated.report,
        explanation,
    }
}

/// Re-run the pipeline with every sub-optimal factor forced to 1.0.
#[must_use]
pub fn simulate_all_improvements(evaluation: &Evaluation) -> SimulationResult {
    let improved = evaluation.factors.suboptimal();

    let factors = improved
        .iter()
        .fold(evaluation.factors.clone(), |set, name| set.with(*name, 1.0));
    let simulated = evaluation.with_factors(factors);

    let before = evaluation.report.numeric_prognosis;
    let after = simulated.report.numeric_prognosis;

    let explanation = if improved.is_empty() {
        format!("No sub-optimal factors to improve; the prognosis stays at {before:.1}% per cycle.")
    } else {
        let labels: Vec<&str> = improved.iter().map(|name| name.label()).collect();
        format!(
            "Normalizing {} would change the prognosis {}.",
            labels.join(", "),
            describe_change(before, after)
        )
    };

    tracing::debug!("Simulated all improvements over {} factors", improved.len());

    SimulationResult {
        factor_name: SimulationTarget::All,
        report: simulated.report,
        explanation,
    }
}

/// Sub-optimal factors with the gain (percentage points) each single
/// simulation achieves, largest first. Ties keep canonical factor order.
#[must_use]
pub fn improvement_candidates(evaluation: &Evaluation) -> Vec<(FactorName, f64)> {
    let before = evaluation.report.numeric_prognosis;

    let mut candidates: Vec<(FactorName, f64)> = evaluation
        .factors
        .suboptimal()
        .into_iter()
        .map(|name| {
            let after = evaluation
                .with_factors(evaluation.factors.with(name, 1.0))
                .report
                .numeric_prognosis;
            (name, after - before)
        })
        .collect();

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates
}

/// "Simulate all" is only meaningful with at least two sub-optimal factors.
#[must_use]
pub fn can_simulate_all(evaluation: &Evaluation) -> bool {
    evaluation.factors.suboptimal().len() >= 2
}
