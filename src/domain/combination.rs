//! Odds-space combination of the age baseline with factor multipliers.
//!
//! ```text
//! odds     = p0 / (1 - p0)
//! odds    *= factor   (for every factor present)
//! annual   = odds / (1 + odds)
//! perCycle = 1 - (1 - annual)^(1 / cyclesPerYear)
//! ```
//!
//! A tubal ligation or bilateral obstruction factor of exactly 0.0 forces the
//! per-cycle probability to 0 without touching the odds algebra.

use serde::{Deserialize, Serialize};

use super::factors::{FactorName, FactorSet};
use super::odds;

/// Default for the per-cycle transform: the age table, category thresholds
/// and age-group benchmarks share one scale, so the combined value is
/// reported as is. Larger values spread it over that many cycles.
pub const DEFAULT_CYCLES_PER_YEAR: u32 = 1;

/// Combined probability for one factor set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prognosis {
    /// Age-only annual probability
    pub baseline_annual: f64,
    /// Annual probability after all factors
    pub annual: f64,
    /// Per-cycle probability in [0, 1]
    pub per_cycle: f64,
    /// Absolute blocker that forced the result to zero
    pub blocker: Option<FactorName>,
}

impl Prognosis {
    /// Per-cycle probability as a percentage clamped to [0, 100].
    #[must_use]
    pub fn percent(&self) -> f64 {
        (self.per_cycle * 100.0).clamp(0.0, 100.0)
    }

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.blocker.is_some()
    }
}

/// Combine `baseline_annual` with every factor in `factors`.
#[must_use]
pub fn combine(baseline_annual: f64, factors: &FactorSet, cycles_per_year: u32) -> Prognosis {
    if let Some(blocker) = factors.blocker() {
        tracing::debug!("Absolute blocker present ({blocker}); forcing probability to zero");
        return Prognosis {
            baseline_annual,
            annual: 0.0,
            per_cycle: 0.0,
            blocker: Some(blocker),
        };
    }

    let odds = factors
        .iter()
        .fold(odds::to_odds(baseline_annual), |odds, (_, value)| {
            if odds.is_infinite() && value == 0.0 {
                0.0
            } else {
                odds * value
            }
        });

    let annual = odds::from_odds(odds).clamp(0.0, 1.0);
    let per_cycle = odds::annual_to_cycle(annual, cycles_per_year);

    Prognosis {
        baseline_annual,
        annual,
        per_cycle,
        blocker: None,
    }
}
