//! Probability/odds conversions and the annual to per-cycle transform.

/// Convert a probability to odds; `p >= 1` maps to infinity.
#[must_use]
pub fn to_odds(p: f64) -> f64 {
    if p >= 1.0 {
        f64::INFINITY
    } else {
        p / (1.0 - p)
    }
}

/// Convert odds back to a probability; infinite odds map to 1.
#[must_use]
pub fn from_odds(odds: f64) -> f64 {
    if odds.is_infinite() {
        1.0
    } else {
        odds / (1.0 + odds)
    }
}

/// Per-cycle probability whose cumulative probability over `cycles`
/// independent cycles equals `annual`: `1 - (1 - annual)^(1/cycles)`.
#[must_use]
pub fn annual_to_cycle(annual: f64, cycles: u32) -> f64 {
    let annual = annual.clamp(0.0, 1.0);
    if cycles <= 1 {
        return annual;
    }
    1.0 - (1.0 - annual).powf(1.0 / f64::from(cycles))
}
