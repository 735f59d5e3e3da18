//! Age-derived baseline probability.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Ages (years) for which the baseline table is defined.
pub const CLINICAL_AGE_RANGE: RangeInclusive<f64> = 18.0..=50.0;

/// Upper (exclusive) age bound and annual probability per band, ascending.
/// Ages at or above the last bound fall into the final band.
const AGE_BANDS: [(f64, f64, &str); 6] = [
    (25.0, 0.275, "24 or younger"),
    (30.0, 0.225, "25-29"),
    (35.0, 0.175, "30-34"),
    (38.0, 0.125, "35-37"),
    (41.0, 0.075, "38-40"),
    (43.0, 0.040, "41-42"),
];

const LAST_BAND: (f64, &str) = (0.015, "43 or older");

/// Baseline annual probability for an age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeBaseline {
    /// Annual probability in [0, 1]
    pub annual: f64,
    /// Index of the matching band (0-based); `None` when out of range
    pub band: Option<usize>,
    pub diagnostic: String,
}

/// Look up the baseline for `age`.
///
/// Bands are checked by ascending threshold and the first match wins, so
/// integer boundaries (24/25, 29/30, ...) never overlap.
#[must_use]
pub fn baseline(age: f64) -> AgeBaseline {
    if !CLINICAL_AGE_RANGE.contains(&age) {
        return AgeBaseline {
            annual: 0.0,
            band: None,
            diagnostic: format!("Age {age} out of clinical range"),
        };
    }

    let (band, annual, label) = AGE_BANDS
        .iter()
        .enumerate()
        .find(|(_, (upper, _, _))| age < *upper)
        .map(|(i, (_, annual, label))| (i, *annual, *label))
        .unwrap_or((AGE_BANDS.len(), LAST_BAND.0, LAST_BAND.1));

    AgeBaseline {
        annual,
        band: Some(band),
        diagnostic: format!(
            "Age band {label}: baseline annual probability {:.1}%",
            annual * 100.0
        ),
    }
}
