//! Factor multipliers and diagnostic commentary.
//!
//! A `FactorSet` maps each adjustable factor to a multiplier in [0, 1]; any
//! factor missing from the set is neutral (1.0). Sets are values: `with`
//! returns a new set and leaves the original untouched.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::input::ValidationError;

/// Adjustable factors, declared in canonical evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorName {
    Bmi,
    Cycle,
    Pcos,
    Endometriosis,
    Myoma,
    Adenomyosis,
    Polyp,
    Hsg,
    Otb,
    Amh,
    Prolactin,
    Tsh,
    Homa,
    InfertilityDuration,
    PelvicSurgery,
    Male,
}

impl FactorName {
    /// Every factor, in canonical order.
    pub const ALL: [FactorName; 16] = [
        Self::Bmi,
        Self::Cycle,
        Self::Pcos,
        Self::Endometriosis,
        Self::Myoma,
        Self::Adenomyosis,
        Self::Polyp,
        Self::Hsg,
        Self::Otb,
        Self::Amh,
        Self::Prolactin,
        Self::Tsh,
        Self::Homa,
        Self::InfertilityDuration,
        Self::PelvicSurgery,
        Self::Male,
    ];

    /// Stable key used in JSON and on the command line.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Bmi => "bmi",
            Self::Cycle => "cycle",
            Self::Pcos => "pcos",
            Self::Endometriosis => "endometriosis",
            Self::Myoma => "myoma",
            Self::Adenomyosis => "adenomyosis",
            Self::Polyp => "polyp",
            Self::Hsg => "hsg",
            Self::Otb => "otb",
            Self::Amh => "amh",
            Self::Prolactin => "prolactin",
            Self::Tsh => "tsh",
            Self::Homa => "homa",
            Self::InfertilityDuration => "infertility_duration",
            Self::PelvicSurgery => "pelvic_surgery",
            Self::Male => "male",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Bmi => "body-mass index",
            Self::Cycle => "cycle regularity",
            Self::Pcos => "PCOS",
            Self::Endometriosis => "endometriosis",
            Self::Myoma => "uterine myoma",
            Self::Adenomyosis => "adenomyosis",
            Self::Polyp => "endometrial polyp",
            Self::Hsg => "tubal patency (HSG)",
            Self::Otb => "tubal ligation",
            Self::Amh => "ovarian reserve (AMH)",
            Self::Prolactin => "prolactin",
            Self::Tsh => "thyroid function (TSH)",
            Self::Homa => "insulin resistance (HOMA-IR)",
            Self::InfertilityDuration => "infertility duration",
            Self::PelvicSurgery => "previous pelvic surgery",
            Self::Male => "male factor",
        }
    }
}

impl fmt::Display for FactorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FactorName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|name| name.key().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::UnknownFactor(s.to_string()))
    }
}

/// Multipliers per factor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FactorSet {
    values: BTreeMap<FactorName, f64>,
}

impl FactorSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with `name` set to `value`, clamped to [0, 1].
    #[must_use]
    pub fn with(&self, name: FactorName, value: f64) -> Self {
        let mut values = self.values.clone();
        values.insert(name, value.clamp(0.0, 1.0));
        Self { values }
    }

    /// Multiplier for `name`, or 1.0 when the factor was not emitted.
    #[must_use]
    pub fn get(&self, name: FactorName) -> f64 {
        self.values.get(&name).copied().unwrap_or(1.0)
    }

    /// Whether an evaluator emitted a value for `name`.
    #[must_use]
    pub fn contains(&self, name: FactorName) -> bool {
        self.values.contains_key(&name)
    }

    /// Emitted factors in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (FactorName, f64)> + '_ {
        self.values.iter().map(|(name, value)| (*name, *value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Factors below 1.0, in canonical order.
    #[must_use]
    pub fn suboptimal(&self) -> Vec<FactorName> {
        self.iter()
            .filter(|(_, value)| *value < 1.0)
            .map(|(name, _)| name)
            .collect()
    }

    /// The first absolute blocker at exactly 0.0, if any.
    #[must_use]
    pub fn blocker(&self) -> Option<FactorName> {
        [FactorName::Otb, FactorName::Hsg]
            .into_iter()
            .find(|name| self.values.get(name).is_some_and(|v| *v == 0.0))
    }
}

/// Descriptive output produced alongside a `FactorSet`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticSet {
    /// Commentary on the age baseline
    pub age: Option<String>,

    /// Commentary per factor
    pub factors: BTreeMap<FactorName, String>,

    /// Missing-data notices, in evaluation order
    pub missing: Vec<String>,
}

impl DiagnosticSet {
    /// Commentary for `name`, if the evaluator produced one.
    #[must_use]
    pub fn get(&self, name: FactorName) -> Option<&str> {
        self.factors.get(&name).map(String::as_str)
    }

    /// Whether the commentary for `name` contains `needle`.
    #[must_use]
    pub fn mentions(&self, name: FactorName, needle: &str) -> bool {
        self.get(name).is_some_and(|text| text.contains(needle))
    }
}
