//! Reproductive history: time trying to conceive and prior pelvic surgery.

use super::Assessment;

#[must_use]
pub fn infertility_duration(years: Option<f64>) -> Assessment {
    match years {
        None => Assessment::skipped(),
        Some(y) if y >= 5.0 => Assessment::scored(0.85, format!("{y:.0} years trying to conceive")),
        Some(y) if y >= 3.0 => Assessment::scored(0.93, format!("{y:.0} years trying to conceive")),
        Some(_) => Assessment::neutral(),
    }
}

#[must_use]
pub fn pelvic_surgeries(count: Option<u32>) -> Assessment {
    match count {
        None => Assessment::skipped(),
        Some(0) => Assessment::neutral(),
        Some(1) => Assessment::scored(0.95, "1 previous pelvic surgery"),
        Some(n) => Assessment::scored(0.88, format!("{n} previous pelvic surgeries")),
    }
}
