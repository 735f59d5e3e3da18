//! Ovarian reserve, prolactin and thyroid evaluators.

use super::Assessment;

/// AMH in ng/mL. Values above 4.0 suggest a polycystic pattern.
#[must_use]
pub fn amh(amh: Option<f64>) -> Assessment {
    match amh {
        None => Assessment::missing("AMH (ovarian reserve) not provided"),
        Some(v) if v > 4.0 => {
            Assessment::scored(0.9, "high ovarian reserve (possible PCOS pattern)")
        }
        Some(v) if v >= 2.0 => Assessment::scored(1.0, "normal ovarian reserve"),
        Some(v) if v >= 1.0 => Assessment::scored(0.85, "slightly reduced ovarian reserve"),
        Some(v) if v >= 0.5 => Assessment::scored(0.6, "low ovarian reserve"),
        Some(_) => Assessment::scored(0.3, "very low ovarian reserve"),
    }
}

/// Prolactin in ng/mL.
#[must_use]
pub fn prolactin(prolactin: Option<f64>) -> Assessment {
    match prolactin {
        None => Assessment::missing("Prolactin not provided"),
        Some(v) if v >= 25.0 => {
            Assessment::scored(0.7, format!("Prolactin {v:.1}: hyperprolactinemia"))
        }
        Some(v) => Assessment::scored(1.0, format!("Prolactin {v:.1}: normal")),
    }
}

/// TSH in mIU/L; the fertility target is 2.5 or below.
#[must_use]
pub fn tsh(tsh: Option<f64>) -> Assessment {
    match tsh {
        None => Assessment::missing("TSH (thyroid function) not provided"),
        Some(v) if v > 2.5 => {
            Assessment::scored(0.8, format!("TSH {v:.2}: suboptimal for fertility"))
        }
        Some(v) => Assessment::scored(1.0, format!("TSH {v:.2}: optimal")),
    }
}
