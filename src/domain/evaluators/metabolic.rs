//! Weight, cycle, PCOS and insulin-resistance evaluators.

use super::Assessment;

/// BMI: underweight, normal or overweight/obesity.
#[must_use]
pub fn bmi(bmi: Option<f64>) -> Assessment {
    match bmi {
        None => Assessment::missing("BMI not provided"),
        Some(v) if v < 18.5 => Assessment::scored(0.8, format!("BMI {v:.1}: underweight")),
        Some(v) if v <= 24.9 => Assessment::scored(1.0, format!("BMI {v:.1}: normal weight")),
        Some(v) => Assessment::scored(0.85, format!("BMI {v:.1}: overweight/obesity")),
    }
}

/// Cycle length: 21-35 days inclusive is regular.
#[must_use]
pub fn cycle(days: Option<f64>) -> Assessment {
    match days {
        None => Assessment::missing("Menstrual cycle length not provided"),
        Some(d) if (21.0..=35.0).contains(&d) => {
            Assessment::scored(1.0, format!("{d:.0}-day cycles: regular"))
        }
        Some(d) => Assessment::scored(0.7, format!("{d:.0}-day cycles: irregular")),
    }
}

/// PCOS: penalties for BMI >= 25 and cycles > 35 days compose.
#[must_use]
pub fn pcos(has_pcos: bool, bmi: Option<f64>, cycle_days: Option<f64>) -> Assessment {
    if !has_pcos {
        return Assessment::neutral();
    }

    let bmi = bmi.unwrap_or(0.0);
    let cycle_days = cycle_days.unwrap_or(0.0);

    let mut factor = 1.0;
    if bmi >= 25.0 {
        factor *= 0.9;
    }
    if cycle_days > 35.0 {
        factor *= 0.85;
    }

    let severity = if bmi >= 30.0 || cycle_days > 45.0 {
        "severe"
    } else if factor < 1.0 {
        "moderate"
    } else {
        "mild"
    };

    Assessment::scored(factor, format!("PCOS ({severity})"))
}

/// HOMA-IR: absence is not reported as missing data.
#[must_use]
pub fn homa(homa: Option<f64>) -> Assessment {
    match homa {
        None => Assessment::skipped(),
        Some(v) if v >= 4.0 => {
            Assessment::scored(0.90, format!("HOMA-IR {v:.2}: significant insulin resistance"))
        }
        Some(v) if v >= 2.5 => {
            Assessment::scored(0.95, format!("HOMA-IR {v:.2}: mild insulin resistance"))
        }
        Some(v) => Assessment::scored(1.0, format!("HOMA-IR {v:.2}: normal insulin sensitivity")),
    }
}
