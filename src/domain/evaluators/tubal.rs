//! Tubal patency and prior tubal ligation.
//!
//! Bilateral obstruction and tubal ligation score exactly 0.0; the
//! combination engine treats that as an absolute blocker.

use super::Assessment;
use crate::domain::input::HsgResult;

#[must_use]
pub fn hsg(result: HsgResult) -> Assessment {
    match result {
        HsgResult::Unknown => Assessment::missing("HSG (tubal patency) not performed"),
        HsgResult::Normal => Assessment::scored(1.0, "HSG: both tubes patent"),
        HsgResult::Unilateral => Assessment::scored(0.7, "HSG: unilateral tubal obstruction"),
        HsgResult::Bilateral => Assessment::scored(0.0, "HSG: bilateral tubal obstruction"),
        HsgResult::Malformation => Assessment::scored(0.3, "HSG: uterine malformation"),
    }
}

#[must_use]
pub fn otb(has_otb: bool) -> Assessment {
    if has_otb {
        Assessment::scored(0.0, "Prior tubal ligation")
    } else {
        Assessment::neutral()
    }
}
