//! Structural and gynecological findings.

use super::Assessment;
use crate::domain::input::{AdenomyosisType, MyomaType, PolypType};

#[must_use]
pub fn endometriosis(grade: Option<u8>) -> Assessment {
    match grade.unwrap_or(0) {
        0 => Assessment::neutral(),
        g @ 1..=2 => Assessment::scored(0.85, format!("Endometriosis grade {g} (mild)")),
        g => Assessment::scored(0.60, format!("Endometriosis grade {g} (severe)")),
    }
}

/// Only submucosal and large intramural myomas affect implantation.
#[must_use]
pub fn myoma(kind: MyomaType) -> Assessment {
    match kind {
        MyomaType::Submucosal => Assessment::scored(0.30, "Submucosal myoma"),
        MyomaType::IntramuralLarge => Assessment::scored(0.60, "Large intramural myoma"),
        MyomaType::Subserosal => Assessment::scored(1.0, "Subserosal myoma (no impact)"),
        MyomaType::None => Assessment::neutral(),
    }
}

#[must_use]
pub fn adenomyosis(kind: AdenomyosisType) -> Assessment {
    match kind {
        AdenomyosisType::Focal => Assessment::scored(0.8, "Focal adenomyosis"),
        AdenomyosisType::Diffuse => Assessment::scored(0.5, "Diffuse adenomyosis"),
        AdenomyosisType::None => Assessment::neutral(),
    }
}

#[must_use]
pub fn polyp(kind: PolypType) -> Assessment {
    match kind {
        PolypType::Small => Assessment::scored(0.85, "Small endometrial polyp"),
        PolypType::Large => Assessment::scored(0.70, "Large or multiple endometrial polyps"),
        PolypType::Ostium => Assessment::scored(0.50, "Polyp on the tubal ostium"),
        PolypType::None => Assessment::neutral(),
    }
}
