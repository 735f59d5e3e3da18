//! Clinical recommendations.
//!
//! Recommendations follow a fixed order that determines how the list reads:
//! tubal ligation guidance first, then BMI, cycle, PCOS, endometriosis,
//! myoma, adenomyosis, polyp, HSG, AMH, prolactin, TSH, HOMA and male
//! factor, then infertility duration and pelvic surgery. A factor only
//! contributes when its multiplier is below 1.0.

use super::factors::{DiagnosticSet, FactorName, FactorSet};

/// Order in which factors are considered.
pub const RECOMMENDATION_ORDER: [FactorName; 16] = [
    FactorName::Otb,
    FactorName::Bmi,
    FactorName::Cycle,
    FactorName::Pcos,
    FactorName::Endometriosis,
    FactorName::Myoma,
    FactorName::Adenomyosis,
    FactorName::Polyp,
    FactorName::Hsg,
    FactorName::Amh,
    FactorName::Prolactin,
    FactorName::Tsh,
    FactorName::Homa,
    FactorName::Male,
    FactorName::InfertilityDuration,
    FactorName::PelvicSurgery,
];

const GENERAL: &str = "No limiting factors detected: keep having intercourse every 2-3 days and see a specialist if there is no pregnancy within 12 months (6 months after age 35).";

/// Recommendation for one factor, chosen from the diagnostic text.
fn recommend(name: FactorName, diagnostics: &DiagnosticSet) -> &'static str {
    let says = |needle: &str| diagnostics.mentions(name, needle);

    match name {
        FactorName::Otb => "Prior tubal ligation: spontaneous pregnancy is not possible. Discuss tubal reversal surgery or IVF with a fertility specialist.",
        FactorName::Bmi if says("underweight") => "Gain weight towards a BMI of 18.5-24.9 with a balanced diet; low body weight can suppress ovulation.",
        FactorName::Bmi => "Losing 5-10% of body weight can restore ovulation and improve your chances; consider a nutrition and exercise plan.",
        FactorName::Cycle => "Irregular cycles suggest ovulatory dysfunction: track ovulation and ask about ovulation induction.",
        FactorName::Pcos if says("severe") => "Severe PCOS profile: see a reproductive endocrinologist about ovulation induction and metabolic management.",
        FactorName::Pcos => "PCOS: lifestyle changes and, if needed, ovulation induction with letrozole improve your chances.",
        FactorName::Endometriosis if says("severe") => "Advanced endometriosis: discuss surgical treatment or IVF with a specialist.",
        FactorName::Endometriosis => "Mild endometriosis: trying naturally for 6-12 months is reasonable before considering IUI.",
        FactorName::Myoma if says("Submucosal") => "Submucosal myoma: hysteroscopic resection is recommended before trying to conceive.",
        FactorName::Myoma => "Large intramural myoma: evaluate a myomectomy with your gynecologist.",
        FactorName::Adenomyosis if says("Diffuse") => "Diffuse adenomyosis: discuss GnRH-analogue pretreatment or assisted reproduction with a specialist.",
        FactorName::Adenomyosis => "Focal adenomyosis: a specialist can assess whether conservative surgery is worthwhile.",
        FactorName::Polyp if says("ostium") => "Polyp on the tubal ostium: hysteroscopic polypectomy is strongly recommended.",
        FactorName::Polyp => "Endometrial polyp: hysteroscopic removal can improve implantation.",
        FactorName::Hsg if says("bilateral") => "Both tubes are blocked: spontaneous pregnancy is not possible and IVF is the recommended route.",
        FactorName::Hsg if says("malformation") => "Uterine malformation: assess surgical correction with a specialist.",
        FactorName::Hsg => "One tube is blocked: conception remains possible; seek a specialist evaluation if there is no pregnancy within 6 months.",
        FactorName::Amh if says("high") => "High AMH suggests a polycystic pattern: confirm that ovulation occurs regularly.",
        FactorName::Amh if says("very low") => "Very low ovarian reserve: see a fertility specialist promptly; time is the key factor.",
        FactorName::Amh => "Reduced ovarian reserve: avoid postponing conception and consider a specialist consultation.",
        FactorName::Prolactin => "Elevated prolactin: repeat the test and treat hyperprolactinemia if confirmed.",
        FactorName::Tsh => "TSH above 2.5: ask about thyroid treatment to reach the preconception target.",
        FactorName::Homa if says("significant") => "Significant insulin resistance: consider metformin together with diet and exercise.",
        FactorName::Homa => "Mild insulin resistance: diet and regular physical activity can improve ovulation.",
        FactorName::Male if says("severe") => "Severe semen alterations: see an andrologist; IVF with ICSI may be needed.",
        FactorName::Male => "Mild semen alterations: avoid tobacco and heat exposure, and repeat the semen analysis in 3 months.",
        FactorName::InfertilityDuration => "After this long trying to conceive, a complete fertility work-up for both partners is advisable.",
        FactorName::PelvicSurgery => "Previous pelvic surgery can leave adhesions: confirm tubal patency with an HSG.",
    }
}

/// Collect recommendations for every factor below 1.0, in fixed order.
#[must_use]
pub fn collect(factors: &FactorSet, diagnostics: &DiagnosticSet) -> Vec<String> {
    let recommendations: Vec<String> = RECOMMENDATION_ORDER
        .iter()
        .filter(|name| factors.get(**name) < 1.0)
        .map(|name| recommend(*name, diagnostics).to_string())
        .collect();

    if recommendations.is_empty() {
        vec![GENERAL.to_string()]
    } else {
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evaluators;
    use crate::domain::input::{ClinicalInput, HsgResult, MyomaType};

    fn recommendations_for(input: &ClinicalInput) -> Vec<String> {
        let eval = evaluators::evaluate(input);
        collect(&eval.factors, &eval.diagnostics)
    }

    #[test]
    fn test_order_covers_every_factor() {
        for name in FactorName::ALL {
            assert!(RECOMMENDATION_ORDER.contains(&name), "{name} missing");
        }
    }

    #[test]
    fn test_general_when_nothing_to_improve() {
        let recs = recommendations_for(&ClinicalInput {
            bmi: Some(22.0),
            ..ClinicalInput::new(30.0)
        });
        assert_eq!(recs, vec![GENERAL.to_string()]);
    }

    #[test]
    fn test_bmi_variants() {
        let low = recommendations_for(&ClinicalInput {
            bmi: Some(17.0),
            ..ClinicalInput::new(30.0)
        });
        assert!(low[0].starts_with("Gain weight"));

        let high = recommendations_for(&ClinicalInput {
            bmi: Some(31.0),
            ..ClinicalInput::new(30.0)
        });
        assert!(high[0].starts_with("Losing"));
    }

    #[test]
    fn test_fixed_order() {
        let input = ClinicalInput {
            has_otb: true,
            bmi: Some(28.0),
            myoma_type: MyomaType::Submucosal,
            hsg_result: HsgResult::Unilateral,
            amh: Some(0.3),
            sperm_concentration: Some(2.0),
            tsh: Some(3.1),
            ..ClinicalInput::new(33.0)
        };
        let recs = recommendations_for(&input);

        let prefixes = [
            "Prior tubal ligation",
            "Losing",
            "Submucosal myoma",
            "One tube is blocked",
            "Very low ovarian reserve",
            "TSH above 2.5",
            "Severe semen alterations",
        ];
        assert_eq!(recs.len(), prefixes.len());
        for (rec, prefix) in recs.iter().zip(prefixes) {
            assert!(rec.starts_with(prefix), "{rec:?} should start with {prefix:?}");
        }
    }

    #[test]
    fn test_amh_variants() {
        let high = recommendations_for(&ClinicalInput {
            amh: Some(6.0),
            ..ClinicalInput::new(30.0)
        });
        assert!(high[0].starts_with("High AMH"));

        let reduced = recommendations_for(&ClinicalInput {
            amh: Some(1.5),
            ..ClinicalInput::new(30.0)
        });
        assert!(reduced[0].starts_with("Reduced ovarian reserve"));
    }

    #[test]
    fn test_bilateral_hsg_guidance() {
        let recs = recommendations_for(&ClinicalInput {
            hsg_result: HsgResult::Bilateral,
            ..ClinicalInput::new(30.0)
        });
        assert!(recs[0].starts_with("Both tubes are blocked"));
    }
}
