//! End-to-end clinical scenarios through the prognosis service.

use std::sync::Arc;

use fertility_prognosis::adapters::{CacheConfig, MokaReportCache, NoopCache};
use fertility_prognosis::domain::{
    odds, FactorName, HsgResult, SimulationTarget, DEFAULT_CYCLES_PER_YEAR,
};
use fertility_prognosis::{Category, ClinicalInput, PrognosisService, ServiceConfig};

fn service() -> PrognosisService<NoopCache> {
    PrognosisService::new(Arc::new(NoopCache), DEFAULT_CYCLES_PER_YEAR)
}

#[test]
fn test_scenario_a_age_only() {
    let input = ClinicalInput {
        bmi: Some(22.0),
        ..ClinicalInput::new(32.0)
    };
    let eval = PrognosisService::from_config(&ServiceConfig::default())
        .evaluate(&input)
        .expect("Should evaluate");

    assert!((eval.report.numeric_prognosis - 17.5).abs() < 1e-9);
    assert!(eval.factors.suboptimal().is_empty());
    assert!(matches!(
        eval.report.category,
        Category::Good | Category::Moderate
    ));
    assert!(eval.report.benchmark_phrase.contains("(20.0%)"));

    let missing = eval.diagnostics.missing.join(" | ");
    for lab in ["AMH", "Prolactin", "TSH", "HSG", "Semen"] {
        assert!(missing.contains(lab), "missing notice for {lab}: {missing}");
    }
}

#[test]
fn test_young_with_normal_labs_is_good() {
    let input = ClinicalInput {
        bmi: Some(22.0),
        cycle_length: Some(28.0),
        hsg_result: HsgResult::Normal,
        amh: Some(3.0),
        prolactin: Some(10.0),
        tsh: Some(1.5),
        sperm_concentration: Some(40.0),
        sperm_motility: Some(50.0),
        sperm_morphology: Some(6.0),
        ..ClinicalInput::new(22.0)
    };
    let eval = service().evaluate(&input).expect("Should evaluate");

    assert!((eval.report.numeric_prognosis - 27.5).abs() < 1e-9);
    assert_eq!(eval.report.category, Category::Good);
    assert!(eval.report.benchmark_phrase.contains("notably above"));
}

#[test]
fn test_monthly_model_opt_in() {
    let input = ClinicalInput {
        bmi: Some(22.0),
        ..ClinicalInput::new(32.0)
    };
    let eval = PrognosisService::new(Arc::new(NoopCache), 12)
        .evaluate(&input)
        .expect("Should evaluate");

    let expected = odds::annual_to_cycle(0.175, 12) * 100.0;
    assert!((eval.report.numeric_prognosis - expected).abs() < 1e-9);
    assert!(eval.report.numeric_prognosis < 17.5);
}

#[test]
fn test_scenario_b_tubal_ligation() {
    let input = ClinicalInput {
        has_otb: true,
        bmi: Some(22.0),
        amh: Some(3.0),
        ..ClinicalInput::new(30.0)
    };
    let eval = service().evaluate(&input).expect("Should evaluate");

    assert_eq!(eval.report.numeric_prognosis, 0.0);
    assert_eq!(eval.report.category, Category::RequiresTreatment);
    assert_eq!(eval.report.emoji, "🔴");
    assert!(eval.report.recommendations[0].starts_with("Prior tubal ligation"));
}

#[test]
fn test_bilateral_obstruction_blocks() {
    let input = ClinicalInput {
        hsg_result: HsgResult::Bilateral,
        ..ClinicalInput::new(27.0)
    };
    let eval = service().evaluate(&input).expect("Should evaluate");

    assert_eq!(eval.prognosis.blocker, Some(FactorName::Hsg));
    assert_eq!(eval.report.category, Category::RequiresTreatment);
}

#[test]
fn test_scenario_c_male_factor() {
    let input = ClinicalInput {
        sperm_concentration: Some(3.0),
        sperm_motility: Some(50.0),
        sperm_morphology: Some(6.0),
        ..ClinicalInput::new(30.0)
    };
    let eval = service().evaluate(&input).expect("Should evaluate");

    assert_eq!(eval.factors.get(FactorName::Male), 0.25);
    assert_eq!(
        eval.diagnostics.get(FactorName::Male),
        Some("severe oligozoospermia")
    );
}

#[test]
fn test_scenario_d_low_amh_simulation() {
    let svc = service();
    let input = ClinicalInput {
        amh: Some(0.4),
        bmi: Some(31.0),
        tsh: Some(3.0),
        ..ClinicalInput::new(30.0)
    };
    let eval = svc.evaluate(&input).expect("Should evaluate");

    assert_eq!(eval.factors.get(FactorName::Amh), 0.3);
    assert_eq!(
        eval.diagnostics.get(FactorName::Amh),
        Some("very low ovarian reserve")
    );

    let snapshot = eval.clone();
    let result = svc.simulate_factor(&eval, FactorName::Amh, "AMH");
    assert_eq!(result.factor_name, SimulationTarget::Factor(FactorName::Amh));
    assert!(result.report.numeric_prognosis > eval.report.numeric_prognosis);
    assert_eq!(eval, snapshot);

    let simulated = eval.factors.with(FactorName::Amh, 1.0);
    for name in FactorName::ALL.into_iter().filter(|n| *n != FactorName::Amh) {
        assert_eq!(simulated.get(name), eval.factors.get(name));
    }
}

#[test]
fn test_simulate_all_and_candidates() {
    let svc = service();
    let eval = svc
        .evaluate(&ClinicalInput {
            amh: Some(0.4),
            tsh: Some(3.0),
            ..ClinicalInput::new(34.0)
        })
        .expect("Should evaluate");

    assert!(svc.can_simulate_all(&eval));
    let all = svc.simulate_all_improvements(&eval);
    let best_single = svc.simulate_factor(&eval, FactorName::Amh, "");
    assert!(all.report.numeric_prognosis >= best_single.report.numeric_prognosis);

    let json = serde_json::to_value(&all).expect("Should serialize");
    assert_eq!(json["factorName"], "ALL");

    let ranked = svc.improvement_candidates(&eval);
    assert_eq!(ranked.first().map(|(name, _)| *name), Some(FactorName::Amh));
}

#[test]
fn test_report_json_shape() {
    let svc = PrognosisService::new(
        Arc::new(MokaReportCache::new(&CacheConfig::default())),
        DEFAULT_CYCLES_PER_YEAR,
    );
    let eval = svc
        .evaluate_json(r#"{"age": 36, "bmi": 27.5, "hsgResult": "unilateral"}"#)
        .expect("Should evaluate");

    let json = serde_json::to_value(&eval.report).expect("Should serialize");
    for key in [
        "numericPrognosis",
        "category",
        "emoji",
        "phrase",
        "benchmarkPhrase",
        "recommendations",
    ] {
        assert!(json.get(key).is_some(), "report JSON lacks {key}");
    }
    assert!(json["category"].is_string());
}

#[test]
fn test_out_of_range_age() {
    let eval = service()
        .evaluate(&ClinicalInput::new(55.0))
        .expect("Should evaluate");

    assert_eq!(eval.report.numeric_prognosis, 0.0);
    assert_eq!(eval.report.category, Category::Low);
    assert!(eval
        .diagnostics
        .age
        .as_deref()
        .is_some_and(|d| d.contains("out of clinical range")));
}
