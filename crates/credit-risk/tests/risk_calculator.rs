//! End-to-end scoring scenarios against the repository's reference rule document.

use std::path::PathBuf;
use std::sync::Arc;

use credit_risk::scoring::{RuleConfigError, Threshold};
use credit_risk::{Applicant, EmploymentLevel, Housing, RiskEngine, RuleSet};

fn rules_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/rules.json")
}

fn engine() -> RiskEngine {
    let rules = RuleSet::from_path(rules_path()).expect("reference rules load");
    RiskEngine::new(Arc::new(rules))
}

fn applicant(
    age: u32,
    credit_amount: f64,
    duration: u32,
    housing: &str,
    job: &str,
) -> Applicant {
    Applicant {
        age,
        credit_amount,
        duration,
        housing: housing.parse().expect("known housing"),
        job: job.parse().expect("known job"),
    }
}

#[test]
fn reference_document_defines_three_bands_with_a_floor() {
    let engine = engine();
    let bands: Vec<_> = engine
        .rules()
        .categories()
        .iter()
        .map(|band| (band.name.as_str(), band.threshold))
        .collect();
    assert_eq!(
        bands,
        vec![
            ("High Risk", Threshold::AtLeast(80)),
            ("Medium Risk", Threshold::AtLeast(40)),
            ("Low Risk", Threshold::Floor),
        ]
    );
    assert_eq!(engine.rules().base_score(), 50);
    assert_eq!(engine.rules().rules().len(), 5);
}

#[test]
fn high_risk_profile() {
    let result = engine().assess(&applicant(24, 15_000.0, 48, "Rent", "Unskilled"));
    assert_eq!(result.score, 115);
    assert_eq!(result.category, "High Risk");
    assert_eq!(result.fired.len(), 5);
}

#[test]
fn low_risk_profile() {
    let result = engine().assess(&applicant(50, 1_500.0, 12, "Own", "Management"));
    assert_eq!(result.score, 0);
    assert_eq!(result.category, "Low Risk");
    assert_eq!(
        result.explanation.last().map(String::as_str),
        Some("Final Score: 0 -> Low Risk")
    );
}

#[test]
fn no_rule_applies() {
    let result = engine().assess(&applicant(30, 5_000.0, 24, "For Free", "Skilled"));
    assert_eq!(result.score, 50);
    assert_eq!(result.category, "Medium Risk");
    assert_eq!(result.explanation.len(), 2);
}

#[test]
fn boundary_values_do_not_trigger_strict_comparisons() {
    let result = engine().assess(&applicant(25, 10_000.0, 36, "For Free", "Skilled"));
    assert_eq!(result.score, 50);

    let result = engine().assess(&applicant(45, 2_000.0, 36, "For Free", "Skilled"));
    assert!(result.fired.is_empty());
}

#[test]
fn assessment_serializes_for_presentation() {
    let result = engine().assess(&applicant(24, 15_000.0, 48, "Rent", "Unskilled"));
    let json = serde_json::to_value(&result).expect("serialize");
    assert_eq!(json["score"], 115);
    assert_eq!(json["category"], "High Risk");
    assert_eq!(json["fired"][0]["field"], "age");
    assert_eq!(json["fired"][2]["field"], "credit_amount");
    assert_eq!(json["explanation"][0], "Base Score: 50 points");
}

#[test]
fn unknown_fields_fail_at_load_time() {
    let raw = std::fs::read_to_string(rules_path()).expect("read reference rules");
    let broken = raw.replacen("\"field\": \"duration\"", "\"field\": \"loan_term\"", 1);
    match RuleSet::from_json_str(&broken) {
        Err(RuleConfigError::UnknownField { rule, field }) => {
            assert_eq!(rule, 4);
            assert_eq!(field, "loan_term");
        }
        other => panic!("expected unknown field error, got {other:?}"),
    }
}

#[test]
fn typed_inputs_cover_every_label() {
    for housing in Housing::ordered() {
        for job in EmploymentLevel::ordered() {
            let result = engine().assess(&Applicant {
                age: 35,
                credit_amount: 4_000.0,
                duration: 24,
                housing,
                job,
            });
            assert!(!result.category.is_empty());
        }
    }
}
