use serde_json::json;

use gravida_calculators::error::CalculatorError;
use gravida_calculators::{all_calculators, evaluate, get_calculator};
use gravida_core::error::ErrorKind;
use gravida_core::models::calculation::Calculation;

#[test]
fn catalog_ids_are_unique() {
    let calculators = all_calculators();
    assert_eq!(calculators.len(), 14);
    let mut ids: Vec<&str> = calculators.iter().map(|c| c.id()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), calculators.len());
}

#[test]
fn every_calculator_names_itself() {
    for calculator in all_calculators() {
        assert!(!calculator.id().is_empty());
        assert!(!calculator.name().is_empty());
        assert!(
            calculator
                .id()
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
            "id {:?} is not snake_case",
            calculator.id()
        );
    }
}

#[test]
fn lookup_finds_registered_ids_only() {
    assert!(get_calculator("bishop").is_some());
    assert!(get_calculator("t21_first").is_some());
    assert!(get_calculator("cardiotocografia").is_none());
}

#[test]
fn evaluate_routes_requests_by_id() {
    let result = evaluate("t21_age", &json!({ "maternal_age": 35.0 })).unwrap();
    assert_eq!(result["one_in"], json!(290));
    assert_eq!(result["band"], json!("intermediate"));
    assert_eq!(
        result["rationale"][0],
        json!("Riesgo base por edad materna (35 años): 1:290")
    );
}

#[test]
fn unknown_id_is_reported() {
    let err = evaluate("cardiotocografia", &json!({})).unwrap_err();
    assert!(matches!(err, CalculatorError::UnknownCalculator(ref id) if id == "cardiotocografia"));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn malformed_request_is_rejected_before_computation() {
    let err = evaluate("t21_age", &json!({ "maternal_age": "treinta y cinco" })).unwrap_err();
    assert!(matches!(err, CalculatorError::MalformedRequest(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn unknown_request_fields_are_rejected() {
    let err = evaluate(
        "bishop",
        &json!({
            "dilation": 2,
            "effacement": 2,
            "consistency": 1,
            "position": 1,
            "station": 2,
            "cervix_cm": 3.0,
        }),
    )
    .unwrap_err();
    assert!(matches!(err, CalculatorError::MalformedRequest(_)));
}

#[test]
fn domain_errors_surface_through_the_catalog() {
    let err = evaluate("t21_age", &json!({ "maternal_age": 12.0 })).unwrap_err();
    assert!(matches!(err, CalculatorError::Core(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn repeated_evaluation_is_deterministic() {
    let request = json!({
        "baseline": "normal",
        "variability": "minima",
        "accelerations": "presentes",
        "decelerations": "variables",
    });
    let first = evaluate("mefi", &request).unwrap();
    let second = evaluate("mefi", &request).unwrap();
    assert_eq!(first, second);
    assert_eq!(first["category"], json!("ii"));
}

#[test]
fn dating_requests_accept_calendar_dates() {
    let result = evaluate(
        "gestational_age",
        &json!({
            "reference_date": "2024-09-23",
            "last_period_date": "2024-01-01",
        }),
    )
    .unwrap();
    assert_eq!(result["age"], json!({ "weeks": 38, "days": 0 }));
    assert_eq!(result["due_date"], json!("2024-10-07"));
    assert_eq!(result["method"], json!("last_menstrual_period"));
}

#[test]
fn evaluations_can_be_stamped_into_history_records() {
    let request = json!({ "maternal_age": 35.0 });
    let result = evaluate("t21_age", &request).unwrap();

    let record = Calculation::record("t21_age", request.clone(), result.clone());
    assert_eq!(record.calculator_id, "t21_age");
    assert_eq!(record.input, request);
    assert_eq!(record.result, result);

    let wire = serde_json::to_value(&record).unwrap();
    assert_eq!(wire["calculator_id"], json!("t21_age"));
    assert_eq!(wire["result"]["one_in"], json!(290));
    let restored: Calculation = serde_json::from_value(wire).unwrap();
    assert_eq!(restored.id, record.id);
    assert_eq!(restored.created_at, record.created_at);
}
