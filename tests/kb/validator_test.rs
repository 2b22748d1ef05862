use biomarker_triage::kb::validator::collect_violations;
use biomarker_triage::kb::{ViolationKind, parse_knowledge_base, validate_knowledge_base};
use biomarker_triage::{EngineConfig, TriageError, load_knowledge_base_str};
use serde_json::json;

use crate::utils::sample_kb_json;

#[test]
fn test_sample_knowledge_base_is_consistent() {
    let kb = parse_knowledge_base(&sample_kb_json().to_string()).unwrap();
    assert!(validate_knowledge_base(&kb).is_ok());
}

#[test]
fn test_unknown_condition_biomarker_is_reported_once() {
    let mut doc = sample_kb_json();
    doc["rules"].as_array_mut().unwrap().push(json!({
        "id": "xyz_rule", "name": "Mystery marker", "enabled": true,
        "when": {"all": [{"biomarker": "xyz", "operator": ">", "value": 1}]},
        "then": {"severity": "yellow", "headline": "h", "actions": ["see_doctor"]}
    }));

    let err = load_knowledge_base_str(&doc.to_string(), &EngineConfig::default()).unwrap_err();
    let TriageError::Consistency(report) = err else {
        panic!("expected a consistency failure, got {err}");
    };

    assert_eq!(report.len(), 1);
    let violation = &report.violations()[0];
    assert_eq!(violation.kind, ViolationKind::UnknownConditionBiomarker);
    assert!(violation.message.contains("xyz_rule"));
    assert!(violation.message.contains("\"xyz\""));
    assert_eq!(violation.context, "Rule: Mystery marker");
}

#[test]
fn test_exists_conditions_may_reference_unknown_biomarkers() {
    let mut doc = sample_kb_json();
    doc["rules"].as_array_mut().unwrap().push(json!({
        "id": "optional_marker", "name": "Optional", "enabled": true,
        "when": {"any": [{"biomarker": "not_in_dictionary", "operator": "exists"}]},
        "then": {"severity": "green", "headline": "h", "actions": []}
    }));
    let kb = parse_knowledge_base(&doc.to_string()).unwrap();
    assert!(collect_violations(&kb).is_empty());
}

#[test]
fn test_every_violation_is_collected() {
    let mut doc = sample_kb_json();
    let biomarkers = doc["biomarkers"].as_array_mut().unwrap();
    biomarkers.push(json!({"id": "glucose", "name": "Dup", "unit": "mg/dL", "category": "x"}));
    biomarkers.push(json!({
        "id": "ratio", "name": "Ratio", "unit": "", "category": "x",
        "calculated": true, "depends_on": ["ldl_c", "apob"]
    }));
    doc["actions"]
        .as_array_mut()
        .unwrap()
        .push(json!({"id": "see_doctor", "text": "dup"}));
    doc["red_flags"].as_array_mut().unwrap().push(json!({
        "id": "ldl_high", "name": "Collides with a rule", "enabled": true,
        "when": {"all": [{"biomarker": "ldl_c", "operator": ">=", "value": 300}]},
        "then": {"severity": "red", "headline": "h", "actions": ["call_ambulance:now"]}
    }));
    doc["red_flags"].as_array_mut().unwrap().push(json!({
        "id": "redflag_potassium_critical", "name": "Second potassium alert", "enabled": true,
        "when": {"any": [{"biomarker": "potassium", "operator": "<", "value": 2.5}]},
        "then": {"severity": "red", "headline": "h", "actions": ["seek_urgent_care"]}
    }));
    doc["rules"].as_array_mut().unwrap().push(json!({
        "id": "hdl_low", "name": "Low HDL again", "enabled": true,
        "when": {"all": [{"biomarker": "hdl_c", "operator": "<", "value": 35}]},
        "then": {"severity": "yellow", "headline": "h", "actions": ["lifestyle"]}
    }));
    doc["reference_ranges"]
        .as_array_mut()
        .unwrap()
        .push(json!({"biomarker": "apob", "normal": "< 90"}));
    doc["evidence"]
        .as_array_mut()
        .unwrap()
        .push(json!({"rule_id": "no_such_rule", "sources": []}));

    let kb = parse_knowledge_base(&doc.to_string()).unwrap();
    let report = validate_knowledge_base(&kb).unwrap_err();

    let expected = [
        (ViolationKind::DuplicateBiomarker, 1),
        (ViolationKind::DuplicateAction, 1),
        (ViolationKind::DuplicateRule, 1),
        (ViolationKind::DuplicateAlert, 1),
        (ViolationKind::RuleAlertIdCollision, 1),
        (ViolationKind::UnknownAction, 1),
        (ViolationKind::UnknownRangeBiomarker, 1),
        (ViolationKind::UnknownEvidenceTarget, 1),
        (ViolationKind::UnknownDependency, 1),
    ];
    for (kind, count) in expected {
        assert_eq!(report.count_of(kind), count, "{kind:?}");
    }
    assert_eq!(report.len(), 9);

    let text = report.to_string();
    assert!(text.contains("9 error(s)"));
    assert!(text.contains("Duplicate rule id: \"hdl_low\""));
    assert!(text.contains("Duplicate critical alert id: \"redflag_potassium_critical\""));
    assert!(text.contains("call_ambulance"));
}

#[test]
fn test_duplicate_reference_ranges_are_reported() {
    let mut doc = sample_kb_json();
    doc["reference_ranges"]
        .as_array_mut()
        .unwrap()
        .push(json!({"biomarker": "glucose", "normal": "0-1000"}));
    let kb = parse_knowledge_base(&doc.to_string()).unwrap();
    let report = collect_violations(&kb);
    assert_eq!(report.count_of(ViolationKind::DuplicateReferenceRange), 1);
}
