use biomarker_triage::BiomarkerValues;
use biomarker_triage::kb::{Condition, Operator};
use biomarker_triage::rules::evaluate_condition;
use serde_json::json;

/// `exists` holds exactly when the value is a finite number
#[test]
fn test_exists_matches_finite_values() {
    let condition = Condition::exists("tsh");
    let labs = json!({
        "a": 1.5, "b": 0, "c": -3, "d": null, "e": "2.5", "f": true, "g": [1]
    });
    let map = labs.as_object().unwrap();
    for (key, raw) in map {
        let renamed = json!({ "tsh": raw.clone() });
        let values = BiomarkerValues::from_json_map(renamed.as_object().unwrap());
        let expected = raw.as_f64().is_some_and(f64::is_finite);
        assert_eq!(
            evaluate_condition(&condition, &values).ok,
            expected,
            "value {key}: {raw}"
        );
    }

    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let values = BiomarkerValues::from([("tsh", value)]);
        assert!(!evaluate_condition(&condition, &values).ok);
    }
}

/// Swapping the bounds of `between` never changes the outcome
#[test]
fn test_between_bounds_commute() {
    let pairs = [(160.0, 189.0), (5.7, 6.4), (0.0, 0.0), (-1.0, 1.0)];
    let probes = [-2.0, -1.0, 0.0, 0.5, 5.7, 6.0, 6.4, 6.5, 159.99, 160.0, 175.0, 189.0, 189.01];

    for (a, b) in pairs {
        let forward = Condition::between("x", a, b);
        let reversed = Condition::between("x", b, a);
        for probe in probes {
            let values = BiomarkerValues::from([("x", probe)]);
            let lhs = evaluate_condition(&forward, &values);
            let rhs = evaluate_condition(&reversed, &values);
            assert_eq!(lhs, rhs, "bounds ({a}, {b}) at {probe}");
        }
    }
}

#[test]
fn test_between_justification_uses_effective_bounds() {
    let values = BiomarkerValues::from([("ldl_c", 200.0)]);
    let outcome = evaluate_condition(&Condition::between("ldl_c", 189.0, 160.0), &values);
    assert_eq!(outcome.because, "ldl_c (200) is NOT between 160 and 189");
}

#[test]
fn test_comparison_operators() {
    let values = BiomarkerValues::from([("k", 6.5)]);
    let cases = [
        (Operator::Gt, false),
        (Operator::GtEq, true),
        (Operator::Lt, false),
        (Operator::LtEq, true),
    ];
    for (operator, expected) in cases {
        let condition = Condition::compare("k", operator, 6.5).unwrap();
        assert_eq!(evaluate_condition(&condition, &values).ok, expected, "{operator}");
    }
}

#[test]
fn test_exists_justifications() {
    let present = BiomarkerValues::from([("tsh", 2.5)]);
    assert_eq!(
        evaluate_condition(&Condition::exists("tsh"), &present).because,
        "tsh is present (value: 2.5)"
    );
    assert_eq!(
        evaluate_condition(&Condition::exists("tsh"), &BiomarkerValues::default()).because,
        "tsh is not present"
    );
}
