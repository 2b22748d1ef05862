use biomarker_triage::kb::ReferenceRange;
use biomarker_triage::ranges::{classify_label, normalize_sex};
use biomarker_triage::{Sex, Status, find_matching_range};

fn ferritin() -> ReferenceRange {
    serde_json::from_str(
        r#"{"biomarker": "ferritin", "normal": "60-150", "low_male": "< 60", "low_female": "< 50"}"#,
    )
    .unwrap()
}

#[test]
fn test_female_low_band_selected() {
    let range = ferritin();
    let found = find_matching_range(45.0, &range, normalize_sex(Some("female")));
    assert_eq!(found.label, "low_female");
    assert_eq!(found.range_text, "< 50");
}

#[test]
fn test_female_value_only_in_male_band_is_unmatched() {
    let range = ferritin();
    let found = find_matching_range(55.0, &range, Sex::Female);
    assert_ne!(found.label, "low_male");
    assert!(!found.matched);
    assert_eq!(found.status, Status::Abnormal);
}

#[test]
fn test_male_value_selects_male_band() {
    let range = ferritin();
    let found = find_matching_range(55.0, &range, normalize_sex(Some("M")));
    assert_eq!(found.label, "low_male");
}

#[test]
fn test_agnostic_band() {
    let range = ferritin();
    let found = find_matching_range(100.0, &range, Sex::Female);
    assert_eq!(found.label, "normal");
    assert_eq!(found.status, Status::Normal);
}

#[test]
fn test_unrecognized_sex_defaults_to_male() {
    let range = ferritin();
    let found = find_matching_range(55.0, &range, normalize_sex(Some("other")));
    assert_eq!(found.label, "low_male");
}

#[test]
fn test_ldl_bands() {
    let ldl: ReferenceRange = serde_json::from_str(
        r#"{"biomarker": "ldl_c", "optimal": "< 100", "near_optimal": "100-129",
            "borderline_high": "130-159", "high": "160-189", "very_high": ">= 190"}"#,
    )
    .unwrap();

    let expectations = [
        (80.0, "optimal", Status::Normal),
        (129.0, "near_optimal", Status::Normal),
        (130.0, "borderline_high", Status::Borderline),
        (175.0, "high", Status::Abnormal),
        (220.0, "very_high", Status::Critical),
    ];
    for (value, label, status) in expectations {
        let found = find_matching_range(value, &ldl, Sex::Male);
        assert_eq!(found.label, label, "{value}");
        assert_eq!(found.status, status, "{value}");
    }
}

#[test]
fn test_tagged_band_status() {
    let tsh: ReferenceRange = serde_json::from_str(
        r#"{"biomarker": "tsh", "elevated": {"range": "4.5-10", "status": "borderline"}, "high": "> 10"}"#,
    )
    .unwrap();
    assert_eq!(find_matching_range(6.0, &tsh, Sex::Male).status, Status::Borderline);
    assert_eq!(classify_label("elevated"), Status::Abnormal);
}

#[test]
fn test_overlapping_bands_from_value_keep_authored_order() {
    let ldl: ReferenceRange = serde_json::from_value(serde_json::json!({
        "biomarker": "ldl_c",
        "near_optimal": "100-129",
        "borderline": "100-159"
    }))
    .unwrap();
    assert_eq!(find_matching_range(110.0, &ldl, Sex::Male).label, "near_optimal");
}
