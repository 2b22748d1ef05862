use biomarker_triage::parse_range;
use biomarker_triage::ranges::RangeKind;

#[test]
fn test_strict_upper_bound() {
    let predicate = parse_range("< 100").unwrap();
    assert!(predicate.matches(99.9));
    assert!(!predicate.matches(100.0));
    assert_eq!(predicate.kind, RangeKind::UpperBound);
}

#[test]
fn test_interval_includes_both_ends() {
    let predicate = parse_range("100-129").unwrap();
    assert!(predicate.matches(100.0));
    assert!(predicate.matches(129.0));
    assert!(!predicate.matches(99.99));
}

#[test]
fn test_inclusive_lower_bound() {
    let predicate = parse_range(">= 190").unwrap();
    assert!(predicate.matches(190.0));
    assert!(!predicate.matches(189.99));
}

#[test]
fn test_whitespace_tolerance() {
    for text in ["<100", "< 100", "  <   100  ", "<\t100"] {
        let predicate = parse_range(text).unwrap_or_else(|| panic!("{text:?} should parse"));
        assert_eq!(predicate.max, Some(100.0));
        assert!(!predicate.max_inclusive);
    }
    let predicate = parse_range("3.5 - 5.0").unwrap();
    assert_eq!((predicate.min, predicate.max), (Some(3.5), Some(5.0)));
}

#[test]
fn test_garbage_has_no_predicate() {
    for text in ["", "   ", "high", "N/A", "100", "100-", "-100", ">= abc", "1e3-2e3"] {
        assert!(parse_range(text).is_none(), "{text:?}");
    }
}
