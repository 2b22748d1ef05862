use biomarker_triage::kb::{Rule, Severity, When};
use biomarker_triage::kb::rule::RuleOutcome;
use biomarker_triage::rules::prioritize;
use biomarker_triage::FiredRule;

fn fired(id: &str, severity: Severity) -> FiredRule {
    FiredRule {
        rule: Rule {
            id: id.to_string(),
            name: id.to_string(),
            enabled: true,
            when: When::default(),
            then: RuleOutcome {
                severity,
                headline: id.to_string(),
                why: None,
                actions: Vec::new(),
                tags: None,
            },
        },
        fired_because: Vec::new(),
    }
}

#[test]
fn test_severity_order_is_stable() {
    let input = vec![
        fired("yellow_1", Severity::Yellow),
        fired("red", Severity::Red),
        fired("yellow_2", Severity::Yellow),
        fired("orange", Severity::Orange),
    ];

    let ids: Vec<String> = prioritize(input).into_iter().map(|f| f.rule.id).collect();

    assert_eq!(ids, vec!["red", "orange", "yellow_1", "yellow_2"]);
}

#[test]
fn test_many_equal_severities_keep_order() {
    let input: Vec<FiredRule> = (0..50)
        .map(|i| {
            let severity = if i % 3 == 0 { Severity::Green } else { Severity::Yellow };
            fired(&format!("r{i:02}"), severity)
        })
        .collect();

    let sorted = prioritize(input);
    let yellows: Vec<&str> = sorted
        .iter()
        .filter(|f| f.rule.then.severity == Severity::Yellow)
        .map(|f| f.rule.id.as_str())
        .collect();

    let mut expected = yellows.clone();
    expected.sort_unstable();
    assert_eq!(yellows, expected);
    assert_eq!(sorted.last().map(|f| f.rule.id.as_str()), Some("r48"));
}
