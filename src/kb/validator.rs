//! Knowledge-base consistency validation
//!
//! Every check runs against the whole knowledge base and appends to one
//! [`ValidationReport`]. Nothing stops at the first problem, so an author sees
//! every dangling reference and duplicate identifier in a single pass.

use std::fmt;

use itertools::Itertools;
use log::warn;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::kb::condition::Operator;
use crate::kb::rule::{ActionRef, ClinicalStatement};
use crate::kb::types::KnowledgeBase;

/// Category of a consistency violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    DuplicateBiomarker,
    DuplicateAction,
    DuplicateRule,
    DuplicateAlert,
    DuplicateReferenceRange,
    RuleAlertIdCollision,
    UnknownRangeBiomarker,
    UnknownConditionBiomarker,
    UnknownAction,
    UnknownEvidenceTarget,
    UnknownDependency,
}

/// A single consistency failure with the context it was found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
    pub context: String,
}

/// All violations found in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn push(
        &mut self,
        kind: ViolationKind,
        message: impl Into<String>,
        context: impl Into<String>,
    ) {
        self.violations.push(Violation {
            kind,
            message: message.into(),
            context: context.into(),
        });
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Number of violations of the given kind
    #[must_use]
    pub fn count_of(&self, kind: ViolationKind) -> usize {
        self.violations.iter().filter(|v| v.kind == kind).count()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Knowledge base validation failed with {} error(s):",
            self.violations.len()
        )?;
        let body = self
            .violations
            .iter()
            .map(|v| format!("  - {}\n      {}", v.message, v.context))
            .join("\n");
        f.write_str(&body)
    }
}

/// Validate a knowledge base, failing with every violation found
pub fn validate_knowledge_base(kb: &KnowledgeBase) -> Result<(), ValidationReport> {
    let report = collect_violations(kb);
    if report.is_empty() {
        Ok(())
    } else {
        warn!(
            "Knowledge base {} has {} consistency violation(s)",
            kb.version(),
            report.len()
        );
        Err(report)
    }
}

/// Run every consistency check and return the accumulated report
#[must_use]
pub fn collect_violations(kb: &KnowledgeBase) -> ValidationReport {
    let mut report = ValidationReport::new();

    let biomarker_ids: FxHashSet<&str> = kb.biomarkers.iter().map(|b| b.id.as_str()).collect();
    let action_ids: FxHashSet<&str> = kb.actions.iter().map(|a| a.id.as_str()).collect();

    check_duplicate_ids(
        kb.biomarkers.iter().map(|b| b.id.as_str()),
        ViolationKind::DuplicateBiomarker,
        "biomarker",
        &mut report,
    );
    check_duplicate_ids(
        kb.actions.iter().map(|a| a.id.as_str()),
        ViolationKind::DuplicateAction,
        "action",
        &mut report,
    );
    check_duplicate_ids(
        kb.rules.iter().map(|r| r.id.as_str()),
        ViolationKind::DuplicateRule,
        "rule",
        &mut report,
    );
    check_duplicate_ids(
        kb.red_flags.iter().map(|a| a.id.as_str()),
        ViolationKind::DuplicateAlert,
        "critical alert",
        &mut report,
    );
    check_duplicate_ids(
        kb.reference_ranges.iter().map(|r| r.biomarker.as_str()),
        ViolationKind::DuplicateReferenceRange,
        "reference range for biomarker",
        &mut report,
    );

    check_rule_alert_collisions(kb, &mut report);
    check_range_biomarkers(kb, &biomarker_ids, &mut report);

    for rule in &kb.rules {
        check_statement(rule, &biomarker_ids, &action_ids, &mut report);
    }
    for alert in &kb.red_flags {
        check_statement(alert, &biomarker_ids, &action_ids, &mut report);
    }

    check_evidence_targets(kb, &mut report);
    check_calculated_dependencies(kb, &biomarker_ids, &mut report);

    report
}

fn check_duplicate_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    kind: ViolationKind,
    label: &str,
    report: &mut ValidationReport,
) {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    let mut order = Vec::new();
    for id in ids {
        let count = counts.entry(id).or_insert(0);
        if *count == 0 {
            order.push(id);
        }
        *count += 1;
    }

    for id in order {
        let count = counts.get(id).copied().unwrap_or(0);
        if count > 1 {
            report.push(
                kind,
                format!("Duplicate {label} id: \"{id}\""),
                format!("Declared {count} times"),
            );
        }
    }
}

fn check_rule_alert_collisions(kb: &KnowledgeBase, report: &mut ValidationReport) {
    let alert_ids: FxHashSet<&str> = kb.red_flags.iter().map(|a| a.id.as_str()).collect();
    let mut seen = FxHashSet::default();
    for rule in &kb.rules {
        if alert_ids.contains(rule.id.as_str()) && seen.insert(rule.id.as_str()) {
            report.push(
                ViolationKind::RuleAlertIdCollision,
                format!("Rule id collides with critical alert id: \"{}\"", rule.id),
                format!("Rule: {}", rule.name),
            );
        }
    }
}

fn check_range_biomarkers(
    kb: &KnowledgeBase,
    biomarker_ids: &FxHashSet<&str>,
    report: &mut ValidationReport,
) {
    for range in &kb.reference_ranges {
        if !biomarker_ids.contains(range.biomarker.as_str()) {
            report.push(
                ViolationKind::UnknownRangeBiomarker,
                format!(
                    "Reference range references unknown biomarker: \"{}\"",
                    range.biomarker
                ),
                format!("Reference range: {}", range.biomarker),
            );
        }
    }
}

fn check_statement<S: ClinicalStatement>(
    statement: &S,
    biomarker_ids: &FxHashSet<&str>,
    action_ids: &FxHashSet<&str>,
    report: &mut ValidationReport,
) {
    let context = format!("{}: {}", statement.kind_label(), statement.name());

    for condition in statement.when().conditions() {
        if condition.operator() == Operator::Exists {
            continue;
        }
        if !biomarker_ids.contains(condition.biomarker()) {
            report.push(
                ViolationKind::UnknownConditionBiomarker,
                format!(
                    "{} \"{}\" references unknown biomarker: \"{}\"",
                    statement.kind_label(),
                    statement.id(),
                    condition.biomarker()
                ),
                context.clone(),
            );
        }
    }

    for reference in statement.action_refs() {
        let action = ActionRef::parse(reference);
        if !action_ids.contains(action.id) {
            report.push(
                ViolationKind::UnknownAction,
                format!(
                    "{} \"{}\" references unknown action: \"{}\"",
                    statement.kind_label(),
                    statement.id(),
                    action.id
                ),
                context.clone(),
            );
        }
    }
}

fn check_evidence_targets(kb: &KnowledgeBase, report: &mut ValidationReport) {
    let targets: FxHashSet<&str> = kb
        .rules
        .iter()
        .map(|r| r.id.as_str())
        .chain(kb.red_flags.iter().map(|a| a.id.as_str()))
        .collect();

    for entry in &kb.evidence {
        if !targets.contains(entry.rule_id.as_str()) {
            report.push(
                ViolationKind::UnknownEvidenceTarget,
                format!(
                    "Evidence references unknown rule or alert: \"{}\"",
                    entry.rule_id
                ),
                format!("Evidence: {}", entry.rule_id),
            );
        }
    }
}

fn check_calculated_dependencies(
    kb: &KnowledgeBase,
    biomarker_ids: &FxHashSet<&str>,
    report: &mut ValidationReport,
) {
    for biomarker in kb.biomarkers.iter().filter(|b| b.calculated) {
        for dependency in &biomarker.depends_on {
            if !biomarker_ids.contains(dependency.as_str()) {
                report.push(
                    ViolationKind::UnknownDependency,
                    format!(
                        "Calculated biomarker \"{}\" depends on unknown biomarker: \"{dependency}\"",
                        biomarker.id
                    ),
                    format!("Biomarker: {}", biomarker.name),
                );
            }
        }
    }
}
