//! Prioritized reports
//!
//! A report lists every fired alert and rule, most severe first, and one
//! action item per entry in the same order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::kb::index::IndexedKnowledgeBase;
use crate::kb::rule::{ActionRef, Severity};
use crate::ranges::types::{EnrichedObservation, QaFlag, Sex};
use crate::rules::evaluator::{FiredAlert, FiredRule};
use crate::rules::priority::{Prioritized, sort_by_severity};

/// One entry of the prioritized list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Priority {
    Alert(FiredAlert),
    Rule(FiredRule),
}

impl Priority {
    /// Identifier of the underlying alert or rule
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Alert(alert) => &alert.alert_id,
            Self::Rule(rule) => &rule.rule.id,
        }
    }

    #[must_use]
    pub fn headline(&self) -> &str {
        match self {
            Self::Alert(alert) => &alert.headline,
            Self::Rule(rule) => &rule.rule.then.headline,
        }
    }

    /// Raw action references
    #[must_use]
    pub fn action_refs(&self) -> &[String] {
        match self {
            Self::Alert(alert) => &alert.actions,
            Self::Rule(rule) => &rule.rule.then.actions,
        }
    }

    /// Justifications recorded when the entry fired
    #[must_use]
    pub fn fired_because(&self) -> &[String] {
        match self {
            Self::Alert(alert) => &alert.trace.fired_because,
            Self::Rule(rule) => &rule.fired_because,
        }
    }
}

impl Prioritized for Priority {
    fn severity(&self) -> Severity {
        match self {
            Self::Alert(alert) => alert.severity(),
            Self::Rule(rule) => rule.severity(),
        }
    }
}

impl From<FiredAlert> for Priority {
    fn from(alert: FiredAlert) -> Self {
        Self::Alert(alert)
    }
}

impl From<FiredRule> for Priority {
    fn from(rule: FiredRule) -> Self {
        Self::Rule(rule)
    }
}

/// What to do next for one prioritized entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub severity: Severity,
    pub headline: String,
    pub bullets: Vec<String>,
}

/// Prioritized entries and their action items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub priorities: Vec<Priority>,
    pub actions: Vec<ActionItem>,
}

/// Resolve an action reference to display text
///
/// `id:param` becomes `<action text> (param)`. A reference the library does
/// not know is returned unchanged.
#[must_use]
pub fn resolve_action(kb: &IndexedKnowledgeBase, reference: &str) -> String {
    let parsed = ActionRef::parse(reference);
    match (kb.action(parsed.id), parsed.param) {
        (Some(action), Some(param)) => format!("{} ({param})", action.text),
        (Some(action), None) => action.text.clone(),
        (None, _) => reference.to_string(),
    }
}

/// Sort the entries by severity and derive one action item per entry
#[must_use]
pub fn build_report(kb: &IndexedKnowledgeBase, mut priorities: Vec<Priority>) -> Report {
    sort_by_severity(&mut priorities);

    let actions = priorities
        .iter()
        .map(|entry| ActionItem {
            severity: entry.severity(),
            headline: entry.headline().to_string(),
            bullets: entry
                .action_refs()
                .iter()
                .map(|r| resolve_action(kb, r))
                .collect(),
        })
        .collect();

    Report {
        priorities,
        actions,
    }
}

/// Patient fields echoed in a case report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub age: f64,
    pub sex: Sex,
}

/// Counters and timestamp describing one case evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseTrace {
    pub ranges_applied: usize,
    pub observations_processed: usize,
    pub alerts_evaluated: usize,
    pub alerts_fired: usize,
    pub rules_evaluated: usize,
    pub rules_fired: usize,
    pub timestamp: DateTime<Utc>,
}

/// Full result of evaluating one case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    pub kb_version: String,
    pub case_id: String,
    pub patient: PatientSummary,
    pub observations_enriched: Vec<EnrichedObservation>,
    pub qa_flags: Vec<QaFlag>,
    /// Critical alerts that fired, in declared order
    pub red_flags: Vec<FiredAlert>,
    pub report: Report,
    pub trace: CaseTrace,
}

impl CaseReport {
    /// Highest severity in the report, if anything fired
    #[must_use]
    pub fn top_severity(&self) -> Option<Severity> {
        self.report.priorities.first().map(Prioritized::severity)
    }
}
