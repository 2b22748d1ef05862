//! ALL/ANY evaluation of rules and critical alerts
//!
//! The firing contract for one `when` clause:
//!
//! 1. A non-empty ALL list is evaluated in order and stops at the first false
//!    condition, in which case the statement does not fire and ANY is never
//!    looked at. If every ALL condition holds the statement fires.
//! 2. A non-empty ANY list is then evaluated in full. With ALL present its
//!    outcome is recorded for explanation only. Without ALL the statement
//!    fires iff at least one ANY condition holds.
//! 3. With neither list (or both empty) nothing fires.
//!
//! Disabled statements are skipped before any condition is evaluated.

use serde::{Deserialize, Serialize};

use crate::kb::condition::Condition;
use crate::kb::rule::{ClinicalStatement, CriticalAlert, Rule, Severity, When};
use crate::rules::condition::{ValueSource, evaluate_condition};

/// A true condition whose biomarker had a value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionMet {
    pub biomarker: String,
    /// Operator and operand text, e.g. `>= 400`
    pub condition: String,
    pub value: f64,
}

/// Result of evaluating a `when` clause
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub fired: bool,
    /// Justifications of every evaluated condition, in evaluation order
    pub fired_because: Vec<String>,
    pub conditions_met: Vec<ConditionMet>,
}

impl Evaluation {
    fn record<V: ValueSource + ?Sized>(
        &mut self,
        condition: &Condition,
        values: &V,
    ) -> bool {
        let outcome = evaluate_condition(condition, values);
        self.fired_because.push(outcome.because);
        if outcome.ok {
            if let Some(value) = values.value_of(condition.biomarker()) {
                self.conditions_met.push(ConditionMet {
                    biomarker: condition.biomarker().to_string(),
                    condition: condition.describe(),
                    value,
                });
            }
        }
        outcome.ok
    }
}

/// Evaluate a `when` clause against a set of values
pub fn evaluate_when<V: ValueSource + ?Sized>(when: &When, values: &V) -> Evaluation {
    let mut evaluation = Evaluation::default();
    let all = when.all_conditions();

    if let Some(all) = all {
        for condition in all {
            if !evaluation.record(condition, values) {
                return evaluation;
            }
        }
        evaluation.fired = true;
    }

    if let Some(any) = when.any_conditions() {
        let mut any_ok = false;
        for condition in any {
            any_ok |= evaluation.record(condition, values);
        }
        if all.is_none() {
            evaluation.fired = any_ok;
        }
    }

    evaluation
}

/// Evaluate any statement, returning the evaluation only when it fired
pub fn evaluate_statement<S, V>(statement: &S, values: &V) -> Option<Evaluation>
where
    S: ClinicalStatement + ?Sized,
    V: ValueSource + ?Sized,
{
    if !statement.enabled() {
        return None;
    }
    let evaluation = evaluate_when(statement.when(), values);
    evaluation.fired.then_some(evaluation)
}

/// A protocol rule that fired, with its justifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiredRule {
    #[serde(flatten)]
    pub rule: Rule,
    #[serde(rename = "firedBecause")]
    pub fired_because: Vec<String>,
}

/// Explanation attached to a fired critical alert
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertTrace {
    pub fired_because: Vec<String>,
    pub conditions_met: Vec<ConditionMet>,
}

/// A critical alert that fired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiredAlert {
    pub alert_id: String,
    pub name: String,
    pub severity: Severity,
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_questions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub trace: AlertTrace,
}

/// Evaluate one rule
pub fn evaluate_rule<V: ValueSource + ?Sized>(rule: &Rule, values: &V) -> Option<FiredRule> {
    evaluate_statement(rule, values).map(|evaluation| FiredRule {
        rule: rule.clone(),
        fired_because: evaluation.fired_because,
    })
}

/// Evaluate one critical alert
pub fn evaluate_alert<V: ValueSource + ?Sized>(
    alert: &CriticalAlert,
    values: &V,
) -> Option<FiredAlert> {
    evaluate_statement(alert, values).map(|evaluation| FiredAlert {
        alert_id: alert.id.clone(),
        name: alert.name.clone(),
        severity: alert.severity(),
        headline: alert.then.headline.clone(),
        why: alert.then.why.clone(),
        actions: alert.then.actions.clone(),
        doctor_questions: alert.then.doctor_questions.clone(),
        tags: alert.then.tags.clone(),
        trace: AlertTrace {
            fired_because: evaluation.fired_because,
            conditions_met: evaluation.conditions_met,
        },
    })
}

/// Evaluate rules in declared order, keeping those that fired
pub fn evaluate_rules<V: ValueSource + ?Sized>(rules: &[Rule], values: &V) -> Vec<FiredRule> {
    rules
        .iter()
        .filter_map(|rule| evaluate_rule(rule, values))
        .collect()
}

/// Evaluate critical alerts in declared order, keeping those that fired
pub fn evaluate_alerts<V: ValueSource + ?Sized>(
    alerts: &[CriticalAlert],
    values: &V,
) -> Vec<FiredAlert> {
    alerts
        .iter()
        .filter_map(|alert| evaluate_alert(alert, values))
        .collect()
}
