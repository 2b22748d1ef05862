//! Rule and critical-alert evaluation

pub mod condition;
pub mod evaluator;
pub mod priority;

pub use condition::{BiomarkerValues, ConditionOutcome, ValueSource, evaluate_condition};
pub use evaluator::{
    AlertTrace, ConditionMet, Evaluation, FiredAlert, FiredRule, evaluate_alert, evaluate_alerts,
    evaluate_rule, evaluate_rules, evaluate_when,
};
pub use priority::{Prioritized, prioritize, sort_by_severity};
