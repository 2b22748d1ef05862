//! Condition evaluation against per-case biomarker values

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use crate::case::Observation;
use crate::kb::condition::{Condition, Operands, Operator};
use crate::ranges::types::EnrichedObservation;

/// Source of biomarker values for condition evaluation
///
/// A value is absent when it is missing, non-numeric or not finite.
pub trait ValueSource {
    fn value_of(&self, biomarker: &str) -> Option<f64>;
}

/// Immutable biomarker -> value lookup built once per case
///
/// Only finite values are kept and the first value for a biomarker wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BiomarkerValues {
    values: FxHashMap<String, f64>,
}

impl BiomarkerValues {
    fn from_pairs<'a>(pairs: impl Iterator<Item = (&'a str, f64)>) -> Self {
        let mut values = FxHashMap::default();
        for (biomarker, value) in pairs {
            if value.is_finite() {
                values.entry(biomarker.to_string()).or_insert(value);
            }
        }
        Self { values }
    }

    #[must_use]
    pub fn from_observations(observations: &[Observation]) -> Self {
        Self::from_pairs(
            observations
                .iter()
                .map(|o| (o.biomarker.as_str(), o.value)),
        )
    }

    #[must_use]
    pub fn from_enriched(observations: &[EnrichedObservation]) -> Self {
        Self::from_pairs(
            observations
                .iter()
                .map(|o| (o.biomarker.as_str(), o.value)),
        )
    }

    /// Build from a raw lab map; null and non-numeric entries are absent
    #[must_use]
    pub fn from_json_map(labs: &Map<String, Value>) -> Self {
        Self::from_pairs(
            labs.iter()
                .filter_map(|(k, v)| v.as_f64().map(|n| (k.as_str(), n))),
        )
    }

    #[must_use]
    pub fn get(&self, biomarker: &str) -> Option<f64> {
        self.values.get(biomarker).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ValueSource for BiomarkerValues {
    fn value_of(&self, biomarker: &str) -> Option<f64> {
        self.get(biomarker)
    }
}

impl<const N: usize> From<[(&str, f64); N]> for BiomarkerValues {
    fn from(pairs: [(&str, f64); N]) -> Self {
        Self::from_pairs(pairs.into_iter())
    }
}

/// Outcome of one condition with its justification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionOutcome {
    pub ok: bool,
    pub because: String,
}

impl ConditionOutcome {
    fn new(ok: bool, because: String) -> Self {
        Self { ok, because }
    }
}

const fn comparison_phrase(operator: Operator) -> &'static str {
    match operator {
        Operator::Gt => "greater than",
        Operator::GtEq => "greater than or equal to",
        Operator::Lt => "less than",
        Operator::LtEq => "less than or equal to",
        Operator::Exists | Operator::Between => "",
    }
}

/// Evaluate a condition; absent values give a false outcome, never an error
pub fn evaluate_condition<V: ValueSource + ?Sized>(
    condition: &Condition,
    values: &V,
) -> ConditionOutcome {
    let biomarker = condition.biomarker();
    let value = values.value_of(biomarker).filter(|v| v.is_finite());

    let Some(value) = value else {
        let because = if condition.operator() == Operator::Exists {
            format!("{biomarker} is not present")
        } else {
            format!("{biomarker} is not present in the observations")
        };
        return ConditionOutcome::new(false, because);
    };

    match condition.operands() {
        Operands::None => {
            ConditionOutcome::new(true, format!("{biomarker} is present (value: {value})"))
        }
        Operands::Bounds(a, b) => {
            let (min, max) = (a.min(b), a.max(b));
            let ok = value >= min && value <= max;
            let verb = if ok { "is" } else { "is NOT" };
            ConditionOutcome::new(
                ok,
                format!("{biomarker} ({value}) {verb} between {min} and {max}"),
            )
        }
        Operands::Threshold(threshold) => {
            let operator = condition.operator();
            let ok = match operator {
                Operator::Gt => value > threshold,
                Operator::GtEq => value >= threshold,
                Operator::Lt => value < threshold,
                Operator::LtEq => value <= threshold,
                Operator::Exists | Operator::Between => false,
            };
            let verb = if ok { "is" } else { "is NOT" };
            ConditionOutcome::new(
                ok,
                format!(
                    "{biomarker} ({value}) {verb} {} {threshold}",
                    comparison_phrase(operator)
                ),
            )
        }
    }
}
