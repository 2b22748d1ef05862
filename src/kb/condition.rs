//! Atomic predicates over a single biomarker value
//!
//! A condition names a biomarker, an operator and the operands the operator
//! needs. Operands are checked when the condition is built or deserialized, so
//! evaluation never has to deal with a missing threshold.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison operators supported in rule and alert conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Biomarker value is present
    #[serde(rename = "exists")]
    Exists,
    /// Biomarker value is greater than the threshold
    #[serde(rename = ">")]
    Gt,
    /// Biomarker value is greater than or equal to the threshold
    #[serde(rename = ">=")]
    GtEq,
    /// Biomarker value is less than the threshold
    #[serde(rename = "<")]
    Lt,
    /// Biomarker value is less than or equal to the threshold
    #[serde(rename = "<=")]
    LtEq,
    /// Biomarker value lies within two bounds, inclusive
    #[serde(rename = "between")]
    Between,
}

impl Operator {
    /// The operator as written in the knowledge base
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exists => "exists",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Between => "between",
        }
    }

    /// Whether this operator compares against a single threshold
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self, Self::Gt | Self::GtEq | Self::Lt | Self::LtEq)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised when a condition is missing the operands its operator needs
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConditionError {
    /// A comparison operator without a `value`
    #[error("operator '{operator}' on biomarker '{biomarker}' requires a threshold 'value'")]
    MissingThreshold { biomarker: String, operator: Operator },

    /// A `between` condition without both `value1` and `value2`
    #[error("operator 'between' on biomarker '{biomarker}' requires 'value1' and 'value2'")]
    MissingBounds { biomarker: String },

    /// A threshold constructor was called with a non-comparison operator
    #[error("operator '{operator}' is not a threshold comparison")]
    NotAComparison { operator: Operator },
}

/// Operands attached to a condition, shaped by its operator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operands {
    /// `exists` takes no operands
    None,
    /// Comparison threshold
    Threshold(f64),
    /// `between` bounds exactly as declared (either order)
    Bounds(f64, f64),
}

/// An atomic predicate over one biomarker's value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCondition", into = "RawCondition")]
pub struct Condition {
    biomarker: String,
    operator: Operator,
    operands: Operands,
}

impl Condition {
    /// Create an `exists` condition
    #[must_use]
    pub fn exists(biomarker: impl Into<String>) -> Self {
        Self {
            biomarker: biomarker.into(),
            operator: Operator::Exists,
            operands: Operands::None,
        }
    }

    /// Create a threshold comparison (`>`, `>=`, `<`, `<=`)
    pub fn compare(
        biomarker: impl Into<String>,
        operator: Operator,
        threshold: f64,
    ) -> Result<Self, ConditionError> {
        if !operator.is_comparison() {
            return Err(ConditionError::NotAComparison { operator });
        }
        Ok(Self {
            biomarker: biomarker.into(),
            operator,
            operands: Operands::Threshold(threshold),
        })
    }

    /// Create a `between` condition; the bounds may be given in either order
    #[must_use]
    pub fn between(biomarker: impl Into<String>, value1: f64, value2: f64) -> Self {
        Self {
            biomarker: biomarker.into(),
            operator: Operator::Between,
            operands: Operands::Bounds(value1, value2),
        }
    }

    /// The referenced biomarker identifier
    #[must_use]
    pub fn biomarker(&self) -> &str {
        &self.biomarker
    }

    /// The condition operator
    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    /// The operator-specific operands
    #[must_use]
    pub const fn operands(&self) -> Operands {
        self.operands
    }

    /// Effective inclusive bounds of a `between` condition, as `(min, max)`
    #[must_use]
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self.operands {
            Operands::Bounds(a, b) => Some((a.min(b), a.max(b))),
            _ => None,
        }
    }

    /// Short operator/operand text used in alert traces, e.g. `>= 400`
    #[must_use]
    pub fn describe(&self) -> String {
        match self.operands {
            Operands::None => self.operator.to_string(),
            Operands::Threshold(t) => format!("{} {t}", self.operator),
            Operands::Bounds(..) => {
                let (min, max) = self.bounds().unwrap_or_default();
                format!("{} {min}-{max}", self.operator)
            }
        }
    }
}

/// Wire shape of a condition: `{biomarker, operator, value?, value1?, value2?}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCondition {
    pub biomarker: String,
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<f64>,
}

impl TryFrom<RawCondition> for Condition {
    type Error = ConditionError;

    fn try_from(raw: RawCondition) -> Result<Self, Self::Error> {
        match raw.operator {
            Operator::Exists => Ok(Self::exists(raw.biomarker)),
            Operator::Between => match (raw.value1, raw.value2) {
                (Some(v1), Some(v2)) => Ok(Self::between(raw.biomarker, v1, v2)),
                _ => Err(ConditionError::MissingBounds {
                    biomarker: raw.biomarker,
                }),
            },
            operator => match raw.value {
                Some(threshold) => Self::compare(raw.biomarker, operator, threshold),
                None => Err(ConditionError::MissingThreshold {
                    biomarker: raw.biomarker,
                    operator,
                }),
            },
        }
    }
}

impl From<Condition> for RawCondition {
    fn from(condition: Condition) -> Self {
        let (value, value1, value2) = match condition.operands {
            Operands::None => (None, None, None),
            Operands::Threshold(t) => (Some(t), None, None),
            Operands::Bounds(a, b) => (None, Some(a), Some(b)),
        };
        Self {
            biomarker: condition.biomarker,
            operator: condition.operator,
            value,
            value1,
            value2,
        }
    }
}
