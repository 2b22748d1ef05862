//! Case input: one patient and their laboratory observations

use serde::{Deserialize, Serialize};

/// Patient demographics relevant to range selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub age: f64,
    /// Free text as supplied; normalized with `normalize_sex`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
}

/// A single laboratory measurement as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub biomarker: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Observation {
    #[must_use]
    pub fn new(biomarker: impl Into<String>, value: f64) -> Self {
        Self {
            biomarker: biomarker.into(),
            value,
            unit: None,
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// A case submitted for evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseInput {
    pub case_id: String,
    pub patient: Patient,
    #[serde(default)]
    pub observations: Vec<Observation>,
}

impl CaseInput {
    #[must_use]
    pub fn new(case_id: impl Into<String>, age: f64, sex: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            patient: Patient {
                age,
                sex: Some(sex.into()),
            },
            observations: Vec::new(),
        }
    }

    /// A case whose patient sex was not recorded
    #[must_use]
    pub fn without_sex(case_id: impl Into<String>, age: f64) -> Self {
        Self {
            case_id: case_id.into(),
            patient: Patient { age, sex: None },
            observations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_observation(mut self, observation: Observation) -> Self {
        self.observations.push(observation);
        self
    }
}
