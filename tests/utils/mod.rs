use std::cell::RefCell;

use biomarker_triage::rules::ValueSource;
use biomarker_triage::{BiomarkerValues, EngineConfig, TriageEngine};
use serde_json::{Value, json};

/// A small but complete knowledge-base document
#[must_use]
pub fn sample_kb_json() -> Value {
    json!({
        "manifest": {
            "version": "1.4.0",
            "release_date": "2024-09-01",
            "status": "released",
            "description": "Test knowledge base"
        },
        "biomarkers": [
            {"id": "glucose", "name": "Glucose", "unit": "mg/dL", "category": "metabolic"},
            {"id": "potassium", "name": "Potassium", "unit": "mEq/L", "category": "electrolytes"},
            {"id": "ldl_c", "name": "LDL cholesterol", "unit": "mg/dL", "category": "lipids"},
            {"id": "hdl_c", "name": "HDL cholesterol", "unit": "mg/dL", "category": "lipids"},
            {"id": "ferritin", "name": "Ferritin", "unit": "ng/mL", "category": "iron"},
            {
                "id": "non_hdl_c", "name": "Non-HDL cholesterol", "unit": "mg/dL", "category": "lipids",
                "calculated": true, "depends_on": ["ldl_c", "hdl_c"],
                "calculation_method": "subtraction"
            }
        ],
        "reference_ranges": [
            {"biomarker": "glucose", "normal": "70-99", "prediabetes": "100-125", "diabetes": "126-399", "critical_high": ">= 400"},
            {"biomarker": "potassium", "normal": "3.5-5.0", "high": "5.1-6.4", "critical_high": ">= 6.5"},
            {"biomarker": "ldl_c", "optimal": "< 100", "near_optimal": "100-129", "borderline_high": "130-159", "high": "160-189", "very_high": ">= 190"},
            {"biomarker": "ferritin", "normal": "60-150", "low_male": "< 60", "low_female": "< 50"}
        ],
        "red_flags": [
            {
                "id": "redflag_glucose_critical", "name": "Critical glucose", "enabled": true,
                "when": {"all": [{"biomarker": "glucose", "operator": ">=", "value": 400}]},
                "then": {
                    "severity": "red",
                    "headline": "Critically high glucose: seek care now",
                    "actions": ["seek_urgent_care"],
                    "doctor_questions": ["Do you have symptoms of ketoacidosis?"],
                    "tags": ["emergency", "glucose"]
                }
            },
            {
                "id": "redflag_potassium_critical", "name": "Critical potassium", "enabled": true,
                "when": {"all": [{"biomarker": "potassium", "operator": ">=", "value": 6.5}]},
                "then": {"severity": "red", "headline": "Critically high potassium", "actions": ["seek_urgent_care"]}
            }
        ],
        "rules": [
            {
                "id": "ldl_very_high", "name": "Very high LDL", "enabled": true,
                "when": {"all": [{"biomarker": "ldl_c", "operator": ">=", "value": 190}]},
                "then": {"severity": "orange", "headline": "Very high LDL", "actions": ["see_doctor", "repeat_test:3_months"]}
            },
            {
                "id": "ldl_high", "name": "High LDL", "enabled": true,
                "when": {"all": [{"biomarker": "ldl_c", "operator": "between", "value1": 189, "value2": 160}]},
                "then": {"severity": "yellow", "headline": "High LDL", "actions": ["repeat_test:6_months"]}
            },
            {
                "id": "hdl_low", "name": "Low HDL", "enabled": true,
                "when": {"all": [{"biomarker": "hdl_c", "operator": "<", "value": 40}]},
                "then": {"severity": "yellow", "headline": "Low HDL", "actions": ["lifestyle"]}
            },
            {
                "id": "glucose_high", "name": "High glucose", "enabled": true,
                "when": {"all": [{"biomarker": "glucose", "operator": "between", "value1": 126, "value2": 399}]},
                "then": {"severity": "orange", "headline": "High glucose", "actions": ["see_doctor"]}
            },
            {
                "id": "lipid_panel_disabled", "name": "Disabled", "enabled": false,
                "when": {"any": [{"biomarker": "ldl_c", "operator": "exists"}]},
                "then": {"severity": "green", "headline": "Never shown", "actions": []}
            }
        ],
        "actions": [
            {"id": "seek_urgent_care", "text": "Seek urgent medical care", "priority": "high"},
            {"id": "see_doctor", "text": "Discuss the result with your doctor"},
            {"id": "repeat_test", "text": "Repeat the test"},
            {"id": "lifestyle", "text": "Increase regular physical activity", "category": "lifestyle"}
        ],
        "evidence": [
            {
                "rule_id": "redflag_glucose_critical",
                "sources": [{"type": "guideline", "citation": "Hyperglycemic crises guideline", "year": 2024}]
            },
            {
                "rule_id": "ldl_very_high",
                "sources": [{"type": "guideline", "citation": "Cholesterol management guideline", "year": 2018}]
            }
        ]
    })
}

/// Engine over the sample knowledge base
#[must_use]
pub fn sample_engine() -> TriageEngine {
    let config = EngineConfig::builder()
        .num_threads(2)
        .build()
        .expect("valid config");
    TriageEngine::from_json_str(&sample_kb_json().to_string(), config).expect("sample kb loads")
}

/// Value source that records every biomarker it is asked for
#[derive(Debug, Default)]
pub struct RecordingValues {
    pub values: BiomarkerValues,
    pub requested: RefCell<Vec<String>>,
}

impl RecordingValues {
    #[must_use]
    pub fn new(values: BiomarkerValues) -> Self {
        Self {
            values,
            requested: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl ValueSource for RecordingValues {
    fn value_of(&self, biomarker: &str) -> Option<f64> {
        self.requested.borrow_mut().push(biomarker.to_string());
        self.values.value_of(biomarker)
    }
}
