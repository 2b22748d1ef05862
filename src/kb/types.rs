//! Knowledge-base records
//!
//! These mirror the documents a knowledge-base version is made of: the
//! manifest, the biomarker dictionary, reference ranges, critical alerts,
//! protocol rules, the recommendation (action) library, the evidence
//! library and the disclaimer texts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::kb::reference_range::ReferenceRange;
use crate::kb::rule::{CriticalAlert, Rule};

/// Version metadata of a knowledge base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub release_date: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

/// A named laboratory measurement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Biomarker {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Derived from other biomarkers (the derivation itself is not performed here)
    #[serde(default)]
    pub calculated: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

/// An entry of the recommendation library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A literature source backing a rule or alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceSource {
    #[serde(rename = "type")]
    pub source_type: String,
    pub citation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// Evidence attached to a rule or critical alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceEntry {
    /// Target rule or alert identifier
    pub rule_id: String,
    #[serde(default)]
    pub sources: Vec<EvidenceSource>,
}

/// A user-facing disclaimer and how prominently it should be shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disclaimer {
    pub text: String,
    pub priority: String,
}

/// Wording rules for text shown to patients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageGuidelines {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must_use: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must_not_use: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tone: Vec<String>,
}

/// Disclaimer texts keyed by placement (e.g. `general`, `red_flag`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclaimerTexts {
    #[serde(default)]
    pub disclaimers: BTreeMap<String, Disclaimer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_guidelines: Option<LanguageGuidelines>,
}

/// A complete, parsed knowledge-base version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub manifest: Manifest,
    #[serde(default)]
    pub biomarkers: Vec<Biomarker>,
    #[serde(default)]
    pub reference_ranges: Vec<ReferenceRange>,
    /// Critical alerts
    #[serde(default)]
    pub red_flags: Vec<CriticalAlert>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub evidence: Vec<EvidenceEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimers: Option<DisclaimerTexts>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base for the given version
    #[must_use]
    pub fn empty(version: impl Into<String>) -> Self {
        Self {
            manifest: Manifest {
                version: version.into(),
                release_date: String::new(),
                status: "draft".to_string(),
                description: None,
                last_updated: None,
                maintainer: None,
                license: None,
            },
            biomarkers: Vec::new(),
            reference_ranges: Vec::new(),
            red_flags: Vec::new(),
            rules: Vec::new(),
            actions: Vec::new(),
            evidence: Vec::new(),
            disclaimers: None,
        }
    }

    /// The manifest version string
    #[must_use]
    pub fn version(&self) -> &str {
        &self.manifest.version
    }

    /// Disclaimer text for a placement key, if the version ships one
    #[must_use]
    pub fn disclaimer(&self, key: &str) -> Option<&Disclaimer> {
        self.disclaimers.as_ref()?.disclaimers.get(key)
    }
}
