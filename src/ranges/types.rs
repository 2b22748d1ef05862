//! Types produced by reference-range application

use std::fmt;

use serde::{Deserialize, Serialize};

/// Patient sex as used for sex-specific reference bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Parse the accepted spellings (`male`, `female`, `M`, `F`, any case)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" => Some(Self::Male),
            "f" | "female" => Some(Self::Female),
            _ => None,
        }
    }

    /// Marker that identifies a band label as specific to this sex
    #[must_use]
    pub const fn label_marker(self) -> &'static str {
        match self {
            Self::Male => "_male",
            Self::Female => "_female",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clinical status of an observed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Normal,
    Borderline,
    Abnormal,
    Critical,
    /// The observation could not be classified (unknown biomarker or no range)
    Unknown,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Borderline => "borderline",
            Self::Abnormal => "abnormal",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What range text was applied and which label it resolved to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationTrace {
    pub range_applied: String,
    pub label_found: Option<String>,
}

/// An observation with its resolved status and matched band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedObservation {
    pub biomarker: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub status: Status,
    pub range_label: Option<String>,
    pub ref_text: Option<String>,
    pub trace: ObservationTrace,
}

/// Kind of per-observation data-quality issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QaFlagKind {
    UnknownBiomarker,
    UnitMismatch,
    MissingRange,
}

/// Severity of a QA flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QaSeverity {
    Info,
    Warning,
    Error,
}

/// A non-fatal data-quality observation raised while processing a case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaFlag {
    #[serde(rename = "type")]
    pub kind: QaFlagKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biomarker: Option<String>,
    pub severity: QaSeverity,
}
