//! Per-case application of reference ranges
//!
//! Every observation yields exactly one enriched observation. Unknown
//! biomarkers, unit mismatches and missing ranges are recorded as QA flags and
//! never stop the rest of the case from being processed.

use log::warn;

use crate::case::{CaseInput, Observation};
use crate::kb::index::IndexedKnowledgeBase;
use crate::ranges::matcher::find_matching_range;
use crate::ranges::types::{
    EnrichedObservation, ObservationTrace, QaFlag, QaFlagKind, QaSeverity, Sex, Status,
};

/// Range text recorded when no range could be applied
pub const NOT_APPLIED: &str = "N/A";

/// Enriched observations and QA flags for one case
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeApplication {
    pub observations_enriched: Vec<EnrichedObservation>,
    pub qa_flags: Vec<QaFlag>,
}

impl RangeApplication {
    /// Number of observations that matched a reference band
    #[must_use]
    pub fn ranges_applied(&self) -> usize {
        self.observations_enriched
            .iter()
            .filter(|o| o.trace.range_applied != NOT_APPLIED)
            .count()
    }

    fn flag(&mut self, kind: QaFlagKind, severity: QaSeverity, biomarker: &str, message: String) {
        warn!("QA {kind:?}: {message}");
        self.qa_flags.push(QaFlag {
            kind,
            message,
            biomarker: Some(biomarker.to_string()),
            severity,
        });
    }
}

fn unknown_observation(observation: &Observation) -> EnrichedObservation {
    EnrichedObservation {
        biomarker: observation.biomarker.clone(),
        value: observation.value,
        unit: observation.unit.clone(),
        status: Status::Unknown,
        range_label: None,
        ref_text: None,
        trace: ObservationTrace {
            range_applied: NOT_APPLIED.to_string(),
            label_found: None,
        },
    }
}

/// Classify every observation of a case against the knowledge base
#[must_use]
pub fn apply_reference_ranges(
    kb: &IndexedKnowledgeBase,
    case: &CaseInput,
    sex: Sex,
) -> RangeApplication {
    let mut application = RangeApplication::default();

    for observation in &case.observations {
        let id = observation.biomarker.as_str();

        let Some(biomarker) = kb.biomarker(id) else {
            application.flag(
                QaFlagKind::UnknownBiomarker,
                QaSeverity::Error,
                id,
                format!("Unknown biomarker: \"{id}\""),
            );
            application
                .observations_enriched
                .push(unknown_observation(observation));
            continue;
        };

        if let Some(unit) = observation.unit.as_deref() {
            if unit != biomarker.unit {
                application.flag(
                    QaFlagKind::UnitMismatch,
                    QaSeverity::Warning,
                    id,
                    format!(
                        "Unit mismatch for \"{id}\": expected \"{}\", received \"{unit}\"",
                        biomarker.unit
                    ),
                );
            }
        }

        let Some(range) = kb.reference_range(id) else {
            application.flag(
                QaFlagKind::MissingRange,
                QaSeverity::Warning,
                id,
                format!("No reference range found for biomarker: \"{id}\""),
            );
            application
                .observations_enriched
                .push(unknown_observation(observation));
            continue;
        };

        let found = find_matching_range(observation.value, range, sex);
        application.observations_enriched.push(EnrichedObservation {
            biomarker: observation.biomarker.clone(),
            value: observation.value,
            unit: Some(
                observation
                    .unit
                    .clone()
                    .unwrap_or_else(|| biomarker.unit.clone()),
            ),
            status: found.status,
            range_label: Some(found.label.to_string()),
            ref_text: Some(found.range_text.to_string()),
            trace: ObservationTrace {
                range_applied: found.range_text.to_string(),
                label_found: Some(found.label.to_string()),
            },
        });
    }

    application
}
