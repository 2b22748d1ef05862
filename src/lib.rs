//! A Rust library for classifying laboratory biomarker values against a
//! versioned clinical knowledge base and turning the result into a
//! prioritized, explainable action report.

pub mod case;
pub mod config;
pub mod engine;
pub mod error;
pub mod kb;
pub mod ranges;
pub mod report;
pub mod rules;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use case::{CaseInput, Observation, Patient};
pub use config::{EngineConfig, EngineConfigBuilder};
pub use engine::TriageEngine;
pub use error::{Result, TriageError};

// Knowledge base
pub use kb::{
    IndexedKnowledgeBase, KnowledgeBase, Severity, ValidationReport, load_knowledge_base,
    load_knowledge_base_str, validate_knowledge_base,
};

// Ranges
pub use ranges::{EnrichedObservation, QaFlag, Sex, Status, find_matching_range, parse_range};

// Evaluation and reporting
pub use report::{ActionItem, CaseReport, Priority, Report};
pub use rules::{BiomarkerValues, FiredAlert, FiredRule, evaluate_alert, evaluate_rule};
