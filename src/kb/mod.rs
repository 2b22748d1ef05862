//! Knowledge-base model, loading and consistency validation

pub mod condition;
pub mod index;
pub mod loader;
pub mod reference_range;
pub mod rule;
pub mod types;
pub mod validator;

pub use condition::{Condition, ConditionError, Operands, Operator};
pub use index::{IndexedKnowledgeBase, KnowledgeBaseIndex};
pub use loader::{
    load_case, load_knowledge_base, load_knowledge_base_str, parse_case, parse_knowledge_base,
};
pub use reference_range::{RangeBand, ReferenceRange};
pub use rule::{ActionRef, ClinicalStatement, CriticalAlert, Rule, Severity, When};
pub use types::{
    Action, Biomarker, Disclaimer, DisclaimerTexts, EvidenceEntry, EvidenceSource, KnowledgeBase,
    LanguageGuidelines, Manifest,
};
pub use validator::{ValidationReport, Violation, ViolationKind, validate_knowledge_base};
