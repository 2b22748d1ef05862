//! Reference-range parsing, band matching and per-case application

pub mod applier;
pub mod matcher;
pub mod parser;
pub mod types;

pub use applier::{RangeApplication, apply_reference_ranges};
pub use matcher::{RangeMatch, classify_label, find_matching_range, normalize_sex, normalize_sex_or};
pub use parser::{RangeKind, RangeParseError, RangePredicate, parse_range};
pub use types::{EnrichedObservation, ObservationTrace, QaFlag, QaFlagKind, QaSeverity, Sex, Status};
