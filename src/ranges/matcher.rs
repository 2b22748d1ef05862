//! Reference-range band selection and status classification

use smallvec::SmallVec;

use crate::kb::reference_range::ReferenceRange;
use crate::ranges::parser::parse_range;
use crate::ranges::types::{Sex, Status};

/// Label reported when no band matches
pub const NO_MATCH_LABEL: &str = "unknown";

/// Range text reported when no band matches
pub const NO_MATCH_TEXT: &str = "No match found";

/// Normalize a patient sex value, falling back to `male`
#[must_use]
pub fn normalize_sex(sex: Option<&str>) -> Sex {
    normalize_sex_or(sex, Sex::Male)
}

/// Normalize a patient sex value with an explicit fallback
#[must_use]
pub fn normalize_sex_or(sex: Option<&str>, fallback: Sex) -> Sex {
    sex.and_then(Sex::parse).unwrap_or(fallback)
}

/// Result of matching one value against a reference range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeMatch<'a> {
    pub label: &'a str,
    pub range_text: &'a str,
    pub status: Status,
    /// False when no band matched
    pub matched: bool,
}

impl RangeMatch<'_> {
    const fn no_match() -> Self {
        RangeMatch {
            label: NO_MATCH_LABEL,
            range_text: NO_MATCH_TEXT,
            status: Status::Abnormal,
            matched: false,
        }
    }
}

/// Selection priority of a band label for the patient's sex
///
/// `2` for the patient's own sex, `1` for sex-agnostic bands, `None` for the
/// other sex (never selected).
fn label_priority(label: &str, sex: Sex) -> Option<u8> {
    let is_male = label.contains(Sex::Male.label_marker());
    let is_female = label.contains(Sex::Female.label_marker());
    match (is_male, is_female) {
        (false, false) => Some(1),
        _ if label.contains(sex.label_marker()) => Some(2),
        _ => None,
    }
}

/// Find the best matching band for a value
///
/// Bands whose text does not parse are skipped. Among the matches, the
/// highest priority wins and ties keep declaration order.
#[must_use]
pub fn find_matching_range(value: f64, range: &ReferenceRange, sex: Sex) -> RangeMatch<'_> {
    let candidates: SmallVec<[(u8, usize); 4]> = range
        .bands()
        .iter()
        .enumerate()
        .filter_map(|(i, band)| {
            let priority = label_priority(&band.label, sex)?;
            let predicate = parse_range(&band.text)?;
            predicate.matches(value).then_some((priority, i))
        })
        .collect();

    // First index holding the highest priority
    let best = candidates
        .iter()
        .fold(None::<(u8, usize)>, |best, &(priority, i)| match best {
            Some((p, _)) if p >= priority => best,
            _ => Some((priority, i)),
        });

    match best.and_then(|(_, i)| range.bands().get(i)) {
        Some(band) => RangeMatch {
            label: &band.label,
            range_text: &band.text,
            status: band.status.unwrap_or_else(|| classify_label(&band.label)),
            matched: true,
        },
        None => RangeMatch::no_match(),
    }
}

const NORMAL_CONTAINS: [&str; 3] = ["normal", "optimal", "sufficient"];
const NORMAL_EQUALS: [&str; 2] = ["desirable", "low_risk"];
const BORDERLINE_CONTAINS: [&str; 2] = ["borderline", "near_optimal"];
const BORDERLINE_EQUALS: [&str; 4] = [
    "moderate_risk",
    "mildly_reduced",
    "prediabetes",
    "insufficient",
];
const CRITICAL_CONTAINS: [&str; 1] = ["critical"];
const CRITICAL_EQUALS: [&str; 3] = ["very_high", "kidney_failure", "severely_reduced"];

fn label_is(label: &str, contains: &[&str], equals: &[&str]) -> bool {
    contains.iter().any(|k| label.contains(k)) || equals.contains(&label)
}

/// Classify a band label by keyword, checked normal, borderline, critical, then abnormal
///
/// Matching is case-sensitive. Because the normal keywords are checked first,
/// labels such as `near_optimal` or `abnormal` classify as normal.
#[must_use]
pub fn classify_label(label: &str) -> Status {
    if label_is(label, &NORMAL_CONTAINS, &NORMAL_EQUALS) {
        Status::Normal
    } else if label_is(label, &BORDERLINE_CONTAINS, &BORDERLINE_EQUALS) {
        Status::Borderline
    } else if label_is(label, &CRITICAL_CONTAINS, &CRITICAL_EQUALS) {
        Status::Critical
    } else {
        Status::Abnormal
    }
}
