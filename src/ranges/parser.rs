//! Range text parser
//!
//! Accepted shapes, with optional whitespace around operators and numbers:
//! `< N`, `<= N`, `> N`, `>= N` and `N1-N2`. Numbers are unsigned decimals.
//! A reversed interval (`N1 > N2`) is swapped so it is always well ordered.

use std::str::FromStr;

/// Shape of a parsed range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    /// Upper bound only (`<`, `<=`)
    UpperBound,
    /// Lower bound only (`>`, `>=`)
    LowerBound,
    /// Closed interval `N1-N2`
    Interval,
}

/// Numeric predicate derived from a range text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangePredicate {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_inclusive: bool,
    pub max_inclusive: bool,
    pub kind: RangeKind,
}

impl RangePredicate {
    #[must_use]
    pub const fn below(max: f64, inclusive: bool) -> Self {
        Self {
            min: None,
            max: Some(max),
            min_inclusive: false,
            max_inclusive: inclusive,
            kind: RangeKind::UpperBound,
        }
    }

    #[must_use]
    pub const fn above(min: f64, inclusive: bool) -> Self {
        Self {
            min: Some(min),
            max: None,
            min_inclusive: inclusive,
            max_inclusive: false,
            kind: RangeKind::LowerBound,
        }
    }

    /// Closed interval; the bounds may be given in either order
    #[must_use]
    pub fn interval(a: f64, b: f64) -> Self {
        Self {
            min: Some(a.min(b)),
            max: Some(a.max(b)),
            min_inclusive: true,
            max_inclusive: true,
            kind: RangeKind::Interval,
        }
    }

    /// Whether the value satisfies this predicate
    #[must_use]
    pub fn matches(&self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        let above_min = match self.min {
            Some(min) if self.min_inclusive => value >= min,
            Some(min) => value > min,
            None => true,
        };
        let below_max = match self.max {
            Some(max) if self.max_inclusive => value <= max,
            Some(max) => value < max,
            None => true,
        };
        above_min && below_max
    }
}

/// Reasons a range text has no predicate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeParseError {
    #[error("empty range text")]
    Empty,

    #[error("invalid number '{0}' in range text")]
    InvalidNumber(String),

    #[error("unrecognized range text '{0}'")]
    Unrecognized(String),
}

fn parse_number(token: &str) -> Result<f64, RangeParseError> {
    let token = token.trim();
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(RangeParseError::InvalidNumber(token.to_string()));
    }
    token
        .parse::<f64>()
        .map_err(|_| RangeParseError::InvalidNumber(token.to_string()))
}

impl FromStr for RangePredicate {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(RangeParseError::Empty);
        }

        // Two-character operators first
        if let Some(rest) = text.strip_prefix("<=") {
            return parse_number(rest).map(|n| Self::below(n, true));
        }
        if let Some(rest) = text.strip_prefix('<') {
            return parse_number(rest).map(|n| Self::below(n, false));
        }
        if let Some(rest) = text.strip_prefix(">=") {
            return parse_number(rest).map(|n| Self::above(n, true));
        }
        if let Some(rest) = text.strip_prefix('>') {
            return parse_number(rest).map(|n| Self::above(n, false));
        }

        match text.split_once('-') {
            Some((low, high)) => {
                let low = parse_number(low)?;
                let high = parse_number(high)?;
                Ok(Self::interval(low, high))
            }
            None => Err(RangeParseError::Unrecognized(text.to_string())),
        }
    }
}

/// Parse a range text, returning `None` when it has no predicate
#[must_use]
pub fn parse_range(text: &str) -> Option<RangePredicate> {
    text.parse().ok()
}
