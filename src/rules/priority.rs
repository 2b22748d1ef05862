//! Severity ordering of fired statements

use crate::kb::rule::Severity;
use crate::rules::evaluator::{FiredAlert, FiredRule};

/// Anything that can be ordered by clinical severity
pub trait Prioritized {
    fn severity(&self) -> Severity;
}

impl Prioritized for FiredRule {
    fn severity(&self) -> Severity {
        self.rule.then.severity
    }
}

impl Prioritized for FiredAlert {
    fn severity(&self) -> Severity {
        self.severity
    }
}

impl Prioritized for Severity {
    fn severity(&self) -> Severity {
        *self
    }
}

/// Sort most severe first; equal severities keep their input order
pub fn sort_by_severity<T: Prioritized>(items: &mut [T]) {
    // `sort_by` is stable
    items.sort_by(|a, b| b.severity().cmp(&a.severity()));
}

/// Owned variant of [`sort_by_severity`]
#[must_use]
pub fn prioritize<T: Prioritized>(mut items: Vec<T>) -> Vec<T> {
    sort_by_severity(&mut items);
    items
}
