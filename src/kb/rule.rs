//! Protocol rules and critical alerts
//!
//! Both kinds share a `when` clause (optional ALL and ANY condition lists) and
//! a `then` payload. Critical alerts are pinned to the top severity tier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kb::condition::Condition;

/// Ordinal clinical urgency tier, `green < yellow < orange < red`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Green,
    Yellow,
    Orange,
    Red,
}

impl Severity {
    /// All tiers from most to least urgent
    pub const DESCENDING: [Self; 4] = [Self::Red, Self::Orange, Self::Yellow, Self::Green];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity marker for critical alerts; only `"red"` deserializes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Severity", into = "Severity")]
pub struct TopTier;

impl TryFrom<Severity> for TopTier {
    type Error = String;

    fn try_from(severity: Severity) -> Result<Self, Self::Error> {
        if severity == Severity::Red {
            Ok(Self)
        } else {
            Err(format!(
                "critical alerts must have severity 'red', found '{severity}'"
            ))
        }
    }
}

impl From<TopTier> for Severity {
    fn from(_: TopTier) -> Self {
        Self::Red
    }
}

/// Trigger clause: an optional conjunction and an optional disjunction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct When {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<Condition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<Vec<Condition>>,
}

impl When {
    /// Create a clause with only an ALL list
    #[must_use]
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self {
            all: Some(conditions),
            any: None,
        }
    }

    /// Create a clause with only an ANY list
    #[must_use]
    pub fn any(conditions: Vec<Condition>) -> Self {
        Self {
            all: None,
            any: Some(conditions),
        }
    }

    /// The ALL list, if present and non-empty
    #[must_use]
    pub fn all_conditions(&self) -> Option<&[Condition]> {
        self.all.as_deref().filter(|c| !c.is_empty())
    }

    /// The ANY list, if present and non-empty
    #[must_use]
    pub fn any_conditions(&self) -> Option<&[Condition]> {
        self.any.as_deref().filter(|c| !c.is_empty())
    }

    /// Every condition, ALL first then ANY
    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.all
            .iter()
            .flatten()
            .chain(self.any.iter().flatten())
    }
}

/// Payload of a protocol rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub severity: Severity,
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Payload of a critical alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertOutcome {
    pub severity: TopTier,
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_questions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// A named clinical logic statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub when: When,
    pub then: RuleOutcome,
}

/// A critical (red-flag) alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalAlert {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub when: When,
    pub then: AlertOutcome,
}

/// Common view over rules and critical alerts used by the evaluator and validator
pub trait ClinicalStatement {
    /// Identifier, unique across rules and alerts
    fn id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    /// Disabled statements are never evaluated
    fn enabled(&self) -> bool;

    /// Trigger clause
    fn when(&self) -> &When;

    /// Clinical severity when fired
    fn severity(&self) -> Severity;

    /// Action references (`id` or `id:param`)
    fn action_refs(&self) -> &[String];

    /// Label used in validation messages, e.g. `Rule` or `Critical alert`
    fn kind_label(&self) -> &'static str;
}

impl ClinicalStatement for Rule {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn when(&self) -> &When {
        &self.when
    }

    fn severity(&self) -> Severity {
        self.then.severity
    }

    fn action_refs(&self) -> &[String] {
        &self.then.actions
    }

    fn kind_label(&self) -> &'static str {
        "Rule"
    }
}

impl ClinicalStatement for CriticalAlert {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn when(&self) -> &When {
        &self.when
    }

    fn severity(&self) -> Severity {
        self.then.severity.into()
    }

    fn action_refs(&self) -> &[String] {
        &self.then.actions
    }

    fn kind_label(&self) -> &'static str {
        "Critical alert"
    }
}

/// An action reference split into its identifier and optional parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRef<'a> {
    pub id: &'a str,
    pub param: Option<&'a str>,
}

impl<'a> ActionRef<'a> {
    /// Split `id:param` at the first colon
    #[must_use]
    pub fn parse(reference: &'a str) -> Self {
        match reference.split_once(':') {
            Some((id, param)) => Self {
                id,
                param: Some(param),
            },
            None => Self {
                id: reference,
                param: None,
            },
        }
    }
}
