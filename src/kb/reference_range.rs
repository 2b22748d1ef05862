//! Reference ranges as an ordered mapping from band label to range text
//!
//! A record looks like `{"biomarker": "ldl_c", "optimal": "< 100", "high": "160-189"}`.
//! Every key other than `biomarker` is a band, and declaration order is kept
//! because it breaks ties during matching. A band may also carry an explicit
//! status: `{"range": "< 100", "status": "normal"}`.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ranges::types::Status;

const BIOMARKER_KEY: &str = "biomarker";

/// One labeled band of a reference range
#[derive(Debug, Clone, PartialEq)]
pub struct RangeBand {
    /// Band label, e.g. `optimal` or `low_female`
    pub label: String,
    /// Range text, e.g. `100-129`
    pub text: String,
    /// Explicit status tag; overrides keyword classification when set
    pub status: Option<Status>,
}

/// All labeled bands for a single biomarker
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRange {
    pub biomarker: String,
    bands: Vec<RangeBand>,
}

impl ReferenceRange {
    /// Create a reference range with no bands
    #[must_use]
    pub fn new(biomarker: impl Into<String>) -> Self {
        Self {
            biomarker: biomarker.into(),
            bands: Vec::new(),
        }
    }

    /// Append an untagged band
    #[must_use]
    pub fn with_band(mut self, label: impl Into<String>, text: impl Into<String>) -> Self {
        self.bands.push(RangeBand {
            label: label.into(),
            text: text.into(),
            status: None,
        });
        self
    }

    /// Append a band with an explicit status tag
    #[must_use]
    pub fn with_tagged_band(
        mut self,
        label: impl Into<String>,
        text: impl Into<String>,
        status: Status,
    ) -> Self {
        self.bands.push(RangeBand {
            label: label.into(),
            text: text.into(),
            status: Some(status),
        });
        self
    }

    /// Bands in declaration order
    #[must_use]
    pub fn bands(&self) -> &[RangeBand] {
        &self.bands
    }

    /// Look up a band by label
    #[must_use]
    pub fn band(&self, label: &str) -> Option<&RangeBand> {
        self.bands.iter().find(|b| b.label == label)
    }
}

/// Accepted shapes for a band value
#[derive(Deserialize)]
#[serde(untagged)]
enum BandValue {
    Text(String),
    Tagged {
        range: String,
        #[serde(default)]
        status: Option<Status>,
    },
    // Non-text fields are not bands
    Other(IgnoredAny),
}

struct ReferenceRangeVisitor;

impl<'de> Visitor<'de> for ReferenceRangeVisitor {
    type Value = ReferenceRange;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a reference range object with a 'biomarker' field")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut biomarker: Option<String> = None;
        let mut bands = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            if key == BIOMARKER_KEY {
                if biomarker.is_some() {
                    return Err(de::Error::duplicate_field(BIOMARKER_KEY));
                }
                biomarker = Some(map.next_value()?);
                continue;
            }

            match map.next_value::<BandValue>()? {
                BandValue::Text(text) => bands.push(RangeBand {
                    label: key,
                    text,
                    status: None,
                }),
                BandValue::Tagged { range, status } => bands.push(RangeBand {
                    label: key,
                    text: range,
                    status,
                }),
                BandValue::Other(_) => {}
            }
        }

        let biomarker = biomarker.ok_or_else(|| de::Error::missing_field(BIOMARKER_KEY))?;
        Ok(ReferenceRange { biomarker, bands })
    }
}

impl<'de> Deserialize<'de> for ReferenceRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ReferenceRangeVisitor)
    }
}

#[derive(Serialize)]
struct TaggedBand<'a> {
    range: &'a str,
    status: Status,
}

impl Serialize for ReferenceRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.bands.len() + 1))?;
        map.serialize_entry(BIOMARKER_KEY, &self.biomarker)?;
        for band in &self.bands {
            match band.status {
                Some(status) => map.serialize_entry(
                    &band.label,
                    &TaggedBand {
                        range: &band.text,
                        status,
                    },
                )?,
                None => map.serialize_entry(&band.label, &band.text)?,
            }
        }
        map.end()
    }
}
