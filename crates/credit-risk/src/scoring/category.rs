use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Lower bound of a risk band. `Floor` is negative infinity and sorts below every score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Threshold {
    Floor,
    AtLeast(i64),
}

impl Threshold {
    pub(crate) fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().map(Threshold::AtLeast),
            Value::String(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "-inf" | "-infinity" => Some(Threshold::Floor),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn admits(&self, score: i64) -> bool {
        match self {
            Threshold::Floor => true,
            Threshold::AtLeast(minimum) => score >= *minimum,
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Floor => f.write_str("-inf"),
            Threshold::AtLeast(minimum) => write!(f, "{minimum}"),
        }
    }
}

impl Serialize for Threshold {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Threshold::Floor => serializer.serialize_str("-inf"),
            Threshold::AtLeast(minimum) => serializer.serialize_i64(*minimum),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskCategory {
    #[serde(rename = "category")]
    pub name: String,
    pub threshold: Threshold,
}

/// Picks the highest band whose threshold admits `score`.
///
/// `categories` must be ordered by threshold descending and contain a floor band,
/// which `RuleSet` guarantees; the fallback to the last band only covers hand-built slices.
pub(crate) fn select_category(categories: &[RiskCategory], score: i64) -> Option<&RiskCategory> {
    categories
        .iter()
        .find(|category| category.threshold.admits(score))
        .or_else(|| categories.last())
}
