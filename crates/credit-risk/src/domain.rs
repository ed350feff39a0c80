use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Housing situation, labelled exactly as the decoded historical dataset labels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Housing {
    Rent,
    Own,
    #[serde(rename = "For Free")]
    ForFree,
}

impl Housing {
    pub fn ordered() -> [Housing; 3] {
        [Housing::Rent, Housing::Own, Housing::ForFree]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Housing::Rent => "Rent",
            Housing::Own => "Own",
            Housing::ForFree => "For Free",
        }
    }
}

impl fmt::Display for Housing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Housing {
    type Err = InputError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Housing::ordered()
            .into_iter()
            .find(|housing| housing.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InputError::UnknownHousing(trimmed.to_string()))
    }
}

impl<'de> Deserialize<'de> for Housing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_label(deserializer)
    }
}

/// Coarse job level offered by the risk calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EmploymentLevel {
    Skilled,
    Unskilled,
    Management,
}

impl EmploymentLevel {
    pub fn ordered() -> [EmploymentLevel; 3] {
        [
            EmploymentLevel::Skilled,
            EmploymentLevel::Unskilled,
            EmploymentLevel::Management,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmploymentLevel::Skilled => "Skilled",
            EmploymentLevel::Unskilled => "Unskilled",
            EmploymentLevel::Management => "Management",
        }
    }

    /// Granular job label used by the historical dataset for this level.
    pub fn dataset_label(&self) -> &'static str {
        match self {
            EmploymentLevel::Skilled => "Skilled",
            EmploymentLevel::Unskilled => "Unskilled Resident",
            EmploymentLevel::Management => "Management/Self-employed",
        }
    }
}

impl fmt::Display for EmploymentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EmploymentLevel {
    type Err = InputError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        EmploymentLevel::ordered()
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InputError::UnknownEmployment(trimmed.to_string()))
    }
}

impl<'de> Deserialize<'de> for EmploymentLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_label(deserializer)
    }
}

/// Labels arriving over serde accept the same spellings as `FromStr`.
fn deserialize_label<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = InputError>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(de::Error::custom)
}

/// Loan applicant captured by the calculator for a single assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub age: u32,
    pub credit_amount: f64,
    /// Loan duration in months.
    pub duration: u32,
    pub housing: Housing,
    pub job: EmploymentLevel,
}

/// Rejected applicant-facing input. Never produced for typed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unrecognized housing status '{0}' (expected Rent, Own or For Free)")]
    UnknownHousing(String),
    #[error("unrecognized job type '{0}' (expected Skilled, Unskilled or Management)")]
    UnknownEmployment(String),
}
