use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use super::category::{RiskCategory, Threshold};
use crate::domain::{Applicant, EmploymentLevel, Housing};

/// Rule document as written on disk: `base_score`, `rules`, `risk_categories`.
#[derive(Debug, Clone, Deserialize)]
struct RuleDocument {
    base_score: i64,
    rules: Vec<RuleEntry>,
    risk_categories: Vec<CategoryEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct RuleEntry {
    field: String,
    conditions: Vec<ConditionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct ConditionEntry {
    #[serde(rename = "type")]
    kind: String,
    value: Value,
    points: i64,
    label: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CategoryEntry {
    category: String,
    threshold: Value,
}

/// Applicant attribute a rule can inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantField {
    Age,
    CreditAmount,
    Duration,
    Housing,
    Job,
}

impl ApplicantField {
    pub fn ordered() -> [ApplicantField; 5] {
        [
            ApplicantField::Age,
            ApplicantField::CreditAmount,
            ApplicantField::Duration,
            ApplicantField::Housing,
            ApplicantField::Job,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ApplicantField::Age => "age",
            ApplicantField::CreditAmount => "credit_amount",
            ApplicantField::Duration => "duration",
            ApplicantField::Housing => "housing",
            ApplicantField::Job => "job",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|field| field.name() == name)
    }

    pub(crate) fn value(&self, applicant: &Applicant) -> FieldValue {
        match self {
            ApplicantField::Age => FieldValue::Integer(i64::from(applicant.age)),
            ApplicantField::CreditAmount => FieldValue::Amount(applicant.credit_amount),
            ApplicantField::Duration => FieldValue::Integer(i64::from(applicant.duration)),
            ApplicantField::Housing => FieldValue::Label(applicant.housing.label()),
            ApplicantField::Job => FieldValue::Label(applicant.job.label()),
        }
    }

    fn known_labels(&self) -> Option<Vec<&'static str>> {
        match self {
            ApplicantField::Housing => Some(Housing::ordered().iter().map(Housing::label).collect()),
            ApplicantField::Job => Some(
                EmploymentLevel::ordered()
                    .iter()
                    .map(EmploymentLevel::label)
                    .collect(),
            ),
            _ => None,
        }
    }
}

impl fmt::Display for ApplicantField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Applicant value read through an [`ApplicantField`] accessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FieldValue {
    Integer(i64),
    Amount(f64),
    Label(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    LessThan,
    GreaterThan,
    Equals,
}

impl Comparison {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "less_than" => Some(Comparison::LessThan),
            "greater_than" => Some(Comparison::GreaterThan),
            "equals" => Some(Comparison::Equals),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Comparison::LessThan => "less_than",
            Comparison::GreaterThan => "greater_than",
            Comparison::Equals => "equals",
        }
    }
}

/// Comparison target, already typed for the field it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Integer(i64),
    Amount(f64),
    Label(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub comparison: Comparison,
    pub operand: Operand,
    pub points: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub field: ApplicantField,
    /// Evaluated in declared order; the first match wins.
    pub conditions: Vec<Condition>,
}

/// Validated, immutable scoring configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    base_score: i64,
    rules: Vec<Rule>,
    categories: Vec<RiskCategory>,
}

impl RuleSet {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RuleConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RuleConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rule_set = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            rules = rule_set.rules.len(),
            categories = rule_set.categories.len(),
            "loaded risk rule configuration"
        );
        Ok(rule_set)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RuleConfigError> {
        let document: RuleDocument = serde_json::from_reader(reader)?;
        Self::compile(document)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RuleConfigError> {
        let document: RuleDocument = serde_json::from_str(raw)?;
        Self::compile(document)
    }

    fn compile(document: RuleDocument) -> Result<Self, RuleConfigError> {
        let rules = document
            .rules
            .into_iter()
            .enumerate()
            .map(|(index, entry)| compile_rule(index + 1, entry))
            .collect::<Result<Vec<_>, _>>()?;
        let categories = compile_categories(document.risk_categories)?;

        Ok(Self {
            base_score: document.base_score,
            rules,
            categories,
        })
    }

    pub fn base_score(&self) -> i64 {
        self.base_score
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Risk bands ordered by threshold, highest first.
    pub fn categories(&self) -> &[RiskCategory] {
        &self.categories
    }
}

fn compile_rule(rule: usize, entry: RuleEntry) -> Result<Rule, RuleConfigError> {
    let field = ApplicantField::from_name(entry.field.trim()).ok_or_else(|| {
        RuleConfigError::UnknownField {
            rule,
            field: entry.field.clone(),
        }
    })?;

    if entry.conditions.is_empty() {
        return Err(RuleConfigError::EmptyRule { rule, field });
    }

    let conditions = entry
        .conditions
        .into_iter()
        .enumerate()
        .map(|(index, condition)| compile_condition(rule, index + 1, field, condition))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Rule { field, conditions })
}

fn compile_condition(
    rule: usize,
    condition: usize,
    field: ApplicantField,
    entry: ConditionEntry,
) -> Result<Condition, RuleConfigError> {
    let comparison = Comparison::from_name(entry.kind.trim()).ok_or_else(|| {
        RuleConfigError::UnknownComparison {
            rule,
            condition,
            kind: entry.kind.clone(),
        }
    })?;

    let invalid_value = |expected: &'static str| RuleConfigError::InvalidValue {
        rule,
        condition,
        field,
        expected,
        found: entry.value.to_string(),
    };

    let operand = match field {
        ApplicantField::Age | ApplicantField::Duration => entry
            .value
            .as_i64()
            .map(Operand::Integer)
            .ok_or_else(|| invalid_value("an integer"))?,
        ApplicantField::CreditAmount => entry
            .value
            .as_f64()
            .map(Operand::Amount)
            .ok_or_else(|| invalid_value("a number"))?,
        ApplicantField::Housing | ApplicantField::Job => {
            if comparison != Comparison::Equals {
                return Err(RuleConfigError::UnsupportedComparison {
                    rule,
                    condition,
                    field,
                    comparison: comparison.name(),
                });
            }
            let label = entry
                .value
                .as_str()
                .ok_or_else(|| invalid_value("a string label"))?;
            let known = field.known_labels().unwrap_or_default();
            if !known.iter().any(|candidate| *candidate == label) {
                return Err(RuleConfigError::UnknownLabel {
                    rule,
                    condition,
                    field,
                    label: label.to_string(),
                    known: known.join(", "),
                });
            }
            Operand::Label(label.to_string())
        }
    };

    Ok(Condition {
        comparison,
        operand,
        points: entry.points,
        label: entry.label,
    })
}

fn compile_categories(entries: Vec<CategoryEntry>) -> Result<Vec<RiskCategory>, RuleConfigError> {
    if entries.is_empty() {
        return Err(RuleConfigError::NoCategories);
    }

    let mut seen = HashSet::new();
    let mut categories = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let name = entry.category.trim().to_string();
        if name.is_empty() {
            return Err(RuleConfigError::EmptyCategoryName { index: index + 1 });
        }

        let threshold =
            Threshold::from_json(&entry.threshold).ok_or_else(|| RuleConfigError::InvalidThreshold {
                category: name.clone(),
                found: entry.threshold.to_string(),
            })?;

        if !seen.insert(threshold) {
            return Err(RuleConfigError::DuplicateThreshold {
                category: name,
                threshold,
            });
        }

        categories.push(RiskCategory { name, threshold });
    }

    if !categories
        .iter()
        .any(|category| category.threshold == Threshold::Floor)
    {
        return Err(RuleConfigError::MissingFloorCategory);
    }

    categories.sort_by(|left, right| right.threshold.cmp(&left.threshold));
    Ok(categories)
}

#[derive(Debug, Error)]
pub enum RuleConfigError {
    #[error("failed to read rule configuration {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("rule configuration is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rule #{rule} targets unknown applicant field '{field}'")]
    UnknownField { rule: usize, field: String },
    #[error("rule #{rule} ({field}) declares no conditions")]
    EmptyRule { rule: usize, field: ApplicantField },
    #[error("rule #{rule} condition #{condition} uses unknown comparison type '{kind}'")]
    UnknownComparison {
        rule: usize,
        condition: usize,
        kind: String,
    },
    #[error("rule #{rule} condition #{condition}: {field} expects {expected}, found {found}")]
    InvalidValue {
        rule: usize,
        condition: usize,
        field: ApplicantField,
        expected: &'static str,
        found: String,
    },
    #[error("rule #{rule} condition #{condition}: {field} only supports equals, found {comparison}")]
    UnsupportedComparison {
        rule: usize,
        condition: usize,
        field: ApplicantField,
        comparison: &'static str,
    },
    #[error("rule #{rule} condition #{condition}: '{label}' is not a {field} label (known: {known})")]
    UnknownLabel {
        rule: usize,
        condition: usize,
        field: ApplicantField,
        label: String,
        known: String,
    },
    #[error("risk_categories must declare at least one category")]
    NoCategories,
    #[error("risk category #{index} has an empty name")]
    EmptyCategoryName { index: usize },
    #[error("risk category '{category}' has invalid threshold {found} (expected an integer or \"-inf\")")]
    InvalidThreshold { category: String, found: String },
    #[error("risk category '{category}' repeats threshold {threshold}")]
    DuplicateThreshold {
        category: String,
        threshold: Threshold,
    },
    #[error("risk_categories must include a floor category with threshold \"-inf\"")]
    MissingFloorCategory,
}
