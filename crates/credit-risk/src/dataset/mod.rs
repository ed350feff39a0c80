//! Loader and in-memory query surface for the decoded German Credit dataset.

mod columns;
mod features;
mod parser;
mod record;

pub use columns::COLUMN_NAMES;
pub use features::AgeBand;
pub use record::{CreditRecord, Risk};

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read historical dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid historical dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: undocumented code '{code}' in column {column}")]
    UnknownCode {
        line: u64,
        column: &'static str,
        code: String,
    },
    #[error("line {line}: column {column} expects a whole number, found '{value}'")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("historical dataset contains no records")]
    Empty,
}

/// Immutable table of past applicants.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalDataset {
    records: Vec<CreditRecord>,
}

impl HistoricalDataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            records = dataset.len(),
            "loaded historical credit dataset"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let records = parser::parse_records(reader)?;
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[CreditRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn all(&self) -> Cohort<'_> {
        self.cohort(|_| true)
    }

    pub fn cohort<F>(&self, predicate: F) -> Cohort<'_>
    where
        F: Fn(&CreditRecord) -> bool,
    {
        Cohort {
            records: self.records.iter().filter(|record| predicate(record)).collect(),
        }
    }
}

/// Borrowed subset of the dataset with the aggregate queries the dashboards use.
#[derive(Debug, Clone)]
pub struct Cohort<'a> {
    records: Vec<&'a CreditRecord>,
}

impl<'a> Cohort<'a> {
    pub fn records(&self) -> &[&'a CreditRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn narrow<F>(self, predicate: F) -> Cohort<'a>
    where
        F: Fn(&CreditRecord) -> bool,
    {
        Cohort {
            records: self
                .records
                .into_iter()
                .filter(|record| predicate(record))
                .collect(),
        }
    }

    /// Share of records with a bad outcome; 0 for an empty cohort.
    pub fn default_rate(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.risk_counts().bad as f64 / self.records.len() as f64
    }

    pub fn risk_counts(&self) -> RiskCounts {
        let bad = self.records.iter().filter(|record| record.is_bad()).count();
        RiskCounts {
            good: self.records.len() - bad,
            bad,
        }
    }

    /// Loan purposes by frequency, most common first; ties ordered by label.
    pub fn purpose_counts(&self) -> Vec<PurposeCount> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.purpose).or_default() += 1;
        }

        let mut purposes: Vec<PurposeCount> = counts
            .into_iter()
            .map(|(purpose, count)| PurposeCount {
                purpose: purpose.to_string(),
                count,
            })
            .collect();
        purposes.sort_by(|left, right| right.count.cmp(&left.count));
        purposes
    }

    pub fn total_credit_amount(&self) -> u64 {
        self.records
            .iter()
            .map(|record| u64::from(record.credit_amount))
            .sum()
    }

    pub fn average_duration(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let total: u64 = self
            .records
            .iter()
            .map(|record| u64::from(record.duration_months))
            .sum();
        total as f64 / self.records.len() as f64
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskCounts {
    pub good: usize,
    pub bad: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurposeCount {
    pub purpose: String,
    pub count: usize,
}
