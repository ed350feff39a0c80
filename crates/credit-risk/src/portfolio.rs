//! Portfolio KPIs and the filtered risk-factor view behind the dashboard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dataset::{AgeBand, Cohort, CreditRecord, HistoricalDataset, PurposeCount, RiskCounts};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioOverview {
    pub record_count: usize,
    pub total_loan_amount: u64,
    pub default_rate: f64,
    pub average_duration_months: f64,
    pub risk_composition: RiskCounts,
    pub purpose_counts: Vec<PurposeCount>,
}

impl PortfolioOverview {
    pub fn from_dataset(dataset: &HistoricalDataset) -> Self {
        let all = dataset.all();
        Self {
            record_count: all.len(),
            total_loan_amount: all.total_credit_amount(),
            default_rate: all.default_rate(),
            average_duration_months: all.average_duration(),
            risk_composition: all.risk_counts(),
            purpose_counts: all.purpose_counts(),
        }
    }
}

/// Deep-dive filters. Ranges are inclusive; an empty allow-list admits every value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskFilter {
    pub age_range: Option<(u32, u32)>,
    pub credit_amount_range: Option<(u32, u32)>,
    pub purposes: Vec<String>,
    pub jobs: Vec<String>,
    pub housing: Vec<String>,
}

impl RiskFilter {
    pub fn admits(&self, record: &CreditRecord) -> bool {
        within(self.age_range, record.age_years)
            && within(self.credit_amount_range, record.credit_amount)
            && allowed(&self.purposes, record.purpose)
            && allowed(&self.jobs, record.job)
            && allowed(&self.housing, record.housing)
    }

    pub fn apply(&self, dataset: &HistoricalDataset) -> FilteredPortfolio {
        FilteredPortfolio::from_cohort(&dataset.cohort(|record| self.admits(record)))
    }
}

fn within(range: Option<(u32, u32)>, value: u32) -> bool {
    range.map_or(true, |(low, high)| (low..=high).contains(&value))
}

fn allowed(options: &[String], value: &str) -> bool {
    options.is_empty() || options.iter().any(|option| option == value)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeBandSummary {
    pub band: AgeBand,
    pub count: usize,
    pub default_rate: f64,
    pub average_payment_pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredPortfolio {
    pub record_count: usize,
    pub risk_distribution: RiskCounts,
    pub default_rate: f64,
    pub age_bands: Vec<AgeBandSummary>,
}

impl FilteredPortfolio {
    fn from_cohort(cohort: &Cohort<'_>) -> Self {
        let mut bands: BTreeMap<AgeBand, Vec<&CreditRecord>> = BTreeMap::new();
        for record in cohort.records() {
            bands.entry(record.age_band()).or_default().push(*record);
        }

        let age_bands = bands
            .into_iter()
            .map(|(band, records)| {
                let count = records.len();
                let bad = records.iter().filter(|record| record.is_bad()).count();
                let pressure: f64 = records.iter().map(|record| record.payment_pressure()).sum();
                AgeBandSummary {
                    band,
                    count,
                    default_rate: bad as f64 / count as f64,
                    average_payment_pressure: pressure / count as f64,
                }
            })
            .collect();

        Self {
            record_count: cohort.len(),
            risk_distribution: cohort.risk_counts(),
            default_rate: cohort.default_rate(),
            age_bands,
        }
    }
}
