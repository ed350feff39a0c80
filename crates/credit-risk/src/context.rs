use std::sync::Arc;

use tracing::info;

use crate::config::DataConfig;
use crate::dataset::HistoricalDataset;
use crate::domain::Applicant;
use crate::error::AppError;
use crate::peers::{analyze_peers, PeerGroupResult, PeerQuery};
use crate::portfolio::{FilteredPortfolio, PortfolioOverview, RiskFilter};
use crate::scoring::{AssessmentResult, RiskEngine, RuleSet};

/// Rule set and historical dataset loaded once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct CreditContext {
    engine: RiskEngine,
    dataset: Arc<HistoricalDataset>,
}

impl CreditContext {
    pub fn new(rules: RuleSet, dataset: HistoricalDataset) -> Self {
        Self {
            engine: RiskEngine::new(Arc::new(rules)),
            dataset: Arc::new(dataset),
        }
    }

    /// Fails fast on an unreadable or invalid rule document before touching the dataset.
    pub fn load(config: &DataConfig) -> Result<Self, AppError> {
        let rules = RuleSet::from_path(&config.rules_path)?;
        let dataset = HistoricalDataset::from_path(&config.dataset_path)?;
        info!(
            rules = rules.rules().len(),
            records = dataset.len(),
            "credit context ready"
        );
        Ok(Self::new(rules, dataset))
    }

    pub fn assess(&self, applicant: &Applicant) -> AssessmentResult {
        self.engine.assess(applicant)
    }

    pub fn peers(&self, query: &PeerQuery) -> Option<PeerGroupResult> {
        analyze_peers(&self.dataset, query)
    }

    pub fn overview(&self) -> PortfolioOverview {
        PortfolioOverview::from_dataset(&self.dataset)
    }

    pub fn filter(&self, filter: &RiskFilter) -> FilteredPortfolio {
        filter.apply(&self.dataset)
    }
}
