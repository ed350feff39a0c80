//! Point-based risk calculator driven by an external rule document.

mod category;
mod config;
mod rules;


pub use category::{RiskCategory, Threshold};
pub use config::{
    ApplicantField, Comparison, Condition, Operand, Rule, RuleConfigError, RuleSet,
};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Applicant;

/// Stateless calculator that applies a shared rule set to applicants.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    rules: Arc<RuleSet>,
}

impl RiskEngine {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn assess(&self, applicant: &Applicant) -> AssessmentResult {
        assess(applicant, &self.rules)
    }
}

/// Condition that fired during an assessment, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiredCondition {
    pub field: ApplicantField,
    pub label: String,
    pub points: i64,
    pub running_score: i64,
}

impl FiredCondition {
    fn trace_line(&self) -> String {
        format!(
            "{} ({:+} points). Current Score: {}",
            self.label, self.points, self.running_score
        )
    }
}

/// Score, band and the ordered audit trail shown to the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub score: i64,
    pub category: String,
    pub explanation: Vec<String>,
    pub fired: Vec<FiredCondition>,
}

pub fn assess(applicant: &Applicant, rule_set: &RuleSet) -> AssessmentResult {
    let (score, fired) = rules::score_applicant(applicant, rule_set);

    let category = category::select_category(rule_set.categories(), score)
        .map(|category| category.name.clone())
        .unwrap_or_default();

    let mut explanation = Vec::with_capacity(fired.len() + 2);
    explanation.push(format!("Base Score: {} points", rule_set.base_score()));
    explanation.extend(fired.iter().map(FiredCondition::trace_line));
    explanation.push(format!("Final Score: {score} -> {category}"));

    debug!(
        score,
        category = %category,
        fired = fired.len(),
        "risk assessment computed"
    );

    AssessmentResult {
        score,
        category,
        explanation,
        fired,
    }
}
