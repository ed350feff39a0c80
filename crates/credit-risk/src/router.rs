use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::context::CreditContext;
use crate::domain::{Applicant, InputError};
use crate::error::AppError;
use crate::peers::{PeerGroupResult, PeerQuery};
use crate::portfolio::{FilteredPortfolio, PortfolioOverview, RiskFilter};
use crate::scoring::AssessmentResult;

/// Calculator form as posted by presentation code. Labels are free text and
/// parsed with the same rules as the CLI; unknown ones are a 400.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssessmentRequest {
    pub age: u32,
    pub credit_amount: f64,
    pub duration: u32,
    pub housing: String,
    pub job: String,
}

impl TryFrom<AssessmentRequest> for Applicant {
    type Error = InputError;

    fn try_from(request: AssessmentRequest) -> Result<Self, Self::Error> {
        Ok(Applicant {
            age: request.age,
            credit_amount: request.credit_amount,
            duration: request.duration,
            housing: request.housing.parse()?,
            job: request.job.parse()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PeerRequest {
    pub age: u32,
    pub housing: String,
    pub job: String,
}

impl TryFrom<PeerRequest> for PeerQuery {
    type Error = InputError;

    fn try_from(request: PeerRequest) -> Result<Self, Self::Error> {
        Ok(PeerQuery {
            age: request.age,
            housing: request.housing.parse()?,
            job: request.job.parse()?,
        })
    }
}

/// Peer lookup outcome; an empty cohort is reported as insufficient data, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PeerGroupResponse {
    Ok(PeerGroupResult),
    InsufficientData,
}

impl From<Option<PeerGroupResult>> for PeerGroupResponse {
    fn from(value: Option<PeerGroupResult>) -> Self {
        match value {
            Some(result) => PeerGroupResponse::Ok(result),
            None => PeerGroupResponse::InsufficientData,
        }
    }
}

/// Router builder exposing the calculator and portfolio analytics.
pub fn credit_router(context: Arc<CreditContext>) -> Router {
    Router::new()
        .route("/api/v1/assessments", post(assess_handler))
        .route("/api/v1/peers", post(peers_handler))
        .route("/api/v1/portfolio", get(overview_handler))
        .route("/api/v1/portfolio/filter", post(filter_handler))
        .with_state(context)
}

pub(crate) async fn assess_handler(
    State(context): State<Arc<CreditContext>>,
    Json(request): Json<AssessmentRequest>,
) -> Result<Json<AssessmentResult>, AppError> {
    let applicant = Applicant::try_from(request)?;
    Ok(Json(context.assess(&applicant)))
}

pub(crate) async fn peers_handler(
    State(context): State<Arc<CreditContext>>,
    Json(request): Json<PeerRequest>,
) -> Result<Json<PeerGroupResponse>, AppError> {
    let query = PeerQuery::try_from(request)?;
    Ok(Json(context.peers(&query).into()))
}

pub(crate) async fn overview_handler(
    State(context): State<Arc<CreditContext>>,
) -> Json<PortfolioOverview> {
    Json(context.overview())
}

pub(crate) async fn filter_handler(
    State(context): State<Arc<CreditContext>>,
    Json(filter): Json<RiskFilter>,
) -> Json<FilteredPortfolio> {
    Json(context.filter(&filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmploymentLevel, Housing};

    #[test]
    fn assessment_request_parses_labels_leniently() {
        let request = AssessmentRequest {
            age: 40,
            credit_amount: 2500.0,
            duration: 18,
            housing: "for free".to_string(),
            job: "MANAGEMENT".to_string(),
        };
        let applicant = Applicant::try_from(request).expect("known labels");
        assert_eq!(applicant.housing, Housing::ForFree);
        assert_eq!(applicant.job, EmploymentLevel::Management);
    }

    #[test]
    fn unknown_labels_surface_as_input_errors() {
        let request = PeerRequest {
            age: 30,
            housing: "Own".to_string(),
            job: "Astronaut".to_string(),
        };
        assert_eq!(
            PeerQuery::try_from(request),
            Err(InputError::UnknownEmployment("Astronaut".to_string()))
        );
    }
}
