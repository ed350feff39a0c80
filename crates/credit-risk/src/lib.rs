//! Credit risk calculator and peer analytics over the UCI German Credit dataset.
//!
//! The rule engine scores an [`domain::Applicant`] against an externally supplied
//! [`scoring::RuleSet`]; the peer analyzer summarises comparable past applicants
//! from a [`dataset::HistoricalDataset`]. Both are pure and share nothing mutable.

pub mod config;
pub mod context;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod peers;
pub mod portfolio;
pub mod router;
pub mod scoring;
pub mod telemetry;

pub use context::CreditContext;
pub use domain::{Applicant, EmploymentLevel, Housing, InputError};
pub use peers::{analyze_peers, PeerGroupResult, PeerQuery};
pub use router::credit_router;
pub use scoring::{assess, AssessmentResult, RiskEngine, RuleSet};
