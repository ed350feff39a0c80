use crate::cli::DataArgs;
use chrono::Local;
use clap::Args;
use credit_risk::config::AppConfig;
use credit_risk::dataset::HistoricalDataset;
use credit_risk::error::AppError;
use credit_risk::portfolio::{FilteredPortfolio, PortfolioOverview, RiskFilter};
use credit_risk::{
    analyze_peers, assess, Applicant, AssessmentResult, EmploymentLevel, Housing,
    PeerGroupResult, PeerQuery, RuleSet,
};
use std::fmt::Write;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Applicant age in years
    #[arg(long)]
    pub(crate) age: u32,
    /// Requested credit amount in DM
    #[arg(long)]
    pub(crate) credit_amount: f64,
    /// Loan duration in months
    #[arg(long)]
    pub(crate) duration: u32,
    /// Housing status: Rent, Own or "For Free"
    #[arg(long)]
    pub(crate) housing: Housing,
    /// Job level: Skilled, Unskilled or Management
    #[arg(long)]
    pub(crate) job: EmploymentLevel,
    /// Print the assessment as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct PeerArgs {
    /// Applicant age in years
    #[arg(long)]
    pub(crate) age: u32,
    /// Housing status: Rent, Own or "For Free"
    #[arg(long)]
    pub(crate) housing: Housing,
    /// Job level: Skilled, Unskilled or Management
    #[arg(long)]
    pub(crate) job: EmploymentLevel,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PortfolioArgs {
    /// Lowest applicant age to include
    #[arg(long)]
    pub(crate) min_age: Option<u32>,
    /// Highest applicant age to include
    #[arg(long)]
    pub(crate) max_age: Option<u32>,
    /// Smallest credit amount to include
    #[arg(long)]
    pub(crate) min_amount: Option<u32>,
    /// Largest credit amount to include
    #[arg(long)]
    pub(crate) max_amount: Option<u32>,
    /// Loan purpose to include (repeatable)
    #[arg(long = "purpose")]
    pub(crate) purposes: Vec<String>,
    /// Dataset job label to include (repeatable)
    #[arg(long = "job")]
    pub(crate) jobs: Vec<String>,
    /// Housing label to include (repeatable)
    #[arg(long)]
    pub(crate) housing: Vec<String>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

impl PortfolioArgs {
    /// Deep-dive filter, or `None` when no filter flag was given.
    fn filter(&self) -> Option<RiskFilter> {
        let filter = RiskFilter {
            age_range: range(self.min_age, self.max_age),
            credit_amount_range: range(self.min_amount, self.max_amount),
            purposes: self.purposes.clone(),
            jobs: self.jobs.clone(),
            housing: self.housing.clone(),
        };
        (filter != RiskFilter::default()).then_some(filter)
    }
}

fn range(low: Option<u32>, high: Option<u32>) -> Option<(u32, u32)> {
    match (low, high) {
        (None, None) => None,
        (low, high) => Some((low.unwrap_or(0), high.unwrap_or(u32::MAX))),
    }
}

fn load_config(data: DataArgs) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    data.apply(&mut config.data);
    Ok(config)
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        age,
        credit_amount,
        duration,
        housing,
        job,
        json,
        data,
    } = args;

    let config = load_config(data)?;
    let rules = RuleSet::from_path(&config.data.rules_path)?;
    let applicant = Applicant {
        age,
        credit_amount,
        duration,
        housing,
        job,
    };
    let result = assess(&applicant, &rules);

    if json {
        println!("{}", assessment_json(&result)?);
    } else {
        print!("{}", render_assessment(&applicant, &result));
    }
    Ok(())
}

pub(crate) fn run_peers(args: PeerArgs) -> Result<(), AppError> {
    let PeerArgs {
        age,
        housing,
        job,
        data,
    } = args;

    let config = load_config(data)?;
    let dataset = HistoricalDataset::from_path(&config.data.dataset_path)?;
    let query = PeerQuery { age, housing, job };
    let result = analyze_peers(&dataset, &query);

    print!("{}", render_peers(&query, result.as_ref()));
    Ok(())
}

pub(crate) fn run_portfolio(mut args: PortfolioArgs) -> Result<(), AppError> {
    let filter = args.filter();
    let config = load_config(std::mem::take(&mut args.data))?;
    let dataset = HistoricalDataset::from_path(&config.data.dataset_path)?;

    println!(
        "Portfolio snapshot ({})",
        Local::now().format("%Y-%m-%d %H:%M")
    );
    print!(
        "{}",
        render_overview(&PortfolioOverview::from_dataset(&dataset))
    );
    if let Some(filter) = filter {
        print!("{}", render_filtered(&filter.apply(&dataset)));
    }
    Ok(())
}

pub(crate) fn assessment_json(result: &AssessmentResult) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(result)?)
}

pub(crate) fn render_assessment(applicant: &Applicant, result: &AssessmentResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Risk assessment for a {}-year-old ({}, {}) requesting {:.0} DM over {} months",
        applicant.age,
        applicant.housing,
        applicant.job,
        applicant.credit_amount,
        applicant.duration
    );
    let _ = writeln!(out, "- Score: {} points", result.score);
    let _ = writeln!(out, "- Category: {}", result.category);
    let _ = writeln!(out, "Explanation:");
    for line in &result.explanation {
        let _ = writeln!(out, "  {line}");
    }
    out
}

pub(crate) fn render_peers(query: &PeerQuery, result: Option<&PeerGroupResult>) -> String {
    let (min_age, max_age) = query.age_window();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Peer group: age {}-{}, {}, {}",
        min_age, max_age, query.housing, query.job
    );

    let Some(result) = result else {
        let _ = writeln!(out, "- Not enough historical data for this profile");
        return out;
    };

    let _ = writeln!(
        out,
        "- {} comparable applicants | {:.1}% defaulted",
        result.peer_count,
        result.default_rate * 100.0
    );
    let _ = writeln!(out, "Loan purposes:");
    for entry in &result.purpose_counts {
        let _ = writeln!(out, "  - {}: {}", entry.purpose, entry.count);
    }
    out
}

pub(crate) fn render_overview(overview: &PortfolioOverview) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "- {} loans | {} DM total | {:.1}% default rate | {:.1} months average duration",
        overview.record_count,
        overview.total_loan_amount,
        overview.default_rate * 100.0,
        overview.average_duration_months
    );
    let _ = writeln!(
        out,
        "- Risk composition: {} good / {} bad",
        overview.risk_composition.good, overview.risk_composition.bad
    );
    let _ = writeln!(out, "Top loan purposes:");
    for entry in overview.purpose_counts.iter().take(5) {
        let _ = writeln!(out, "  - {}: {}", entry.purpose, entry.count);
    }
    out
}

pub(crate) fn render_filtered(view: &FilteredPortfolio) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nFiltered view");
    if view.record_count == 0 {
        let _ = writeln!(out, "- No loans match the selected filters");
        return out;
    }
    let _ = writeln!(
        out,
        "- {} loans | {} good / {} bad | {:.1}% default rate",
        view.record_count,
        view.risk_distribution.good,
        view.risk_distribution.bad,
        view.default_rate * 100.0
    );
    let _ = writeln!(out, "By age band:");
    for band in &view.age_bands {
        let _ = writeln!(
            out,
            "  - {}: {} loans | {:.1}% default | {:.1} DM per month",
            band.band.label(),
            band.count,
            band.default_rate * 100.0,
            band.average_payment_pressure
        );
    }
    out
}
