use crate::commands::{run_assess, run_peers, run_portfolio, AssessArgs, PeerArgs, PortfolioArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_risk::config::DataConfig;
use credit_risk::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "German Credit Risk Analyzer",
    about = "Score applicants and explore the German Credit portfolio from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score one applicant against the rule document and print the explanation
    Assess(AssessArgs),
    /// Summarise historical applicants comparable to the given profile
    Peers(PeerArgs),
    /// Print portfolio KPIs, optionally narrowed by deep-dive filters
    Portfolio(PortfolioArgs),
}

/// Overrides for the rule document and dataset locations.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct DataArgs {
    /// Rule document to load instead of RULES_PATH
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// German Credit data file to load instead of DATASET_PATH
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

impl DataArgs {
    pub(crate) fn apply(self, data: &mut DataConfig) {
        if let Some(rules) = self.rules {
            data.rules_path = rules;
        }
        if let Some(dataset) = self.dataset {
            data.dataset_path = dataset;
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Peers(args) => run_peers(args),
        Command::Portfolio(args) => run_portfolio(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["credit-risk-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn assess_parses_typed_labels() {
        let cli = Cli::try_parse_from([
            "credit-risk-api",
            "assess",
            "--age",
            "24",
            "--credit-amount",
            "15000",
            "--duration",
            "48",
            "--housing",
            "for free",
            "--job",
            "unskilled",
            "--rules",
            "custom/rules.json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Assess(args)) => {
                assert_eq!(args.age, 24);
                assert_eq!(args.housing, credit_risk::Housing::ForFree);
                assert_eq!(args.job, credit_risk::EmploymentLevel::Unskilled);
                assert_eq!(args.data.rules, Some(PathBuf::from("custom/rules.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_housing_is_a_usage_error() {
        let result = Cli::try_parse_from([
            "credit-risk-api",
            "peers",
            "--age",
            "30",
            "--housing",
            "Castle",
            "--job",
            "Skilled",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn data_overrides_replace_configured_paths() {
        let mut data = DataConfig::default();
        DataArgs {
            rules: None,
            dataset: Some(PathBuf::from("fixtures/german.data")),
        }
        .apply(&mut data);

        assert_eq!(data.rules_path, PathBuf::from(DataConfig::DEFAULT_RULES_PATH));
        assert_eq!(data.dataset_path, PathBuf::from("fixtures/german.data"));
    }
}
