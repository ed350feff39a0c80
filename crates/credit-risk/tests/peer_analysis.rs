//! Peer group and portfolio queries over the bundled German Credit sample.

use credit_risk::dataset::{HistoricalDataset, PurposeCount, Risk};
use credit_risk::portfolio::{PortfolioOverview, RiskFilter};
use credit_risk::{analyze_peers, EmploymentLevel, Housing, PeerQuery};

fn dataset() -> HistoricalDataset {
    HistoricalDataset::from_path(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/german_sample.data"
    ))
    .expect("sample dataset loads")
}

#[test]
fn sample_decodes_known_first_row() {
    let dataset = dataset();
    assert_eq!(dataset.len(), 40);

    let first = &dataset.records()[0];
    assert_eq!(first.checking_account_status, "< 0 DM");
    assert_eq!(first.risk, Risk::Good);
}

#[test]
fn skilled_homeowner_in_their_thirties_has_peers() {
    let dataset = dataset();
    let query = PeerQuery {
        age: 35,
        housing: Housing::Own,
        job: EmploymentLevel::Skilled,
    };

    let result = analyze_peers(&dataset, &query).expect("peer group exists");

    assert_eq!(result.peer_count, 7);
    assert_eq!(result.default_rate, 0.0);
    assert_eq!(
        result.purpose_counts,
        vec![
            PurposeCount {
                purpose: "Furniture/Equipment".to_string(),
                count: 3,
            },
            PurposeCount {
                purpose: "Education".to_string(),
                count: 2,
            },
            PurposeCount {
                purpose: "Radio/TV".to_string(),
                count: 1,
            },
            PurposeCount {
                purpose: "Repairs".to_string(),
                count: 1,
            },
        ]
    );
}

#[test]
fn peer_count_matches_a_direct_scan() {
    let dataset = dataset();
    for age in [20, 28, 35, 47, 60, 72] {
        for housing in Housing::ordered() {
            for job in EmploymentLevel::ordered() {
                let query = PeerQuery { age, housing, job };
                let expected = dataset
                    .records()
                    .iter()
                    .filter(|record| {
                        record.age_years + 5 >= age
                            && record.age_years <= age + 5
                            && record.housing == housing.label()
                            && record.job == job.dataset_label()
                    })
                    .count();

                match analyze_peers(&dataset, &query) {
                    Some(result) => {
                        assert_eq!(result.peer_count, expected);
                        assert!((0.0..=1.0).contains(&result.default_rate));
                        let purposes: usize =
                            result.purpose_counts.iter().map(|entry| entry.count).sum();
                        assert_eq!(purposes, expected);
                    }
                    None => assert_eq!(expected, 0, "sentinel returned for {query:?}"),
                }
            }
        }
    }
}

#[test]
fn portfolio_overview_summarises_the_sample() {
    let overview = PortfolioOverview::from_dataset(&dataset());
    assert_eq!(overview.record_count, 40);
    assert_eq!(overview.total_loan_amount, 277_281);
    assert_eq!(overview.risk_composition.bad, 8);
    assert!((overview.default_rate - 0.2).abs() < 1e-9);
}

#[test]
fn deep_dive_filter_restricts_by_housing_and_job() {
    let dataset = dataset();
    let filter = RiskFilter {
        age_range: Some((30, 40)),
        housing: vec!["Own".to_string()],
        jobs: vec!["Skilled".to_string()],
        ..RiskFilter::default()
    };
    let view = filter.apply(&dataset);
    assert_eq!(view.record_count, 7);
    assert_eq!(view.risk_distribution.bad, 0);
}
