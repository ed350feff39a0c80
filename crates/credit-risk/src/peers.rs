use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dataset::{HistoricalDataset, PurposeCount};
use crate::domain::{EmploymentLevel, Housing};

/// Half-width of the inclusive age window around the applicant.
pub const AGE_WINDOW_YEARS: u32 = 5;

/// Applicant attributes used to select comparable past applicants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerQuery {
    pub age: u32,
    pub housing: Housing,
    pub job: EmploymentLevel,
}

impl PeerQuery {
    pub fn age_window(&self) -> (u32, u32) {
        (
            self.age.saturating_sub(AGE_WINDOW_YEARS),
            self.age.saturating_add(AGE_WINDOW_YEARS),
        )
    }
}

/// Aggregate outcome of a non-empty peer group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerGroupResult {
    pub peer_count: usize,
    pub default_rate: f64,
    pub purpose_counts: Vec<PurposeCount>,
}

/// Returns `None` when no historical applicant matches; callers treat that as
/// insufficient data rather than a failure.
pub fn analyze_peers(dataset: &HistoricalDataset, query: &PeerQuery) -> Option<PeerGroupResult> {
    let (min_age, max_age) = query.age_window();
    let housing = query.housing.label();
    let job = query.job.dataset_label();

    let cohort = dataset.cohort(|record| {
        (min_age..=max_age).contains(&record.age_years)
            && record.housing == housing
            && record.job == job
    });

    if cohort.is_empty() {
        warn!(
            age = query.age,
            housing,
            job,
            "no historical peers matched the applicant"
        );
        return None;
    }

    let result = PeerGroupResult {
        peer_count: cohort.len(),
        default_rate: cohort.default_rate(),
        purpose_counts: cohort.purpose_counts(),
    };
    debug!(
        peer_count = result.peer_count,
        default_rate = result.default_rate,
        "peer group analysed"
    );
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ROWS: &str = "\
A11 6 A34 A43 1169 A65 A75 4 A93 A101 4 A121 30 A143 A152 2 A173 1 A192 A201 1
A12 48 A32 A43 5951 A61 A73 2 A92 A101 2 A121 40 A143 A152 1 A173 1 A191 A201 2
A14 12 A34 A46 2096 A61 A74 2 A93 A101 3 A121 41 A143 A152 1 A173 2 A191 A201 1
A11 42 A32 A42 7882 A61 A74 2 A93 A103 4 A122 29 A143 A152 1 A173 2 A191 A201 1
A11 24 A33 A40 4870 A61 A73 3 A93 A101 4 A124 35 A143 A151 2 A173 2 A191 A201 2
A11 36 A32 A46 9055 A65 A73 2 A93 A101 4 A124 35 A143 A152 1 A172 2 A192 A201 1
A14 24 A32 A42 2835 A63 A75 3 A93 A101 4 A122 35 A143 A152 1 A174 1 A191 A201 1
";

    fn dataset() -> HistoricalDataset {
        HistoricalDataset::from_reader(Cursor::new(ROWS)).expect("sample parses")
    }

    fn query(age: u32, housing: Housing, job: EmploymentLevel) -> PeerQuery {
        PeerQuery { age, housing, job }
    }

    #[test]
    fn age_window_is_inclusive_on_both_ends() {
        let result = analyze_peers(
            &dataset(),
            &query(35, Housing::Own, EmploymentLevel::Skilled),
        )
        .expect("peers found");

        // Ages 30 and 40 sit on the window edges; 29 and 41 fall outside.
        assert_eq!(result.peer_count, 2);
        assert!((result.default_rate - 0.5).abs() < f64::EPSILON);
        assert_eq!(
            result.purpose_counts,
            vec![PurposeCount {
                purpose: "Radio/TV".to_string(),
                count: 2,
            }]
        );
    }

    #[test]
    fn coarse_job_levels_map_to_dataset_labels() {
        let dataset = dataset();

        let unskilled = analyze_peers(&dataset, &query(35, Housing::Own, EmploymentLevel::Unskilled))
            .expect("unskilled resident peer");
        assert_eq!(unskilled.peer_count, 1);
        assert_eq!(unskilled.purpose_counts[0].purpose, "Education");

        let management =
            analyze_peers(&dataset, &query(35, Housing::Own, EmploymentLevel::Management))
                .expect("management peer");
        assert_eq!(management.peer_count, 1);
        assert_eq!(management.default_rate, 0.0);
    }

    #[test]
    fn housing_must_match_exactly() {
        let renters = analyze_peers(&dataset(), &query(35, Housing::Rent, EmploymentLevel::Skilled))
            .expect("one renter");
        assert_eq!(renters.peer_count, 1);
        assert_eq!(renters.default_rate, 1.0);
    }

    #[test]
    fn empty_cohort_yields_no_result() {
        let dataset = dataset();
        assert!(analyze_peers(&dataset, &query(70, Housing::Own, EmploymentLevel::Skilled)).is_none());
        assert!(
            analyze_peers(&dataset, &query(35, Housing::ForFree, EmploymentLevel::Skilled)).is_none()
        );
    }

    #[test]
    fn window_saturates_for_very_young_ages() {
        let q = query(3, Housing::Own, EmploymentLevel::Skilled);
        assert_eq!(q.age_window(), (0, 8));
        assert!(analyze_peers(&dataset(), &q).is_none());
    }
}
